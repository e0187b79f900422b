//! Output of chart frames: SVG documents, HTML markup, and PNG images.

pub(crate) mod markup;
pub(crate) mod raster;
pub(crate) mod svg;
