use crate::foundation::error::{FunnelError, FunnelResult};

use anyhow::Context as _;
use std::path::Path;

/// A rasterized chart: straight (non-premultiplied) RGBA8 pixels, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub data: Vec<u8>,
}

/// Rasterize an SVG document at its intrinsic size.
///
/// `background` is painted first; without it the image is transparent.
pub fn rasterize(svg: &str, background: Option<[u8; 4]>) -> FunnelResult<RasterImage> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &opts).context("parse svg tree")?;

    let size = tree.size();
    let width = to_px(size.width())?;
    let height = to_px(size.height())?;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| FunnelError::geometry("failed to allocate svg pixmap"))?;
    if let Some([r, g, b, a]) = background {
        pixmap.fill(resvg::tiny_skia::Color::from_rgba8(r, g, b, a));
    }

    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );

    let mut data = pixmap.take();
    demultiply_rgba8_in_place(&mut data);
    tracing::debug!(width, height, "rasterized svg");
    Ok(RasterImage {
        width,
        height,
        data,
    })
}

/// Rasterize an SVG document and write it as a PNG file.
pub fn rasterize_png(
    svg: &str,
    path: impl AsRef<Path>,
    background: Option<[u8; 4]>,
) -> FunnelResult<()> {
    let path = path.as_ref();
    let image = rasterize(svg, background)?;
    image::save_buffer_with_format(
        path,
        &image.data,
        image.width,
        image.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn to_px(v: f32) -> FunnelResult<u32> {
    if !v.is_finite() || v <= 0.0 {
        return Err(FunnelError::geometry("svg has invalid width/height"));
    }
    Ok((v.ceil() as u32).max(1))
}

fn demultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
