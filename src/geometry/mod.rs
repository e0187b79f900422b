//! Funnel path geometry.
//!
//! The orchestrator only talks to [`PathSynthesizer`]; [`funnel::FunnelGeometry`]
//! is the built-in implementation on top of `kurbo` paths.

use crate::foundation::core::BezPath;
use crate::foundation::error::FunnelResult;

pub(crate) mod funnel;
pub(crate) mod svg_path;

/// Source of segment geometry for one chart configuration.
pub trait PathSynthesizer {
    /// One closed path per segment, in rendering order.
    fn path_definitions(&self) -> FunnelResult<Vec<BezPath>>;

    /// A thin sliver along the middle of segment `index`, used as the morph source
    /// when no structurally matching previous path exists.
    fn path_median(&self, index: usize) -> FunnelResult<BezPath>;

    /// Number of stages the paths were laid out for.
    fn stage_count(&self) -> usize;

    /// Whether the data is 2-D.
    fn is_2d(&self) -> bool;

    /// Whether stages flow top to bottom.
    fn is_vertical(&self) -> bool;
}
