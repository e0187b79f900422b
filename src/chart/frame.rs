use crate::animation::labels::LabelPhase;
use crate::chart::orchestrator::PathSet;
use crate::foundation::core::{Canvas, Direction};
use crate::paint::fill::ColorSet;

use std::sync::Arc;

/// Share of one sub-segment within a stage.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SegmentShare {
    /// Sub-label title.
    pub title: String,
    /// Rounded percentage of the stage total.
    pub percent: u32,
}

/// Everything shown in one stage label.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LabelView {
    /// Stable label key.
    pub key: String,
    /// Stage title, when labels were given.
    pub title: Option<String>,
    /// Formatted stage value (`12,000`).
    pub value: String,
    /// Percentage of the first stage; `None` when hidden or 100.
    pub percentage: Option<u32>,
    /// Per-sub-segment shares (2-D data with sub labels only).
    pub segments: Vec<SegmentShare>,
    /// Enter/leave phase.
    pub phase: LabelPhase,
    /// Current opacity in `[0, 1]`.
    pub opacity: f64,
}

/// One entry of the sub-label legend.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SubLabelView {
    /// Sub-label title.
    pub title: String,
    /// Inline CSS for the color swatch.
    pub background: String,
}

/// The sub-label legend block.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LegendView {
    /// Legend entries in segment order.
    pub entries: Vec<SubLabelView>,
    /// Enter/leave phase of the whole block.
    pub phase: LabelPhase,
    /// Current opacity in `[0, 1]`.
    pub opacity: f64,
}

/// A renderable view of the chart at one instant.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartFrame {
    /// Drawing surface.
    pub canvas: Canvas,
    /// Chart orientation.
    pub direction: Direction,
    /// Gradient rotation.
    pub gradient_direction: Direction,
    /// Rendered segment paths.
    pub paths: Arc<PathSet>,
    /// Fills index-aligned with `paths`, plus gradient definitions.
    pub colors: ColorSet,
    /// Stage labels; leaving labels follow the visible ones.
    pub labels: Vec<LabelView>,
    /// Sub-label legend, present for 2-D data and while fading out.
    pub legend: Option<LegendView>,
}

impl ChartFrame {
    /// Whether stages flow top to bottom.
    pub fn is_vertical(&self) -> bool {
        self.direction == Direction::Vertical
    }
}
