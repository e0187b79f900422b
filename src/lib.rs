//! funnelgraph renders animated funnel charts.
//!
//! A chart turns a configuration (`FunnelConfig`) into segment paths, one per
//! funnel region, and morphs between path sets when the data changes.
//!
//! # Pipeline overview
//!
//! 1. **Lay out**: `FunnelValues + Canvas + Direction -> FunnelGeometry` (stage boundaries)
//! 2. **Draw**: `FunnelGeometry -> PathSet` (one closed `kurbo::BezPath` per segment)
//! 3. **Animate**: previous `PathSet -> target PathSet` over a 700 ms cubic tween
//! 4. **Render**: `ChartFrame -> SVG / HTML / PNG`
//!
//! Time never comes from a clock inside the crate: hosts pass a monotonic
//! `Duration` to [`FunnelChart::update`] and [`FunnelChart::tick`], which keeps
//! every frame reproducible.
//!
//! # Data shapes
//!
//! - **1-D** values (`[12000, 5700, 930]`) render a single region whose colors form
//!   one shared gradient.
//! - **2-D** values (`[[3000, 2500, 6500], ...]`) render one layer per sub-segment,
//!   each with its own solid or gradient fill.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod chart;
mod data;
mod foundation;
mod geometry;
mod paint;
mod render;

/// Canned datasets and toggles of the demo page.
pub mod demo;

pub use animation::ease::Ease;
pub use animation::labels::{LabelEntry, LabelPhase, LabelTransitions, label_key};
pub use animation::morph::{MorphOptions, PathInterpolator, PathMorph, ShapeInterpolator};
pub use animation::tween::{AnimationSettings, TRANSITION_DURATION, Tween, TweenState};
pub use chart::config::FunnelConfig;
pub use chart::frame::{ChartFrame, LabelView, LegendView, SegmentShare, SubLabelView};
pub use chart::funnel_chart::{ChangeSet, FunnelChart, LEGEND_KEY};
pub use chart::orchestrator::{
    PathSet, Phase, SnapshotHandler, TransitionOrchestrator, select_origin,
};
pub use data::color::{
    ColorSpec, ColorToken, DEFAULT_PALETTE_SEED, DefaultPalette, STOCK_COLORS, legend_background,
    resolve_colors,
};
pub use data::percent::{compute_2d_percentages, compute_percentages, format_number};
pub use data::values::FunnelValues;
pub use foundation::core::{BezPath, Canvas, Direction, Fps, Origin, Point, Rect, Vec2};
pub use foundation::error::{FunnelError, FunnelResult};
pub use geometry::PathSynthesizer;
pub use geometry::funnel::FunnelGeometry;
pub use geometry::svg_path::to_svg_d;
pub use paint::fill::{
    ColorSet, FillClassifier, FillMode, GRADIENT_ID_PREFIX, GradientDef, GradientStop,
    SegmentFill, gradient_angle, stop_offset,
};
pub use render::markup::{escape_html, render_html};
pub use render::raster::{RasterImage, rasterize, rasterize_png};
pub use render::svg::{PATH_PRECISION, render_svg};
