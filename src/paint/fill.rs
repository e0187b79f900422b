use crate::data::color::{ColorSpec, ColorToken};
use crate::foundation::core::Direction;

/// How a segment is filled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    /// One flat color.
    Solid,
    /// A linear gradient defined in `<defs>`.
    Gradient,
}

/// Classified fill for one segment.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SegmentFill {
    /// The resolved colors of the segment.
    pub spec: ColorSpec,
    /// Solid or gradient.
    pub mode: FillMode,
    /// Value for the `fill`/`stroke` attributes: the color itself, or a gradient reference.
    pub fill: String,
}

/// One gradient stop.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct GradientStop {
    /// Stop color.
    pub color: ColorToken,
    /// Stop offset, e.g. `"50%"`.
    pub offset: String,
}

/// A `<linearGradient>` definition referenced by gradient-mode segments.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct GradientDef {
    /// Element id, `funnelGradient-{n}`.
    pub id: String,
    /// Evenly spaced stops.
    pub stops: Vec<GradientStop>,
}

/// Prefix of gradient element ids.
pub const GRADIENT_ID_PREFIX: &str = "funnelGradient-";

/// Offset of stop `index` out of `count`: `round(100 * index / (count - 1))%`.
pub fn stop_offset(index: usize, count: usize) -> String {
    if count < 2 {
        return "0%".to_owned();
    }
    let pct = (100.0 * index as f64 / (count - 1) as f64).round() as u32;
    format!("{pct}%")
}

/// `gradientTransform` for a gradient direction.
pub fn gradient_angle(direction: Direction) -> &'static str {
    match direction {
        Direction::Vertical => "rotate(90)",
        Direction::Horizontal => "rotate(0)",
    }
}

/// Classifies segments in rendering order and collects their gradient definitions.
///
/// Gradient ids count only gradient-mode segments, so they stay dense when solid
/// segments are interspersed.
#[derive(Debug, Default)]
pub struct FillClassifier {
    gradients: Vec<GradientDef>,
}

impl FillClassifier {
    /// A classifier with an empty gradient set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify the next segment.
    pub fn classify(&mut self, spec: &ColorSpec) -> SegmentFill {
        let tokens = spec.tokens();
        if let [only] = tokens {
            return SegmentFill {
                spec: spec.clone(),
                mode: FillMode::Solid,
                fill: only.to_string(),
            };
        }

        let n = self.gradients.len() + 1;
        let id = format!("{GRADIENT_ID_PREFIX}{n}");
        let stops = tokens
            .iter()
            .enumerate()
            .map(|(i, color)| GradientStop {
                color: color.clone(),
                offset: stop_offset(i, tokens.len()),
            })
            .collect();
        let fill = format!("url(#{id})");
        self.gradients.push(GradientDef { id, stops });

        SegmentFill {
            spec: spec.clone(),
            mode: FillMode::Gradient,
            fill,
        }
    }

    /// Gradients collected so far, in rendering order.
    pub fn gradients(&self) -> &[GradientDef] {
        &self.gradients
    }

    /// Consume the classifier, returning its gradient set.
    pub fn into_gradients(self) -> Vec<GradientDef> {
        self.gradients
    }
}

/// Classified fills for a whole path set plus the gradients they reference.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ColorSet {
    /// One fill per segment, index-aligned with the path set.
    pub fills: Vec<SegmentFill>,
    /// Gradient-mode subsequence, as `<defs>` entries.
    pub gradients: Vec<GradientDef>,
}

impl ColorSet {
    /// Classify `specs` in order.
    pub fn classify_all(specs: &[ColorSpec]) -> Self {
        let mut classifier = FillClassifier::new();
        let fills = specs.iter().map(|s| classifier.classify(s)).collect();
        Self {
            fills,
            gradients: classifier.into_gradients(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/paint/fill.rs"]
mod tests;
