use crate::animation::tween::AnimationSettings;
use crate::data::color::ColorSpec;
use crate::data::values::FunnelValues;
use crate::foundation::core::{Canvas, Direction, dimension};
use crate::foundation::error::{FunnelError, FunnelResult};

use std::path::Path;

/// Everything a host can set on a chart.
///
/// JSON field names are camelCase; `width` and `height` accept numbers or
/// numeric strings such as `"800"` or `"800px"`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelConfig {
    /// Morph paths and fade labels on value changes.
    #[serde(default)]
    pub animated: bool,
    /// Chart width in SVG units.
    #[serde(deserialize_with = "dimension::deserialize")]
    pub width: f64,
    /// Chart height in SVG units.
    #[serde(deserialize_with = "dimension::deserialize")]
    pub height: f64,
    /// Stage values, 1-D or 2-D.
    pub values: FunnelValues,
    /// One title per stage (optional).
    #[serde(default)]
    pub labels: Vec<String>,
    /// Segment colors; missing entries come from the default palette.
    #[serde(default)]
    pub colors: Vec<ColorSpec>,
    /// One title per sub-segment for 2-D data (optional).
    #[serde(default)]
    pub sub_labels: Vec<String>,
    /// Chart orientation.
    #[serde(default)]
    pub direction: Direction,
    /// Gradient rotation, independent from the chart orientation.
    #[serde(default)]
    pub gradient_direction: Direction,
    /// Show stage percentages in labels.
    #[serde(default = "display_percentage_default")]
    pub display_percentage: bool,
    /// Transition timing.
    #[serde(default)]
    pub animation: AnimationSettings,
}

fn display_percentage_default() -> bool {
    true
}

impl FunnelConfig {
    /// A configuration with default styling.
    pub fn new(width: f64, height: f64, values: FunnelValues) -> Self {
        Self {
            animated: false,
            width,
            height,
            values,
            labels: Vec::new(),
            colors: Vec::new(),
            sub_labels: Vec::new(),
            direction: Direction::Horizontal,
            gradient_direction: Direction::Horizontal,
            display_percentage: true,
            animation: AnimationSettings::default(),
        }
    }

    /// Set stage titles.
    pub fn with_labels<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Set sub-segment titles.
    pub fn with_sub_labels<S: Into<String>>(
        mut self,
        labels: impl IntoIterator<Item = S>,
    ) -> Self {
        self.sub_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Set segment colors.
    pub fn with_colors(mut self, colors: Vec<ColorSpec>) -> Self {
        self.colors = colors;
        self
    }

    /// Set chart orientation.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set gradient rotation.
    pub fn with_gradient_direction(mut self, direction: Direction) -> Self {
        self.gradient_direction = direction;
        self
    }

    /// Enable or disable transitions.
    pub fn with_animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    /// Read and validate a JSON configuration.
    pub fn from_reader<R: std::io::Read>(r: R) -> FunnelResult<Self> {
        let config: Self = serde_json::from_reader(r)
            .map_err(|e| FunnelError::serde(format!("failed to parse funnel config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> FunnelResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            FunnelError::Other(anyhow::anyhow!("open '{}': {e}", path.display()))
        })?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Drawing surface for `width` x `height`.
    pub fn canvas(&self) -> FunnelResult<Canvas> {
        Canvas::new(self.width, self.height)
    }

    /// Check sizes, values, labels and colors.
    pub fn validate(&self) -> FunnelResult<()> {
        self.canvas()?;
        self.values.validate()?;

        let stages = self.values.stage_count();
        if !self.labels.is_empty() && self.labels.len() != stages {
            return Err(FunnelError::validation(format!(
                "{} labels given for {stages} stages",
                self.labels.len()
            )));
        }

        if self.values.is_2d() {
            let subs = self.values.sub_count();
            if !self.sub_labels.is_empty() && self.sub_labels.len() != subs {
                return Err(FunnelError::validation(format!(
                    "{} sub labels given for {subs} sub-segments",
                    self.sub_labels.len()
                )));
            }
        } else if self.colors.iter().any(|c| matches!(c, ColorSpec::Stops(_))) {
            return Err(FunnelError::validation(
                "nested color lists require 2-D values",
            ));
        }

        if self.colors.iter().any(|c| c.tokens().is_empty()) {
            return Err(FunnelError::validation(
                "color spec must have at least one color",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/config.rs"]
mod tests;
