use crate::foundation::error::{FunnelError, FunnelResult};

pub use kurbo::{BezPath, Point, Rect, Vec2};

use std::time::Duration;

/// Drawing surface size in user units (SVG pixels).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width of the chart.
    pub width: f64,
    /// Height of the chart.
    pub height: f64,
}

impl Canvas {
    /// Build a canvas, rejecting zero, negative, or non-finite sizes.
    pub fn new(width: f64, height: f64) -> FunnelResult<Self> {
        for (name, v) in [("width", width), ("height", height)] {
            if !v.is_finite() || v <= 0.0 {
                return Err(FunnelError::validation(format!(
                    "canvas {name} must be finite and > 0 (got {v})"
                )));
            }
        }
        Ok(Self { width, height })
    }

    /// Length of the main axis (the one stages are laid out along).
    pub fn main_axis(self, direction: Direction) -> f64 {
        match direction {
            Direction::Horizontal => self.width,
            Direction::Vertical => self.height,
        }
    }

    /// Length of the cross axis (the one values are measured along).
    pub fn cross_axis(self, direction: Direction) -> f64 {
        match direction {
            Direction::Horizontal => self.height,
            Direction::Vertical => self.width,
        }
    }
}

/// Axis orientation, used both for the chart and for gradient rotation.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Stages flow left to right.
    #[default]
    Horizontal,
    /// Stages flow top to bottom.
    Vertical,
}

impl Direction {
    /// The other orientation.
    pub fn flipped(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Lower-case name, as used in configuration and CSS class names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = FunnelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" | "h" => Ok(Self::Horizontal),
            "vertical" | "v" => Ok(Self::Vertical),
            other => Err(FunnelError::validation(format!(
                "unknown direction '{other}' (expected horizontal or vertical)"
            ))),
        }
    }
}

/// Unit-square anchor used to bias a shape morph.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Origin {
    /// 0 = left edge, 1 = right edge.
    pub x: f64,
    /// 0 = top edge, 1 = bottom edge.
    pub y: f64,
}

impl Origin {
    /// Center of the bounding box.
    pub const CENTER: Self = Self { x: 0.5, y: 0.5 };

    /// Build an origin; both coordinates are clamped into `[0, 1]`.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: x.clamp(0.0, 1.0),
            y: y.clamp(0.0, 1.0),
        }
    }

    /// Resolve this anchor against a bounding box.
    pub fn resolve(self, bbox: Rect) -> Point {
        Point::new(
            bbox.x0 + self.x * bbox.width(),
            bbox.y0 + self.y * bbox.height(),
        )
    }
}

/// Frame rate used by hosts that drive the chart on a fixed clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Frames per `den` seconds.
    pub num: u32,
    /// Must be > 0.
    pub den: u32,
}

impl Fps {
    /// Build a frame rate of `num / den` frames per second.
    pub fn new(num: u32, den: u32) -> FunnelResult<Self> {
        if den == 0 {
            return Err(FunnelError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(FunnelError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Timestamp of frame `index` when frame 0 is at `start`.
    pub fn frame_time(self, start: Duration, index: u64) -> Duration {
        start + Duration::from_secs_f64((index as f64) * f64::from(self.den) / f64::from(self.num))
    }

    /// Number of whole frames needed to cover `span` (at least one).
    pub fn frames_covering(self, span: Duration) -> u64 {
        let num = span.as_nanos() * u128::from(self.num);
        let den = 1_000_000_000u128 * u128::from(self.den);
        (num.div_ceil(den) as u64).max(1)
    }
}

pub(crate) mod dimension {
    //! Serde adapter for sizes given either as numbers or as numeric strings.

    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Num(f64),
        Text(String),
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match Repr::deserialize(deserializer)? {
            Repr::Num(v) => Ok(v),
            Repr::Text(s) => {
                let trimmed = s.trim();
                let trimmed = trimmed.strip_suffix("px").unwrap_or(trimmed);
                trimmed
                    .parse::<f64>()
                    .map_err(|_| serde::de::Error::custom(format!("invalid size \"{s}\"")))
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
