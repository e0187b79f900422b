//! Canned datasets and the interactive toggles of the demo page.

use crate::chart::config::FunnelConfig;
use crate::data::color::{ColorSpec, ColorToken};
use crate::data::values::FunnelValues;
use crate::foundation::core::Direction;
use crate::foundation::error::{FunnelError, FunnelResult};

/// Number of canned datasets.
pub const DATA_SET_COUNT: usize = 6;

/// Labels, values and colors of one canned dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct DataSet {
    /// Stage titles.
    pub labels: Vec<String>,
    /// Sub-segment titles (2-D sets only).
    pub sub_labels: Vec<String>,
    /// Stage values.
    pub values: FunnelValues,
    /// Segment colors.
    pub colors: Vec<ColorSpec>,
}

fn strings(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| (*s).to_owned()).collect()
}

fn solids(tokens: &[&str]) -> FunnelResult<Vec<ColorSpec>> {
    tokens
        .iter()
        .map(|t| ColorToken::parse(t).map(ColorSpec::Solid))
        .collect()
}

fn gradients(specs: &[&[&str]]) -> FunnelResult<Vec<ColorSpec>> {
    specs
        .iter()
        .map(|stops| {
            let tokens = stops
                .iter()
                .map(ColorToken::parse)
                .collect::<FunnelResult<Vec<_>>>()?;
            ColorSpec::from_tokens(tokens)
        })
        .collect()
}

const STAGES: [&str; 3] = ["Impressions", "Add To Cart", "Buy"];

/// Dataset `n` (1-based).
pub fn data_set(n: usize) -> FunnelResult<DataSet> {
    let set = match n {
        1 => DataSet {
            labels: strings(&STAGES),
            sub_labels: Vec::new(),
            values: FunnelValues::Flat(vec![12000.0, 4700.0, 930.0]),
            colors: solids(&["#FFB178", "#FF3C8E"])?,
        },
        2 => DataSet {
            labels: strings(&STAGES),
            sub_labels: Vec::new(),
            values: FunnelValues::Flat(vec![14000.0, 9100.0, 1230.0]),
            colors: solids(&["#A0BBFF", "#EC77FF"])?,
        },
        3 => DataSet {
            labels: strings(&STAGES),
            sub_labels: strings(&["Direct", "Social Media", "Ads"]),
            values: FunnelValues::Nested(vec![
                vec![3000.0, 2500.0, 6500.0],
                vec![3000.0, 1700.0, 1000.0],
                vec![600.0, 200.0, 130.0],
            ]),
            colors: gradients(&[
                &["#FFB178", "#FF78B1", "#FF3C8E"],
                &["#A0BBFF", "#EC77FF"],
                &["#A0F9FF", "#7795FF"],
            ])?,
        },
        4 => DataSet {
            labels: strings(&["Impressions", "Add To Cart", "Buy", "Return"]),
            sub_labels: Vec::new(),
            values: FunnelValues::Flat(vec![14000.0, 9100.0, 4230.0, 260.0]),
            colors: solids(&["#FF4589", "#FF5050"])?,
        },
        5 => DataSet {
            labels: strings(&STAGES),
            sub_labels: Vec::new(),
            values: FunnelValues::Flat(vec![12650.0, 4230.0, 263.0]),
            colors: solids(&["#FF9A9A", "#FFB178"])?,
        },
        6 => DataSet {
            labels: strings(&STAGES),
            sub_labels: strings(&["Direct", "Social Media", "Ads", "Other"]),
            values: FunnelValues::Nested(vec![
                vec![3000.0, 2500.0, 2000.0, 4500.0],
                vec![3000.0, 1700.0, 500.0, 500.0],
                vec![600.0, 200.0, 100.0, 30.0],
            ]),
            colors: gradients(&[
                &["#A0BBFF", "#EC77FF"],
                &["#FFB178", "#FF78B1", "#FF3C8E"],
                &["#A0F9FF", "#7795FF"],
            ])?,
        },
        other => {
            return Err(FunnelError::validation(format!(
                "no demo dataset {other} (expected 1..={DATA_SET_COUNT})"
            )));
        }
    };
    Ok(set)
}

/// Holds the demo page state and produces the configuration to feed a chart.
#[derive(Clone, Debug, PartialEq)]
pub struct DemoHarness {
    config: FunnelConfig,
    data_set: usize,
}

impl DemoHarness {
    /// Initial state: horizontal 800x300, values `[12000, 5700, 930]`, animated.
    pub fn new() -> FunnelResult<Self> {
        let config = FunnelConfig::new(
            800.0,
            300.0,
            FunnelValues::Flat(vec![12000.0, 5700.0, 930.0]),
        )
        .with_labels(STAGES)
        .with_colors(solids(&["#FFB178", "#FF3C8E"])?)
        .with_animated(true);
        Ok(Self {
            config,
            data_set: 1,
        })
    }

    /// Configuration for the current state.
    pub fn config(&self) -> &FunnelConfig {
        &self.config
    }

    /// Number of the dataset most recently selected (1-based).
    pub fn data_set_num(&self) -> usize {
        self.data_set
    }

    /// Load dataset `n`, keeping size and directions.
    pub fn use_data_set(&mut self, n: usize) -> FunnelResult<&FunnelConfig> {
        let set = data_set(n)?;
        self.config.labels = set.labels;
        self.config.sub_labels = set.sub_labels;
        self.config.values = set.values;
        self.config.colors = set.colors;
        self.data_set = n;
        Ok(&self.config)
    }

    /// Advance to the next dataset, wrapping after the last one.
    pub fn next_set(&mut self) -> FunnelResult<&FunnelConfig> {
        let next = if self.data_set >= DATA_SET_COUNT {
            1
        } else {
            self.data_set + 1
        };
        self.use_data_set(next)
    }

    /// Swap between horizontal 800x300 and vertical 400x500; the gradient
    /// direction follows.
    pub fn toggle_direction(&mut self) -> &FunnelConfig {
        let (direction, width, height) = match self.config.direction {
            Direction::Horizontal => (Direction::Vertical, 400.0, 500.0),
            Direction::Vertical => (Direction::Horizontal, 800.0, 300.0),
        };
        self.config.direction = direction;
        self.config.gradient_direction = direction;
        self.config.width = width;
        self.config.height = height;
        &self.config
    }

    /// Flip the gradient direction only.
    pub fn toggle_gradient(&mut self) -> &FunnelConfig {
        self.config.gradient_direction = self.config.gradient_direction.flipped();
        &self.config
    }
}

#[cfg(test)]
#[path = "../tests/unit/demo.rs"]
mod tests;
