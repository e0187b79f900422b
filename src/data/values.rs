use crate::foundation::error::{FunnelError, FunnelResult};

/// Funnel input values.
///
/// `Flat` holds one value per stage. `Nested` holds, per stage, one value per
/// sub-segment; every stage must have the same number of sub-segments.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum FunnelValues {
    /// 1-D data: one value per stage.
    Flat(Vec<f64>),
    /// 2-D data: one inner sequence of segment values per stage.
    Nested(Vec<Vec<f64>>),
}

impl FunnelValues {
    /// Whether this is 2-D (segmented) data.
    pub fn is_2d(&self) -> bool {
        matches!(self, Self::Nested(_))
    }

    /// Number of stages.
    pub fn stage_count(&self) -> usize {
        match self {
            Self::Flat(v) => v.len(),
            Self::Nested(v) => v.len(),
        }
    }

    /// Number of sub-segments per stage (1 for 1-D data).
    pub fn sub_count(&self) -> usize {
        match self {
            Self::Flat(_) => 1,
            Self::Nested(v) => v.first().map_or(0, Vec::len),
        }
    }

    /// Total per stage: the raw value in 1-D, the sum of the segments in 2-D.
    pub fn stage_totals(&self) -> Vec<f64> {
        match self {
            Self::Flat(v) => v.clone(),
            Self::Nested(v) => v.iter().map(|stage| stage.iter().sum()).collect(),
        }
    }

    /// Reject shapes the geometry and color layers cannot handle.
    ///
    /// Negative and non-finite numbers are rejected rather than clamped.
    pub fn validate(&self) -> FunnelResult<()> {
        if self.stage_count() == 0 {
            return Err(FunnelError::validation("values must contain at least one stage"));
        }

        match self {
            Self::Flat(v) => {
                for (i, &x) in v.iter().enumerate() {
                    check_value(x, || format!("values[{i}]"))?;
                }
            }
            Self::Nested(stages) => {
                let width = self.sub_count();
                if width == 0 {
                    return Err(FunnelError::validation(
                        "2-D values must have at least one segment per stage",
                    ));
                }
                for (i, stage) in stages.iter().enumerate() {
                    if stage.len() != width {
                        return Err(FunnelError::validation(format!(
                            "2-D values must have equal cardinality: stage 0 has {width} segments, stage {i} has {}",
                            stage.len()
                        )));
                    }
                    for (j, &x) in stage.iter().enumerate() {
                        check_value(x, || format!("values[{i}][{j}]"))?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn check_value(x: f64, at: impl FnOnce() -> String) -> FunnelResult<()> {
    if !x.is_finite() {
        return Err(FunnelError::validation(format!("{} must be finite", at())));
    }
    if x < 0.0 {
        return Err(FunnelError::validation(format!(
            "{} must be >= 0 (got {x})",
            at()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/data/values.rs"]
mod tests;
