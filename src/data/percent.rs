use crate::data::values::FunnelValues;
use crate::foundation::math::percent_of;

/// Overall percentage per stage, relative to the first stage total.
///
/// The first stage is always 100 (labels hide it); a zero first stage makes
/// every later stage 0.
pub fn compute_percentages(values: &FunnelValues) -> Vec<u32> {
    let totals = values.stage_totals();
    let Some(&first) = totals.first() else {
        return Vec::new();
    };
    totals
        .iter()
        .enumerate()
        .map(|(i, &t)| if i == 0 { 100 } else { percent_of(t, first) })
        .collect()
}

/// Per-stage share of each sub-segment (2-D data only; empty for 1-D).
pub fn compute_2d_percentages(values: &FunnelValues) -> Vec<Vec<u32>> {
    let FunnelValues::Nested(stages) = values else {
        return Vec::new();
    };
    stages
        .iter()
        .map(|stage| {
            let total: f64 = stage.iter().sum();
            stage.iter().map(|&v| percent_of(v, total)).collect()
        })
        .collect()
}

/// Round to an integer and group thousands with `,`.
pub fn format_number(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/data/percent.rs"]
mod tests;
