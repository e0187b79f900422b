use crate::data::values::FunnelValues;
use crate::foundation::core::{BezPath, Canvas, Direction};
use crate::foundation::error::{FunnelError, FunnelResult};
use crate::foundation::math::round_point;
use crate::geometry::PathSynthesizer;

/// Funnel path geometry for one configuration.
///
/// Stages are laid out evenly along the main axis. Along the cross axis every
/// stage is centered and sized by its total relative to the largest stage; in
/// 2-D the stage is further split into one layer per sub-segment.
///
/// Each boundary is stored as one cross-axis coordinate per main-axis point;
/// the last stage value is repeated so the funnel ends in a flat run.
#[derive(Clone, Debug)]
pub struct FunnelGeometry {
    direction: Direction,
    canvas: Canvas,
    values: FunnelValues,
    main: Vec<f64>,
    boundaries: Vec<Vec<f64>>,
}

impl FunnelGeometry {
    /// Validate `values` and compute the funnel boundaries.
    #[tracing::instrument(skip(values), fields(stages = values.stage_count(), is_2d = values.is_2d()))]
    pub fn configure(
        direction: Direction,
        canvas: Canvas,
        values: &FunnelValues,
    ) -> FunnelResult<Self> {
        values.validate()?;
        let main = main_axis_points(canvas.main_axis(direction), values.stage_count());
        let boundaries = cross_axis_boundaries(canvas.cross_axis(direction), values);
        Ok(Self {
            direction,
            canvas,
            values: values.clone(),
            main,
            boundaries,
        })
    }

    /// Chart orientation.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Drawing surface size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Values the geometry was computed from.
    pub fn values(&self) -> &FunnelValues {
        &self.values
    }

    /// Number of segments (paths) this geometry produces.
    pub fn segment_count(&self) -> usize {
        self.boundaries.len().saturating_sub(1)
    }

    fn segment_path(&self, lower: &[f64], upper: &[f64]) -> BezPath {
        match self.direction {
            Direction::Horizontal => horizontal_path(&self.main, lower, upper),
            Direction::Vertical => vertical_path(lower, upper, &self.main),
        }
    }
}

impl PathSynthesizer for FunnelGeometry {
    fn path_definitions(&self) -> FunnelResult<Vec<BezPath>> {
        Ok(self
            .boundaries
            .windows(2)
            .map(|pair| self.segment_path(&pair[0], &pair[1]))
            .collect())
    }

    fn path_median(&self, index: usize) -> FunnelResult<BezPath> {
        if index >= self.segment_count() {
            return Err(FunnelError::geometry(format!(
                "median requested for segment {index}, but only {} segments exist",
                self.segment_count()
            )));
        }
        let (lower, upper): (Vec<f64>, Vec<f64>) = self.boundaries[index]
            .iter()
            .zip(&self.boundaries[index + 1])
            .map(|(a, b)| {
                let m = (a + b) / 2.0;
                (m - 1.0, m + 1.0)
            })
            .unzip();
        Ok(self.segment_path(&lower, &upper))
    }

    fn stage_count(&self) -> usize {
        self.values.stage_count()
    }

    fn is_2d(&self) -> bool {
        self.values.is_2d()
    }

    fn is_vertical(&self) -> bool {
        self.direction == Direction::Vertical
    }
}

fn main_axis_points(full: f64, stages: usize) -> Vec<f64> {
    (0..=stages)
        .map(|i| round_point(full * i as f64 / stages as f64))
        .collect()
}

fn cross_axis_boundaries(full: f64, values: &FunnelValues) -> Vec<Vec<f64>> {
    let half = full / 2.0;
    let totals = values.stage_totals();
    let max = totals.iter().copied().fold(0.0_f64, f64::max);

    // Outer edge: the gap between the canvas edge and the stage body.
    let mut outer: Vec<f64> = totals
        .iter()
        .map(|&t| {
            if max > 0.0 {
                round_point((max - t) / max * half)
            } else {
                half
            }
        })
        .collect();
    repeat_last(&mut outer);

    let mut boundaries = vec![outer.clone()];

    if let FunnelValues::Nested(stages) = values {
        for layer in 1..values.sub_count() {
            let prev = &boundaries[layer - 1];
            let mut next: Vec<f64> = stages
                .iter()
                .enumerate()
                .map(|(j, stage)| {
                    let stage_total: f64 = stage.iter().sum();
                    let share = if stage_total > 0.0 {
                        stage[layer - 1] / stage_total
                    } else {
                        0.0
                    };
                    round_point(prev[j] + (full - outer[j] * 2.0) * share)
                })
                .collect();
            repeat_last(&mut next);
            boundaries.push(next);
        }
    }

    boundaries.push(outer.iter().map(|p| round_point(full - p)).collect());
    boundaries
}

fn repeat_last(points: &mut Vec<f64>) {
    if let Some(&last) = points.last() {
        points.push(last);
    }
}

fn horizontal_path(x: &[f64], y: &[f64], y_next: &[f64]) -> BezPath {
    let last = x.len() - 1;
    let mut path = BezPath::new();
    path.move_to((x[0], y[0]));
    for i in 0..last {
        let mid = round_point((x[i] + x[i + 1]) / 2.0);
        path.curve_to((mid, y[i]), (mid, y[i + 1]), (x[i + 1], y[i + 1]));
    }
    path.line_to((x[last], y_next[last]));
    for i in (1..=last).rev() {
        let mid = round_point((x[i] + x[i - 1]) / 2.0);
        path.curve_to((mid, y_next[i]), (mid, y_next[i - 1]), (x[i - 1], y_next[i - 1]));
    }
    path.close_path();
    path
}

fn vertical_path(x: &[f64], x_next: &[f64], y: &[f64]) -> BezPath {
    let last = y.len() - 1;
    let mut path = BezPath::new();
    path.move_to((x[0], y[0]));
    for i in 0..last {
        let mid = round_point((y[i] + y[i + 1]) / 2.0);
        path.curve_to((x[i], mid), (x[i + 1], mid), (x[i + 1], y[i + 1]));
    }
    path.line_to((x_next[last], y[last]));
    for i in (1..=last).rev() {
        let mid = round_point((y[i] + y[i - 1]) / 2.0);
        path.curve_to((x_next[i], mid), (x_next[i - 1], mid), (x_next[i - 1], y[i - 1]));
    }
    path.close_path();
    path
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/funnel.rs"]
mod tests;
