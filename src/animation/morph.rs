use crate::foundation::core::{BezPath, Origin, Point, Rect};
use crate::foundation::error::{FunnelError, FunnelResult};
use crate::foundation::math::round_to;

use kurbo::{CubicBez, ParamCurve, PathEl, PathSeg};

/// Options for building a path interpolator.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MorphOptions {
    /// Anchor (in the unit square of each shape's bounds) both outlines start from.
    pub origin: Origin,
    /// Extra segments inserted beyond what is needed to match the two outlines.
    pub add_points: usize,
    /// Decimals kept in intermediate frames.
    pub precision: u8,
}

impl Default for MorphOptions {
    fn default() -> Self {
        Self {
            origin: Origin::CENTER,
            add_points: 1,
            precision: 1,
        }
    }
}

/// Maps progress `t` in `[0, 1]` to a path between two shapes.
pub type PathInterpolator = Box<dyn Fn(f64) -> BezPath>;

/// Builds interpolators between two path outlines.
pub trait ShapeInterpolator {
    /// Build an interpolator from `from` (at `t = 0`) to `to` (at `t = 1`).
    fn interpolate(
        &self,
        from: &BezPath,
        to: &BezPath,
        options: &MorphOptions,
    ) -> FunnelResult<PathInterpolator>;
}

/// Default interpolator for closed single-outline paths.
///
/// Both outlines are converted to cubic segments, the shorter one is subdivided
/// at its longest chords until the counts match, each outline is rotated to
/// start at the point nearest the origin anchor, and control points are blended
/// linearly. The exact input paths are returned at `t <= 0` and `t >= 1`.
#[derive(Clone, Copy, Debug, Default)]
pub struct PathMorph;

impl ShapeInterpolator for PathMorph {
    fn interpolate(
        &self,
        from: &BezPath,
        to: &BezPath,
        options: &MorphOptions,
    ) -> FunnelResult<PathInterpolator> {
        let mut a = outline(from)?;
        let mut b = outline(to)?;

        let n = a.len().max(b.len()) + options.add_points;
        subdivide_to(&mut a, n);
        subdivide_to(&mut b, n);
        align_start(&mut a, options.origin);
        align_start(&mut b, options.origin);

        let from = from.clone();
        let to = to.clone();
        let precision = options.precision;
        Ok(Box::new(move |t| {
            if t <= 0.0 {
                from.clone()
            } else if t >= 1.0 {
                to.clone()
            } else {
                blend(&a, &b, t, precision)
            }
        }))
    }
}

fn outline(path: &BezPath) -> FunnelResult<Vec<CubicBez>> {
    let subpaths = path
        .elements()
        .iter()
        .filter(|el| matches!(el, PathEl::MoveTo(_)))
        .count();
    if subpaths > 1 {
        return Err(FunnelError::geometry(format!(
            "cannot morph a path with {subpaths} subpaths"
        )));
    }

    let segs: Vec<CubicBez> = path
        .segments()
        .map(|seg| match seg {
            PathSeg::Line(l) => {
                CubicBez::new(l.p0, l.p0.lerp(l.p1, 1.0 / 3.0), l.p0.lerp(l.p1, 2.0 / 3.0), l.p1)
            }
            PathSeg::Quad(q) => q.raise(),
            PathSeg::Cubic(c) => c,
        })
        .collect();
    if segs.is_empty() {
        return Err(FunnelError::geometry("cannot morph an empty path"));
    }
    Ok(segs)
}

fn subdivide_to(segs: &mut Vec<CubicBez>, n: usize) {
    while segs.len() < n {
        let mut longest = 0;
        let mut best = f64::NEG_INFINITY;
        for (i, s) in segs.iter().enumerate() {
            let chord = s.p0.distance(s.p3);
            if chord > best {
                best = chord;
                longest = i;
            }
        }
        let (left, right) = segs[longest].subdivide();
        segs[longest] = left;
        segs.insert(longest + 1, right);
    }
}

fn align_start(segs: &mut [CubicBez], origin: Origin) {
    let first = segs[0].p0;
    let bbox = segs
        .iter()
        .fold(Rect::from_points(first, first), |r, s| r.union_pt(s.p0));
    let anchor = origin.resolve(bbox);

    let mut start = 0;
    let mut best = f64::INFINITY;
    for (i, s) in segs.iter().enumerate() {
        let d = s.p0.distance_squared(anchor);
        if d < best {
            best = d;
            start = i;
        }
    }
    segs.rotate_left(start);
}

fn blend(a: &[CubicBez], b: &[CubicBez], t: f64, precision: u8) -> BezPath {
    let mix = |p: Point, q: Point| {
        let m = p.lerp(q, t);
        Point::new(round_to(m.x, precision), round_to(m.y, precision))
    };

    let mut path = BezPath::new();
    path.move_to(mix(a[0].p0, b[0].p0));
    for (sa, sb) in a.iter().zip(b) {
        path.curve_to(mix(sa.p1, sb.p1), mix(sa.p2, sb.p2), mix(sa.p3, sb.p3));
    }
    path.close_path();
    path
}

#[cfg(test)]
#[path = "../../tests/unit/animation/morph.rs"]
mod tests;
