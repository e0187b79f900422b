use crate::foundation::core::{BezPath, Point};
use crate::foundation::math::round_to;
use kurbo::PathEl;

use std::fmt::Write as _;

/// Serialize a path as SVG path data, rounding coordinates to `precision` decimals.
pub fn to_svg_d(path: &BezPath, precision: u8) -> String {
    let mut out = String::new();
    for el in path.elements() {
        if !out.is_empty() {
            out.push(' ');
        }
        match *el {
            PathEl::MoveTo(p) => {
                out.push('M');
                push_point(&mut out, p, precision);
            }
            PathEl::LineTo(p) => {
                out.push('L');
                push_point(&mut out, p, precision);
            }
            PathEl::QuadTo(p1, p2) => {
                out.push('Q');
                push_point(&mut out, p1, precision);
                out.push(' ');
                push_point(&mut out, p2, precision);
            }
            PathEl::CurveTo(p1, p2, p3) => {
                out.push('C');
                push_point(&mut out, p1, precision);
                out.push(' ');
                push_point(&mut out, p2, precision);
                out.push(' ');
                push_point(&mut out, p3, precision);
            }
            PathEl::ClosePath => out.push('Z'),
        }
    }
    out
}

fn push_point(out: &mut String, p: Point, precision: u8) {
    let _ = write!(out, "{},{}", fmt_coord(p.x, precision), fmt_coord(p.y, precision));
}

fn fmt_coord(v: f64, precision: u8) -> f64 {
    let r = round_to(v, precision);
    // Avoid "-0" in output.
    if r == 0.0 { 0.0 } else { r }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/svg_path.rs"]
mod tests;
