use crate::chart::frame::ChartFrame;
use crate::geometry::svg_path::to_svg_d;
use crate::paint::fill::gradient_angle;

use std::fmt::Write as _;

/// Decimals kept in path data.
pub const PATH_PRECISION: u8 = 2;

/// Render the chart paths of `frame` as a standalone SVG document.
pub fn render_svg(frame: &ChartFrame) -> String {
    let mut svg = String::with_capacity(2048);
    let w = frame.canvas.width;
    let h = frame.canvas.height;
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    write_body(&mut svg, frame, "  ");
    svg.push_str("</svg>\n");
    svg
}

/// Gradient definitions and segment paths, one element per line.
pub(crate) fn write_body(out: &mut String, frame: &ChartFrame, indent: &str) {
    let angle = gradient_angle(frame.gradient_direction);
    let _ = writeln!(out, "{indent}<defs>");
    for gradient in &frame.colors.gradients {
        let _ = writeln!(
            out,
            r#"{indent}  <linearGradient id="{}" gradientTransform="{angle}">"#,
            gradient.id
        );
        for stop in &gradient.stops {
            let _ = writeln!(
                out,
                r#"{indent}    <stop stop-color="{}" offset="{}"/>"#,
                stop.color, stop.offset
            );
        }
        let _ = writeln!(out, "{indent}  </linearGradient>");
    }
    let _ = writeln!(out, "{indent}</defs>");

    for (path, fill) in frame.paths.paths().iter().zip(&frame.colors.fills) {
        let d = to_svg_d(path, PATH_PRECISION);
        let _ = writeln!(
            out,
            r#"{indent}<path fill="{0}" stroke="{0}" d="{d}"/>"#,
            fill.fill
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
