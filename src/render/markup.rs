use crate::animation::labels::LabelPhase;
use crate::chart::frame::{ChartFrame, LabelView, LegendView};
use crate::render::svg::write_body;

use std::fmt::Write as _;

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Render the full chart (SVG, labels, sub-label legend) as an HTML fragment
/// using the `svg-funnel-js` class names.
pub fn render_html(frame: &ChartFrame) -> String {
    let mut html = String::with_capacity(4096);
    let vertical = if frame.is_vertical() {
        " svg-funnel-js--vertical"
    } else {
        ""
    };
    let _ = writeln!(html, r#"<div class="funnel svg-funnel-js{vertical}">"#);
    html.push_str("  <div class=\"svg-funnel-js__container\">\n");
    let _ = writeln!(
        html,
        r#"    <svg width="{}" height="{}">"#,
        frame.canvas.width, frame.canvas.height
    );
    write_body(&mut html, frame, "      ");
    html.push_str("    </svg>\n  </div>\n");

    html.push_str("  <div class=\"svg-funnel-js__labels\">\n");
    for (i, label) in frame.labels.iter().enumerate() {
        write_label(&mut html, i, label);
    }
    html.push_str("  </div>\n");

    if let Some(legend) = &frame.legend {
        write_legend(&mut html, legend);
    }
    html.push_str("</div>\n");
    html
}

fn transition_attrs(prefix: &str, phase: LabelPhase, opacity: f64) -> (String, String) {
    let class = match phase {
        LabelPhase::Present => String::new(),
        LabelPhase::Entering => format!(" {prefix}-enter-active"),
        LabelPhase::Leaving => format!(" {prefix}-leave-active"),
    };
    let style = if opacity < 1.0 {
        format!(r#" style="opacity: {:.3}""#, opacity.max(0.0))
    } else {
        String::new()
    };
    (class, style)
}

fn write_label(out: &mut String, index: usize, label: &LabelView) {
    let (class, style) = transition_attrs("appear", label.phase, label.opacity);
    let _ = writeln!(
        out,
        r#"    <div class="svg-funnel-js__label label-{}{class}" data-key="{}"{style}>"#,
        index + 1,
        escape_html(&label.key)
    );
    let _ = writeln!(
        out,
        r#"      <div class="label__value">{}</div>"#,
        escape_html(&label.value)
    );
    if let Some(title) = &label.title {
        let _ = writeln!(
            out,
            r#"      <div class="label__title">{}</div>"#,
            escape_html(title)
        );
    }
    if let Some(pct) = label.percentage {
        let _ = writeln!(out, r#"      <div class="label__percentage">{pct}%</div>"#);
    }
    if !label.segments.is_empty() {
        out.push_str("      <div class=\"label__segment-percentages\">\n");
        out.push_str("        <ul class=\"segment-percentage__list\">\n");
        for share in &label.segments {
            let _ = writeln!(
                out,
                r#"          <li>{}: <span class="percentage__list-label">{}%</span></li>"#,
                escape_html(&share.title),
                share.percent
            );
        }
        out.push_str("        </ul>\n      </div>\n");
    }
    out.push_str("    </div>\n");
}

fn write_legend(out: &mut String, legend: &LegendView) {
    let (class, style) = transition_attrs("fade", legend.phase, legend.opacity);
    let _ = writeln!(out, r#"  <div class="svg-funnel-js__subLabels{class}"{style}>"#);
    for (i, entry) in legend.entries.iter().enumerate() {
        let n = i + 1;
        let _ = writeln!(
            out,
            r#"    <div class="svg-funnel-js__subLabel svg-funnel-js__subLabel-{n}">"#
        );
        let _ = writeln!(
            out,
            r#"      <div class="svg-funnel-js__subLabel--color" style="{}"></div>"#,
            escape_html(&entry.background)
        );
        let _ = writeln!(
            out,
            r#"      <div class="svg-funnel-js__subLabel--title">{}</div>"#,
            escape_html(&entry.title)
        );
        out.push_str("    </div>\n");
    }
    out.push_str("  </div>\n");
}

#[cfg(test)]
#[path = "../../tests/unit/render/markup.rs"]
mod tests;
