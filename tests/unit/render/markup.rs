use super::*;
use crate::chart::config::FunnelConfig;
use crate::chart::funnel_chart::FunnelChart;
use crate::data::values::FunnelValues;
use crate::foundation::core::Direction;

use std::time::Duration;

fn frame(config: FunnelConfig) -> ChartFrame {
    FunnelChart::mount(config, Duration::ZERO)
        .unwrap()
        .frame()
        .unwrap()
}

#[test]
fn escapes_markup_characters() {
    assert_eq!(
        escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
        "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
    );
}

#[test]
fn flat_chart_has_labels_without_legend() {
    let config = FunnelConfig::new(800.0, 300.0, FunnelValues::Flat(vec![12000.0, 5700.0, 930.0]))
        .with_labels(["Impressions", "Add To Cart", "Buy <now>"]);
    let html = render_html(&frame(config));

    assert!(html.starts_with(r#"<div class="funnel svg-funnel-js">"#));
    assert!(html.contains(r#"<div class="label__value">12,000</div>"#));
    assert!(html.contains(r#"<div class="label__title">Buy &lt;now&gt;</div>"#));
    assert_eq!(html.matches("label__percentage").count(), 2);
    assert!(html.contains(r#"<div class="label__percentage">48%</div>"#));
    assert!(!html.contains("svg-funnel-js__subLabels"));
    assert!(!html.contains("label__segment-percentages"));
}

#[test]
fn nested_vertical_chart_has_segments_and_legend() {
    let config = FunnelConfig::new(
        400.0,
        500.0,
        FunnelValues::Nested(vec![
            vec![3000.0, 2500.0, 6500.0],
            vec![3000.0, 1700.0, 1000.0],
            vec![600.0, 200.0, 130.0],
        ]),
    )
    .with_labels(["Impressions", "Add To Cart", "Buy"])
    .with_sub_labels(["Direct", "Social Media", "Ads"])
    .with_direction(Direction::Vertical);
    let html = render_html(&frame(config));

    assert!(html.starts_with(r#"<div class="funnel svg-funnel-js svg-funnel-js--vertical">"#));
    assert!(html.contains(r#"<li>Direct: <span class="percentage__list-label">25%</span></li>"#));
    assert!(html.contains("svg-funnel-js__subLabel svg-funnel-js__subLabel-3"));
    assert!(html.contains(r#"<div class="svg-funnel-js__subLabel--title">Social Media</div>"#));
    assert_eq!(html.matches("<path ").count(), 3);
}
