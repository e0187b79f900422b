use super::*;
use crate::data::values::FunnelValues;
use crate::foundation::core::Direction;
use crate::animation::morph::{MorphOptions, PathInterpolator};
use crate::foundation::core::BezPath;
use crate::foundation::error::FunnelError;
use crate::geometry::PathSynthesizer;
use crate::paint::fill::FillMode;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn base() -> FunnelConfig {
    FunnelConfig::new(800.0, 300.0, FunnelValues::Flat(vec![12000.0, 5700.0, 930.0]))
        .with_labels(["Impressions", "Add To Cart", "Buy"])
}

fn nested() -> FunnelConfig {
    FunnelConfig::new(
        800.0,
        300.0,
        FunnelValues::Nested(vec![
            vec![3000.0, 2500.0, 6500.0],
            vec![3000.0, 1700.0, 1000.0],
            vec![600.0, 200.0, 130.0],
        ]),
    )
    .with_labels(["Impressions", "Add To Cart", "Buy"])
    .with_sub_labels(["Direct", "Social Media", "Ads"])
}

#[test]
fn mount_draws_without_animation() {
    let chart = FunnelChart::mount(base(), ms(0)).unwrap();
    assert_eq!(chart.phase(), Phase::Idle);
    assert_eq!(
        chart.paths().paths(),
        chart.geometry().path_definitions().unwrap().as_slice()
    );
    assert_eq!(chart.percentages(), vec![100, 48, 8]);
    assert_eq!(chart.formatted_values(), vec!["12,000", "5,700", "930"]);
    assert_eq!(
        chart.label_keys(),
        vec!["impressions", "add-to-cart", "buy"]
    );
}

#[test]
fn animated_mount_grows_from_medians() {
    let mut chart = FunnelChart::mount(base().with_animated(true), ms(0)).unwrap();
    assert_eq!(chart.phase(), Phase::Animating);
    assert_eq!(chart.paths().paths()[0], chart.geometry().path_median(0).unwrap());
    assert!(!chart.tick(ms(700)));
    assert_eq!(chart.phase(), Phase::Idle);
}

#[test]
fn flat_data_shares_one_default_gradient() {
    let chart = FunnelChart::mount(base(), ms(0)).unwrap();
    let set = chart.color_set().unwrap();
    assert_eq!(set.fills.len(), 1);
    assert_eq!(set.fills[0].mode, FillMode::Gradient);
    assert_eq!(set.fills[0].fill, "url(#funnelGradient-1)");
    assert_eq!(chart.gradient_set().unwrap().len(), 1);
}

#[test]
fn value_change_animates_and_settles() {
    let mut chart = FunnelChart::mount(base().with_animated(true), ms(0)).unwrap();
    chart.tick(ms(700));

    let mut next = chart.config().clone();
    next.values = FunnelValues::Flat(vec![9000.0, 4000.0, 2000.0]);
    let changes = chart.update(next, ms(1000)).unwrap();
    assert!(changes.values);
    assert!(!changes.layout);
    assert_eq!(chart.phase(), Phase::Animating);
    assert_eq!(chart.last_origin(), Some(Origin::CENTER));

    assert!(chart.tick(ms(1350)));
    assert!(!chart.tick(ms(1700)));
    assert_eq!(
        chart.paths().paths(),
        chart.geometry().path_definitions().unwrap().as_slice()
    );
}

#[test]
fn layout_change_draws_only() {
    let mut chart = FunnelChart::mount(base().with_animated(true), ms(0)).unwrap();
    chart.tick(ms(700));
    let next = chart
        .config()
        .clone()
        .with_direction(Direction::Vertical);
    let changes = chart.update(next, ms(800)).unwrap();
    assert!(changes.layout);
    assert_eq!(chart.phase(), Phase::Idle);
    assert_eq!(
        chart.paths().paths(),
        chart.geometry().path_definitions().unwrap().as_slice()
    );
}

#[test]
fn rejected_update_leaves_chart_untouched() {
    let mut chart = FunnelChart::mount(base(), ms(0)).unwrap();
    let before = chart.paths();
    let mut bad = chart.config().clone();
    bad.values = FunnelValues::Nested(vec![vec![1.0, 2.0], vec![1.0]]);

    let err = chart.update(bad, ms(10)).unwrap_err();
    assert!(err.to_string().contains("equal cardinality"));
    assert_eq!(chart.config(), &base());
    assert_eq!(chart.paths(), before);
}

#[test]
fn adding_a_stage_grows_from_bottom_left() {
    let mut chart = FunnelChart::mount(base().with_animated(true), ms(0)).unwrap();
    chart.tick(ms(700));
    let next = FunnelConfig::new(
        800.0,
        300.0,
        FunnelValues::Flat(vec![12000.0, 5700.0, 360.0, 120.0]),
    )
    .with_animated(true);
    chart.update(next, ms(1000)).unwrap();
    assert_eq!(chart.last_origin(), Some(Origin::new(0.0, 1.0)));
}

#[test]
fn unchanged_update_is_a_no_op() {
    let mut chart = FunnelChart::mount(base(), ms(0)).unwrap();
    let generation = chart.paths().generation();
    let changes = chart.update(base(), ms(50)).unwrap();
    assert!(changes.is_empty());
    assert_eq!(chart.paths().generation(), generation);
}

#[test]
fn leaving_labels_keep_their_content_until_faded() {
    let mut chart = FunnelChart::mount(base().with_animated(true), ms(0)).unwrap();
    chart.tick(ms(700));

    let next = chart
        .config()
        .clone()
        .with_labels(["Impressions", "Add To Cart", "Return"]);
    chart.update(next, ms(1000)).unwrap();
    chart.tick(ms(1350));

    let frame = chart.frame().unwrap();
    let keys: Vec<(&str, LabelPhase)> = frame
        .labels
        .iter()
        .map(|l| (l.key.as_str(), l.phase))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("impressions", LabelPhase::Present),
            ("add-to-cart", LabelPhase::Present),
            ("return", LabelPhase::Entering),
            ("buy", LabelPhase::Leaving),
        ]
    );
    let buy = &frame.labels[3];
    assert_eq!(buy.title.as_deref(), Some("Buy"));
    assert!((buy.opacity - 0.5).abs() < 1e-9);

    chart.tick(ms(1700));
    let frame = chart.frame().unwrap();
    assert_eq!(frame.labels.len(), 3);
}

#[test]
fn label_fallback_keys_are_unique() {
    let config = FunnelConfig::new(800.0, 300.0, FunnelValues::Flat(vec![3.0, 2.0, 1.0]))
        .with_labels(["Visit", "Visit", "Buy"]);
    let chart = FunnelChart::mount(config, ms(0)).unwrap();
    assert_eq!(chart.label_keys(), vec!["visit", "visit-2", "buy"]);

    let unlabeled = FunnelChart::mount(
        FunnelConfig::new(800.0, 300.0, FunnelValues::Flat(vec![3.0, 2.0])),
        ms(0),
    )
    .unwrap();
    assert_eq!(unlabeled.label_keys(), vec!["stage-1", "stage-2"]);
}

#[test]
fn dedupe_suffix_skips_keys_already_taken() {
    let config = FunnelConfig::new(800.0, 300.0, FunnelValues::Flat(vec![3.0, 2.0, 1.0]))
        .with_labels(["a", "a-3", "a"]);
    let chart = FunnelChart::mount(config, ms(0)).unwrap();
    assert_eq!(chart.label_keys(), vec!["a", "a-3", "a-4"]);
}

#[test]
fn percentages_hidden_at_100_or_when_disabled() {
    let chart = FunnelChart::mount(base(), ms(0)).unwrap();
    let frame = chart.frame().unwrap();
    let shown: Vec<Option<u32>> = frame.labels.iter().map(|l| l.percentage).collect();
    assert_eq!(shown, vec![None, Some(48), Some(8)]);

    let mut off = base();
    off.display_percentage = false;
    let chart = FunnelChart::mount(off, ms(0)).unwrap();
    let frame = chart.frame().unwrap();
    assert!(frame.labels.iter().all(|l| l.percentage.is_none()));
}

#[test]
fn nested_data_has_segments_and_legend() {
    let chart = FunnelChart::mount(nested(), ms(0)).unwrap();
    assert_eq!(chart.color_set().unwrap().fills.len(), 3);

    let frame = chart.frame().unwrap();
    let first = &frame.labels[0];
    assert_eq!(first.value, "12,000");
    let shares: Vec<u32> = first.segments.iter().map(|s| s.percent).collect();
    assert_eq!(shares, vec![25, 21, 54]);
    assert_eq!(first.segments[1].title, "Social Media");

    let legend = frame.legend.unwrap();
    assert_eq!(legend.phase, LabelPhase::Present);
    assert_eq!(legend.entries.len(), 3);
    assert!(legend.entries[0].background.starts_with("background-color: #"));
}

#[test]
fn legend_fades_out_with_old_entries() {
    let mut chart = FunnelChart::mount(nested().with_animated(true), ms(0)).unwrap();
    chart.tick(ms(700));
    chart.update(base().with_animated(true), ms(1000)).unwrap();

    let frame = chart.frame().unwrap();
    let legend = frame.legend.unwrap();
    assert_eq!(legend.phase, LabelPhase::Leaving);
    assert_eq!(legend.entries.len(), 3);

    chart.tick(ms(1700));
    assert!(chart.frame().unwrap().legend.is_none());
}

struct Refusing;

impl ShapeInterpolator for Refusing {
    fn interpolate(
        &self,
        _from: &BezPath,
        _to: &BezPath,
        _options: &MorphOptions,
    ) -> FunnelResult<PathInterpolator> {
        Err(FunnelError::geometry("outline cannot be morphed"))
    }
}

#[test]
fn failed_redraw_keeps_previous_configuration() {
    let mut chart =
        FunnelChart::mount_with(base(), Refusing, DefaultPalette::default(), ms(0)).unwrap();
    let before = chart.paths();

    let next = FunnelConfig::new(
        800.0,
        300.0,
        FunnelValues::Flat(vec![14000.0, 9100.0, 4230.0, 260.0]),
    )
    .with_labels(["Impressions", "Add To Cart", "Buy", "Return"])
    .with_animated(true);
    let err = chart.update(next, ms(10)).unwrap_err();
    assert!(matches!(err, FunnelError::Geometry(_)));

    assert_eq!(chart.config(), &base());
    assert_eq!(chart.paths(), before);
    assert_eq!(chart.geometry().stage_count(), 3);
    assert_eq!(chart.paths().stage_count(), chart.config().values.stage_count());
    assert_eq!(chart.phase(), Phase::Idle);

    let frame = chart.frame().unwrap();
    assert_eq!(frame.labels.len(), 3);
    assert!(frame.labels.iter().all(|l| l.phase == LabelPhase::Present));

    let layout_only = base().with_gradient_direction(Direction::Vertical);
    chart.update(layout_only, ms(20)).unwrap();
    assert_eq!(chart.config().gradient_direction, Direction::Vertical);
}
