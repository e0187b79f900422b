use super::*;

fn parse(json: &str) -> FunnelResult<FunnelConfig> {
    FunnelConfig::from_reader(json.as_bytes())
}

#[test]
fn minimal_json_gets_component_defaults() {
    let c = parse(r#"{"width": 800, "height": "300px", "values": [12000, 5700, 930]}"#).unwrap();
    assert!(!c.animated);
    assert_eq!(c.width, 800.0);
    assert_eq!(c.height, 300.0);
    assert_eq!(c.direction, Direction::Horizontal);
    assert_eq!(c.gradient_direction, Direction::Horizontal);
    assert!(c.display_percentage);
    assert!(c.colors.is_empty());
    assert_eq!(c.animation, AnimationSettings::default());
}

#[test]
fn camel_case_fields_and_nested_colors() {
    let c = parse(
        r##"{
            "width": "400", "height": 500, "animated": true,
            "direction": "vertical", "gradientDirection": "vertical",
            "displayPercentage": false,
            "labels": ["Impressions", "Add To Cart", "Buy"],
            "subLabels": ["Direct", "Social", "Ads"],
            "colors": [["#FFB178", "#FF78B1"], "#A0BBFF", ["#A0F9FF", "#7795FF"]],
            "values": [[3000, 2500, 6500], [3000, 1700, 1000], [600, 200, 130]]
        }"##,
    )
    .unwrap();
    assert!(c.animated);
    assert_eq!(c.direction, Direction::Vertical);
    assert!(!c.display_percentage);
    assert_eq!(c.sub_labels.len(), 3);
    assert!(!c.colors[0].is_solid());
    assert!(c.colors[1].is_solid());
}

#[test]
fn label_count_mismatch_is_rejected() {
    let err = parse(r#"{"width": 800, "height": 300, "values": [1, 2], "labels": ["a"]}"#)
        .unwrap_err();
    assert!(matches!(err, FunnelError::Validation(_)));
}

#[test]
fn sub_label_count_mismatch_is_rejected() {
    let err = parse(
        r#"{"width": 800, "height": 300, "values": [[1, 2], [1, 1]], "subLabels": ["a"]}"#,
    )
    .unwrap_err();
    assert!(matches!(err, FunnelError::Validation(_)));
}

#[test]
fn nested_colors_need_2d_values() {
    let err = parse(
        r##"{"width": 800, "height": 300, "values": [3, 2], "colors": [["#fff", "#000"]]}"##,
    )
    .unwrap_err();
    assert!(err.to_string().contains("2-D"));
}

#[test]
fn bad_sizes_and_tokens_are_rejected() {
    assert!(matches!(
        parse(r#"{"width": 0, "height": 300, "values": [1]}"#),
        Err(FunnelError::Validation(_))
    ));
    assert!(matches!(
        parse(r#"{"width": "wide", "height": 300, "values": [1]}"#),
        Err(FunnelError::Serde(_))
    ));
    assert!(matches!(
        parse(r#"{"width": 10, "height": 10, "values": [1], "colors": ["red"]}"#),
        Err(FunnelError::Serde(_))
    ));
}

#[test]
fn builder_matches_json() {
    let built = FunnelConfig::new(800.0, 300.0, FunnelValues::Flat(vec![3.0, 2.0]))
        .with_labels(["A", "B"])
        .with_animated(true);
    let parsed = parse(
        r#"{"width": 800, "height": 300, "values": [3, 2], "labels": ["A", "B"], "animated": true}"#,
    )
    .unwrap();
    assert_eq!(built, parsed);
}
