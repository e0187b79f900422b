use super::*;

fn tok(s: &str) -> ColorToken {
    ColorToken::parse(s).unwrap()
}

fn stops(colors: &[&str]) -> ColorSpec {
    ColorSpec::Stops(colors.iter().map(|c| tok(c)).collect())
}

#[test]
fn single_token_is_solid() {
    let mut c = FillClassifier::new();
    let f = c.classify(&ColorSpec::Solid(tok("#FF4589")));
    assert_eq!(f.mode, FillMode::Solid);
    assert_eq!(f.fill, "#FF4589");

    let f = c.classify(&stops(&["#FF5050"]));
    assert_eq!(f.mode, FillMode::Solid);
    assert_eq!(f.fill, "#FF5050");
    assert!(c.gradients().is_empty());
}

#[test]
fn gradient_ids_are_dense_across_solids() {
    let specs = vec![
        stops(&["#A0BBFF", "#EC77FF"]),
        ColorSpec::Solid(tok("#05DF9D")),
        stops(&["#FFB178", "#FF78B1", "#FF3C8E"]),
        ColorSpec::Solid(tok("#2D9CDB")),
        stops(&["#A0F9FF", "#7795FF"]),
    ];
    let set = ColorSet::classify_all(&specs);
    let refs: Vec<&str> = set.fills.iter().map(|f| f.fill.as_str()).collect();
    assert_eq!(
        refs,
        vec![
            "url(#funnelGradient-1)",
            "#05DF9D",
            "url(#funnelGradient-2)",
            "#2D9CDB",
            "url(#funnelGradient-3)",
        ]
    );
    let ids: Vec<&str> = set.gradients.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids, vec!["funnelGradient-1", "funnelGradient-2", "funnelGradient-3"]);
}

#[test]
fn three_stop_offsets_are_evenly_spaced() {
    let set = ColorSet::classify_all(&[stops(&["#FFB178", "#FF78B1", "#FF3C8E"])]);
    let offsets: Vec<&str> = set.gradients[0]
        .stops
        .iter()
        .map(|s| s.offset.as_str())
        .collect();
    assert_eq!(offsets, vec!["0%", "50%", "100%"]);
    assert_eq!(stop_offset(1, 4), "33%");
    assert_eq!(stop_offset(2, 4), "67%");
}

#[test]
fn gradient_angle_follows_direction() {
    assert_eq!(gradient_angle(Direction::Vertical), "rotate(90)");
    assert_eq!(gradient_angle(Direction::Horizontal), "rotate(0)");
}
