use super::*;
use serde_json::json;

fn tok(s: &str) -> ColorToken {
    ColorToken::parse(s).unwrap()
}

fn solid(s: &str) -> ColorSpec {
    ColorSpec::Solid(tok(s))
}

#[test]
fn token_accepts_hex_forms_and_rejects_others() {
    for ok in ["#fff", "#ffff", "#FFB178", "#ff3c8e80"] {
        assert!(ColorToken::parse(ok).is_ok(), "{ok}");
    }
    for bad in ["FFB178", "#12345", "#GGHHII", "red", ""] {
        assert!(ColorToken::parse(bad).is_err(), "{bad}");
    }
    assert_eq!(tok("#FF3C8E").to_rgba8(), [0xFF, 0x3C, 0x8E, 0xFF]);
    assert_eq!(tok("#0f08").to_rgba8(), [0, 255, 0, 136]);
}

#[test]
fn spec_deserializes_solid_and_stops() {
    let s: ColorSpec = serde_json::from_value(json!("#A0BBFF")).unwrap();
    assert_eq!(s, solid("#A0BBFF"));
    let s: ColorSpec = serde_json::from_value(json!(["#A0BBFF", "#EC77FF"])).unwrap();
    assert!(!s.is_solid());
    assert!(serde_json::from_value::<ColorSpec>(json!("blue")).is_err());

    let one: ColorSpec = serde_json::from_value(json!(["#A0BBFF"])).unwrap();
    assert!(one.is_solid());
}

#[test]
fn palette_is_deterministic_and_a_permutation() {
    let a = DefaultPalette::seeded(7);
    let b = DefaultPalette::seeded(7);
    assert_eq!(a, b);
    assert_eq!(a.len(), STOCK_COLORS.len());

    let mut seen: Vec<&str> = (0..a.len()).map(|i| a.get(i).as_str()).collect();
    seen.sort_unstable();
    let mut stock = STOCK_COLORS.to_vec();
    stock.sort_unstable();
    assert_eq!(seen, stock);

    assert_eq!(a.get(3), a.get(3 + a.len()));
}

#[test]
fn empty_2d_input_uses_segment_count_defaults() {
    let palette = DefaultPalette::default();
    let out = resolve_colors(&[], 4, true, &palette).unwrap();
    assert_eq!(out.len(), 4);
    assert!(out.iter().all(ColorSpec::is_solid));
    assert_eq!(out[0], ColorSpec::Solid(palette.get(0).clone()));
}

#[test]
fn empty_1d_input_uses_two_color_gradient() {
    let palette = DefaultPalette::default();
    let out = resolve_colors(&[], 1, false, &palette).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].tokens(), &palette.take_from(0, 2)[..]);
}

#[test]
fn short_2d_input_keeps_prefix_and_fills_from_segment_count() {
    let palette = DefaultPalette::default();
    let user = vec![ColorSpec::Stops(vec![tok("#FFB178"), tok("#FF3C8E")])];
    for segments in 1..=4 {
        let out = resolve_colors(&user, segments, true, &palette).unwrap();
        assert_eq!(out.len(), segments);
        assert_eq!(out[0], user[0]);
        for (k, spec) in out.iter().enumerate().skip(1) {
            assert_eq!(*spec, ColorSpec::Solid(palette.get(segments + k - 1).clone()));
        }
        let defaults: Vec<_> = out[1..].iter().collect();
        for (i, a) in defaults.iter().enumerate() {
            for b in &defaults[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}

#[test]
fn long_input_is_returned_unmodified() {
    let palette = DefaultPalette::default();
    let user = vec![solid("#111111"), solid("#222222"), solid("#333333")];
    let out = resolve_colors(&user, 2, true, &palette).unwrap();
    assert_eq!(out, user);
}

#[test]
fn one_d_tokens_form_one_shared_spec() {
    let palette = DefaultPalette::default();
    let out = resolve_colors(&[solid("#FFB178"), solid("#FF3C8E")], 1, false, &palette).unwrap();
    assert_eq!(
        out,
        vec![ColorSpec::Stops(vec![tok("#FFB178"), tok("#FF3C8E")])]
    );

    let out = resolve_colors(&[solid("#FF9A9A")], 1, false, &palette).unwrap();
    assert!(out[0].is_solid());
}

#[test]
fn nested_colors_with_1d_values_are_rejected() {
    let palette = DefaultPalette::default();
    let nested = vec![ColorSpec::Stops(vec![tok("#FFB178"), tok("#FF3C8E")])];
    assert!(resolve_colors(&nested, 1, false, &palette).is_err());
    assert!(resolve_colors(&[ColorSpec::Stops(vec![])], 1, true, &palette).is_err());
}

#[test]
fn legend_background_matches_fill_mode() {
    assert_eq!(
        legend_background(&solid("#A0F9FF"), Direction::Horizontal),
        "background-color: #A0F9FF"
    );
    let g = ColorSpec::Stops(vec![tok("#A0F9FF"), tok("#7795FF")]);
    assert_eq!(
        legend_background(&g, Direction::Horizontal),
        "background-image: linear-gradient(to right, #A0F9FF, #7795FF)"
    );
    assert_eq!(
        legend_background(&g, Direction::Vertical),
        "background-image: linear-gradient(#A0F9FF, #7795FF)"
    );
}
