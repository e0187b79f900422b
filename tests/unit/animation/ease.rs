use super::*;

#[test]
fn endpoints_are_fixed() {
    for ease in [
        Ease::Linear,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
    ] {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-12, "{ease:?}");
        assert_eq!(ease.apply(-1.0), ease.apply(0.0));
        assert_eq!(ease.apply(2.0), ease.apply(1.0));
    }
}

#[test]
fn in_out_cubic_is_symmetric_around_midpoint() {
    let e = Ease::InOutCubic;
    assert!((e.apply(0.5) - 0.5).abs() < 1e-12);
    assert!((e.apply(0.25) + e.apply(0.75) - 1.0).abs() < 1e-12);
    assert!(e.apply(0.1) < 0.1);
}

#[test]
fn parses_names() {
    assert_eq!("in-out-cubic".parse::<Ease>().unwrap(), Ease::InOutCubic);
    assert_eq!("Linear".parse::<Ease>().unwrap(), Ease::Linear);
    assert!("bounce".parse::<Ease>().is_err());
}
