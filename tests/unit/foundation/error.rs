use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FunnelError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        FunnelError::geometry("x")
            .to_string()
            .contains("geometry error:")
    );
    assert!(
        FunnelError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FunnelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
