use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(CaptionError::decode("x").to_string().contains("decode error:"));
    assert!(
        CaptionError::invalid_state("x")
            .to_string()
            .contains("invalid state:")
    );
    assert!(CaptionError::encode("x").to_string().contains("encode error:"));
    assert!(
        CaptionError::font_resolution("x")
            .to_string()
            .contains("font resolution error:")
    );
    assert!(
        CaptionError::validation("x")
            .to_string()
            .contains("validation error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CaptionError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
