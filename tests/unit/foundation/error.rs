use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ImagineError::invalid_operation("x")
            .to_string()
            .contains("invalid operation:")
    );
    assert!(
        ImagineError::unsupported("warp")
            .to_string()
            .contains("unsupported image operation `warp`")
    );
    assert!(
        ImagineError::invalid_parameter("x")
            .to_string()
            .contains("invalid parameter:")
    );
    assert!(
        ImagineError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(
        ImagineError::config("x")
            .to_string()
            .contains("configuration error:")
    );
    assert_eq!(
        ImagineError::InvalidHashLength(0).to_string(),
        "invalid hash length 0: must be at least 1"
    );
}

#[test]
fn unstringifiable_names_operation_and_parameter() {
    let msg = ImagineError::unstringifiable("thumbnail", "width", "null").to_string();
    assert!(msg.contains("`width`"));
    assert!(msg.contains("`thumbnail`"));
    assert!(msg.ends_with("null"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ImagineError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
