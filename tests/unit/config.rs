use super::*;

#[test]
fn empty_object_yields_defaults() {
    let cfg = ImagineConfig::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(cfg, ImagineConfig::default());
    assert_eq!(cfg.hash_length, 8);
    assert_eq!(cfg.filter, ResizeFilter::Lanczos3);
}

#[test]
fn camel_case_keys_and_nested_separators() {
    let cfg = ImagineConfig::from_reader(
        r#"{"filter": "catmullRom", "hashLength": 12, "separators": {"operationGroup": "."}, "engine": "Gd"}"#
            .as_bytes(),
    )
    .unwrap();
    assert_eq!(cfg.filter, ResizeFilter::CatmullRom);
    assert_eq!(cfg.hash_length, 12);
    assert_eq!(cfg.separators.operation_group, ".");
    assert_eq!(cfg.separators.parameter, "-");
}

#[test]
fn invalid_values_are_config_errors() {
    assert!(matches!(
        ImagineConfig::from_reader(r#"{"hashLength": 0}"#.as_bytes()),
        Err(ImagineError::InvalidHashLength(0))
    ));
    assert!(matches!(
        ImagineConfig::from_reader(r#"{"jpegQuality": 0}"#.as_bytes()),
        Err(ImagineError::Config(_))
    ));
    assert!(matches!(
        ImagineConfig::from_reader(r#"{"filter": "bicubic"}"#.as_bytes()),
        Err(ImagineError::Config(_))
    ));
}

#[test]
fn missing_file_is_config_error() {
    let err = ImagineConfig::from_path("target/does/not/exist.json").unwrap_err();
    assert!(err.to_string().contains("open config"));
}

#[test]
fn filter_maps_onto_image_filter_type() {
    assert_eq!(FilterType::from(ResizeFilter::Nearest), FilterType::Nearest);
    assert_eq!(FilterType::from(ResizeFilter::default()), FilterType::Lanczos3);
}
