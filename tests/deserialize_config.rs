#[test]
fn serialize_deserialize_config() {
    let config = mask_painter::Config::default();
    let serialized = serde_json::to_string(&config).unwrap();
    let deserialized: mask_painter::Config = serde_json::from_str(&serialized).unwrap();
    assert_eq!(config, deserialized);
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let deserialized: mask_painter::Config = serde_json::from_str("{}").unwrap();
    assert_eq!(deserialized, mask_painter::Config::default());
}
