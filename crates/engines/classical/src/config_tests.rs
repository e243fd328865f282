use super::*;

#[test]
fn test_empty_config_uses_defaults() {
    let config = EngineConfig::from_toml_str("").unwrap();
    assert_eq!(config, EngineConfig::default());
    assert_eq!(config.depth, 3);
    assert!(config.use_opening_book);
    assert_eq!(config.book_max_plies, 7);
    assert_eq!(config.seed, None);
    assert_eq!(config.weights.mobility, 5);
    assert_eq!(config.weights.castled, 85);
    assert_eq!(config.weights.mate, 10_000);
    assert_eq!(config.weights.draw, 5_000);
}

#[test]
fn test_partial_config_overrides_only_given_keys() {
    let text = r#"
        depth = 4
        seed = 42
        use_opening_book = false

        [weights]
        mobility = 8
    "#;
    let config = EngineConfig::from_toml_str(text).unwrap();
    assert_eq!(config.depth, 4);
    assert_eq!(config.seed, Some(42));
    assert!(!config.use_opening_book);
    assert_eq!(config.book_max_plies, 7);
    assert_eq!(config.weights.mobility, 8);
    assert_eq!(config.weights.castled, 85);
}

#[test]
fn test_bad_config_is_parse_error() {
    let err = EngineConfig::from_toml_str("depth = \"deep\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().starts_with("failed to parse engine config"));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = EngineConfig::load("/nonexistent/engine.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_load_from_disk() {
    let path = std::env::temp_dir().join(format!("classical_engine_{}.toml", std::process::id()));
    let config = EngineConfig {
        depth: 2,
        seed: Some(7),
        ..EngineConfig::default()
    };
    std::fs::write(&path, config.to_toml_string().unwrap()).unwrap();

    let loaded = EngineConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(loaded, config);
}
