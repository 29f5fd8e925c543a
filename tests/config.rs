use habitui::config::Config;
use habitui::constants::DEFAULT_DATE_FORMAT;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.ui.theme, "default");
    assert_eq!(config.ui.default_screen, "dashboard");
    assert_eq!(config.cache.max_age_minutes, 10);
    assert!(config.cache.folder.is_none());
    assert!(!config.logging.enabled);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    // Valid config should pass
    assert!(config.validate().is_ok());

    // Unknown screen should fail
    config.ui.default_screen = "inventory".to_string();
    assert!(config.validate().is_err());

    // Reset and test cache age limit
    config.ui.default_screen = "habits".to_string();
    config.cache.max_age_minutes = 2000;
    assert!(config.validate().is_err());

    // Reset and test log level
    config.cache.max_age_minutes = 30;
    config.logging.level = "loud".to_string();
    assert!(config.validate().is_err());

    config.logging.level = "debug".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_format_validation() {
    let mut config = Config::default();
    config.display.date_format = "%d/%m/%Y".to_string();
    assert!(config.validate().is_ok());

    config.display.time_format = "%H:%Q".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let toml_str = toml::to_string_pretty(&config).unwrap();
    assert!(toml_str.contains("theme = \"default\""));
    assert!(toml_str.contains("max_age_minutes = 10"));
}

#[test]
fn test_partial_config_deserialization() {
    // Test that partial TOML configs merge with defaults
    let partial_toml = r#"
[ui]
theme = "ocean"

[cache]
folder = "/tmp/habitui-cache"

[logging]
enabled = true
"#;

    let config: Config = toml::from_str(partial_toml).unwrap();

    // Check that specified values are used
    assert_eq!(config.ui.theme, "ocean");
    assert!(config.logging.enabled);
    assert_eq!(config.cache_dir().unwrap(), std::path::PathBuf::from("/tmp/habitui-cache"));

    // Check that unspecified values use defaults
    assert_eq!(config.ui.default_screen, "dashboard");
    assert_eq!(config.cache.max_age_minutes, 10);
    assert_eq!(config.display.date_format, DEFAULT_DATE_FORMAT);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_empty_config_deserialization() {
    // Test that empty TOML uses all defaults
    let config: Config = toml::from_str("").unwrap();
    let default_config = Config::default();

    assert_eq!(config.ui.theme, default_config.ui.theme);
    assert_eq!(config.cache.max_age_minutes, default_config.cache.max_age_minutes);
    assert_eq!(config.logging.enabled, default_config.logging.enabled);
    assert_eq!(config.display.date_format, default_config.display.date_format);
}

#[test]
fn test_derived_values() {
    let config = Config::default();
    assert_eq!(config.datetime_format(), "%Y-%m-%d %H:%M");
    assert_eq!(config.cache_max_age(), chrono::Duration::minutes(10));
}

#[test]
fn test_load_from_file_rejects_invalid() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("habitui.toml");
    std::fs::write(&path, "[cache]\nmax_age_minutes = 5000\n").unwrap();
    assert!(Config::load_from_file(&path).is_err());

    std::fs::write(&path, "[ui]\ndefault_screen = \"todos\"\n").unwrap();
    assert_eq!(Config::load_from_file(&path).unwrap().ui.default_screen, "todos");
}

#[test]
fn test_generate_config_creates_directory() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("nested").join("config.toml");

    // Generate config should create the directory structure
    let result = Config::generate_default_config(&config_path);
    assert!(result.is_ok());
    assert!(config_path.exists());

    // Verify the file contains expected content and loads back
    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("# habitui Configuration File"));
    assert!(content.contains("default_screen = \"dashboard\""));
    assert!(Config::load_from_file(&config_path).is_ok());
}
