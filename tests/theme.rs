use habitui::theme::{Theme, ThemeCache, ThemeConfig, ThemeError, ThemeRole};
use habitui::utils::json::save_record;
use ratatui::style::{Color, Style};
use std::fs;

fn ocean() -> ThemeConfig {
    ThemeConfig {
        name: Some("ocean".to_string()),
        primary: "#0077be".to_string(),
        accent: "cyan".to_string(),
        ..ThemeConfig::default()
    }
}

#[test]
fn test_from_config_resolves_colors() {
    let theme = Theme::from_config(&ocean());
    assert_eq!(theme.name, "ocean");
    assert_eq!(theme.primary, Color::Rgb(0, 119, 190));
    assert_eq!(theme.accent, Color::Cyan);
}

#[test]
fn test_invalid_color_falls_back_to_default() {
    let config = ThemeConfig {
        primary: "not-a-color".to_string(),
        ..ThemeConfig::default()
    };
    assert_eq!(Theme::from_config(&config).primary, Theme::default().primary);
}

#[test]
fn test_style_uses_background() {
    let theme = Theme::default();
    assert_eq!(
        theme.style(ThemeRole::Error),
        Style::default().fg(theme.error).bg(theme.background)
    );
    assert_eq!(theme.color(ThemeRole::Text), theme.foreground);
}

#[test]
fn test_cache_builtin_default() {
    let mut cache = ThemeCache::new(None);
    assert!(cache.is_empty());

    let theme = cache.get("default").unwrap();
    assert_eq!(theme, &Theme::default());
    assert!(cache.contains("default"));
}

#[test]
fn test_cache_unknown_theme() {
    let mut cache = ThemeCache::new(None);
    assert!(matches!(cache.get("ocean"), Err(ThemeError::NotFound(_))));
    assert!(matches!(cache.get("../etc"), Err(ThemeError::InvalidName(_))));
}

#[test]
fn test_cache_loads_from_folder_once() {
    let dir = tempfile::tempdir().unwrap();
    assert!(save_record(&ocean(), "ocean.json", Some(dir.path()), Some(2)));

    let mut cache = ThemeCache::new(Some(dir.path().to_path_buf()));
    assert_eq!(cache.get("ocean").unwrap().primary, Color::Rgb(0, 119, 190));

    // Later changes on disk are not seen until invalidated
    let changed = ThemeConfig {
        primary: "#ff0000".to_string(),
        ..ocean()
    };
    assert!(save_record(&changed, "ocean.json", Some(dir.path()), Some(2)));
    assert_eq!(cache.get("ocean").unwrap().primary, Color::Rgb(0, 119, 190));

    assert!(cache.invalidate("ocean"));
    assert_eq!(cache.get("ocean").unwrap().primary, Color::Rgb(255, 0, 0));
}

#[test]
fn test_partial_theme_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("sunset.json"), r##"{"accent": "#ff8800"}"##).unwrap();

    let mut cache = ThemeCache::new(Some(dir.path().to_path_buf()));
    let theme = cache.get("sunset").unwrap();
    assert_eq!(theme.name, "sunset");
    assert_eq!(theme.accent, Color::Rgb(255, 136, 0));
    assert_eq!(theme.background, Theme::default().background);
}

#[test]
fn test_explicit_name_in_file_is_kept() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("night.json"), r#"{"name": "default", "dark": true}"#).unwrap();

    let mut cache = ThemeCache::new(Some(dir.path().to_path_buf()));
    assert_eq!(cache.get("night").unwrap().name, "default");
    assert!(cache.contains("night"));
}

#[test]
fn test_unnamed_config_resolves_to_default_name() {
    assert_eq!(Theme::from_config(&ThemeConfig::default()).name, "default");
}

#[test]
fn test_malformed_theme_file_not_found() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("broken.json"), "[]").unwrap();

    let mut cache = ThemeCache::new(Some(dir.path().to_path_buf()));
    assert!(matches!(cache.get("broken"), Err(ThemeError::NotFound(_))));
}

#[test]
fn test_insert_and_clear() {
    let mut cache = ThemeCache::new(None);
    cache.insert(&ocean());
    assert_eq!(cache.len(), 1);
    assert!(cache.get("ocean").is_ok());

    cache.clear();
    assert!(cache.is_empty());
    assert!(!cache.invalidate("ocean"));
}
