//! Themes for the terminal UI
//!
//! A theme is described by a [`ThemeConfig`] (every recognized field spelled
//! out, stored as JSON in the themes directory) and resolved into a [`Theme`]
//! of terminal colors. Loaded themes live in a [`ThemeCache`] owned by
//! whoever renders the UI; there is no global theme state.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use ratatui::style::{Color, Style};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_THEME_NAME;
use crate::utils::color::parse_color;
use crate::utils::json::load_record;

// Built-in dark palette
const PRIMARY: Color = Color::Rgb(146, 92, 243);
const SECONDARY: Color = Color::Rgb(97, 51, 180);
const ACCENT: Color = Color::Rgb(255, 166, 35);
const FOREGROUND: Color = Color::Rgb(237, 236, 238);
const BACKGROUND: Color = Color::Rgb(26, 22, 33);
const SURFACE: Color = Color::Rgb(52, 49, 58);
const SUCCESS: Color = Color::Rgb(36, 204, 143);
const WARNING: Color = Color::Rgb(255, 190, 93);
const ERROR: Color = Color::Rgb(246, 70, 70);

/// Theme description as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Display name; a file without one is named after its file stem
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub dark: bool,
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub foreground: String,
    pub background: String,
    pub surface: String,
    pub success: String,
    pub warning: String,
    pub error: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: None,
            dark: true,
            primary: "#925cf3".to_string(),
            secondary: "#6133b4".to_string(),
            accent: "#ffa623".to_string(),
            foreground: "#edecee".to_string(),
            background: "#1a1621".to_string(),
            surface: "#34313a".to_string(),
            success: "#24cc8f".to_string(),
            warning: "#ffbe5d".to_string(),
            error: "#f64646".to_string(),
        }
    }
}

/// What a color is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeRole {
    Primary,
    Secondary,
    Accent,
    Text,
    Surface,
    Success,
    Warning,
    Error,
}

/// A theme with every color resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub dark: bool,
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub foreground: Color,
    pub background: Color,
    pub surface: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

impl Theme {
    /// Resolve a theme description; colors that fail to parse fall back to the built-in palette
    pub fn from_config(config: &ThemeConfig) -> Self {
        let name = config.name.as_deref().unwrap_or(DEFAULT_THEME_NAME);
        let resolve = |field: &str, value: &str, fallback: Color| {
            parse_color(value).unwrap_or_else(|| {
                warn!(
                    "Theme '{}': invalid {} color '{}', using default",
                    name, field, value
                );
                fallback
            })
        };

        Self {
            name: name.to_string(),
            dark: config.dark,
            primary: resolve("primary", &config.primary, PRIMARY),
            secondary: resolve("secondary", &config.secondary, SECONDARY),
            accent: resolve("accent", &config.accent, ACCENT),
            foreground: resolve("foreground", &config.foreground, FOREGROUND),
            background: resolve("background", &config.background, BACKGROUND),
            surface: resolve("surface", &config.surface, SURFACE),
            success: resolve("success", &config.success, SUCCESS),
            warning: resolve("warning", &config.warning, WARNING),
            error: resolve("error", &config.error, ERROR),
        }
    }

    pub fn color(&self, role: ThemeRole) -> Color {
        match role {
            ThemeRole::Primary => self.primary,
            ThemeRole::Secondary => self.secondary,
            ThemeRole::Accent => self.accent,
            ThemeRole::Text => self.foreground,
            ThemeRole::Surface => self.surface,
            ThemeRole::Success => self.success,
            ThemeRole::Warning => self.warning,
            ThemeRole::Error => self.error,
        }
    }

    /// Style with the role color on the theme background
    pub fn style(&self, role: ThemeRole) -> Style {
        Style::default().fg(self.color(role)).bg(self.background)
    }
}

/// Errors returned by [`ThemeCache`]
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("Theme '{0}' not found")]
    NotFound(String),

    #[error("Invalid theme name '{0}'")]
    InvalidName(String),
}

/// Loaded themes keyed by name
///
/// Themes are read from `<folder>/<name>.json` on first request and kept
/// until invalidated.
#[derive(Debug, Default)]
pub struct ThemeCache {
    folder: Option<PathBuf>,
    themes: HashMap<String, Theme>,
}

impl ThemeCache {
    pub fn new(folder: Option<PathBuf>) -> Self {
        Self {
            folder,
            themes: HashMap::new(),
        }
    }

    pub fn folder(&self) -> Option<&Path> {
        self.folder.as_deref()
    }

    /// Get a theme, loading it on first use
    pub fn get(&mut self, name: &str) -> Result<&Theme, ThemeError> {
        if !self.themes.contains_key(name) {
            let theme = self.load(name)?;
            self.themes.insert(name.to_string(), theme);
        }
        self.themes.get(name).ok_or_else(|| ThemeError::NotFound(name.to_string()))
    }

    /// Add or replace a theme from a description, keyed by its resolved name
    pub fn insert(&mut self, config: &ThemeConfig) -> &Theme {
        let theme = Theme::from_config(config);
        let name = theme.name.clone();
        self.themes.insert(name.clone(), theme);
        &self.themes[&name]
    }

    /// Drop a cached theme so the next `get` reloads it
    pub fn invalidate(&mut self, name: &str) -> bool {
        self.themes.remove(name).is_some()
    }

    pub fn clear(&mut self) {
        self.themes.clear();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.themes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    fn load(&self, name: &str) -> Result<Theme, ThemeError> {
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return Err(ThemeError::InvalidName(name.to_string()));
        }

        let loaded = self.folder.as_deref().and_then(|folder| {
            let file = folder.join(format!("{}.json", name));
            if file.exists() {
                load_record::<ThemeConfig>(&file, None)
            } else {
                None
            }
        });

        match loaded {
            Some(mut config) => {
                config.name.get_or_insert_with(|| name.to_string());
                info!("Loaded theme '{}'", name);
                Ok(Theme::from_config(&config))
            }
            None if name == DEFAULT_THEME_NAME => {
                debug!("Using built-in theme");
                Ok(Theme::default())
            }
            None => Err(ThemeError::NotFound(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_parses() {
        let config = ThemeConfig::default();
        for value in [
            &config.primary,
            &config.secondary,
            &config.accent,
            &config.foreground,
            &config.background,
            &config.surface,
            &config.success,
            &config.warning,
            &config.error,
        ] {
            assert!(parse_color(value).is_some(), "{} should parse", value);
        }
    }

    #[test]
    fn test_default_theme_matches_palette() {
        let theme = Theme::default();
        assert_eq!(theme.primary, PRIMARY);
        assert_eq!(theme.background, BACKGROUND);
        assert_eq!(theme.error, ERROR);
    }
}
