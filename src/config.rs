//! Configuration management for habitui
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{
    APP_NAME, CACHE_MAX_AGE_LIMIT_MINUTES, CONFIG_FILE_NAME, CONFIG_GENERATED, DEFAULT_DATE_FORMAT,
    DEFAULT_THEME_NAME, DEFAULT_TIME_FORMAT, LOCAL_CONFIG_FILE, THEMES_DIR_NAME,
};
use anyhow::{Context, Result};
use chrono::format::{Item, StrftimeItems};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Screens the client can open on startup
pub const SCREENS: [&str; 6] = ["dashboard", "habits", "dailies", "todos", "rewards", "party"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub display: DisplayConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Theme name, resolved against the themes directory
    pub theme: String,
    /// Screen to open on startup
    /// Options: "dashboard", "habits", "dailies", "todos", "rewards", "party"
    pub default_screen: String,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Date format for timestamps
    pub date_format: String,
    /// Time format for timestamps
    pub time_format: String,
}

/// Vault cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Override for the cache folder (defaults to the XDG cache directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<PathBuf>,
    /// How long cached API responses stay fresh, in minutes
    pub max_age_minutes: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable logging
    pub enabled: bool,
    /// One of "off", "error", "warn", "info", "debug", "trace"
    pub level: String,
    /// Override for the log file location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME_NAME.to_string(),
            default_screen: "dashboard".to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            folder: None,
            max_age_minutes: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Parsed log level
    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.level
            .parse::<LevelFilter>()
            .map_err(|_| anyhow::anyhow!("Invalid logging level '{}'", self.level))
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join(APP_NAME).join(CONFIG_FILE_NAME);
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.ui.theme.trim().is_empty() {
            anyhow::bail!("theme cannot be empty");
        }

        if !SCREENS.contains(&self.ui.default_screen.as_str()) {
            anyhow::bail!(
                "default_screen '{}' is not one of: {}",
                self.ui.default_screen,
                SCREENS.join(", ")
            );
        }

        if self.cache.max_age_minutes > CACHE_MAX_AGE_LIMIT_MINUTES {
            anyhow::bail!(
                "max_age_minutes cannot exceed {} (24 hours)",
                CACHE_MAX_AGE_LIMIT_MINUTES
            );
        }

        // Validate date/time formats
        if !is_valid_pattern(&self.display.date_format) {
            anyhow::bail!("Invalid date_format '{}'", self.display.date_format);
        }

        if !is_valid_pattern(&self.display.time_format) {
            anyhow::bail!("Invalid time_format '{}'", self.display.time_format);
        }

        self.logging.level_filter()?;

        Ok(())
    }

    /// Combined strftime pattern for timestamps shown in the UI
    pub fn datetime_format(&self) -> String {
        format!("{} {}", self.display.date_format, self.display.time_format)
    }

    /// How long vault entries stay fresh
    pub fn cache_max_age(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.cache.max_age_minutes.min(CACHE_MAX_AGE_LIMIT_MINUTES) as i64)
    }

    /// Folder holding cached API responses
    pub fn cache_dir(&self) -> Result<PathBuf> {
        if let Some(folder) = &self.cache.folder {
            return Ok(folder.clone());
        }
        dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine cache directory"))
            .map(|dir| dir.join(APP_NAME))
    }

    /// Folder holding user theme files
    pub fn themes_dir() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join(THEMES_DIR_NAME))
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        // Add header comment
        let header = format!(
            "# habitui Configuration File\n# Generated on {}\n\n",
            chrono::Local::now().format(DEFAULT_DATE_FORMAT)
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join(APP_NAME))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join(CONFIG_FILE_NAME))
    }
}

/// Whether a strftime pattern only contains specifiers chrono understands
fn is_valid_pattern(pattern: &str) -> bool {
    !pattern.is_empty() && StrftimeItems::new(pattern).all(|item| item != Item::Error)
}
