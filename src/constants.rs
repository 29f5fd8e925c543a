//! Constants used throughout the application
//!
//! This module centralizes magic strings, file names, and other constant values
//! to improve maintainability and consistency.

/// Application name, used for config/cache/log directory names
pub const APP_NAME: &str = "habitui";

/// Config file looked up in the current directory
pub const LOCAL_CONFIG_FILE: &str = "habitui.toml";
/// Config file name inside the XDG config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Log file name inside the data directory
pub const LOG_FILE_NAME: &str = "habitui.log";
/// Sub-folder of the cache directory holding vault entries
pub const VAULT_DIR_NAME: &str = "vault";
/// Sub-folder of the config directory holding theme files
pub const THEMES_DIR_NAME: &str = "themes";

/// Placeholder rendered when a value is missing
pub const NOT_AVAILABLE: &str = "N/A";

/// Numeric timestamps above this magnitude are treated as milliseconds
pub const MILLIS_THRESHOLD: u64 = 2_000_000_000;

// Default display formats
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M";

/// Default JSON indentation in spaces
pub const DEFAULT_JSON_INDENT: usize = 4;

/// Name of the built-in theme
pub const DEFAULT_THEME_NAME: &str = "default";

/// Maximum cache age accepted by the config validator (24 hours)
pub const CACHE_MAX_AGE_LIMIT_MINUTES: u64 = 1440;

// Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const VAULT_EMPTY: &str = "Vault is empty";
