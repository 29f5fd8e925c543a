//! habitui - A terminal client for gamified habit tracking
//!
//! This library holds the pieces the terminal screens build on: timestamp
//! normalization, JSON persistence, the local cache of API responses, themes,
//! configuration and logging.
//!
//! # Modules
//!
//! * [`config`] - Application configuration management
//! * [`logger`] - File logging setup
//! * [`theme`] - Theme descriptions, resolved colors and the theme cache
//! * [`utils`] - Timestamp, JSON and color helpers
//! * [`vault`] - On-disk cache of API responses

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Logging setup for the `log` facade
pub mod logger;

/// Themes and the caller-owned theme cache
pub mod theme;

/// Utility functions for timestamps, JSON persistence and colors
pub mod utils;

/// Local cache of API responses
pub mod vault;

pub use utils::datetime::TimestampValue;
pub use vault::Vault;
