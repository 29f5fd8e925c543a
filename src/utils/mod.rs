//! Utility modules for the habitui application.
//!
//! Helpers shared by the screens, the vault and the theme layer.
//!
//! - [`datetime`] - Timestamp normalization and human-readable formatting
//! - [`json`] - JSON and record persistence on disk
//! - [`color`] - Theme color parsing and task value colors
//!
//! `datetime` and `json` are independent of each other; neither returns
//! errors to the caller, failures are logged and surface as `None` / `false`.

pub mod color;
pub mod datetime;
pub mod json;
