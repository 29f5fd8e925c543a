//! Timestamp normalization and formatting
//!
//! The habit-tracking API hands out timestamps in several shapes: ISO-8601
//! strings (with or without an offset), Unix time in seconds, Unix time in
//! milliseconds, and the occasional already-parsed value coming from local
//! code. [`TimestampValue`] keeps whatever it was given and normalizes it to
//! UTC on demand. Parse failures never propagate; they are logged and show up
//! as `None` (or `"N/A"` in the formatting helpers).

use std::fmt::{self, Write as _};

use chrono::{
    DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc,
};
use log::{error, warn};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

use crate::constants::{MILLIS_THRESHOLD, NOT_AVAILABLE};

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;

/// Formats carrying an explicit UTC offset, tried after RFC 3339
const ZONED_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

/// Formats without an offset; these are read as UTC
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The raw input a [`TimestampValue`] was built from
#[derive(Debug, Clone, PartialEq)]
pub enum RawTimestamp {
    /// ISO-8601 text
    Text(String),
    /// Unix time, seconds or milliseconds depending on magnitude
    Integer(i64),
    /// Fractional Unix time, seconds or milliseconds depending on magnitude
    Float(f64),
    /// Unix time known to be in milliseconds
    Millis(i64),
    /// Unix time known to be in whole seconds
    Seconds(i64),
    /// Unix time known to be in fractional seconds
    FractionalSeconds(f64),
    /// A date/time without zone information, read as UTC
    Naive(NaiveDateTime),
    /// A date/time with a known offset
    Zoned(DateTime<FixedOffset>),
    /// A value straight out of an API payload
    Json(Value),
}

/// A timestamp of variable input shape, normalized to UTC on access
///
/// Derived values are recomputed on every call; nothing is cached.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimestampValue {
    raw: Option<RawTimestamp>,
}

impl TimestampValue {
    /// A timestamp with no value; every accessor returns `None` / `"N/A"`
    pub fn empty() -> Self {
        Self { raw: None }
    }

    /// The current UTC instant
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            raw: Some(RawTimestamp::Text(text.into())),
        }
    }

    /// Unix time in milliseconds, regardless of magnitude
    pub fn from_millis(millis: i64) -> Self {
        Self::from(RawTimestamp::Millis(millis))
    }

    /// Unix time in whole seconds, regardless of magnitude
    pub fn from_seconds(seconds: i64) -> Self {
        Self::from(RawTimestamp::Seconds(seconds))
    }

    /// Fractional Unix time in seconds, regardless of magnitude
    pub fn from_seconds_f64(seconds: f64) -> Self {
        Self::from(RawTimestamp::FractionalSeconds(seconds))
    }

    pub fn from_naive(naive: NaiveDateTime) -> Self {
        Self::from(RawTimestamp::Naive(naive))
    }

    pub fn from_datetime<Tz: TimeZone>(dt: DateTime<Tz>) -> Self {
        Self::from(RawTimestamp::Zoned(dt.fixed_offset()))
    }

    /// Wrap a JSON value from an API payload. `null` yields an empty timestamp.
    pub fn from_json(value: Value) -> Self {
        if value.is_null() {
            Self::empty()
        } else {
            Self::from(RawTimestamp::Json(value))
        }
    }

    /// The raw input, as given
    pub fn raw(&self) -> Option<&RawTimestamp> {
        self.raw.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_none()
    }

    /// The input normalized to UTC
    ///
    /// Untyped numeric inputs whose magnitude exceeds 2,000,000,000 are read
    /// as milliseconds, everything else as seconds. Values built with an
    /// explicit unit keep it. Text without an offset is read as UTC.
    pub fn utc(&self) -> Option<DateTime<Utc>> {
        match self.raw.as_ref()? {
            RawTimestamp::Text(text) => parse_iso(text),
            RawTimestamp::Integer(value) => integer_to_utc(*value),
            RawTimestamp::Float(value) => float_to_utc(*value),
            RawTimestamp::Millis(millis) => warn_out_of_range(*millis, DateTime::from_timestamp_millis(*millis)),
            RawTimestamp::Seconds(seconds) => warn_out_of_range(*seconds, DateTime::from_timestamp(*seconds, 0)),
            RawTimestamp::FractionalSeconds(seconds) => warn_out_of_range(*seconds, float_seconds_to_utc(*seconds)),
            RawTimestamp::Naive(naive) => Some(naive.and_utc()),
            RawTimestamp::Zoned(dt) => Some(dt.with_timezone(&Utc)),
            RawTimestamp::Json(value) => json_to_utc(value),
        }
    }

    /// The UTC value converted to the process local time zone
    pub fn local(&self) -> Option<DateTime<Local>> {
        self.utc().map(|dt| dt.with_timezone(&Local))
    }

    /// Whether the timestamp lies strictly before now; `None` when there is no value
    pub fn is_past(&self) -> Option<bool> {
        self.utc().map(|dt| dt < Utc::now())
    }

    /// Human-readable distance from now, e.g. `"now"`, `"5m ago"`, `"in 2d"`
    pub fn format_time_difference(&self) -> String {
        self.format_time_difference_from(Utc::now())
    }

    /// Same as [`format_time_difference`](Self::format_time_difference), measured against `now`
    pub fn format_time_difference_from(&self, now: DateTime<Utc>) -> String {
        let Some(local) = self.local() else {
            return NOT_AVAILABLE.to_string();
        };

        let seconds = now.signed_duration_since(local.with_timezone(&Utc)).num_seconds();
        let magnitude = seconds.unsigned_abs();
        if magnitude < SECONDS_PER_MINUTE {
            return "now".to_string();
        }

        let (amount, unit) = if magnitude >= SECONDS_PER_DAY {
            (magnitude / SECONDS_PER_DAY, "d")
        } else if magnitude >= SECONDS_PER_HOUR {
            (magnitude / SECONDS_PER_HOUR, "h")
        } else {
            (magnitude / SECONDS_PER_MINUTE, "m")
        };

        if seconds > 0 {
            format!("{}{} ago", amount, unit)
        } else {
            format!("in {}{}", amount, unit)
        }
    }

    /// Format the local value with a strftime pattern
    pub fn format_local(&self, pattern: &str) -> String {
        match self.local() {
            Some(dt) => render(&dt, pattern),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    /// Format the UTC value with a strftime pattern
    pub fn format_utc(&self, pattern: &str) -> String {
        match self.utc() {
            Some(dt) => render(&dt, pattern),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    /// `"{local} ({difference})"`, e.g. `"2025-01-15 14:30 (3h ago)"`
    pub fn format_with_diff(&self, pattern: &str) -> String {
        match self.local() {
            Some(dt) => format!("{} ({})", render(&dt, pattern), self.format_time_difference()),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    /// ISO-8601 in UTC with a literal `Z` suffix
    pub fn to_iso(&self) -> Option<String> {
        self.utc().map(|dt| dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn to_unix_millis(&self) -> Option<i64> {
        self.utc().map(|dt| dt.timestamp_millis())
    }

    /// Whole seconds since the epoch, rounded towards negative infinity
    pub fn to_unix_seconds(&self) -> Option<i64> {
        self.utc().map(|dt| dt.timestamp())
    }
}

impl From<RawTimestamp> for TimestampValue {
    fn from(raw: RawTimestamp) -> Self {
        Self { raw: Some(raw) }
    }
}

impl From<&str> for TimestampValue {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl From<String> for TimestampValue {
    fn from(text: String) -> Self {
        Self::from_text(text)
    }
}

impl From<i64> for TimestampValue {
    fn from(value: i64) -> Self {
        Self::from(RawTimestamp::Integer(value))
    }
}

impl From<f64> for TimestampValue {
    fn from(value: f64) -> Self {
        Self::from(RawTimestamp::Float(value))
    }
}

impl From<NaiveDateTime> for TimestampValue {
    fn from(naive: NaiveDateTime) -> Self {
        Self::from_naive(naive)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for TimestampValue {
    fn from(dt: DateTime<Tz>) -> Self {
        Self::from_datetime(dt)
    }
}

impl<T: Into<TimestampValue>> From<Option<T>> for TimestampValue {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Self::empty, Into::into)
    }
}

impl fmt::Display for TimestampValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_iso() {
            Some(iso) => f.write_str(&iso),
            None => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl Serialize for TimestampValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.to_iso() {
            Some(iso) => serializer.serialize_str(&iso),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for TimestampValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_json)
    }
}

/// Parse ISO-8601 text into UTC
///
/// Accepts RFC 3339, `T` or space separators, optional fractional seconds,
/// optional offsets and bare dates (midnight UTC).
pub fn parse_iso(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    // chrono's %z does not accept a bare `Z`
    let zoned = match text.strip_suffix(['Z', 'z']) {
        Some(stripped) => format!("{}+00:00", stripped),
        None => text.to_string(),
    };
    for format in ZONED_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&zoned, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }

    if let Some(midnight) = NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Some(midnight.and_utc());
    }

    warn!("Could not parse timestamp text '{}'", text);
    None
}

fn warn_out_of_range<T: fmt::Display>(value: T, parsed: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    if parsed.is_none() {
        warn!("Timestamp {} is out of range", value);
    }
    parsed
}

fn integer_to_utc(value: i64) -> Option<DateTime<Utc>> {
    let parsed = if value.unsigned_abs() > MILLIS_THRESHOLD {
        DateTime::from_timestamp_millis(value)
    } else {
        DateTime::from_timestamp(value, 0)
    };
    warn_out_of_range(value, parsed)
}

fn float_to_utc(value: f64) -> Option<DateTime<Utc>> {
    let seconds = if value.abs() > MILLIS_THRESHOLD as f64 {
        value / 1000.0
    } else {
        value
    };

    warn_out_of_range(value, float_seconds_to_utc(seconds))
}

fn float_seconds_to_utc(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }

    let whole = seconds.floor();
    if whole < i64::MIN as f64 || whole >= i64::MAX as f64 {
        return None;
    }
    let nanos = ((seconds - whole) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos)
}

fn number_to_utc(number: &Number) -> Option<DateTime<Utc>> {
    if let Some(value) = number.as_i64() {
        integer_to_utc(value)
    } else {
        number.as_f64().and_then(float_to_utc)
    }
}

fn json_to_utc(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(text) => parse_iso(text),
        Value::Number(number) => number_to_utc(number),
        Value::Null => None,
        other => {
            error!("Unsupported timestamp type: {}", json_kind(other));
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Render with a strftime pattern; an invalid pattern yields "N/A" instead of panicking
fn render<Tz: TimeZone>(dt: &DateTime<Tz>, pattern: &str) -> String
where
    Tz::Offset: fmt::Display,
{
    let mut out = String::new();
    if write!(out, "{}", dt.format(pattern)).is_err() {
        warn!("Invalid datetime format pattern '{}'", pattern);
        return NOT_AVAILABLE.to_string();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_kind_names() {
        assert_eq!(json_kind(&Value::Bool(true)), "boolean");
        assert_eq!(json_kind(&serde_json::json!([1])), "array");
    }

    #[test]
    fn test_float_seconds_fraction() {
        let dt = float_seconds_to_utc(1.5).unwrap();
        assert_eq!(dt.timestamp(), 1);
        assert_eq!(dt.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn test_float_seconds_rejects_non_finite() {
        assert!(float_seconds_to_utc(f64::NAN).is_none());
        assert!(float_seconds_to_utc(f64::INFINITY).is_none());
    }

    #[test]
    fn test_render_invalid_pattern() {
        let dt = DateTime::from_timestamp(0, 0).unwrap();
        assert_eq!(render(&dt, "%Y-%Q"), NOT_AVAILABLE);
        assert_eq!(render(&dt, "%Y"), "1970");
    }
}
