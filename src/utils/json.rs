//! JSON persistence helpers
//!
//! Reads and writes plain JSON documents and serde-typed records. None of these
//! functions return errors: failures are logged and reported as `false` or
//! `None`, so callers can treat a missing or broken file like an empty cache.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{error, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

/// Resolve where a file lives
///
/// With a `folder`, only the file name of `path` is kept and joined onto the
/// folder; any directory part of `path` is discarded. Without one, `path` is
/// used as given.
pub fn resolve_path(path: impl AsRef<Path>, folder: Option<&Path>) -> PathBuf {
    let path = path.as_ref();
    match folder {
        Some(folder) => match path.file_name() {
            Some(name) => folder.join(name),
            None => folder.to_path_buf(),
        },
        None => path.to_path_buf(),
    }
}

/// Write `data` as JSON, creating parent directories as needed
///
/// # Arguments
/// * `data` - Any serializable value
/// * `path` - Target file
/// * `folder` - Optional base folder, see [`resolve_path`]
/// * `indent` - Spaces per indentation level, `None` for compact output
///
/// # Returns
/// * `bool` - `true` if the file was written
pub fn save_json<T: Serialize + ?Sized>(
    data: &T,
    path: impl AsRef<Path>,
    folder: Option<&Path>,
    indent: Option<usize>,
) -> bool {
    let target = resolve_path(path, folder);
    match write_json(data, &target, indent) {
        Ok(()) => {
            info!("Saved JSON to {}", target.display());
            true
        }
        Err(e) => {
            error!("Failed to save JSON to {}: {:#}", target.display(), e);
            false
        }
    }
}

/// Read a JSON document; `None` if the file is missing, unreadable or malformed
pub fn load_json(path: impl AsRef<Path>, folder: Option<&Path>) -> Option<Value> {
    let target = resolve_path(path, folder);
    if !target.exists() {
        warn!("JSON file not found: {}", target.display());
        return None;
    }

    let content = match fs::read_to_string(&target) {
        Ok(content) => content,
        Err(e) => {
            error!("Failed to read {}: {}", target.display(), e);
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => {
            info!("Loaded JSON from {}", target.display());
            Some(value)
        }
        Err(e) => {
            error!("Malformed JSON in {}: {}", target.display(), e);
            None
        }
    }
}

/// Write a record, leaving out every field whose value is `null`
pub fn save_record<T: Serialize>(
    record: &T,
    path: impl AsRef<Path>,
    folder: Option<&Path>,
    indent: Option<usize>,
) -> bool {
    match serde_json::to_value(record) {
        Ok(value) => save_json(&strip_nulls(value), path, folder, indent),
        Err(e) => {
            error!(
                "Failed to serialize record for {}: {}",
                resolve_path(path, folder).display(),
                e
            );
            false
        }
    }
}

/// Load and validate a record
///
/// Returns `None` if the file cannot be loaded, if the document is not a JSON
/// object, or if it does not match the shape of `T`.
pub fn load_record<T: DeserializeOwned>(path: impl AsRef<Path>, folder: Option<&Path>) -> Option<T> {
    let path = path.as_ref();
    let value = load_json(path, folder)?;
    let target = resolve_path(path, folder);

    if !value.is_object() {
        warn!("Expected a JSON object in {}, skipping", target.display());
        return None;
    }

    match serde_json::from_value(value) {
        Ok(record) => Some(record),
        Err(e) => {
            error!("Invalid record in {}: {}", target.display(), e);
            None
        }
    }
}

fn write_json<T: Serialize + ?Sized>(data: &T, target: &Path, indent: Option<usize>) -> Result<()> {
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let bytes = to_json_bytes(data, indent).context("Failed to serialize JSON")?;
    fs::write(target, bytes).with_context(|| format!("Failed to write file: {}", target.display()))?;
    Ok(())
}

fn to_json_bytes<T: Serialize + ?Sized>(data: &T, indent: Option<usize>) -> serde_json::Result<Vec<u8>> {
    let Some(width) = indent else {
        return serde_json::to_vec(data);
    };

    let indent = " ".repeat(width);
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    data.serialize(&mut serializer)?;
    Ok(buf)
}

fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_nulls).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_nulls_nested() {
        let value = json!({"a": null, "b": {"c": null, "d": 1}, "e": [null, {"f": null}]});
        assert_eq!(strip_nulls(value), json!({"b": {"d": 1}, "e": [null, {}]}));
    }

    #[test]
    fn test_indent_width() {
        let bytes = to_json_bytes(&json!({"a": 1}), Some(2)).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "{\n  \"a\": 1\n}");

        let compact = to_json_bytes(&json!({"a": 1}), None).unwrap();
        assert_eq!(compact, b"{\"a\":1}");
    }
}
