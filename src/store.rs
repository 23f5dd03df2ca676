//! Tolerant load/save for JSON configuration documents.
//!
//! Claude Code's configuration files are hand-edited, shared with other
//! tools, and occasionally broken. The store therefore never treats a missing
//! file as an error (first-time install), and never refuses to proceed on a
//! corrupt one: the original bytes are quarantined to `<path>.backup` and the
//! caller continues from an empty document. Saving is deterministic (sorted
//! keys, two-space indent, trailing newline) and atomic.

use anyhow::{Context, Result};
use serde_json::Value;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::constants::BACKUP_SUFFIX;
use crate::utils::fs::atomic_write;

/// A JSON document as an unordered string-keyed mapping.
pub type JsonMap = serde_json::Map<String, Value>;

/// Load a JSON document, quarantining unreadable content.
///
/// - Missing file: returns an empty map. This is the expected state for a
///   first-time install, not an error.
/// - Unparseable content, or a root that is not an object: emits a warning,
///   copies the raw bytes to `<path>.backup` (copy failure is non-fatal), and
///   returns an empty map so the caller installs fresh.
/// - I/O failure reading an existing file propagates as an error.
pub fn load(path: &Path) -> Result<JsonMap> {
    match read_document(path)? {
        Reading::Missing => Ok(JsonMap::new()),
        Reading::Parsed(map) => Ok(map),
        Reading::Corrupt(raw) => {
            warn!(
                "Existing file at {} is not valid JSON; backing it up and starting fresh",
                path.display()
            );
            quarantine(path, &raw);
            Ok(JsonMap::new())
        }
    }
}

/// Side-effect-free variant of [`load`] for the read-only predicates.
///
/// Tolerates missing and corrupt files the same way but writes no backup and
/// creates nothing on disk.
pub fn load_readonly(path: &Path) -> Result<JsonMap> {
    match read_document(path)? {
        Reading::Parsed(map) => Ok(map),
        Reading::Missing | Reading::Corrupt(_) => Ok(JsonMap::new()),
    }
}

/// Serialize a document deterministically and write it atomically.
///
/// Keys iterate in sorted order, indentation is two spaces, and the file ends
/// with a newline, so re-saving unchanged content is byte-identical.
pub fn save(path: &Path, document: &JsonMap) -> Result<()> {
    let mut content = serde_json::to_string_pretty(document)
        .with_context(|| format!("Failed to serialize document for: {}", path.display()))?;
    content.push('\n');
    atomic_write(path, content.as_bytes())
}

/// Ensure `key` holds an object, returning a mutable reference to it.
///
/// A present-but-wrong-shaped value is replaced with an empty object, with a
/// warning. The document parsed, so quarantine does not apply; replacing the
/// unusable value is the same forward-progress choice [`load`] makes.
pub fn ensure_object<'a>(document: &'a mut JsonMap, key: &str) -> &'a mut JsonMap {
    if !matches!(document.get(key), Some(Value::Object(_))) {
        if document.contains_key(key) {
            warn!("Replacing non-object value under `{key}` with an empty object");
        }
        document.insert(key.to_string(), Value::Object(JsonMap::new()));
    }
    match document.get_mut(key) {
        Some(Value::Object(object)) => object,
        _ => unreachable!("`{key}` was just set to an object"),
    }
}

/// Ensure `key` holds an array, returning a mutable reference to it.
///
/// Same replacement rule as [`ensure_object`].
pub fn ensure_array<'a>(document: &'a mut JsonMap, key: &str) -> &'a mut Vec<Value> {
    if !matches!(document.get(key), Some(Value::Array(_))) {
        if document.contains_key(key) {
            warn!("Replacing non-array value under `{key}` with an empty list");
        }
        document.insert(key.to_string(), Value::Array(Vec::new()));
    }
    match document.get_mut(key) {
        Some(Value::Array(list)) => list,
        _ => unreachable!("`{key}` was just set to an array"),
    }
}

enum Reading {
    Missing,
    Parsed(JsonMap),
    Corrupt(Vec<u8>),
}

fn read_document(path: &Path) -> Result<Reading> {
    if !path.exists() {
        debug!("No file at {}, starting from an empty document", path.display());
        return Ok(Reading::Missing);
    }

    let raw = fs::read(path).with_context(|| format!("Failed to read: {}", path.display()))?;

    match serde_json::from_slice::<Value>(&raw) {
        Ok(Value::Object(map)) => Ok(Reading::Parsed(map)),
        Ok(_) | Err(_) => Ok(Reading::Corrupt(raw)),
    }
}

fn quarantine(path: &Path, raw: &[u8]) {
    let backup = backup_path(path);
    if let Err(err) = fs::write(&backup, raw) {
        warn!("Could not back up {} to {}: {err}", path.display(), backup.display());
    } else {
        warn!("Original content preserved at {}", backup.display());
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_an_empty_document() {
        let dir = TempDir::new().unwrap();
        let map = load(&dir.path().join("absent.json")).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn corrupt_file_is_backed_up_and_replaced_with_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ \"truncated\": ").unwrap();

        let map = load(&path).unwrap();

        assert!(map.is_empty());
        let backup = dir.path().join("settings.json.backup");
        assert_eq!(fs::read_to_string(backup).unwrap(), "{ \"truncated\": ");
    }

    #[test]
    fn non_object_root_counts_as_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let map = load(&path).unwrap();

        assert!(map.is_empty());
        assert!(dir.path().join("settings.json.backup").exists());
    }

    #[test]
    fn readonly_load_writes_no_backup() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();

        let map = load_readonly(&path).unwrap();

        assert!(map.is_empty());
        assert!(!dir.path().join("settings.json.backup").exists());
    }

    #[test]
    fn save_is_pretty_with_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.json");
        let mut map = JsonMap::new();
        map.insert("b".into(), json!(1));
        map.insert("a".into(), json!({"nested": true}));

        save(&path, &map).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.ends_with('\n'));
        // Sorted keys, two-space indent.
        assert_eq!(
            content,
            "{\n  \"a\": {\n    \"nested\": true\n  },\n  \"b\": 1\n}\n"
        );
    }

    #[test]
    fn ensure_object_replaces_wrong_shape() {
        let mut map = JsonMap::new();
        map.insert("mcpServers".into(), json!("oops"));

        ensure_object(&mut map, "mcpServers").insert("s".into(), json!({}));

        assert_eq!(map.get("mcpServers"), Some(&json!({"s": {}})));
    }

    #[test]
    fn ensure_array_keeps_existing_entries() {
        let mut map = JsonMap::new();
        map.insert("allow".into(), json!(["keep"]));

        ensure_array(&mut map, "allow").push(json!("new"));

        assert_eq!(map.get("allow"), Some(&json!(["keep", "new"])));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.json");
        let mut map = JsonMap::new();
        map.insert("key".into(), json!(["a", "b"]));

        save(&path, &map).unwrap();
        let reloaded = load(&path).unwrap();

        assert_eq!(reloaded, map);
    }
}
