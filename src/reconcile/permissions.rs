//! Permission allowlist management in `settings.json`.
//!
//! The allowlist is a JSON array but carries set semantics for the
//! identifiers this tool owns: each of the CodeGraph tool permissions appears
//! at most once, pre-existing entries keep their relative order, and
//! unrelated entries are never removed.

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

use crate::constants::{ALLOW_KEY, PERMISSIONS_KEY, TOOL_PERMISSIONS};
use crate::store;

/// Append any missing CodeGraph tool identifiers to `permissions.allow`.
///
/// Idempotent: once all identifiers are present, re-running rewrites the same
/// bytes and never duplicates an entry.
pub fn grant_permissions(path: &Path) -> Result<()> {
    let mut document = store::load(path)?;
    let permissions = store::ensure_object(&mut document, PERMISSIONS_KEY);
    let allow = store::ensure_array(permissions, ALLOW_KEY);

    for id in TOOL_PERMISSIONS {
        if !allow.iter().any(|entry| entry.as_str() == Some(id)) {
            debug!("Granting permission `{id}`");
            allow.push(Value::String(id.to_string()));
        }
    }

    store::save(path, &document)
        .with_context(|| format!("Failed to write settings to: {}", path.display()))
}

/// Remove exactly the CodeGraph tool identifiers from `permissions.allow`.
///
/// Returns whether anything was removed; when nothing matched the file is not
/// rewritten. The `permissions.allow` container itself is left in place even
/// if it ends up empty.
pub fn revoke_permissions(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }

    let mut document = store::load(path)?;
    let removed = match document
        .get_mut(PERMISSIONS_KEY)
        .and_then(|permissions| permissions.get_mut(ALLOW_KEY))
    {
        Some(Value::Array(allow)) => {
            let before = allow.len();
            allow.retain(|entry| {
                !entry
                    .as_str()
                    .is_some_and(|s| TOOL_PERMISSIONS.contains(&s))
            });
            allow.len() != before
        }
        _ => false,
    };

    if removed {
        store::save(path, &document)
            .with_context(|| format!("Failed to write settings to: {}", path.display()))?;
    }
    Ok(removed)
}

/// Read-only predicate: is at least one CodeGraph identifier allowed?
///
/// Creates no files or directories.
pub fn has_permissions(path: &Path) -> Result<bool> {
    let document = store::load_readonly(path)?;
    let allowed = document
        .get(PERMISSIONS_KEY)
        .and_then(|permissions| permissions.get(ALLOW_KEY))
        .and_then(Value::as_array)
        .is_some_and(|allow| {
            allow
                .iter()
                .any(|entry| entry.as_str().is_some_and(|s| TOOL_PERMISSIONS.contains(&s)))
        });
    Ok(allowed)
}
