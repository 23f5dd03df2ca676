//! Connector registration in the MCP configuration file.
//!
//! The entry under `mcpServers.codegraph` is owned by this tool and replaced
//! wholesale on every install - registrations are atomic units, never
//! deep-merged, so a stale `args` list from an older release cannot survive
//! an upgrade. Everything else in the document (other servers, unrelated
//! top-level keys) passes through untouched.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::constants::{
    MCP_SERVERS_KEY, PACKAGE_NAME, PACKAGE_RUNNER, SERVER_ARGS, SERVER_COMMAND, SERVER_NAME,
    SERVER_TRANSPORT,
};
use crate::reconcile::InstallLocation;
use crate::store;

/// A single MCP server registration as Claude Code reads it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerEntry {
    /// Transport type; always `stdio` for CodeGraph.
    pub r#type: String,
    /// Executable to launch.
    pub command: String,
    /// Arguments passed to the executable.
    pub args: Vec<String>,
}

/// Build the registration shape for an install location.
///
/// Global installs invoke the `codegraph` binary directly; local installs go
/// through the package runner so the project works for collaborators who
/// never installed the binary.
#[must_use]
pub fn server_entry(location: InstallLocation) -> ServerEntry {
    let (command, args): (&str, Vec<&str>) = match location {
        InstallLocation::Global => (SERVER_COMMAND, SERVER_ARGS.to_vec()),
        InstallLocation::Local => {
            let mut args = vec![PACKAGE_NAME];
            args.extend(SERVER_ARGS);
            (PACKAGE_RUNNER, args)
        }
    };
    ServerEntry {
        r#type: SERVER_TRANSPORT.to_string(),
        command: command.to_string(),
        args: args.into_iter().map(String::from).collect(),
    }
}

/// Register (or re-register) the CodeGraph server in the document at `path`.
///
/// Idempotent: a second run with the same location produces byte-identical
/// file content.
pub fn register_server(path: &Path, location: InstallLocation) -> Result<()> {
    let mut document = store::load(path)?;
    let servers = store::ensure_object(&mut document, MCP_SERVERS_KEY);

    let entry = serde_json::to_value(server_entry(location))
        .context("Failed to serialize server registration")?;
    if servers.insert(SERVER_NAME.to_string(), entry).is_some() {
        debug!("Replacing existing `{SERVER_NAME}` registration in {}", path.display());
    }

    store::save(path, &document)
        .with_context(|| format!("Failed to write MCP configuration to: {}", path.display()))
}

/// Remove the CodeGraph registration, leaving all other entries in place.
///
/// Returns whether an entry was actually removed; when nothing was found the
/// file is not rewritten.
pub fn unregister_server(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }

    let mut document = store::load(path)?;
    let removed = match document.get_mut(MCP_SERVERS_KEY) {
        Some(serde_json::Value::Object(servers)) => servers.remove(SERVER_NAME).is_some(),
        _ => false,
    };

    if removed {
        store::save(path, &document)
            .with_context(|| format!("Failed to write MCP configuration to: {}", path.display()))?;
    }
    Ok(removed)
}

/// Read-only predicate: is the CodeGraph server registered at `path`?
///
/// Creates no files or directories; a missing or unreadable document simply
/// reports `false`.
pub fn is_registered(path: &Path) -> Result<bool> {
    let document = store::load_readonly(path)?;
    Ok(document
        .get(MCP_SERVERS_KEY)
        .and_then(|servers| servers.get(SERVER_NAME))
        .is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn global_entry_invokes_the_binary_directly() {
        let entry = server_entry(InstallLocation::Global);
        assert_eq!(entry.r#type, "stdio");
        assert_eq!(entry.command, "codegraph");
        assert_eq!(entry.args, vec!["serve", "--mcp"]);
    }

    #[test]
    fn local_entry_goes_through_the_package_runner() {
        let entry = server_entry(InstallLocation::Local);
        assert_eq!(entry.command, "npx");
        assert_eq!(entry.args, vec!["codegraph-mcp", "serve", "--mcp"]);
    }

    #[test]
    fn register_creates_the_document_from_scratch() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".mcp.json");

        register_server(&path, InstallLocation::Local).unwrap();

        let doc: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            doc["mcpServers"]["codegraph"],
            json!({
                "type": "stdio",
                "command": "npx",
                "args": ["codegraph-mcp", "serve", "--mcp"],
            })
        );
    }

    #[test]
    fn register_twice_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".claude.json");

        register_server(&path, InstallLocation::Global).unwrap();
        let first = fs::read(&path).unwrap();
        register_server(&path, InstallLocation::Global).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn register_replaces_a_stale_entry_wholesale() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".mcp.json");
        fs::write(
            &path,
            json!({
                "mcpServers": {
                    "codegraph": {
                        "type": "stdio",
                        "command": "old-binary",
                        "args": ["old"],
                        "env": {"LEFTOVER": "1"},
                    }
                }
            })
            .to_string(),
        )
        .unwrap();

        register_server(&path, InstallLocation::Local).unwrap();

        let doc: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        // No deep merge: the stale env block is gone.
        assert_eq!(
            doc["mcpServers"]["codegraph"],
            json!({
                "type": "stdio",
                "command": "npx",
                "args": ["codegraph-mcp", "serve", "--mcp"],
            })
        );
    }

    #[test]
    fn register_preserves_unrelated_servers_and_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".claude.json");
        fs::write(
            &path,
            json!({
                "mcpServers": {"other": {"command": "other-tool"}},
                "theme": "dark",
            })
            .to_string(),
        )
        .unwrap();

        register_server(&path, InstallLocation::Global).unwrap();

        let doc: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc["mcpServers"]["other"], json!({"command": "other-tool"}));
        assert_eq!(doc["theme"], json!("dark"));
        assert!(doc["mcpServers"]["codegraph"].is_object());
    }

    #[test]
    fn predicate_reports_without_creating_anything() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(".mcp.json");

        assert!(!is_registered(&path).unwrap());
        assert!(!dir.path().join("nested").exists());

        register_server(&path, InstallLocation::Local).unwrap();
        assert!(is_registered(&path).unwrap());
    }

    #[test]
    fn unregister_removes_only_our_entry() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".mcp.json");
        fs::write(
            &path,
            json!({
                "mcpServers": {
                    "other": {"command": "other-tool"},
                    "codegraph": {"type": "stdio", "command": "codegraph", "args": []},
                }
            })
            .to_string(),
        )
        .unwrap();

        assert!(unregister_server(&path).unwrap());

        let doc: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(doc["mcpServers"].get("codegraph").is_none());
        assert_eq!(doc["mcpServers"]["other"], json!({"command": "other-tool"}));

        // Second run finds nothing and reports it.
        assert!(!unregister_server(&path).unwrap());
    }

    #[test]
    fn unregister_missing_file_is_a_quiet_no_op() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".mcp.json");
        assert!(!unregister_server(&path).unwrap());
        assert!(!path.exists());
    }
}
