//! codegraph-setup - wires the CodeGraph MCP server into Claude Code.
//!
//! Installing an MCP integration means editing three files the user already
//! owns: the connector registration document (`~/.claude.json` or
//! `./.mcp.json`), the permission allowlist (`.claude/settings.json`), and
//! the instruction document (`.claude/CLAUDE.md`). This crate is the
//! reconciliation engine that makes those edits safe to repeat:
//!
//! - **Idempotent**: running the install twice produces byte-identical files;
//!   nothing is ever duplicated.
//! - **Non-destructive**: other servers, hand-added permissions, and
//!   surrounding Markdown text are preserved exactly. Unparseable documents
//!   are backed up to `<path>.backup` before being started fresh.
//! - **Crash-atomic**: every file mutation is a write-to-temp plus a single
//!   rename, so a reader sees either the old file or the new file, never a
//!   partial one.
//!
//! # Modules
//!
//! - [`reconcile`] - the engine: connector registration ([`reconcile::mcp`]),
//!   permission grants ([`reconcile::permissions`]), and the managed
//!   `CLAUDE.md` section ([`reconcile::claude_md`])
//! - [`store`] - tolerant load/save for JSON documents with corruption
//!   quarantine
//! - [`utils`] - atomic file operations
//! - [`cli`] - the `install` / `status` / `uninstall` commands
//! - [`constants`] - every fixed name and marker string in one place
//! - [`version`] - build-time version string assembly
//!
//! # Example
//!
//! ```rust,no_run
//! use codegraph_setup::reconcile::{mcp, InstallLocation, InstallPaths};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let paths = InstallPaths::resolve(
//!     InstallLocation::Local,
//!     Path::new("/home/me"),
//!     Path::new("."),
//! );
//! mcp::register_server(&paths.mcp_config, InstallLocation::Local)?;
//! assert!(mcp::is_registered(&paths.mcp_config)?);
//! # Ok(())
//! # }
//! ```
//!
//! Concurrency model: single-threaded and synchronous. Atomicity protects
//! against a crashed or interrupted writer, not against two processes
//! installing at once (last rename wins).

pub mod cli;
pub mod constants;
pub mod reconcile;
pub mod store;
pub mod utils;
pub mod version;
