//! The reconciliation engine.
//!
//! Each submodule owns one target file and follows the same cycle: load the
//! current content, compute the desired content, publish it with a single
//! atomic write. Repeating an operation is always a no-op byte-for-byte, and
//! nothing outside the entries this tool owns is ever touched.
//!
//! - [`mcp`] - the `codegraph` entry under `mcpServers`
//! - [`permissions`] - the CodeGraph tool identifiers in `permissions.allow`
//! - [`claude_md`] - the managed instruction section in `CLAUDE.md`
//!
//! The engine takes explicit root paths; resolving the home directory or the
//! current project is the CLI layer's job. That keeps every function here
//! testable against a plain temp directory.

pub mod claude_md;
pub mod mcp;
pub mod permissions;

use std::path::{Path, PathBuf};

use crate::constants::{
    CONFIG_DIR, GLOBAL_MCP_FILE, INSTRUCTIONS_FILE, LOCAL_MCP_FILE, SETTINGS_FILE,
};

/// Where the integration is installed.
///
/// Selects both the file paths and the shape of the connector entry: a global
/// install points Claude Code at the `codegraph` binary on `PATH`, a local
/// install goes through the package runner so collaborators without a global
/// install can use it too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallLocation {
    /// User-wide, rooted at the home directory.
    Global,
    /// Project-local, rooted at the project directory.
    Local,
}

impl InstallLocation {
    /// Human-readable label for CLI output.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Local => "local",
        }
    }
}

/// The three files a given install location reconciles.
#[derive(Debug, Clone)]
pub struct InstallPaths {
    /// Connector registration document (`~/.claude.json` or `./.mcp.json`).
    pub mcp_config: PathBuf,
    /// Permission document (`<config dir>/settings.json`).
    pub settings: PathBuf,
    /// Instruction document (`<config dir>/CLAUDE.md`).
    pub instructions: PathBuf,
}

impl InstallPaths {
    /// Resolve the target files for `location` from explicit roots.
    ///
    /// `home` is the user's home directory, `project` the project root; only
    /// the one selected by `location` is consulted.
    #[must_use]
    pub fn resolve(location: InstallLocation, home: &Path, project: &Path) -> Self {
        let (root, mcp_file) = match location {
            InstallLocation::Global => (home, GLOBAL_MCP_FILE),
            InstallLocation::Local => (project, LOCAL_MCP_FILE),
        };
        let config_dir = root.join(CONFIG_DIR);
        Self {
            mcp_config: root.join(mcp_file),
            settings: config_dir.join(SETTINGS_FILE),
            instructions: config_dir.join(INSTRUCTIONS_FILE),
        }
    }
}

/// What a section reconciliation did.
///
/// `created` means the instruction file itself was newly created; `updated`
/// means an existing managed (or legacy) section was replaced. A first-time
/// insertion into a pre-existing file reports neither.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionOutcome {
    /// The instruction file did not exist before this call.
    pub created: bool,
    /// An existing managed section was found and replaced.
    pub updated: bool,
}
