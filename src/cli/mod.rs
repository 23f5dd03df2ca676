//! Command-line interface for codegraph-setup.
//!
//! The CLI is a thin collaborator around the reconciliation engine: it
//! resolves an install location to concrete paths (home directory for
//! `--global` behavior, current directory for `--local`) and invokes the
//! engine. All merge semantics live in [`crate::reconcile`].
//!
//! # Commands
//!
//! - `install` - register the server, grant permissions, write instructions
//! - `status` - report what is already installed, without touching anything
//! - `uninstall` - remove exactly what `install` added
//!
//! ```bash
//! codegraph-setup install            # user-wide
//! codegraph-setup install --local    # current project
//! codegraph-setup status --local
//! codegraph-setup uninstall
//! ```

pub mod install;
pub mod status;
pub mod uninstall;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::reconcile::{InstallLocation, InstallPaths};

/// Top-level CLI parser.
#[derive(Parser)]
#[command(
    name = "codegraph-setup",
    about = "Wire the CodeGraph MCP server into Claude Code",
    version = env!("CODEGRAPH_SETUP_FULL_VERSION")
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output for debugging.
    ///
    /// Equivalent to `RUST_LOG=debug`. Mutually exclusive with `--quiet`.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress diagnostics; only errors are reported.
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Install the CodeGraph integration (connector, permissions, CLAUDE.md).
    Install(install::InstallCommand),

    /// Report which parts of the integration are already installed.
    ///
    /// Read-only: creates and modifies nothing, and exits nonzero when the
    /// install is incomplete so scripts can gate on it.
    Status(status::StatusCommand),

    /// Remove the CodeGraph integration, leaving unrelated state untouched.
    Uninstall(uninstall::UninstallCommand),
}

impl Cli {
    /// Initialize the tracing subscriber according to the verbosity flags.
    ///
    /// An explicit `RUST_LOG` always wins; `--quiet` silences everything
    /// below the error level.
    pub fn init_tracing(&self) {
        let default_directive = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    /// Dispatch to the selected subcommand.
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Install(cmd) => cmd.execute(),
            Commands::Status(cmd) => cmd.execute(),
            Commands::Uninstall(cmd) => cmd.execute(),
        }
    }
}

/// Resolve the install location and its target paths from the environment.
///
/// This is the only place the home directory and current directory are
/// consulted; the engine itself takes explicit paths.
pub(crate) fn resolve_paths(local: bool) -> Result<(InstallLocation, InstallPaths)> {
    let location = if local { InstallLocation::Local } else { InstallLocation::Global };
    let home = dirs::home_dir().context("Could not determine the home directory")?;
    let project =
        std::env::current_dir().context("Could not determine the current directory")?;
    Ok((location, InstallPaths::resolve(location, &home, &project)))
}
