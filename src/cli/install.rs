//! The `install` command.
//!
//! Runs all three reconcilers for the chosen location. Safe to re-run at any
//! time: every step is idempotent and preserves whatever else lives in the
//! target files.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::constants::SERVER_NAME;
use crate::reconcile::{claude_md, mcp, permissions};

/// Install the CodeGraph integration into Claude Code.
#[derive(Debug, Args)]
pub struct InstallCommand {
    /// Install for the current project instead of user-wide.
    ///
    /// Writes `.mcp.json` and `.claude/` in the current directory, and
    /// registers the server through the package runner so collaborators
    /// without a global CodeGraph install can use it.
    #[arg(long)]
    local: bool,
}

impl InstallCommand {
    pub fn execute(self) -> Result<()> {
        let (location, paths) = super::resolve_paths(self.local)?;

        mcp::register_server(&paths.mcp_config, location)?;
        println!(
            "{} Registered `{SERVER_NAME}` MCP server in {}",
            "✓".green(),
            paths.mcp_config.display()
        );

        permissions::grant_permissions(&paths.settings)?;
        println!(
            "{} Granted CodeGraph tool permissions in {}",
            "✓".green(),
            paths.settings.display()
        );

        let outcome = claude_md::write_instructions(&paths.instructions)?;
        let action = if outcome.created {
            "Created instructions in"
        } else if outcome.updated {
            "Refreshed instructions section in"
        } else {
            "Added instructions section to"
        };
        println!("{} {action} {}", "✓".green(), paths.instructions.display());

        println!(
            "\n{} ({} install)",
            "CodeGraph is set up".bold(),
            location.label()
        );
        println!("  Restart Claude Code to pick up the new MCP server.");
        Ok(())
    }
}
