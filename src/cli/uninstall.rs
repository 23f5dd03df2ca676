//! The `uninstall` command.
//!
//! Inverse of `install`: removes the server registration, revokes the tool
//! permissions, and splices the managed section out of `CLAUDE.md`. Unrelated
//! servers, permissions, and surrounding text are left exactly as they were.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::constants::SERVER_NAME;
use crate::reconcile::{claude_md, mcp, permissions};

/// Remove the CodeGraph integration from Claude Code.
#[derive(Debug, Args)]
pub struct UninstallCommand {
    /// Uninstall from the current project instead of user-wide.
    #[arg(long)]
    local: bool,
}

impl UninstallCommand {
    pub fn execute(self) -> Result<()> {
        let (location, paths) = super::resolve_paths(self.local)?;
        let mut removed_anything = false;

        if mcp::unregister_server(&paths.mcp_config)? {
            removed_anything = true;
            println!(
                "{} Removed `{SERVER_NAME}` MCP server from {}",
                "✓".green(),
                paths.mcp_config.display()
            );
        }

        if permissions::revoke_permissions(&paths.settings)? {
            removed_anything = true;
            println!(
                "{} Revoked CodeGraph tool permissions in {}",
                "✓".green(),
                paths.settings.display()
            );
        }

        if claude_md::remove_instructions(&paths.instructions)? {
            removed_anything = true;
            println!(
                "{} Removed instructions section from {}",
                "✓".green(),
                paths.instructions.display()
            );
        }

        if removed_anything {
            println!("\nCodeGraph has been removed ({} install).", location.label());
        } else {
            println!("Nothing to remove for the {} install.", location.label());
        }
        Ok(())
    }
}
