//! The `status` command.
//!
//! Read-only view over the three install targets. Uses the engine's
//! predicates, which never create files or directories, so `status` is safe
//! to run anywhere - including a project that has never seen CodeGraph.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::reconcile::{claude_md, mcp, permissions};

/// Report which parts of the CodeGraph integration are installed.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Check the current project instead of the user-wide install.
    #[arg(long)]
    local: bool,
}

impl StatusCommand {
    pub fn execute(self) -> Result<()> {
        let (location, paths) = super::resolve_paths(self.local)?;

        let checks = [
            ("MCP server registration", mcp::is_registered(&paths.mcp_config)?),
            ("tool permissions", permissions::has_permissions(&paths.settings)?),
            ("CLAUDE.md instructions", claude_md::has_instructions(&paths.instructions)?),
        ];

        println!("CodeGraph status ({} install):", location.label());
        for (label, ok) in &checks {
            let glyph = if *ok { "✓".green() } else { "✗".red() };
            println!("  {glyph} {label}");
        }

        let missing = checks.iter().filter(|(_, ok)| !ok).count();
        if missing > 0 {
            return Err(anyhow::anyhow!(
                "{missing} of {} components not installed; run `codegraph-setup install{}`",
                checks.len(),
                if self.local { " --local" } else { "" }
            ));
        }
        Ok(())
    }
}
