//! Fixed names and strings shared across the setup engine.
//!
//! Everything the reconcilers write into Claude Code's files is anchored on
//! the literals below. They are centralized so a rename (server name, marker
//! text, file layout) is a one-file change.

/// Name of the MCP server entry owned by this tool.
pub const SERVER_NAME: &str = "codegraph";

/// Binary invoked for a user-wide install; assumed to be on `PATH`.
pub const SERVER_COMMAND: &str = "codegraph";

/// Package runner used for project-local installs.
pub const PACKAGE_RUNNER: &str = "npx";

/// Package the runner resolves for project-local installs.
pub const PACKAGE_NAME: &str = "codegraph-mcp";

/// Arguments that start the server in MCP mode.
pub const SERVER_ARGS: [&str; 2] = ["serve", "--mcp"];

/// Transport announced in the connector entry.
pub const SERVER_TRANSPORT: &str = "stdio";

/// Reserved top-level key holding connector registrations.
pub const MCP_SERVERS_KEY: &str = "mcpServers";

/// Reserved key holding the permission configuration in `settings.json`.
pub const PERMISSIONS_KEY: &str = "permissions";

/// Key of the allowlist inside the permission configuration.
pub const ALLOW_KEY: &str = "allow";

/// Connector file for a user-wide install, relative to the home directory.
pub const GLOBAL_MCP_FILE: &str = ".claude.json";

/// Connector file for a project-local install, relative to the project root.
pub const LOCAL_MCP_FILE: &str = ".mcp.json";

/// Configuration directory under either root.
pub const CONFIG_DIR: &str = ".claude";

/// Permission document inside the configuration directory.
pub const SETTINGS_FILE: &str = "settings.json";

/// Instruction document inside the configuration directory.
pub const INSTRUCTIONS_FILE: &str = "CLAUDE.md";

/// Suffix appended to a quarantined copy of an unparseable document.
pub const BACKUP_SUFFIX: &str = "backup";

/// Permission identifiers required for the CodeGraph tools.
pub const TOOL_PERMISSIONS: [&str; 7] = [
    "mcp__codegraph__codegraph_search",
    "mcp__codegraph__codegraph_context",
    "mcp__codegraph__codegraph_callers",
    "mcp__codegraph__codegraph_callees",
    "mcp__codegraph__codegraph_impact",
    "mcp__codegraph__codegraph_node",
    "mcp__codegraph__codegraph_status",
];

/// Start sentinel of the managed CLAUDE.md section.
pub const SECTION_START: &str = "<!-- codegraph:begin -->";

/// End sentinel of the managed CLAUDE.md section.
pub const SECTION_END: &str = "<!-- codegraph:end -->";

/// Heading that identifies a hand-authored legacy section.
pub const SECTION_TITLE: &str = "## CodeGraph";

/// Body of the managed section, between the sentinels.
pub const SECTION_BODY: &str = "\
## CodeGraph

CodeGraph indexes this repository into a code graph and serves it over MCP.
Prefer these tools over text search when exploring unfamiliar code:

- `codegraph_search` - find symbols, files, or snippets by name or meaning
- `codegraph_context` - pull a symbol's definition with surrounding context
- `codegraph_callers` / `codegraph_callees` - walk the call graph in either direction
- `codegraph_impact` - list code affected by a change to a given node
- `codegraph_node` - fetch a single graph node by id
- `codegraph_status` - check index health before relying on results

If the server is not running, start it with `codegraph serve --mcp`.";

/// The full managed section: sentinels wrapping [`SECTION_BODY`].
#[must_use]
pub fn section_block() -> String {
    format!("{SECTION_START}\n{SECTION_BODY}\n{SECTION_END}")
}
