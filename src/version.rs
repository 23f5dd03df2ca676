//! Build-time version string assembly.
//!
//! The released binary reports more than the bare crate version: packaging can
//! override the whole string, append a channel suffix, or fall back to git
//! metadata from the build checkout. The precedence chain is strict and the
//! pure part ([`compose_version`]) is kept free of environment access so it
//! can be tested directly. `build.rs` mounts this file with `#[path]` and
//! exports the result as `CODEGRAPH_SETUP_FULL_VERSION`.

use std::path::Path;
use std::process::Command;

/// Environment variable holding a full version override. When set, its value
/// is reported verbatim and everything else is ignored.
pub const VERSION_OVERRIDE_ENV: &str = "CODEGRAPH_SETUP_VERSION";

/// Environment variable holding a suffix appended to the crate version.
/// Normalized to start with `+` unless it already starts with `+` or `-`.
pub const VERSION_SUFFIX_ENV: &str = "CODEGRAPH_SETUP_VERSION_SUFFIX";

/// Git metadata captured from the build checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitBuildInfo {
    /// Abbreviated commit hash from `git rev-parse --short HEAD`.
    pub short_sha: String,
    /// UTC build timestamp (`YYYYmmddHHMMSS`), present only when the working
    /// tree had uncommitted changes.
    pub dirty_at: Option<String>,
}

/// Assemble the reported version string.
///
/// Precedence:
/// 1. `override_full` wins outright.
/// 2. `suffix` is appended to `base`, prefixed with `+` unless it already
///    starts with `+` or `-`.
/// 3. Git metadata becomes `+g<shortsha>`, or
///    `+g<shortsha>.dirty.<timestamp>` for a dirty tree.
/// 4. Otherwise `base` is returned unmodified.
///
/// Empty strings count as unset so that `FOO= cargo build` behaves like an
/// absent variable.
pub fn compose_version(
    base: &str,
    override_full: Option<&str>,
    suffix: Option<&str>,
    git: Option<&GitBuildInfo>,
) -> String {
    if let Some(full) = override_full.filter(|s| !s.is_empty()) {
        return full.to_string();
    }

    if let Some(suffix) = suffix.filter(|s| !s.is_empty()) {
        return if suffix.starts_with('+') || suffix.starts_with('-') {
            format!("{base}{suffix}")
        } else {
            format!("{base}+{suffix}")
        };
    }

    if let Some(git) = git {
        return match &git.dirty_at {
            Some(stamp) => format!("{base}+g{}.dirty.{stamp}", git.short_sha),
            None => format!("{base}+g{}", git.short_sha),
        };
    }

    base.to_string()
}

/// Probe git metadata for the checkout containing `dir`.
///
/// Any failure (no git binary, not a repository, unreadable output) yields
/// `None` rather than an error; a missing checkout is an expected state for
/// release tarballs.
pub fn git_build_info(dir: &Path) -> Option<GitBuildInfo> {
    let short_sha = git_stdout(dir, &["rev-parse", "--short", "HEAD"])?;
    if short_sha.is_empty() {
        return None;
    }

    let dirty_at = match git_stdout(dir, &["status", "--porcelain"]) {
        Some(status) if !status.is_empty() => {
            Some(chrono::Utc::now().format("%Y%m%d%H%M%S").to_string())
        }
        _ => None,
    };

    Some(GitBuildInfo { short_sha, dirty_at })
}

fn git_stdout(dir: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new("git").arg("-C").arg(dir).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let stdout = String::from_utf8(output.stdout).ok()?;
    Some(stdout.trim().to_string())
}
