//! Managed instruction section in `CLAUDE.md`.
//!
//! The instruction document is free-form user territory; this tool owns
//! exactly one contiguous span of it. The span is found by sentinel markers
//! when this tool wrote it, or by the `## CodeGraph` heading when a user
//! authored it by hand (legacy adoption). Reconciling replaces that span with
//! the current template and preserves every byte around it.
//!
//! Section boundaries are detected with a line scanner over literal heading
//! markers, not a Markdown parser: a legacy section runs from its heading to
//! the next line opening with `##` that is not a deeper `###`-style heading,
//! or to end of file.

use anyhow::{Context, Result};
use std::fs;
use std::ops::Range;
use std::path::Path;
use tracing::warn;

use crate::constants::{SECTION_END, SECTION_START, SECTION_TITLE, section_block};
use crate::reconcile::SectionOutcome;
use crate::utils::fs::safe_write;

/// Insert or refresh the managed section in the document at `path`.
///
/// Exactly one atomic write, regardless of which branch applies.
pub fn write_instructions(path: &Path) -> Result<SectionOutcome> {
    let existing = read_optional(path)?;
    let (content, outcome) = reconcile_section(existing.as_deref(), &section_block());
    safe_write(path, &content)
        .with_context(|| format!("Failed to write instructions to: {}", path.display()))?;
    Ok(outcome)
}

/// Remove the managed section (sentinel-delimited or legacy) from `path`.
///
/// Surrounding text is kept; if nothing but the section remains, the file is
/// removed entirely. Returns whether a section was found and removed.
pub fn remove_instructions(path: &Path) -> Result<bool> {
    let Some(text) = read_optional(path)? else {
        return Ok(false);
    };

    let span = match sentinel_span(&text) {
        SentinelScan::Found(span) => Some(span),
        SentinelScan::Malformed => {
            warn!(
                "Managed section markers in {} are malformed; leaving the file as is",
                path.display()
            );
            None
        }
        SentinelScan::Absent => legacy_span(&text),
    };
    let Some(span) = span else {
        return Ok(false);
    };

    let prefix = text[..span.start].trim_end();
    let suffix = text[span.end..].trim_start();

    let mut remaining = String::new();
    remaining.push_str(prefix);
    if !prefix.is_empty() && !suffix.is_empty() {
        remaining.push_str("\n\n");
    }
    remaining.push_str(suffix.trim_end());

    if remaining.is_empty() {
        fs::remove_file(path)
            .with_context(|| format!("Failed to remove: {}", path.display()))?;
    } else {
        remaining.push('\n');
        safe_write(path, &remaining)
            .with_context(|| format!("Failed to write instructions to: {}", path.display()))?;
    }
    Ok(true)
}

/// Read-only predicate: does `path` already carry a managed section, either
/// sentinel-delimited or as a legacy heading?
pub fn has_instructions(path: &Path) -> Result<bool> {
    match read_optional(path)? {
        Some(text) => Ok(text.contains(SECTION_START) || legacy_span(&text).is_some()),
        None => Ok(false),
    }
}

/// Compute the reconciled document content.
///
/// The four branches, evaluated in order:
/// 1. no file: the content is just the managed block;
/// 2. well-formed sentinels: splice the block between the text around them;
/// 3. legacy `## CodeGraph` heading: splice the block over the legacy span;
/// 4. neither: append the block after the existing content.
///
/// Malformed sentinels (end missing or before start) are logged and handled
/// as if no sentinel block existed, falling to branches 3/4; no splice
/// boundary is guessed.
pub fn reconcile_section(existing: Option<&str>, block: &str) -> (String, SectionOutcome) {
    let Some(text) = existing else {
        return (format!("{block}\n"), SectionOutcome { created: true, updated: false });
    };

    match sentinel_span(text) {
        SentinelScan::Found(span) => {
            let content = format!("{}{block}{}", &text[..span.start], &text[span.end..]);
            return (content, SectionOutcome { created: false, updated: true });
        }
        SentinelScan::Malformed => {
            warn!(
                "Managed section markers are malformed (end marker missing or out of order); \
                 appending a fresh section and leaving the stale markers in place"
            );
        }
        SentinelScan::Absent => {}
    }

    if let Some(span) = legacy_span(text) {
        let content = format!("{}{block}\n{}", &text[..span.start], &text[span.end..]);
        return (content, SectionOutcome { created: false, updated: true });
    }

    let trimmed = text.trim_end();
    let content = if trimmed.is_empty() {
        format!("{block}\n")
    } else {
        format!("{trimmed}\n\n{block}\n")
    };
    (content, SectionOutcome::default())
}

enum SentinelScan {
    /// Byte range covering the start marker through the end marker inclusive.
    Found(Range<usize>),
    /// Start marker present, end marker missing or before the start.
    Malformed,
    Absent,
}

fn sentinel_span(text: &str) -> SentinelScan {
    let Some(start) = text.find(SECTION_START) else {
        return SentinelScan::Absent;
    };
    let search_from = start + SECTION_START.len();
    match text[search_from..].find(SECTION_END) {
        Some(rel) => {
            let end = search_from + rel + SECTION_END.len();
            SentinelScan::Found(start..end)
        }
        None => SentinelScan::Malformed,
    }
}

/// Locate a hand-authored section: the `## CodeGraph` heading line through
/// the next same-depth heading line, or end of file.
fn legacy_span(text: &str) -> Option<Range<usize>> {
    let mut offset = 0;
    let mut start = None;
    for line in text.split_inclusive('\n') {
        let content = line.trim_end();
        match start {
            None => {
                if content == SECTION_TITLE {
                    start = Some(offset);
                }
            }
            Some(begin) => {
                if is_section_boundary(content) {
                    return Some(begin..offset);
                }
            }
        }
        offset += line.len();
    }
    start.map(|begin| begin..text.len())
}

/// A line terminates the legacy section when it opens with the exact `##`
/// marker depth; a deeper `###` sub-heading stays inside the section.
fn is_section_boundary(line: &str) -> bool {
    match line.strip_prefix("##") {
        Some(rest) => !rest.starts_with('#'),
        None => false,
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    fs::read_to_string(path)
        .map(Some)
        .with_context(|| format!("Failed to read: {}", path.display()))
}
