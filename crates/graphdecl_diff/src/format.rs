//! Diff report formatting.

use std::fmt::Write;

use graphdecl_foundation::{Error, ErrorKind, Result};

use crate::diff::DiffResult;

/// Formats a human-readable diff report.
///
/// One line per resource (`+` added, `~` modified, `-` removed), its changes
/// indented beneath it, then a one-line tally.
#[must_use]
pub fn format_summary(result: &DiffResult) -> String {
    if result.is_empty() {
        return "No differences".to_string();
    }

    let mut output = String::new();
    for entry in &result.entries {
        let _ = writeln!(
            output,
            "{} {} {} ({})",
            entry.action.symbol(),
            entry.kind,
            entry.name,
            entry.action
        );
        for change in &entry.changes {
            let _ = writeln!(output, "    {change}");
        }
    }

    let counts = result.counts();
    let _ = writeln!(output);
    let _ = write!(
        output,
        "{} added, {} modified, {} removed; {} breaking",
        counts.added,
        counts.modified,
        counts.removed,
        result.breaking_count()
    );
    output
}

/// Serializes a diff as pretty-printed JSON.
///
/// # Errors
/// Returns an internal error if serialization fails.
pub fn to_json(result: &DiffResult) -> Result<String> {
    serde_json::to_string_pretty(result)
        .map_err(|e| Error::new(ErrorKind::Internal(format!("diff serialization: {e}"))))
}
