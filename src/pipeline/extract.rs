//! Field extraction from enriched reports.
//!
//! The enriched report is model output: Markdown-ish text that usually carries
//! a fixed set of `**Section:**` markers but is never guaranteed to. Each
//! extractor here scans for its own marker with a tolerant pattern, takes the
//! first occurrence when markers repeat, and reports absence as `None` rather
//! than failing. Consumers state their own defaults; a missing section must
//! never block ticket creation.

use std::sync::LazyLock;

use regex::Regex;

/// Title used when the report carries no Title section.
pub const FALLBACK_TITLE: &str = "Bug Report Ticket";
/// Description used when the report carries no Description section.
pub const FALLBACK_DESCRIPTION: &str = "No description provided.";

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*Title:\*\*\s*([^\n]+)").unwrap());
static DESCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\*\*Description:\*\*\s*(.+?)(?:\n\*\*|\z)").unwrap());
static PRIORITY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*Priority:\*\*\s*(\w+)").unwrap());
static ASSIGNEE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*Recommended Assignee:\*\*\s*([^(\n]+)").unwrap());
static PAREN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\([^)]*\)").unwrap());
static LABELS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*Labels:\*\*\s*([^\n]+)").unwrap());

/// Extract the ticket title: the remainder of the first Title line, trimmed.
pub fn extract_title(report: &str) -> Option<String> {
    TITLE_RE.captures(report).map(|c| c[1].trim().to_string())
}

/// Extract the description: everything after the Description marker up to the
/// next section marker or end of text, trimmed.
pub fn extract_description(report: &str) -> Option<String> {
    DESCRIPTION_RE.captures(report).map(|c| c[1].trim().to_string())
}

/// Extract the first word token after the Priority marker, verbatim.
///
/// Case mapping to an ordinal is the caller's concern.
pub fn extract_priority(report: &str) -> Option<String> {
    PRIORITY_RE.captures(report).map(|c| c[1].trim().to_string())
}

/// Extract the recommended assignee's name.
///
/// Captures up to end of line or an opening parenthesis, then strips any
/// parenthetical role annotation and any trailing `-role` / `,role` suffix.
pub fn extract_assignee(report: &str) -> Option<String> {
    let captured = ASSIGNEE_RE.captures(report)?;
    let name = PAREN_RE.replace_all(captured[1].trim(), "");
    let name = name.split(['-', '–', ',']).next().unwrap_or_default().trim();

    if name.is_empty() { None } else { Some(name.to_string()) }
}

/// Extract the label list.
///
/// Splits the Labels line on commas, dropping empty tokens. When the section is
/// absent or empty, falls back to scanning the Title for "feature" or
/// "improvement" (case-insensitive), then to the given default label. The
/// result is always non-empty; duplicates are preserved for the directory
/// mapping stage to resolve.
pub fn extract_labels(report: &str, default_label: &str) -> Vec<String> {
    if let Some(captured) = LABELS_RE.captures(report) {
        let labels = captured[1]
            .split(',')
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>();

        if !labels.is_empty() {
            return labels;
        }
    }

    if let Some(title) = extract_title(report) {
        let title = title.to_lowercase();
        if title.contains("feature") {
            return vec!["Feature".to_string()];
        }
        if title.contains("improvement") {
            return vec!["Improvement".to_string()];
        }
    }

    vec![default_label.to_string()]
}
