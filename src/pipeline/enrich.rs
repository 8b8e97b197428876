//! Report enrichment: raw bug text in, structured (but untrusted) ticket text out.

use std::sync::LazyLock;

use anyhow::Context;
use regex::Regex;
use tracing::instrument;

use crate::{
    base::{config::Config, prompts, types::{RawReport, Res}},
    service::llm::LlmClient,
};

// The model is told not to emit Attachments sections, but it does anyway often
// enough that we scrub them here. Empty attachment sections are noise that must
// not reach the tracker.
static ATTACHMENTS_LINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?im)^[ \t]*attachments:[^\n]*\n?").unwrap());
static ATTACHMENTS_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)\*\*Attachments:\*\*.*?(\n\*\*|\z)").unwrap());

/// Enrich a raw report via the language model and sanitize the completion.
///
/// The completion call is not retried here; a failure propagates to the
/// dispatcher, which converts it into a user-visible reply.
#[instrument(skip_all)]
pub async fn enrich_report(report: &RawReport, config: &Config, llm: &LlmClient) -> Res<String> {
    let prompt = prompts::report_prompt(&report.text, &report.attachments, &config.team);

    let completion = llm
        .complete(&config.enrichment_system_directive, &prompt, config.openai_temperature)
        .await
        .context("report enrichment failed")?;

    Ok(sanitize(&completion))
}

/// Remove attachment noise from a completion.
///
/// Drops any line beginning with `attachments:` (case-insensitive) and any
/// `**Attachments:**` block (including the explicit `None` variant) up to the
/// next section marker or end of text. Sanitization only removes; it never
/// fabricates structure the model omitted.
pub fn sanitize(ticket: &str) -> String {
    let mut ticket = ATTACHMENTS_LINE_RE.replace_all(ticket, "").into_owned();

    // The `\n**` that closes one block may open the next, and the block
    // pattern consumes it (no lookahead in the `regex` crate), so adjacent
    // blocks need repeated passes. Scrub until nothing changes.
    loop {
        let cleaned = ATTACHMENTS_BLOCK_RE.replace_all(&ticket, "$1").into_owned();
        if cleaned == ticket {
            return cleaned;
        }
        ticket = cleaned;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_removes_plain_attachment_lines() {
        let ticket = "**Title:** T\nattachments: https://example.com/a.png\n**Priority:** High\n";
        let cleaned = sanitize(ticket);

        assert!(!cleaned.to_lowercase().contains("attachments"));
        assert!(cleaned.contains("**Title:** T"));
        assert!(cleaned.contains("**Priority:** High"));
    }

    #[test]
    fn sanitize_removes_none_block_and_keeps_following_section() {
        let ticket = "**Attachments:** None\n\n**Title:** Carousel stuck\n";
        let cleaned = sanitize(ticket);

        assert!(!cleaned.contains("Attachments"));
        assert!(cleaned.contains("**Title:** Carousel stuck"));
    }

    #[test]
    fn sanitize_removes_trailing_attachment_block() {
        let ticket = "**Title:** T\n\n**Attachments:**\n- [a](https://example.com/a.png)\n- [b](https://example.com/b.png)";
        let cleaned = sanitize(ticket);

        assert!(!cleaned.contains("Attachments"));
        assert!(!cleaned.contains("example.com"));
        assert!(cleaned.contains("**Title:** T"));
    }

    #[test]
    fn sanitize_leaves_clean_tickets_untouched() {
        let ticket = "**Title:** T\n\n**Description:** D\n\n**Priority:** Low\n";
        assert_eq!(sanitize(ticket), ticket);
    }

    #[test]
    fn sanitize_removes_adjacent_attachment_blocks_in_one_pass() {
        let ticket = "**Attachments:** None\n**Attachments:** more\n**Title:** T\n";
        let cleaned = sanitize(ticket);

        assert!(!cleaned.contains("Attachments"));
        assert!(!cleaned.contains("more"));
        assert!(cleaned.contains("**Title:** T"));
    }

    #[test]
    fn sanitize_is_idempotent() {
        let tickets = ["**Attachments:** None\n\n**Title:** T\n", "**Attachments:** a\n**Attachments:** b\n**Title:** T\n"];

        for ticket in tickets {
            let once = sanitize(ticket);
            assert_eq!(sanitize(&once), once);
        }
    }
}
