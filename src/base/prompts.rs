//! Prompt templates for the enrichment call.

use crate::base::{config::TeamMember, types::AttachmentRef};

/// System directive for the enrichment call.
///
/// The model is told to keep the markdown markers intact: the extractor scans
/// for them literally. Attachment sections are suppressed up front and again in
/// sanitization, since the model does not always comply.
pub const ENRICHMENT_SYSTEM_DIRECTIVE: &str = "You format bug reports into a structured ticket exactly following the Markdown format provided. \
Do not alter the markdown syntax. Do not include any section with 'Attachments:' in your response.";

/// Build the user prompt for the enrichment call.
///
/// Embeds the raw report verbatim, enumerates the candidate assignees with
/// their specialties, and pins the exact section markers and allowed value sets
/// the extractor expects. Attachment URIs, when present, are appended with an
/// instruction to render each as a Markdown link.
pub fn report_prompt(raw_text: &str, attachments: &[AttachmentRef], team: &[TeamMember]) -> String {
    let mut prompt = String::from(
        "You are the best AI product manager. Read the following raw bug report and produce \
a structured ticket with the following exact format:\n\n\
**Title:** <a concise summary of the issue>\n\n\
**Description:** <detailed explanation of the bug>\n\n\
**Priority:** <Urgent, High, Medium, or Low>\n\n\
**Recommended Assignee:** <choose the team member best suited>\n\n\
**Labels:** <choose one: Bug, Feature, or Improvement>\n\n\
Team Members:\n",
    );

    for (index, member) in team.iter().enumerate() {
        prompt.push_str(&format!("{}. **{} ({}):** {}\n", index + 1, member.name, member.role, member.focus));
    }

    prompt.push_str("\nRaw Bug Report:\n");
    prompt.push_str(raw_text);
    prompt.push('\n');

    if !attachments.is_empty() {
        prompt.push_str("\nAttached media (render each as a Markdown link in the description):\n");
        for attachment in attachments {
            prompt.push_str(&format!("- {} ({})\n", attachment.url, attachment.media_type));
        }
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::config::ConfigInner;

    #[test]
    fn report_prompt_embeds_raw_text_and_roster() {
        let team = ConfigInner::default().team;
        let prompt = report_prompt("The carousel is stuck.", &[], &team);

        assert!(prompt.contains("The carousel is stuck."));
        assert!(prompt.contains("**Bhavik Patel (Founding Engineer):**"));
        assert!(prompt.contains("**Title:**"));
        assert!(prompt.contains("**Priority:** <Urgent, High, Medium, or Low>"));
        assert!(!prompt.contains("Attached media"));
    }

    #[test]
    fn report_prompt_lists_attachment_uris() {
        let team = ConfigInner::default().team;
        let attachments = vec![AttachmentRef {
            url: "https://files.example.com/screenshot.png".to_string(),
            media_type: "image/png".to_string(),
        }];

        let prompt = report_prompt("Broken button.", &attachments, &team);

        assert!(prompt.contains("https://files.example.com/screenshot.png (image/png)"));
        assert!(prompt.contains("Markdown link"));
    }
}
