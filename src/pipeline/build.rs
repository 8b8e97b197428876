//! Ticket building: enriched report in, created tracker issue out.

use anyhow::bail;
use tracing::{info, instrument, warn};

use crate::{
    base::{
        config::Config,
        types::{CreatedIssue, IssuePayload, Priority, Res, TicketFields},
    },
    pipeline::extract,
    service::tracker::TrackerClient,
};

/// Run the extractors over an enriched report and apply per-field defaults.
pub fn ticket_fields(enriched: &str, config: &Config) -> TicketFields {
    let priority = extract::extract_priority(enriched).and_then(|p| Priority::parse(&p)).unwrap_or_default();

    TicketFields {
        title: extract::extract_title(enriched).unwrap_or_else(|| extract::FALLBACK_TITLE.to_string()),
        description: extract::extract_description(enriched).unwrap_or_else(|| extract::FALLBACK_DESCRIPTION.to_string()),
        priority,
        assignee: extract::extract_assignee(enriched),
        labels: extract::extract_labels(enriched, &config.fallback_label),
    }
}

/// Resolve an extracted assignee name to a tracker user id.
///
/// Names are matched case-insensitively. An unresolved (or absent) name falls
/// back to the configured fallback assignee so the ticket is never left
/// unassigned while a fallback exists.
pub fn resolve_assignee(name: Option<&str>, config: &Config) -> Option<String> {
    let normalized = name.unwrap_or_default().trim().to_lowercase();

    if let Some(id) = config.assignees.get(&normalized) {
        return Some(id.clone());
    }

    warn!("Assignee '{}' not found in the directory. Falling back to '{}'.", normalized, config.fallback_assignee);

    config.assignees.get(&config.fallback_assignee.to_lowercase()).cloned()
}

/// Resolve extracted label names to tracker label ids.
///
/// Lookup is case-insensitive; unmapped labels are discarded and duplicates
/// collapse to a single id. An empty result falls back to the configured
/// default label.
pub fn resolve_labels(labels: &[String], config: &Config) -> Vec<String> {
    let mut ids = Vec::new();

    for label in labels {
        let trimmed = label.trim();
        let mapped = config.labels.iter().find(|(name, _)| name.eq_ignore_ascii_case(trimmed)).map(|(_, id)| id.clone());

        match mapped {
            Some(id) if !ids.contains(&id) => ids.push(id),
            Some(_) => {}
            None => warn!("Discarding unmapped label '{trimmed}'."),
        }
    }

    if ids.is_empty()
        && let Some((_, id)) = config.labels.iter().find(|(name, _)| name.eq_ignore_ascii_case(&config.fallback_label))
    {
        ids.push(id.clone());
    }

    ids
}

/// Extract fields from an enriched report, resolve them against the
/// directories, and file the ticket with the tracker.
///
/// Missing tracker credentials are a precondition failure raised before any
/// network call.
#[instrument(skip_all)]
pub async fn file_ticket(enriched: &str, config: &Config, tracker: &TrackerClient) -> Res<CreatedIssue> {
    if config.linear_api_key.trim().is_empty() || config.linear_team_id.trim().is_empty() {
        bail!("Please ensure LINEAR_API_KEY and LINEAR_TEAM_ID are set in your environment.");
    }

    let fields = ticket_fields(enriched, config);
    let assignee_id = resolve_assignee(fields.assignee.as_deref(), config);
    let label_ids = resolve_labels(&fields.labels, config);

    let payload = IssuePayload {
        team_id: config.linear_team_id.clone(),
        title: fields.title,
        description: fields.description,
        priority: fields.priority.ordinal(),
        assignee_id,
        label_ids: if label_ids.is_empty() { None } else { Some(label_ids) },
    };

    let issue = tracker.create_issue(&payload).await?;

    info!("Created issue '{}' at {}", issue.title, issue.url);

    Ok(issue)
}
