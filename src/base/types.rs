//! Common types and result aliases used throughout the application.

use serde::{Deserialize, Serialize};

/// The common error type for the application.
pub type Err = anyhow::Error;
/// The common result type for the application.
pub type Res<T> = Result<T, Err>;
/// A result carrying no value.
pub type Void = Res<()>;

/// A bug report as it arrived from the chat platform: the raw message text plus
/// any attachment references worth forwarding to the model.
#[derive(Debug, Clone)]
pub struct RawReport {
    /// The raw message text as the reporter typed it.
    pub text: String,
    /// Attachment references, in the order they appeared on the message.
    pub attachments: Vec<AttachmentRef>,
}

/// Reference to a file attached to the triggering message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentRef {
    /// URI of the attached file.
    pub url: String,
    /// Media type of the attached file (e.g., `image/png`).
    pub media_type: String,
}

/// Ticket priority, ordered from least to most severe.
///
/// The ordinals follow the original tracker mapping (low=0, medium=1, high=2);
/// `Urgent` is mapped explicitly to 3 instead of falling through to the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    /// Low priority (ordinal 0).
    Low,
    /// Medium priority (ordinal 1). The default when the section is absent or
    /// unrecognized.
    #[default]
    Medium,
    /// High priority (ordinal 2).
    High,
    /// Urgent priority (ordinal 3).
    Urgent,
}

impl Priority {
    /// Case-insensitive parse of a priority level name.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "urgent" => Some(Self::Urgent),
            _ => None,
        }
    }

    /// The ordinal sent to the tracker.
    pub fn ordinal(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
            Self::Urgent => 3,
        }
    }
}

/// Typed fields recovered from an enriched report, after per-field defaults have
/// been applied but before directory resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketFields {
    /// Ticket title, defaulted when the section is absent.
    pub title: String,
    /// Ticket description, defaulted when the section is absent.
    pub description: String,
    /// Ticket priority, defaulted to `Medium`.
    pub priority: Priority,
    /// Recommended assignee name, if one was extracted.
    pub assignee: Option<String>,
    /// Extracted label names; always non-empty.
    pub labels: Vec<String>,
}

/// Outbound issue-creation payload for the tracker.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuePayload {
    /// Tracker team the issue is filed under.
    pub team_id: String,
    /// Issue title.
    pub title: String,
    /// Issue description.
    pub description: String,
    /// Priority ordinal.
    pub priority: u8,
    /// Resolved assignee id, when one was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    /// Resolved label ids, when any were found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_ids: Option<Vec<String>>,
}

/// Handle for an issue the tracker created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedIssue {
    /// Tracker-assigned issue id.
    pub id: String,
    /// Title of the created issue.
    pub title: String,
    /// Browser URL of the created issue.
    pub url: String,
}
