//! Load configuration via `config` crate with env-override support.

use std::{collections::HashMap, ops::Deref, sync::Arc};

use serde::Deserialize;

use crate::base::prompts;

use super::types::Res;

/// Default OpenAI model used for report enrichment.
fn default_openai_model() -> String {
    "gpt-4o".to_string()
}

/// Default sampling temperature for report enrichment.
///
/// Deliberately non-zero: wording is allowed to vary, structure is pinned by
/// the prompt contract.
fn default_openai_temperature() -> f32 {
    0.7
}

/// Default system directive for the enrichment call.
fn default_enrichment_system_directive() -> String {
    prompts::ENRICHMENT_SYSTEM_DIRECTIVE.to_string()
}

/// Default phrase that makes a non-mention message qualify as a bug report.
fn default_trigger_phrase() -> String {
    "!bug".to_string()
}

/// Default port for the liveness endpoint.
fn default_health_port() -> u16 {
    5003
}

/// Default team roster advertised to the model as candidate assignees.
fn default_team() -> Vec<TeamMember> {
    vec![
        TeamMember {
            name: "Nikolas Ioannou".to_string(),
            role: "Co-Founder".to_string(),
            focus: "Best for strategic challenges and high-level product decisions.".to_string(),
        },
        TeamMember {
            name: "Bhavik Patel".to_string(),
            role: "Founding Engineer".to_string(),
            focus: "Best for addressing core functionality issues and backend performance problems.".to_string(),
        },
        TeamMember {
            name: "Aaron".to_string(),
            role: "Frontend Engineer".to_string(),
            focus: "Best for addressing frontend issues and UI/UX problems.".to_string(),
        },
        TeamMember {
            name: "Rushil Nagarsheth".to_string(),
            role: "Founding Engineer".to_string(),
            focus: "Best for managing infrastructure challenges and system integrations.".to_string(),
        },
    ]
}

/// Default assignee directory: lowercase name to Linear user id.
fn default_assignees() -> HashMap<String, String> {
    HashMap::from([
        ("nikolas ioannou".to_string(), "93d4b23a-0c5a-4dc1-81d8-45d82684e9d4".to_string()),
        ("bhavik patel".to_string(), "14543ff1-21dd-4e1d-ad23-bbf33d814ac0".to_string()),
        ("rushil nagarsheth".to_string(), "094f80e8-8853-40ca-837f-81e0b2b2b07f".to_string()),
        ("aaron".to_string(), "f5bc2d04-c905-4aa2-a25f-bbaa1e4af763".to_string()),
    ])
}

/// Default assignee to fall back to when the recommended name does not resolve.
fn default_fallback_assignee() -> String {
    "aaron".to_string()
}

/// Default label directory: logical label name to Linear label id.
fn default_labels() -> HashMap<String, String> {
    HashMap::from([
        ("Bug".to_string(), "74ecf219-8bfd-4944-b106-4b42273f84a8".to_string()),
        ("Feature".to_string(), "504d1625-23fb-41ac-afea-e46bcabb4e53".to_string()),
        ("Improvement".to_string(), "3688793e-2c4c-4e5b-a261-81f365f283f8".to_string()),
    ])
}

/// Default label applied when no extracted label resolves.
fn default_fallback_label() -> String {
    "Bug".to_string()
}

/// A candidate assignee as presented to the model.
#[derive(Debug, Deserialize, Clone)]
pub struct TeamMember {
    /// The member's name, as the model should emit it.
    pub name: String,
    /// The member's role (shown in the prompt roster).
    pub role: String,
    /// One-line description of what the member is best suited for.
    pub focus: String,
}

/// Configuration for the ticket-bot application.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Shared inner configuration.
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Inner configuration values, overridable via `TICKET_BOT`-prefixed
/// environment variables or the config file.
#[derive(Debug, Deserialize, Clone)]
pub struct ConfigInner {
    /// OpenAI API key (`TICKET_BOT_OPENAI_API_KEY`).
    pub openai_api_key: String,
    /// OpenAI model used for enrichment (`TICKET_BOT_OPENAI_MODEL`).
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    /// Sampling temperature for the enrichment call (`TICKET_BOT_OPENAI_TEMPERATURE`).
    /// Value between 0 and 2.
    #[serde(default = "default_openai_temperature")]
    pub openai_temperature: f32,
    /// Optional custom system directive for the enrichment call (`TICKET_BOT_ENRICHMENT_SYSTEM_DIRECTIVE`).
    #[serde(default = "default_enrichment_system_directive")]
    pub enrichment_system_directive: String,
    /// Slack app token (`TICKET_BOT_SLACK_APP_TOKEN`).
    pub slack_app_token: String,
    /// Slack bot token (`TICKET_BOT_SLACK_BOT_TOKEN`).
    pub slack_bot_token: String,
    /// Linear API key (`TICKET_BOT_LINEAR_API_KEY`).
    pub linear_api_key: String,
    /// Linear team id that new issues are filed under (`TICKET_BOT_LINEAR_TEAM_ID`).
    pub linear_team_id: String,
    /// Phrase that qualifies a plain channel message as a bug report (`TICKET_BOT_TRIGGER_PHRASE`).
    #[serde(default = "default_trigger_phrase")]
    pub trigger_phrase: String,
    /// Port for the liveness endpoint (`TICKET_BOT_HEALTH_PORT`).
    #[serde(default = "default_health_port")]
    pub health_port: u16,
    /// Candidate assignees listed in the enrichment prompt (`team` in the config file).
    #[serde(default = "default_team")]
    pub team: Vec<TeamMember>,
    /// Assignee directory: lowercase member name to tracker user id (`assignees` in the config file).
    #[serde(default = "default_assignees")]
    pub assignees: HashMap<String, String>,
    /// Name to assign when the recommended assignee does not resolve (`TICKET_BOT_FALLBACK_ASSIGNEE`).
    #[serde(default = "default_fallback_assignee")]
    pub fallback_assignee: String,
    /// Label directory: logical label name to tracker label id (`labels` in the config file).
    #[serde(default = "default_labels")]
    pub labels: HashMap<String, String>,
    /// Label applied when no extracted label resolves (`TICKET_BOT_FALLBACK_LABEL`).
    #[serde(default = "default_fallback_label")]
    pub fallback_label: String,
}

impl Default for ConfigInner {
    fn default() -> Self {
        Self {
            openai_api_key: String::new(),
            openai_model: default_openai_model(),
            openai_temperature: default_openai_temperature(),
            enrichment_system_directive: default_enrichment_system_directive(),
            slack_app_token: String::new(),
            slack_bot_token: String::new(),
            linear_api_key: String::new(),
            linear_team_id: String::new(),
            trigger_phrase: default_trigger_phrase(),
            health_port: default_health_port(),
            team: default_team(),
            assignees: default_assignees(),
            fallback_assignee: default_fallback_assignee(),
            labels: default_labels(),
            fallback_label: default_fallback_label(),
        }
    }
}

impl Config {
    /// Load configuration from `TICKET_BOT`-prefixed environment variables and,
    /// when present, a TOML config file.
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        let mut cfg = config::Config::builder().add_source(config::Environment::default().prefix("TICKET_BOT"));

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        result.validate()?;

        Ok(result)
    }

    /// Checks invariants that the type system cannot: the sampling temperature
    /// range, and that both directories can resolve their own fallback entry
    /// (an unresolved name must never abort ticket creation).
    pub fn validate(&self) -> Res<()> {
        if self.openai_temperature < 0.0 || self.openai_temperature > 2.0 {
            return Err(anyhow::anyhow!("OpenAI temperature must be between 0 and 2."));
        }

        if !self.assignees.contains_key(&self.fallback_assignee.to_lowercase()) {
            return Err(anyhow::anyhow!("Fallback assignee '{}' is not present in the assignee directory.", self.fallback_assignee));
        }

        if !self.labels.keys().any(|name| name.eq_ignore_ascii_case(&self.fallback_label)) {
            return Err(anyhow::anyhow!("Fallback label '{}' is not present in the label directory.", self.fallback_label));
        }

        Ok(())
    }
}
