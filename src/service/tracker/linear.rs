//! Linear implementation of the tracker client, over the GraphQL API.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::base::{
    config::Config,
    types::{CreatedIssue, IssuePayload, Res},
};

use super::{GenericTrackerClient, TrackerClient};

const LINEAR_GRAPHQL_URL: &str = "https://api.linear.app/graphql";

const ISSUE_CREATE_MUTATION: &str = r#"
mutation IssueCreate($input: IssueCreateInput!) {
  issueCreate(input: $input) {
    success
    issue {
      id
      title
      url
    }
  }
}
"#;

// Extra methods on `TrackerClient` applied by the linear implementation.

impl TrackerClient {
    pub fn linear(config: &Config) -> Self {
        let client = LinearTrackerClient::new(config);
        Self { inner: Arc::new(client) }
    }
}

// Specific implementations.

/// Linear tracker client implementation.
#[derive(Clone)]
pub struct LinearTrackerClient {
    http: reqwest::Client,
    api_key: String,
}

impl LinearTrackerClient {
    /// Create a new Linear tracker client.
    #[instrument(name = "LinearTrackerClient::new", skip_all)]
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.linear_api_key.clone(),
        }
    }
}

#[async_trait]
impl GenericTrackerClient for LinearTrackerClient {
    #[instrument(name = "LinearTrackerClient::create_issue", skip_all)]
    async fn create_issue(&self, payload: &IssuePayload) -> Res<CreatedIssue> {
        let body = json!({
            "query": ISSUE_CREATE_MUTATION,
            "variables": { "input": payload },
        });

        let response = self
            .http
            .post(LINEAR_GRAPHQL_URL)
            .header(AUTHORIZATION, &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(anyhow::anyhow!("Linear responded with {status}: {text}"));
        }

        let issue = parse_issue_create_response(&text)?;

        info!("Linear issue created: {}", issue.id);

        Ok(issue)
    }
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<IssueCreateData>,
    errors: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct IssueCreateData {
    #[serde(rename = "issueCreate")]
    issue_create: IssueCreateResult,
}

#[derive(Debug, Deserialize)]
struct IssueCreateResult {
    issue: Option<CreatedIssue>,
}

/// Parse an `issueCreate` response body.
///
/// A non-empty `errors` array is surfaced as a tracker-API failure carrying the
/// raw error payload.
fn parse_issue_create_response(body: &str) -> Res<CreatedIssue> {
    let response: GraphqlResponse = serde_json::from_str(body)?;

    if let Some(errors) = response.errors
        && !errors.is_empty()
    {
        return Err(anyhow::anyhow!("Linear API error: {}", serde_json::to_string(&errors)?));
    }

    response
        .data
        .and_then(|data| data.issue_create.issue)
        .ok_or_else(|| anyhow::anyhow!("Linear response contained no created issue."))
}
