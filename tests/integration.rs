#![cfg(test)]

use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;
use ticket_bot::{
    base::{
        config::{Config, ConfigInner},
        types::{CreatedIssue, IssuePayload, RawReport, Res, Void},
    },
    interaction::bug_report::process_bug_report,
    service::{
        chat::{ChatClient, GenericChatClient},
        llm::{GenericLlmClient, LlmClient},
        tracker::{GenericTrackerClient, TrackerClient},
    },
};

// Mocks.

mock! {
    pub Chat {}

    #[async_trait]
    impl GenericChatClient for Chat {
        fn bot_user_id(&self) -> &str;
        async fn start(&self) -> Void;
        async fn send_message(&self, channel_id: &str, thread_ts: &str, text: &str) -> Void;
    }
}

mock! {
    pub Llm {}

    #[async_trait]
    impl GenericLlmClient for Llm {
        async fn complete(&self, system_directive: &str, prompt: &str, temperature: f32) -> Res<String>;
    }
}

mock! {
    pub Tracker {}

    #[async_trait]
    impl GenericTrackerClient for Tracker {
        async fn create_issue(&self, payload: &IssuePayload) -> Res<CreatedIssue>;
    }
}

// Fixtures.

const ENRICHED_REPORT: &str = "\
**Title:** Homepage Carousel Not Cycling Through Images

**Description:** The homepage carousel is stuck on the first image.

**Priority:** High

**Recommended Assignee:** Bhavik Patel (Founding Engineer)

**Labels:** Bug
";

fn test_config() -> Config {
    Config {
        inner: Arc::new(ConfigInner {
            openai_api_key: "test_key".to_string(),
            linear_api_key: "lin_api_test".to_string(),
            linear_team_id: "team-1".to_string(),
            ..Default::default()
        }),
    }
}

fn test_report() -> RawReport {
    RawReport {
        text: "The homepage carousel is stuck on the first image.".to_string(),
        attachments: vec![],
    }
}

fn created_issue() -> CreatedIssue {
    CreatedIssue {
        id: "abc-123".to_string(),
        title: "Homepage Carousel Not Cycling Through Images".to_string(),
        url: "https://linear.app/team/issue/ABC-123".to_string(),
    }
}

// Tests.

#[tokio::test]
async fn bug_report_is_filed_and_confirmed_in_thread() {
    let config = test_config();

    let mut llm = MockLlm::new();
    llm.expect_complete().times(1).returning(|_, _, _| Ok(ENRICHED_REPORT.to_string()));

    let mut tracker = MockTracker::new();
    tracker
        .expect_create_issue()
        .times(1)
        .withf(|payload| {
            payload.team_id == "team-1"
                && payload.title == "Homepage Carousel Not Cycling Through Images"
                && payload.priority == 2
                && payload.assignee_id.as_deref() == Some("14543ff1-21dd-4e1d-ad23-bbf33d814ac0")
                && payload.label_ids == Some(vec!["74ecf219-8bfd-4944-b106-4b42273f84a8".to_string()])
        })
        .returning(|_| Ok(created_issue()));

    let mut chat = MockChat::new();
    chat.expect_send_message()
        .times(1)
        .withf(|channel_id, thread_ts, text| channel_id == "C01TEST" && thread_ts == "1234567890.123456" && text.contains("https://linear.app/team/issue/ABC-123") && text.contains("<@U54321>"))
        .returning(|_, _, _| Ok(()));

    process_bug_report(
        test_report(),
        "C01TEST",
        "1234567890.123456",
        Some("U54321"),
        &config,
        &LlmClient::new(Arc::new(llm)),
        &TrackerClient::new(Arc::new(tracker)),
        &ChatClient::new(Arc::new(chat)),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn enrichment_failure_gets_a_generic_apology_and_no_ticket() {
    let config = test_config();

    let mut llm = MockLlm::new();
    llm.expect_complete().times(1).returning(|_, _, _| Err(anyhow::anyhow!("quota exceeded")));

    let mut tracker = MockTracker::new();
    tracker.expect_create_issue().times(0);

    let mut chat = MockChat::new();
    chat.expect_send_message()
        .times(1)
        .withf(|_, _, text| text.contains("error processing your bug report"))
        .returning(|_, _, _| Ok(()));

    process_bug_report(
        test_report(),
        "C01TEST",
        "1234567890.123456",
        Some("U54321"),
        &config,
        &LlmClient::new(Arc::new(llm)),
        &TrackerClient::new(Arc::new(tracker)),
        &ChatClient::new(Arc::new(chat)),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn tracker_failure_gets_a_distinct_reply() {
    let config = test_config();

    let mut llm = MockLlm::new();
    llm.expect_complete().times(1).returning(|_, _, _| Ok(ENRICHED_REPORT.to_string()));

    let mut tracker = MockTracker::new();
    tracker
        .expect_create_issue()
        .times(1)
        .returning(|_| Err(anyhow::anyhow!("Linear API error: [{{\"message\":\"Argument validation error\"}}]")));

    let mut chat = MockChat::new();
    chat.expect_send_message()
        .times(1)
        .withf(|_, _, text| text.contains("could not file a ticket") && !text.contains("error processing your bug report"))
        .returning(|_, _, _| Ok(()));

    process_bug_report(
        test_report(),
        "C01TEST",
        "1234567890.123456",
        Some("U54321"),
        &config,
        &LlmClient::new(Arc::new(llm)),
        &TrackerClient::new(Arc::new(tracker)),
        &ChatClient::new(Arc::new(chat)),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn missing_tracker_credentials_fail_before_any_tracker_call() {
    let config = Config {
        inner: Arc::new(ConfigInner {
            openai_api_key: "test_key".to_string(),
            ..Default::default()
        }),
    };

    let mut llm = MockLlm::new();
    llm.expect_complete().times(1).returning(|_, _, _| Ok(ENRICHED_REPORT.to_string()));

    let mut tracker = MockTracker::new();
    tracker.expect_create_issue().times(0);

    let mut chat = MockChat::new();
    chat.expect_send_message()
        .times(1)
        .withf(|_, _, text| text.contains("could not file a ticket"))
        .returning(|_, _, _| Ok(()));

    process_bug_report(
        test_report(),
        "C01TEST",
        "1234567890.123456",
        Some("U54321"),
        &config,
        &LlmClient::new(Arc::new(llm)),
        &TrackerClient::new(Arc::new(tracker)),
        &ChatClient::new(Arc::new(chat)),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn attachment_uris_are_forwarded_to_the_model() {
    let config = test_config();

    let mut llm = MockLlm::new();
    llm.expect_complete()
        .times(1)
        .withf(|_, prompt, _| prompt.contains("https://files.example.com/crash.mp4") && prompt.contains("The app crashes on login."))
        .returning(|_, _, _| Ok(ENRICHED_REPORT.to_string()));

    let mut tracker = MockTracker::new();
    tracker.expect_create_issue().times(1).returning(|_| Ok(created_issue()));

    let mut chat = MockChat::new();
    chat.expect_send_message().times(1).returning(|_, _, _| Ok(()));

    let report = RawReport {
        text: "The app crashes on login.".to_string(),
        attachments: vec![ticket_bot::base::types::AttachmentRef {
            url: "https://files.example.com/crash.mp4".to_string(),
            media_type: "video/mp4".to_string(),
        }],
    };

    process_bug_report(
        report,
        "C01TEST",
        "1234567890.123456",
        None,
        &config,
        &LlmClient::new(Arc::new(llm)),
        &TrackerClient::new(Arc::new(tracker)),
        &ChatClient::new(Arc::new(chat)),
    )
    .await
    .unwrap();
}
