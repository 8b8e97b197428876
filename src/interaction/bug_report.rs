//! Bug-report handling: enrich, file, and reply in-thread.

use tracing::{Instrument, error, instrument};

use crate::{
    base::{
        config::Config,
        types::{RawReport, Void},
    },
    pipeline::{build, enrich},
    service::{chat::ChatClient, llm::LlmClient, tracker::TrackerClient},
};

/// Handle a qualifying bug-report event.
///
/// Each event is processed independently on its own task; no event depends on
/// another's in-flight state.
#[instrument(skip_all)]
pub fn handle_bug_report(report: RawReport, channel_id: String, thread_ts: String, user_id: Option<String>, config: Config, llm: LlmClient, tracker: TrackerClient, chat: ChatClient) {
    tokio::spawn(async move {
        // Process the event.
        let result = process_bug_report(report, &channel_id, &thread_ts, user_id.as_deref(), &config, &llm, &tracker, &chat).in_current_span().await;

        // Log any errors.
        if let Err(err) = &result {
            error!("Error while handling: {}", err);
        }
    });
}

/// Run the pipeline for one report and post the outcome to the thread.
///
/// Enrichment and filing failures are recovered here and converted into
/// distinct user-visible replies; neither escalates past this boundary.
#[instrument(skip_all)]
pub async fn process_bug_report(
    report: RawReport,
    channel_id: &str,
    thread_ts: &str,
    user_id: Option<&str>,
    config: &Config,
    llm: &LlmClient,
    tracker: &TrackerClient,
    chat: &ChatClient,
) -> Void {
    let enriched = match enrich::enrich_report(&report, config, llm).await {
        Ok(enriched) => enriched,
        Err(err) => {
            error!("Error enriching bug report: {}", err);
            return chat.send_message(channel_id, thread_ts, &enrichment_failed_reply(user_id)).await;
        }
    };

    let issue = match build::file_ticket(&enriched, config, tracker).await {
        Ok(issue) => issue,
        Err(err) => {
            error!("Error filing ticket: {}", err);
            return chat.send_message(channel_id, thread_ts, &filing_failed_reply(user_id)).await;
        }
    };

    chat.send_message(channel_id, thread_ts, &ticket_created_reply(user_id, &issue.url)).await
}

fn ticket_created_reply(user_id: Option<&str>, url: &str) -> String {
    match user_id {
        Some(id) => format!("Thanks for reporting the bug, <@{id}>! A ticket has been created in Linear: {url}"),
        None => format!("Thanks for reporting the bug! A ticket has been created in Linear: {url}"),
    }
}

fn enrichment_failed_reply(user_id: Option<&str>) -> String {
    match user_id {
        Some(id) => format!("Sorry <@{id}>, there was an error processing your bug report."),
        None => "Sorry, there was an error processing your bug report.".to_string(),
    }
}

fn filing_failed_reply(user_id: Option<&str>) -> String {
    match user_id {
        Some(id) => format!("Sorry <@{id}>, I understood your bug report but could not file a ticket. Please try again later."),
        None => "Sorry, I understood your bug report but could not file a ticket. Please try again later.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replies_mention_the_reporter_when_known() {
        let reply = ticket_created_reply(Some("U123"), "https://linear.app/x");

        assert!(reply.contains("<@U123>"));
        assert!(reply.contains("https://linear.app/x"));
    }

    #[test]
    fn replies_read_cleanly_without_a_reporter() {
        let reply = enrichment_failed_reply(None);
        assert_eq!(reply, "Sorry, there was an error processing your bug report.");
    }

    #[test]
    fn failure_replies_are_distinct() {
        assert_ne!(enrichment_failed_reply(Some("U1")), filing_failed_reply(Some("U1")));
    }
}
