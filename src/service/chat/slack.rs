//! Slack implementation of the chat client.
//!
//! Listens over socket mode for app mentions and trigger-phrase messages,
//! converts them into raw bug reports, and hands them to the report handler.

use crate::{
    base::{
        config::Config,
        types::{AttachmentRef, RawReport, Res, Void},
    },
    interaction,
    service::{llm::LlmClient, tracker::TrackerClient},
};
use async_trait::async_trait;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use slack_morphism::prelude::*;
use tracing::{info, instrument, warn};

use std::{ops::Deref, sync::Arc};

use super::{ChatClient, GenericChatClient};

// Type aliases.

type FullClient = slack_morphism::SlackClient<SlackClientHyperConnector<HttpsConnector<HttpConnector>>>;

// Extra methods on `ChatClient` applied by the slack implementation.

impl ChatClient {
    /// Creates a new Slack chat client.
    pub async fn slack(config: &Config, llm: LlmClient, tracker: TrackerClient) -> Res<Self> {
        let client = SlackChatClient::new(config, llm, tracker).await?;
        Ok(Self { inner: Arc::new(client) })
    }
}

impl From<SlackChatClient> for ChatClient {
    fn from(client: SlackChatClient) -> Self {
        Self { inner: Arc::new(client) }
    }
}

// Structs.

/// User state for the slack socket client.
struct SlackUserState {
    config: Config,
    llm: LlmClient,
    tracker: TrackerClient,
    chat: ChatClient,
    bot_user_id: String,
}

/// Slack client implementation.
#[derive(Clone)]
struct SlackChatClient {
    pub app_token: SlackApiToken,
    pub bot_token: SlackApiToken,
    pub bot_user_id: String,
    pub client: Arc<FullClient>,
    pub config: Config,
    pub llm: LlmClient,
    pub tracker: TrackerClient,
}

impl Deref for SlackChatClient {
    type Target = FullClient;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}

impl SlackChatClient {
    /// Create a new Slack chat client.
    #[instrument(name = "SlackChatClient::new", skip_all)]
    pub async fn new(config: &Config, llm: LlmClient, tracker: TrackerClient) -> Res<Self> {
        // Initialize tokens.

        let app_token = SlackApiToken::new(SlackApiTokenValue(config.slack_app_token.clone()));
        let bot_token = SlackApiToken::new(SlackApiTokenValue(config.slack_bot_token.clone()));

        // Initialize the Slack client.

        let https_connector = HttpsConnector::<HttpConnector>::builder().with_native_roots()?.https_only().enable_all_versions().build();
        let connector = SlackClientHyperConnector::with_connector(https_connector);
        let client = Arc::new(slack_morphism::SlackClient::new(connector));

        // Get the bot's user ID.

        let session = client.open_session(&bot_token);
        let bot_user = session.auth_test().await?;
        let bot_user_id = bot_user.user_id.0;

        info!("Slack bot user ID: {}", bot_user_id);

        Ok(Self {
            app_token,
            bot_token,
            bot_user_id,
            client,
            config: config.clone(),
            llm,
            tracker,
        })
    }
}

#[async_trait]
impl GenericChatClient for SlackChatClient {
    fn bot_user_id(&self) -> &str {
        &self.bot_user_id
    }

    async fn start(&self) -> Void {
        // Initialize the socket mode listener.

        let socket_mode_callbacks = SlackSocketModeListenerCallbacks::new().with_push_events(handle_push_event);

        // Initialize the socket mode listener environment.

        let listener_environment = Arc::new(SlackClientEventsListenerEnvironment::new(self.client.clone()).with_user_state(SlackUserState {
            config: self.config.clone(),
            llm: self.llm.clone(),
            tracker: self.tracker.clone(),
            chat: ChatClient::from(self.clone()),
            bot_user_id: self.bot_user_id.clone(),
        }));

        let socket_mode_listener = Arc::new(SlackClientSocketModeListener::new(
            &SlackClientSocketModeConfig::new(),
            listener_environment.clone(),
            socket_mode_callbacks,
        ));

        // Register an app token to listen for events,
        socket_mode_listener.listen_for(&self.app_token).await?;

        // Start WS connections calling Slack API to get WS url for the token,
        // and wait for Ctrl-C to shutdown.
        socket_mode_listener.serve().await;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn send_message(&self, channel_id: &str, thread_ts: &str, text: &str) -> Void {
        let message = SlackMessageContent::new().with_text(text.to_string());

        let request = SlackApiChatPostMessageRequest::new(SlackChannelId(channel_id.to_string()), message)
            .with_as_user(true)
            .with_thread_ts(SlackTs(thread_ts.to_string()))
            .with_link_names(true);

        let session = self.client.open_session(&self.bot_token);

        let _ = session.chat_post_message(&request).await.map_err(|e| anyhow::anyhow!("Failed to send message: {}", e))?;

        Ok(())
    }
}

// Helpers.

/// Convert Slack file attachments into attachment references, keeping only
/// image and video media types.
fn attachment_refs(files: Option<&Vec<SlackFile>>) -> Vec<AttachmentRef> {
    files
        .map(|files| {
            files
                .iter()
                .filter_map(|file| {
                    let media_type = file.mimetype.as_ref()?.to_string();
                    if !(media_type.starts_with("image/") || media_type.starts_with("video/")) {
                        return None;
                    }

                    let url = file.url_private.as_ref()?.to_string();

                    Some(AttachmentRef { url, media_type })
                })
                .collect()
        })
        .unwrap_or_default()
}

// Socket mode listener callbacks for Slack.

/// Handles push events from Slack.
#[instrument(skip_all)]
async fn handle_push_event(event_callback: SlackPushEventCallback, _client: Arc<SlackHyperClient>, states: SlackClientEventsUserState) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let event = event_callback.event;
    let states = states.read().await;
    let user_state = states.get_user_state::<SlackUserState>().ok_or(anyhow::anyhow!("Failed to get user state"))?;

    match event {
        SlackEventCallbackBody::Message(message_event) => {
            info!("Received message event ...");

            // Never react to the bot's own messages.
            if message_event.sender.bot_id.is_some() {
                return Ok(());
            }

            let channel_id = message_event.origin.channel.as_ref().ok_or(anyhow::anyhow!("Failed to get channel ID"))?.0.to_owned();
            let text = message_event.content.as_ref().and_then(|c| c.text.clone()).unwrap_or_default();

            // If the message @mentions the bot, skip, and let the app mention handler take care of it.
            if text.contains(&user_state.bot_user_id) {
                return Ok(());
            }

            // Plain messages only qualify when they carry the trigger phrase.
            if !text.to_lowercase().contains(&user_state.config.trigger_phrase.to_lowercase()) {
                return Ok(());
            }

            // Replies thread under the triggering message itself unless it was already in a thread.
            let thread_ts = message_event.origin.thread_ts.clone().unwrap_or_else(|| message_event.origin.ts.clone()).0;
            let user_id = message_event.sender.user.as_ref().map(|u| u.0.clone());
            let attachments = attachment_refs(message_event.content.as_ref().and_then(|c| c.files.as_ref()));

            interaction::bug_report::handle_bug_report(
                RawReport { text, attachments },
                channel_id,
                thread_ts,
                user_id,
                user_state.config.clone(),
                user_state.llm.clone(),
                user_state.tracker.clone(),
                user_state.chat.clone(),
            );
        }
        SlackEventCallbackBody::AppMention(mention_event) => {
            info!("Received app mention event ...");

            let channel_id = mention_event.channel.0.to_owned();
            let thread_ts = mention_event.origin.thread_ts.clone().unwrap_or_else(|| mention_event.origin.ts.clone()).0;
            let text = mention_event.content.text.clone().unwrap_or_default();
            let attachments = attachment_refs(mention_event.content.files.as_ref());

            interaction::bug_report::handle_bug_report(
                RawReport { text, attachments },
                channel_id,
                thread_ts,
                Some(mention_event.user.0.clone()),
                user_state.config.clone(),
                user_state.llm.clone(),
                user_state.tracker.clone(),
                user_state.chat.clone(),
            );
        }
        _ => {
            warn!("Received unhandled push event.")
        }
    }

    Ok(())
}

// Tests.

#[cfg(test)]
mod tests {
    // The socket-mode client is exercised against the live Slack API; unit
    // coverage for event-to-report conversion lives in the handler and
    // pipeline tests, which take plain `RawReport` values.
}
