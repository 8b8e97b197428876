//! Runtime services and shared state for the ticket-bot.

use tracing::{error, instrument};

use crate::{
    base::{
        config::Config,
        types::{Res, Void},
    },
    health,
    service::{chat::ChatClient, llm::LlmClient, tracker::TrackerClient},
};

/// Runtime service context that can be shared across the application.
///
/// This struct holds the configuration and the three service clients. It is
/// designed to be trivially cloneable, allowing it to be passed around without
/// the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The LLM client instance.
    pub llm: LlmClient,
    /// The tracker client instance.
    pub tracker: TrackerClient,
    /// The chat client instance.
    pub chat: ChatClient,
}

impl Runtime {
    /// Create a new runtime instance.
    #[instrument(skip_all)]
    pub async fn new(config: Config) -> Res<Self> {
        // Initialize the LLM client.
        let llm = LlmClient::openai(&config);

        // Initialize the tracker client.
        let tracker = TrackerClient::linear(&config);

        // Initialize the slack client.
        let chat = ChatClient::slack(&config, llm.clone(), tracker.clone()).await?;

        Ok(Self { config, llm, tracker, chat })
    }

    /// Start the liveness endpoint and the chat listener.
    ///
    /// The liveness endpoint runs on its own task and shares no state with the
    /// event-handling path.
    pub async fn start(&self) -> Void {
        let port = self.config.health_port;
        tokio::spawn(async move {
            if let Err(err) = health::serve(port).await {
                error!("Health endpoint failed: {}", err);
            }
        });

        self.chat.start().await
    }
}
