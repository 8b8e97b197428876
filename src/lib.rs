//! Library root for `ticket-bot`.
//!
//! Ticket-bot is an OpenAI-powered bug-report assistant for Slack designed to:
//! - Listen for bug reports via app mentions and a trigger phrase
//! - Reformat free-text reports into structured tickets with an LLM
//! - Extract typed fields from the structured text with tolerant patterns
//! - File the resulting ticket in Linear and reply in-thread with the outcome
//!
//! The bot integrates with Slack for chat, OpenAI for enrichment, and Linear
//! for issue tracking. The architecture is built around extensible traits that
//! allow for different implementations of each service.

#[deny(missing_docs)]
pub mod base;
pub mod health;
pub mod interaction;
pub mod pipeline;
pub mod runtime;
pub mod service;

use base::{config::Config, types::Void};
use rustls::crypto;
use tracing::info;

/// Public async entry for the binary crate.
///
/// Sets up necessary services and starts the ticket-bot runtime:
/// - Initializes the crypto provider
/// - Creates the runtime context with LLM, tracker, and chat clients
/// - Starts the liveness endpoint and the event loop for processing messages
pub async fn start(config: Config) -> Void {
    info!("Starting ticket-bot ...");

    // Start the crypto provider.
    crypto::ring::default_provider().install_default().unwrap();

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config).await?;

    // Start the runtime.
    runtime.start().await?;

    Ok(())
}
