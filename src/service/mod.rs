//! Service integrations for external APIs and clients.
//!
//! This module contains implementations for various services used by the ticket-bot:
//! - Chat services (e.g., Slack)
//! - LLM services (e.g., OpenAI)
//! - Issue trackers (e.g., Linear)
//!
//! Each service module defines both generic traits and concrete implementations,
//! allowing for extensibility and easy testing.

pub mod chat;
pub mod llm;
pub mod tracker;
