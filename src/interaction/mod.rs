//! Event handling for the ticket-bot.
//!
//! Bridges qualifying chat events into the enrichment/filing pipeline and
//! reports the outcome back into the originating thread.

pub mod bug_report;
