//! The report-processing pipeline.
//!
//! Three stages, leaf-first:
//! - `extract`: pure pattern-matching recovery of typed fields from model output.
//! - `enrich`: raw report text to structured ticket text via the LLM, plus sanitization.
//! - `build`: extraction, directory resolution, and issue creation with the tracker.

pub mod build;
pub mod enrich;
pub mod extract;
