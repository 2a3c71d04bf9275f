//! Core values shared across all subdomains.
//!
//! - [`query::Query`]: the immutable input of one pipeline run
//! - [`query::CorrelationId`]: ties all artefacts of a run together

pub mod query;
