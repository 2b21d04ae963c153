//! Unified error types for the crate.

use thiserror::Error;

/// Failure reported by an external collaborator (catalog, vendor directory, text model).
#[derive(Debug, Error)]
pub enum SourceError {
    /// Dataset file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset or payload could not be decoded.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Text model call failed.
    #[error("text model error: {0}")]
    Model(#[from] ai_llm_service::AiLlmError),

    /// Collaborator reachable but refused or failed the request.
    #[error("unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by the recommendation entry points.
///
/// Everything else (vendor lookups, model ranking, distances) degrades softly
/// and never reaches the caller.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// Caller supplied unusable input; not retried.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The menu catalog could not be listed; no partial data is returned.
    #[error("menu catalog unavailable: {0}")]
    Catalog(#[source] SourceError),

    /// The vendor directory could not be listed for a nearby search.
    #[error("vendor directory unavailable: {0}")]
    VendorDirectory(#[source] SourceError),
}

/// Configuration errors raised while reading the environment.
#[derive(Debug, Error, PartialEq)]
pub enum RecommenderConfigError {
    #[error("invalid number in {var}: {reason}")]
    InvalidNumber { var: &'static str, reason: String },

    #[error("{var} must be greater than zero")]
    Zero { var: &'static str },
}
