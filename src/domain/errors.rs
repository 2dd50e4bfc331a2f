//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Required setting (usually an API key) is absent. Raised before any network call.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network unreachable, connection reset, unreadable body.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Upstream answered with a non-2xx status.
    #[error("Upstream returned status {status}")]
    Upstream { status: u16, body: String },

    /// Generation succeeded at the HTTP level but carried no text (e.g. blocked content).
    #[error("Model returned no text content. Reason: {finish_reason}")]
    EmptyGeneration {
        finish_reason: String,
        raw: serde_json::Value,
    },

    /// Neither the configured model name nor its alternate spelling exists upstream.
    #[error("Model not found upstream (tried: {})", tried.join(", "))]
    ModelNotFound {
        tried: Vec<String>,
        available: Vec<String>,
    },

    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Repository error: {0}")]
    Repo(String),
}
