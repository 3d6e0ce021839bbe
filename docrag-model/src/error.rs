//! Error types for the `docrag-model` crate.

use thiserror::Error;

/// Errors that can occur when talking to the remote LLM.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Required configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A transport-level failure (connect, timeout, interrupted body) that
    /// survived the retry budget.
    #[error("LLM request failed: {0}")]
    Transport(String),

    /// The endpoint answered with an HTTP error status. Not retried.
    #[error("LLM error {status}: {body}")]
    Api {
        /// The HTTP status code returned by the endpoint.
        status: u16,
        /// The raw response body.
        body: String,
    },

    /// The endpoint answered 2xx but the payload was not the expected shape.
    #[error("Unexpected LLM response: {0}")]
    InvalidResponse(String),
}

/// A convenience result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
