// Advice retrieval: primary advisor, one fallback hop, then a single failure.
// Providers never persist anything; the HTTP handler records conversations
// and purchase decisions after a successful answer.

pub mod classify;
pub mod grounding;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod providers;
pub mod relay;
pub mod service;
pub mod store;

use thiserror::Error;

use crate::llm_client::LlmError;

#[derive(Debug, Error)]
pub enum AdviceError {
    /// Configuration is absent, so the call was never attempted.
    #[error("{0}")]
    MissingConfig(String),

    #[error("LLM error: {0}")]
    Llm(LlmError),

    #[error("Relay HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Relay error: {0}")]
    Relay(String),

    #[error("Provider returned no advice")]
    Empty,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("All advice providers failed")]
    Unavailable,
}

impl From<LlmError> for AdviceError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MissingApiKey => AdviceError::MissingConfig(err.to_string()),
            LlmError::EmptyContent => AdviceError::Empty,
            other => AdviceError::Llm(other),
        }
    }
}
