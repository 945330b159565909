// src/error.rs
use reqwest::StatusCode;
use thiserror::Error;

/// Why an answer request failed. Every variant ends up as the same
/// fallback message in the transcript; the detail only reaches the logs.
#[derive(Debug, Error)]
pub enum AskError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("answer service returned {0}")]
    Status(StatusCode),

    #[error("invalid answer payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors that stop the client before or outside a chat turn.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
}
