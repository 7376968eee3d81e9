//! Error types for quickstash

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StashError {
    /// Non-2xx response from the capture server. `message` already carries
    /// the user-facing text: the response body, or the generic fallback when
    /// the body was empty.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StashError>;
