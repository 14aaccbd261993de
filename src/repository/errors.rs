use serde_json::Value;
use thiserror::Error;

/// Message used when a failed response carries no usable `message` field.
const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    /// Maps a non-success response to an error, surfacing the server's
    /// `message` when the body is JSON.
    pub fn from_status(status: u16, body: &str) -> Self {
        if status == 404 {
            return RepositoryError::NotFound;
        }

        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_ERROR.to_string());

        RepositoryError::Status { status, message }
    }
}
