//! Backend call failures

use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong during one backend round trip
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unauthorized")]
    Unauthorized { body: String },

    #[error("Too many requests")]
    RateLimited { body: String },

    #[error("Request failed ({status}): {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Short label used for metrics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Transport(_) => "transport",
            ApiError::Unauthorized { .. } => "unauthorized",
            ApiError::RateLimited { .. } => "rate_limited",
            ApiError::Status { .. } => "status",
            ApiError::Decode(_) => "decode",
        }
    }

    /// The backend's error body, when the failure carried one
    pub fn body(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { body }
            | ApiError::RateLimited { body }
            | ApiError::Status { body, .. } => Some(body),
            _ => None,
        }
    }

    /// The backend's body when non-empty, otherwise this error's own text
    pub fn detail(&self) -> String {
        match self.body() {
            Some(body) if !body.trim().is_empty() => body.to_string(),
            _ => self.to_string(),
        }
    }
}
