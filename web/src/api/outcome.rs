//! The `(success, message)` result reported by every mutating call

use serde::{Deserialize, Serialize};

use super::error::ApiError;

/// Human-readable outcome of a login, submission or content mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    pub message: String,
}

impl ActionResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Wording for one mutating action
#[derive(Debug, Clone, Copy)]
pub struct ActionMessages {
    /// Returned as-is on success
    pub success: &'static str,
    /// Prefixed to the backend's error body on a non-success status
    pub failure: &'static str,
    /// Returned when the backend answers 429, if the action is rate limited
    pub rate_limited: Option<&'static str>,
    /// Suffix appended to transport failures
    pub network_hint: Option<&'static str>,
}

impl ActionMessages {
    pub const fn new(success: &'static str, failure: &'static str) -> Self {
        Self {
            success,
            failure,
            rate_limited: None,
            network_hint: None,
        }
    }

    pub const fn with_rate_limited(mut self, message: &'static str) -> Self {
        self.rate_limited = Some(message);
        self
    }

    pub const fn with_network_hint(mut self, hint: &'static str) -> Self {
        self.network_hint = Some(hint);
        self
    }

    /// Convert the round-trip result into the reported outcome
    pub fn outcome(&self, result: Result<(), ApiError>) -> ActionResult {
        match result {
            Ok(()) => ActionResult::ok(self.success),
            Err(e) => ActionResult::failed(self.failure_message(&e)),
        }
    }

    pub fn failure_message(&self, error: &ApiError) -> String {
        match error {
            ApiError::RateLimited { .. } => match self.rate_limited {
                Some(message) => message.to_string(),
                None => format!("{}: {}", self.failure, error.detail()),
            },
            ApiError::Status { body, .. } => format!("{}: {}", self.failure, body),
            ApiError::Unauthorized { .. } => format!("{}: {}", self.failure, error.detail()),
            ApiError::Transport(e) => match self.network_hint {
                Some(hint) => format!("Network error: {}. {}", e, hint),
                None => format!("Network error: {}", e),
            },
            ApiError::Decode(e) => format!("Error: {}", e),
        }
    }
}
