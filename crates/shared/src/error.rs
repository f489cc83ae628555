use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error envelope returned by the backend on non-success statuses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: Some(message.into()),
        }
    }

    /// Non-blank server message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("Please enter a topic to analyze")]
    EmptyTopic,
}
