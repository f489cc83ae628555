//! UI/backend events and error modeling for the dashboard controller.

use client_core::{GatewayError, GatewayResult, RequestToken};
use shared::{domain::User, protocol::InsightResult};

use crate::backend_bridge::commands::UserSlot;

pub enum UiEvent {
    Info(String),
    Error(UiError),
    UsersLoaded {
        token: RequestToken,
        outcome: GatewayResult<Vec<User>>,
    },
    UserLoaded {
        token: RequestToken,
        slot: UserSlot,
        outcome: GatewayResult<User>,
    },
    UserSaved {
        token: RequestToken,
        outcome: GatewayResult<()>,
    },
    UserDeleted {
        token: RequestToken,
        outcome: GatewayResult<()>,
    },
    InsightsGenerated {
        token: RequestToken,
        outcome: GatewayResult<InsightResult>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    Transport,
    Server,
    Decode,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    LoadUsers,
    LoadUser,
    SaveUser,
    DeleteUser,
    Insights,
    General,
}

impl UiErrorContext {
    pub fn label(self) -> &'static str {
        match self {
            Self::BackendStartup => "Startup",
            Self::LoadUsers => "Loading users",
            Self::LoadUser => "Loading user",
            Self::SaveUser => "Saving user",
            Self::DeleteUser => "Deleting user",
            Self::Insights => "Generating insights",
            Self::General => "Error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_gateway(context: UiErrorContext, err: &GatewayError) -> Self {
        let category = match err {
            GatewayError::Validation(_) => UiErrorCategory::Validation,
            GatewayError::Transport(_) => UiErrorCategory::Transport,
            GatewayError::Status { .. } => UiErrorCategory::Server,
            GatewayError::Decode(_) => UiErrorCategory::Decode,
        };
        Self {
            category,
            context,
            message: err.user_message(),
        }
    }

    /// Classifies free-form failures that did not come from the gateway.
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("required")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("unavailable")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else if message_lower.contains("malformed") || message_lower.contains("decode") {
            UiErrorCategory::Decode
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Failures worth a banner on top of the inline error: the backend could not be reached
    /// or the worker itself is broken.
    pub fn is_connectivity_problem(&self) -> bool {
        self.context == UiErrorContext::BackendStartup
            || self.category == UiErrorCategory::Transport
    }

    pub fn banner_text(&self) -> String {
        match self.category {
            UiErrorCategory::Transport => format!(
                "{}: backend unreachable; check the base URL and retry. ({})",
                self.context.label(),
                self.message
            ),
            _ => format!("{}: {}", self.context.label(), self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_errors_map_to_categories() {
        let err = UiError::from_gateway(
            UiErrorContext::DeleteUser,
            &GatewayError::Status {
                status: 500,
                message: Some("forbidden".to_string()),
            },
        );
        assert_eq!(err.category(), UiErrorCategory::Server);
        assert_eq!(err.message(), "forbidden");
        assert!(!err.is_connectivity_problem());

        let err = UiError::from_gateway(
            UiErrorContext::LoadUsers,
            &GatewayError::Transport("connection refused".to_string()),
        );
        assert!(err.is_connectivity_problem());
        assert!(err.banner_text().starts_with("Loading users: backend unreachable"));
    }

    #[test]
    fn classifies_command_processor_disconnect_as_transport_error() {
        let err = UiError::from_message(
            UiErrorContext::General,
            "Backend command processor disconnected (possible startup/runtime failure)",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
    }

    #[test]
    fn startup_failures_always_raise_a_banner() {
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            "backend worker startup failure: failed to build runtime",
        );
        assert!(err.is_connectivity_problem());
        assert_eq!(err.context(), UiErrorContext::BackendStartup);
    }
}
