//! Backend commands queued from UI to backend worker.

use client_core::{GatewayError, RequestToken, SubmitRequest};
use shared::{domain::UserId, protocol::InsightRequest};

use crate::controller::events::UiEvent;

/// Which view asked for a single user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSlot {
    Form,
    Detail,
}

/// Every command carries the token its view issued; the completion event echoes it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    ListUsers {
        token: RequestToken,
    },
    FetchUser {
        token: RequestToken,
        user_id: UserId,
        slot: UserSlot,
    },
    SaveUser {
        token: RequestToken,
        request: SubmitRequest,
    },
    DeleteUser {
        token: RequestToken,
        user_id: UserId,
    },
    GenerateInsights {
        token: RequestToken,
        request: InsightRequest,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListUsers { .. } => "list_users",
            Self::FetchUser { .. } => "fetch_user",
            Self::SaveUser { .. } => "save_user",
            Self::DeleteUser { .. } => "delete_user",
            Self::GenerateInsights { .. } => "generate_insights",
        }
    }

    /// The completion event for a command that never reached the worker.
    pub fn into_failure(self, err: GatewayError) -> UiEvent {
        match self {
            Self::ListUsers { token } => UiEvent::UsersLoaded {
                token,
                outcome: Err(err),
            },
            Self::FetchUser { token, slot, .. } => UiEvent::UserLoaded {
                token,
                slot,
                outcome: Err(err),
            },
            Self::SaveUser { token, .. } => UiEvent::UserSaved {
                token,
                outcome: Err(err),
            },
            Self::DeleteUser { token, .. } => UiEvent::UserDeleted {
                token,
                outcome: Err(err),
            },
            Self::GenerateInsights { token, .. } => UiEvent::InsightsGenerated {
                token,
                outcome: Err(err),
            },
        }
    }
}
