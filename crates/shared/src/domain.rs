use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{error::ValidationError, null_as_default};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(UserId);

fn default_enabled() -> bool {
    true
}

/// A user record as the backend returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<NaiveDateTime>,
}

impl User {
    pub fn new(id: UserId, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            enabled: true,
            roles: Vec::new(),
            created_at: None,
            last_login: None,
        }
    }
}

/// Editable user fields; the body of a create request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    pub username: String,
    pub email: String,
}

impl UserDraft {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }

    /// Overlays the draft on an existing record, keeping its id and backend-owned fields.
    pub fn apply_to(&self, user: &User) -> User {
        User {
            username: self.username.clone(),
            email: self.email.clone(),
            ..user.clone()
        }
    }

    /// Required-field and email-shape checks, nothing stricter.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::MissingField("username"));
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ValidationError::MissingField("email"));
        }
        if !looks_like_email(email) {
            return Err(ValidationError::InvalidEmail(email.to_string()));
        }
        Ok(())
    }
}

impl From<&User> for UserDraft {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
}
