//! Request gateway: the REST surface the views talk to.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{User, UserDraft, UserId},
    error::{ErrorBody, ValidationError},
    protocol::{InsightRequest, InsightResult},
};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

pub type GatewayResult<T> = Result<T, GatewayError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Rejected client-side; no request was sent.
    #[error("{0}")]
    Validation(String),
    #[error("network error: {0}")]
    Transport(String),
    #[error("{}", status_message(*status, message.as_deref()))]
    Status { status: u16, message: Option<String> },
    #[error("malformed response body: {0}")]
    Decode(String),
}

fn status_message(status: u16, message: Option<&str>) -> String {
    match message {
        Some(message) => message.to_string(),
        None => format!("HTTP error: {status}"),
    }
}

impl GatewayError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text shown to the user; the server's own message wins when it sent one.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl From<ValidationError> for GatewayError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Decode(value.to_string())
        } else {
            Self::Transport(value.to_string())
        }
    }
}

#[async_trait]
pub trait Gateway: Send + Sync {
    async fn list_users(&self) -> GatewayResult<Vec<User>>;
    async fn fetch_user(&self, id: UserId) -> GatewayResult<User>;
    async fn find_user_by_username(&self, username: &str) -> GatewayResult<User>;
    async fn create_user(&self, draft: &UserDraft) -> GatewayResult<()>;
    async fn update_user(&self, user: &User) -> GatewayResult<()>;
    async fn delete_user(&self, id: UserId) -> GatewayResult<()>;
    async fn generate_insights(&self, request: &InsightRequest) -> GatewayResult<InsightResult>;
}

/// [`Gateway`] over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: Client,
    base_url: Url,
}

impl HttpGateway {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn connect(base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self::new(Url::parse(base_url)?))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> GatewayResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                GatewayError::Transport(format!("'{}' cannot be used as a base url", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn ensure_success(response: Response) -> GatewayResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|body| body.message().map(str::to_string));
        warn!(status = status.as_u16(), ?message, "backend rejected request");
        Err(GatewayError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> GatewayResult<T> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|err| GatewayError::Decode(err.to_string()))
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn list_users(&self) -> GatewayResult<Vec<User>> {
        let url = self.endpoint(&["api", "users"])?;
        debug!(%url, "GET users");
        let response = Self::ensure_success(self.http.get(url).send().await?).await?;
        Self::decode(response).await
    }

    async fn fetch_user(&self, id: UserId) -> GatewayResult<User> {
        let id = id.to_string();
        let url = self.endpoint(&["api", "users", &id])?;
        debug!(%url, "GET user");
        let response = Self::ensure_success(self.http.get(url).send().await?).await?;
        Self::decode(response).await
    }

    async fn find_user_by_username(&self, username: &str) -> GatewayResult<User> {
        let url = self.endpoint(&["api", "users", "username", username])?;
        debug!(%url, "GET user by username");
        let response = Self::ensure_success(self.http.get(url).send().await?).await?;
        Self::decode(response).await
    }

    async fn create_user(&self, draft: &UserDraft) -> GatewayResult<()> {
        let url = self.endpoint(&["api", "users"])?;
        debug!(%url, username = %draft.username, "POST user");
        Self::ensure_success(self.http.post(url).json(draft).send().await?).await?;
        Ok(())
    }

    async fn update_user(&self, user: &User) -> GatewayResult<()> {
        let id = user.id.to_string();
        let url = self.endpoint(&["api", "users", &id])?;
        debug!(%url, "PUT user");
        Self::ensure_success(self.http.put(url).json(user).send().await?).await?;
        Ok(())
    }

    async fn delete_user(&self, id: UserId) -> GatewayResult<()> {
        let id = id.to_string();
        let url = self.endpoint(&["api", "users", &id])?;
        debug!(%url, "DELETE user");
        Self::ensure_success(self.http.delete(url).send().await?).await?;
        Ok(())
    }

    async fn generate_insights(&self, request: &InsightRequest) -> GatewayResult<InsightResult> {
        let url = self.endpoint(&["api", "insights"])?;
        debug!(%url, topic = %request.topic, "POST insights");
        let response = Self::ensure_success(self.http.post(url).json(request).send().await?).await?;
        Self::decode(response).await
    }
}
