//! Tri-state controller shared by every view: `{data, loading, error}` for one async operation.
//!
//! Each call to [`AsyncResource::begin`] issues a fresh [`RequestToken`]. Only the response
//! carrying the most recent token may settle the resource; anything older is dropped, so
//! overlapping requests that resolve out of order never overwrite newer state or leave the
//! resource stuck in `loading`.

use std::{
    future::Future,
    sync::atomic::{AtomicU64, Ordering},
};

use tracing::debug;

use crate::gateway::GatewayError;

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Identifies one issued request. Unique for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl RequestToken {
    fn next() -> Self {
        Self(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }
}

/// What happens to previously loaded data when a new request starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataPolicy {
    /// Keep showing the last payload until the new one lands.
    Retain,
    /// Drop the last payload immediately.
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Failure,
}

#[derive(Debug, Clone)]
pub struct AsyncResource<T> {
    data: Option<T>,
    loading: bool,
    error: Option<String>,
    latest: Option<RequestToken>,
}

impl<T> Default for AsyncResource<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            latest: None,
        }
    }
}

impl<T> AsyncResource<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Failure
        } else if self.data.is_some() {
            Phase::Success
        } else {
            Phase::Idle
        }
    }

    /// True while `token` is the newest request this resource has issued.
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest == Some(token)
    }

    pub fn begin(&mut self, policy: DataPolicy) -> RequestToken {
        let token = RequestToken::next();
        self.latest = Some(token);
        self.loading = true;
        self.error = None;
        if policy == DataPolicy::Clear {
            self.data = None;
        }
        token
    }

    /// Settles the resource with a response. Returns `false` (and changes nothing) when the
    /// token has been superseded.
    pub fn resolve(&mut self, token: RequestToken, outcome: Result<T, GatewayError>) -> bool {
        if !self.is_current(token) {
            debug!(?token, latest = ?self.latest, "discarding stale response");
            return false;
        }

        match outcome {
            Ok(payload) => {
                self.data = Some(payload);
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err.user_message());
            }
        }
        self.loading = false;
        true
    }

    /// Records a client-side failure without issuing a request. Ignored while a request is
    /// in flight, so `loading` and `error` are never set together.
    pub fn fail_local(&mut self, message: impl Into<String>) -> bool {
        if self.loading {
            debug!(latest = ?self.latest, "local failure ignored while loading");
            return false;
        }
        self.error = Some(message.into());
        true
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Back to `Idle`. Requests still in flight become stale.
    pub fn reset(&mut self) {
        self.data = None;
        self.loading = false;
        self.error = None;
        self.latest = None;
    }

    /// `begin`, await `operation`, `resolve`, in one step.
    pub async fn run<F>(&mut self, policy: DataPolicy, operation: F) -> bool
    where
        F: Future<Output = Result<T, GatewayError>>,
    {
        let token = self.begin(policy);
        let outcome = operation.await;
        self.resolve(token, outcome)
    }
}

#[cfg(test)]
#[path = "tests/resource_tests.rs"]
mod tests;
