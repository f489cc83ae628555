use shared::domain::{User, UserId};

use crate::{
    gateway::{Gateway, GatewayError},
    navigation::Transition,
    resource::{AsyncResource, DataPolicy, RequestToken},
};

#[derive(Debug, Default)]
pub struct UserListView {
    users: AsyncResource<Vec<User>>,
}

impl UserListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stale rows stay visible while the list reloads.
    pub fn begin_load(&mut self) -> RequestToken {
        self.users.begin(DataPolicy::Retain)
    }

    pub fn finish_load(
        &mut self,
        token: RequestToken,
        outcome: Result<Vec<User>, GatewayError>,
    ) -> bool {
        self.users.resolve(token, outcome)
    }

    pub async fn load(&mut self, gateway: &dyn Gateway) -> bool {
        let token = self.begin_load();
        let outcome = gateway.list_users().await;
        self.finish_load(token, outcome)
    }

    pub fn users(&self) -> &[User] {
        self.users.data().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        self.users.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.users.error()
    }

    /// "No users" notice; distinct from both the loading and the error state.
    pub fn is_empty_notice(&self) -> bool {
        !self.users.is_loading()
            && self.users.error().is_none()
            && self.users.data().is_some_and(Vec::is_empty)
    }

    pub fn resource(&self) -> &AsyncResource<Vec<User>> {
        &self.users
    }

    pub fn select(&self, id: UserId) -> Transition {
        Transition::ShowUser(id)
    }

    pub fn new_user(&self) -> Transition {
        Transition::NewUser
    }
}
