use shared::domain::{User, UserId};
use tracing::info;

use crate::{
    confirm::ConfirmPrompt,
    gateway::{Gateway, GatewayError},
    navigation::Transition,
    resource::{AsyncResource, DataPolicy, RequestToken},
};

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this user?";

#[derive(Debug, Default)]
pub struct UserDetailView {
    user_id: Option<UserId>,
    record: AsyncResource<User>,
    deletion: AsyncResource<()>,
}

impl UserDetailView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reloading the same user keeps it on screen; switching users drops the old record
    /// so nothing acts on a user other than the one shown.
    pub fn set_user_id(&mut self, user_id: UserId) -> RequestToken {
        if self.user_id != Some(user_id) {
            self.record.reset();
        }
        self.user_id = Some(user_id);
        self.deletion.reset();
        self.record.begin(DataPolicy::Retain)
    }

    pub fn finish_load(&mut self, token: RequestToken, outcome: Result<User, GatewayError>) -> bool {
        self.record.resolve(token, outcome)
    }

    pub async fn open(&mut self, gateway: &dyn Gateway, user_id: UserId) -> bool {
        let token = self.set_user_id(user_id);
        let outcome = gateway.fetch_user(user_id).await;
        self.finish_load(token, outcome)
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    pub fn user(&self) -> Option<&User> {
        self.record.data()
    }

    pub fn is_loading(&self) -> bool {
        self.record.is_loading() || self.deletion.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.deletion.error().or(self.record.error())
    }

    pub fn edit(&self) -> Option<Transition> {
        self.user_id.map(Transition::EditUser)
    }

    pub fn back(&self) -> Transition {
        Transition::ShowUsers
    }

    /// Asks `prompt` first; a declined prompt starts nothing.
    pub fn begin_delete(
        &mut self,
        prompt: &mut dyn ConfirmPrompt,
    ) -> Option<(RequestToken, UserId)> {
        let user_id = self.user_id?;
        if !prompt.confirm(DELETE_CONFIRMATION) {
            return None;
        }
        Some((self.deletion.begin(DataPolicy::Retain), user_id))
    }

    pub fn is_current_deletion(&self, token: RequestToken) -> bool {
        self.deletion.is_current(token)
    }

    /// Success navigates back to the list. Failure keeps the loaded user on screen.
    pub fn finish_delete(
        &mut self,
        token: RequestToken,
        outcome: Result<(), GatewayError>,
    ) -> Option<Transition> {
        let succeeded = outcome.is_ok();
        if self.deletion.resolve(token, outcome) && succeeded {
            info!(user_id = ?self.user_id, "user deleted");
            Some(Transition::ShowUsers)
        } else {
            None
        }
    }

    pub async fn delete(
        &mut self,
        gateway: &dyn Gateway,
        prompt: &mut dyn ConfirmPrompt,
    ) -> Option<Transition> {
        let (token, user_id) = self.begin_delete(prompt)?;
        let outcome = gateway.delete_user(user_id).await;
        self.finish_delete(token, outcome)
    }
}
