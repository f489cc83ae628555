use shared::domain::{User, UserDraft, UserId};
use tracing::info;

use crate::{
    gateway::{Gateway, GatewayError},
    navigation::Transition,
    resource::{AsyncResource, DataPolicy, RequestToken},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Edit(UserId),
}

/// What a form submission sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRequest {
    Create(UserDraft),
    Update(User),
}

impl SubmitRequest {
    pub async fn send(&self, gateway: &dyn Gateway) -> Result<(), GatewayError> {
        match self {
            Self::Create(draft) => gateway.create_user(draft).await,
            Self::Update(user) => gateway.update_user(user).await,
        }
    }
}

#[derive(Debug, Default)]
pub struct UserFormView {
    mode: FormMode,
    draft: UserDraft,
    record: AsyncResource<User>,
    submission: AsyncResource<()>,
}

impl UserFormView {
    pub fn new() -> Self {
        Self::default()
    }

    /// `Some(id)` switches to edit mode and starts loading the record; `None` resets to a
    /// blank create form.
    pub fn set_user_id(&mut self, user_id: Option<UserId>) -> Option<RequestToken> {
        self.submission.reset();
        match user_id {
            Some(id) => {
                if self.mode != FormMode::Edit(id) {
                    self.record.reset();
                    self.draft = UserDraft::default();
                }
                self.mode = FormMode::Edit(id);
                Some(self.record.begin(DataPolicy::Retain))
            }
            None => {
                self.mode = FormMode::Create;
                self.draft = UserDraft::default();
                self.record.reset();
                None
            }
        }
    }

    pub fn finish_load(&mut self, token: RequestToken, outcome: Result<User, GatewayError>) -> bool {
        if !self.record.resolve(token, outcome) {
            return false;
        }
        if let Some(user) = self.record.data() {
            self.draft = UserDraft::from(user);
        }
        true
    }

    pub async fn open(&mut self, gateway: &dyn Gateway, user_id: Option<UserId>) {
        if let Some(token) = self.set_user_id(user_id) {
            let id = match self.mode {
                FormMode::Edit(id) => id,
                FormMode::Create => return,
            };
            let outcome = gateway.fetch_user(id).await;
            self.finish_load(token, outcome);
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn draft(&self) -> &UserDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut UserDraft {
        &mut self.draft
    }

    pub fn is_loading(&self) -> bool {
        self.record.is_loading() || self.submission.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.submission.error().or(self.record.error())
    }

    /// Validates the draft and builds the request. On failure the error is shown and the
    /// draft is left untouched.
    pub fn begin_submit(&mut self) -> Option<(RequestToken, SubmitRequest)> {
        if let Err(err) = self.draft.validate() {
            self.submission.fail_local(err.to_string());
            return None;
        }

        let request = match self.mode {
            FormMode::Create => SubmitRequest::Create(self.draft.clone()),
            FormMode::Edit(id) => {
                let mut user = match self.record.data() {
                    Some(loaded) => self.draft.apply_to(loaded),
                    None => User::new(id, self.draft.username.clone(), self.draft.email.clone()),
                };
                user.id = id;
                SubmitRequest::Update(user)
            }
        };
        Some((self.submission.begin(DataPolicy::Retain), request))
    }

    pub fn is_current_submission(&self, token: RequestToken) -> bool {
        self.submission.is_current(token)
    }

    /// Success hands back the transition to the list; failure keeps the form as is.
    pub fn finish_submit(
        &mut self,
        token: RequestToken,
        outcome: Result<(), GatewayError>,
    ) -> Option<Transition> {
        let succeeded = outcome.is_ok();
        if self.submission.resolve(token, outcome) && succeeded {
            info!(mode = ?self.mode, username = %self.draft.username, "user saved");
            Some(Transition::ShowUsers)
        } else {
            None
        }
    }

    pub async fn submit(&mut self, gateway: &dyn Gateway) -> Option<Transition> {
        let (token, request) = self.begin_submit()?;
        let outcome = request.send(gateway).await;
        self.finish_submit(token, outcome)
    }

    pub fn cancel(&self) -> Transition {
        Transition::ShowUsers
    }
}
