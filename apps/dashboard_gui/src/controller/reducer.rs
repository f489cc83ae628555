//! Dashboard state: the navigator, one view model per screen, and the glue that turns UI
//! actions and backend events into the next batch of commands.

use client_core::{
    ConfirmPrompt, GatewayError, GatewayResult, InsightFormView, Navigator, Page, Route,
    Transition, UserDetailView, UserFormView, UserListView,
};

use crate::backend_bridge::commands::{BackendCommand, UserSlot};
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub struct DashboardState {
    navigator: Navigator,
    pub user_list: UserListView,
    pub user_form: UserFormView,
    pub user_detail: UserDetailView,
    pub insight: InsightFormView,
    pub status: String,
    banner: Option<UiError>,
}

impl DashboardState {
    /// Opens `route` and returns whatever its page needs loaded.
    pub fn new(route: Route) -> (Self, Vec<BackendCommand>) {
        let mut state = Self {
            navigator: Navigator::from_route(route),
            user_list: UserListView::new(),
            user_form: UserFormView::new(),
            user_detail: UserDetailView::new(),
            insight: InsightFormView::new(),
            status: String::new(),
            banner: None,
        };
        let commands = state.mount();
        (state, commands)
    }

    pub fn page(&self) -> Page {
        self.navigator.current_page()
    }

    pub fn route(&self) -> Route {
        self.navigator.route()
    }

    pub fn banner(&self) -> Option<&UiError> {
        self.banner.as_ref()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Applies a transition. The target page only (re)loads when the route actually changed.
    pub fn go(&mut self, transition: Transition) -> Vec<BackendCommand> {
        let before = self.navigator.route();
        self.navigator.apply(transition);
        if self.navigator.route() == before {
            return Vec::new();
        }
        tracing::debug!(route = %self.navigator.route(), "navigated");
        self.mount()
    }

    fn mount(&mut self) -> Vec<BackendCommand> {
        match self.navigator.current_page() {
            Page::Home => {
                self.insight = InsightFormView::new();
                Vec::new()
            }
            Page::Users => self.refresh_users(),
            Page::UserForm => {
                let selected = self.navigator.selected_user();
                match (self.user_form.set_user_id(selected), selected) {
                    (Some(token), Some(user_id)) => vec![BackendCommand::FetchUser {
                        token,
                        user_id,
                        slot: UserSlot::Form,
                    }],
                    _ => Vec::new(),
                }
            }
            Page::UserView => match self.navigator.selected_user() {
                Some(user_id) => {
                    let token = self.user_detail.set_user_id(user_id);
                    vec![BackendCommand::FetchUser {
                        token,
                        user_id,
                        slot: UserSlot::Detail,
                    }]
                }
                None => Vec::new(),
            },
        }
    }

    pub fn refresh_users(&mut self) -> Vec<BackendCommand> {
        let token = self.user_list.begin_load();
        vec![BackendCommand::ListUsers { token }]
    }

    pub fn submit_user_form(&mut self) -> Vec<BackendCommand> {
        self.user_form
            .begin_submit()
            .map(|(token, request)| BackendCommand::SaveUser { token, request })
            .into_iter()
            .collect()
    }

    pub fn delete_user(&mut self, prompt: &mut dyn ConfirmPrompt) -> Vec<BackendCommand> {
        self.user_detail
            .begin_delete(prompt)
            .map(|(token, user_id)| BackendCommand::DeleteUser { token, user_id })
            .into_iter()
            .collect()
    }

    pub fn submit_insight(&mut self) -> Vec<BackendCommand> {
        self.insight
            .begin_submit()
            .map(|(token, request)| BackendCommand::GenerateInsights { token, request })
            .into_iter()
            .collect()
    }

    /// Settles a command that could not be queued so its view does not stay loading.
    pub fn reject(&mut self, cmd: BackendCommand) -> Vec<BackendCommand> {
        let message = if self.status.is_empty() {
            "backend unavailable".to_string()
        } else {
            self.status.clone()
        };
        self.apply_event(cmd.into_failure(GatewayError::Transport(message)))
    }

    pub fn apply_event(&mut self, event: UiEvent) -> Vec<BackendCommand> {
        match event {
            UiEvent::Info(message) => {
                self.status = message;
                Vec::new()
            }
            UiEvent::Error(err) => {
                self.status = err.banner_text();
                if err.is_connectivity_problem() {
                    self.banner = Some(err);
                }
                Vec::new()
            }
            UiEvent::UsersLoaded { token, outcome } => {
                let failure = failure_of(UiErrorContext::LoadUsers, &outcome);
                let applied = self.user_list.finish_load(token, outcome);
                self.settle(applied, failure);
                Vec::new()
            }
            UiEvent::UserLoaded {
                token,
                slot,
                outcome,
            } => {
                let failure = failure_of(UiErrorContext::LoadUser, &outcome);
                let applied = match slot {
                    UserSlot::Form => self.user_form.finish_load(token, outcome),
                    UserSlot::Detail => self.user_detail.finish_load(token, outcome),
                };
                self.settle(applied, failure);
                Vec::new()
            }
            UiEvent::UserSaved { token, outcome } => {
                let failure = failure_of(UiErrorContext::SaveUser, &outcome);
                let current = self.user_form.is_current_submission(token);
                let next = self.user_form.finish_submit(token, outcome);
                self.settle(current, failure);
                self.follow(next)
            }
            UiEvent::UserDeleted { token, outcome } => {
                let failure = failure_of(UiErrorContext::DeleteUser, &outcome);
                let current = self.user_detail.is_current_deletion(token);
                let next = self.user_detail.finish_delete(token, outcome);
                self.settle(current, failure);
                self.follow(next)
            }
            UiEvent::InsightsGenerated { token, outcome } => {
                let failure = failure_of(UiErrorContext::Insights, &outcome);
                let applied = self.insight.finish_submit(token, outcome);
                self.settle(applied, failure);
                Vec::new()
            }
        }
    }

    fn follow(&mut self, next: Option<Transition>) -> Vec<BackendCommand> {
        match next {
            Some(transition) => self.go(transition),
            None => Vec::new(),
        }
    }

    /// A response that landed decides the banner: connectivity failures raise it, anything
    /// else that reached the server clears it.
    fn settle(&mut self, applied: bool, failure: Option<UiError>) {
        if !applied {
            return;
        }
        match failure {
            Some(err) => {
                tracing::warn!(context = ?err.context(), category = ?err.category(), "{}", err.message());
                if err.is_connectivity_problem() {
                    self.banner = Some(err);
                }
            }
            None => self.banner = None,
        }
    }
}

fn failure_of<T>(context: UiErrorContext, outcome: &GatewayResult<T>) -> Option<UiError> {
    outcome
        .as_ref()
        .err()
        .map(|err| UiError::from_gateway(context, err))
}
