//! In-memory page selection plus the addressable routes it maps to.

use std::{fmt, str::FromStr};

use shared::domain::UserId;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Users,
    UserForm,
    UserView,
}

impl Page {
    /// Pages grouped under the "Users" header tab.
    pub fn is_users_section(self) -> bool {
        matches!(self, Self::Users | Self::UserForm | Self::UserView)
    }
}

/// Navigation requests emitted by views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    ShowHome,
    ShowUsers,
    ShowUser(UserId),
    EditUser(UserId),
    NewUser,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigator {
    current: Page,
    selected_user: Option<UserId>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_route(route: Route) -> Self {
        let mut navigator = Self::new();
        navigator.apply(route.into());
        navigator
    }

    pub fn current_page(&self) -> Page {
        self.current
    }

    pub fn selected_user(&self) -> Option<UserId> {
        self.selected_user
    }

    /// Switches page; the selection only changes when an id is supplied.
    pub fn navigate(&mut self, page: Page, user_id: Option<UserId>) {
        self.current = page;
        if let Some(user_id) = user_id {
            self.selected_user = Some(user_id);
        }
    }

    pub fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::ShowHome => self.navigate(Page::Home, None),
            Transition::ShowUsers => self.navigate(Page::Users, None),
            Transition::ShowUser(id) => self.navigate(Page::UserView, Some(id)),
            Transition::EditUser(id) => self.navigate(Page::UserForm, Some(id)),
            Transition::NewUser => {
                self.selected_user = None;
                self.navigate(Page::UserForm, None);
            }
        }
    }

    pub fn route(&self) -> Route {
        match (self.current, self.selected_user) {
            (Page::Home, _) => Route::Home,
            (Page::Users, _) | (Page::UserView, None) => Route::Users,
            (Page::UserForm, None) => Route::NewUser,
            (Page::UserForm, Some(id)) => Route::EditUser(id),
            (Page::UserView, Some(id)) => Route::ViewUser(id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Users,
    NewUser,
    ViewUser(UserId),
    EditUser(UserId),
}

impl From<Route> for Transition {
    fn from(value: Route) -> Self {
        match value {
            Route::Home => Self::ShowHome,
            Route::Users => Self::ShowUsers,
            Route::NewUser => Self::NewUser,
            Route::ViewUser(id) => Self::ShowUser(id),
            Route::EditUser(id) => Self::EditUser(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteParseError {
    #[error("unknown route '{0}'")]
    Unknown(String),
    #[error("invalid user id '{0}' in route")]
    InvalidUserId(String),
}

impl FromStr for Route {
    type Err = RouteParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s
            .trim()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        let parse_id = |raw: &str| {
            raw.parse::<i64>()
                .map(UserId)
                .map_err(|_| RouteParseError::InvalidUserId(raw.to_string()))
        };

        match segments.as_slice() {
            [] => Ok(Self::Home),
            ["users"] => Ok(Self::Users),
            ["users", "new"] => Ok(Self::NewUser),
            ["users", id] => Ok(Self::ViewUser(parse_id(*id)?)),
            ["users", id, "edit"] => Ok(Self::EditUser(parse_id(*id)?)),
            _ => Err(RouteParseError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => write!(f, "/"),
            Self::Users => write!(f, "/users"),
            Self::NewUser => write!(f, "/users/new"),
            Self::ViewUser(id) => write!(f, "/users/{id}"),
            Self::EditUser(id) => write!(f, "/users/{id}/edit"),
        }
    }
}
