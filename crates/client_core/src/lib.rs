//! Client core for the insight dashboard: REST gateway, async view-state, navigation and
//! per-screen view models. Front ends render these; they hold no UI code themselves.

pub mod config;
pub mod confirm;
pub mod gateway;
pub mod navigation;
pub mod resource;
pub mod views;

pub use confirm::{AlwaysConfirm, ConfirmPrompt, NeverConfirm};
pub use gateway::{Gateway, GatewayError, GatewayResult, HttpGateway};
pub use navigation::{Navigator, Page, Route, RouteParseError, Transition};
pub use resource::{AsyncResource, DataPolicy, Phase, RequestToken};
pub use views::{
    FormMode, InsightFormView, InsightSection, SubmitRequest, UserDetailView, UserFormView,
    UserListView,
};

#[cfg(test)]
#[path = "tests/gateway_tests.rs"]
mod gateway_tests;

#[cfg(test)]
#[path = "tests/views_tests.rs"]
mod views_tests;
