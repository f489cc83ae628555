//! View models for each screen. They own their tri-state and emit [`Transition`]s; rendering
//! and request execution live with the caller.
//!
//! Every operation comes in two halves, `begin_*` (returns the token and what to send) and
//! `finish_*` (applies the response), so an event-loop front end can run the request
//! elsewhere. The `async` helpers chain both halves for callers that can simply await.
//!
//! [`Transition`]: crate::navigation::Transition

mod insight_form;
mod user_detail;
mod user_form;
mod user_list;

pub use insight_form::{InsightFormView, InsightSection};
pub use user_detail::{UserDetailView, DELETE_CONFIRMATION};
pub use user_form::{FormMode, SubmitRequest, UserFormView};
pub use user_list::UserListView;
