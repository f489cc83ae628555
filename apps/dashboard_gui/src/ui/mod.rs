//! UI layer for the dashboard GUI: app shell, panels, widgets, and the native confirm dialog.

pub mod app;
pub mod confirm;
pub mod panels;
pub mod widgets;

pub use app::{DashboardApp, StartupConfig};
