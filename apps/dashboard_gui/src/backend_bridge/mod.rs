//! Worker side of the GUI: commands queued by the UI and the runtime that executes them.

pub mod commands;
pub mod runtime;
