//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues `cmd` for the worker. A command that cannot be queued is handed back so its view
/// can be settled with an error instead of spinning forever.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> Result<(), BackendCommand> {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(cmd)) => {
            *status = "UI command queue is full; please retry".to_string();
            tracing::warn!(command = cmd_name, "ui->backend command queue full");
            Err(cmd)
        }
        Err(TrySendError::Disconnected(cmd)) => {
            *status =
                "Backend command processor disconnected (possible startup/runtime failure)"
                    .to_string();
            tracing::error!(command = cmd_name, "backend worker gone");
            Err(cmd)
        }
    }
}
