//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{Gateway, HttpGateway};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use url::Url;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Starts the worker thread. Each command runs as its own task, so overlapping requests
/// genuinely overlap; ordering is sorted out by the views' request tokens.
pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    base_url: Url,
    repaint: egui::Context,
) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                repaint.request_repaint();
                return;
            }
        };

        runtime.block_on(async move {
            let gateway: Arc<dyn Gateway> = Arc::new(HttpGateway::new(base_url.clone()));
            tracing::info!(%base_url, "backend worker ready");
            let _ = ui_tx.try_send(UiEvent::Info(format!("Backend: {base_url}")));
            repaint.request_repaint();

            while let Ok(cmd) = cmd_rx.recv() {
                let gateway = Arc::clone(&gateway);
                let ui_tx = ui_tx.clone();
                let repaint = repaint.clone();
                tokio::spawn(async move {
                    let name = cmd.name();
                    let event = execute(gateway.as_ref(), cmd).await;
                    if ui_tx.try_send(event).is_err() {
                        tracing::warn!(command = name, "dropped backend result; ui event queue unavailable");
                    }
                    repaint.request_repaint();
                });
            }
            tracing::info!("ui command queue closed; backend worker exiting");
        });
    });
}

async fn execute(gateway: &dyn Gateway, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::ListUsers { token } => UiEvent::UsersLoaded {
            token,
            outcome: gateway.list_users().await,
        },
        BackendCommand::FetchUser {
            token,
            user_id,
            slot,
        } => UiEvent::UserLoaded {
            token,
            slot,
            outcome: gateway.fetch_user(user_id).await,
        },
        BackendCommand::SaveUser { token, request } => UiEvent::UserSaved {
            token,
            outcome: request.send(gateway).await,
        },
        BackendCommand::DeleteUser { token, user_id } => UiEvent::UserDeleted {
            token,
            outcome: gateway.delete_user(user_id).await,
        },
        BackendCommand::GenerateInsights { token, request } => UiEvent::InsightsGenerated {
            token,
            outcome: gateway.generate_insights(&request).await,
        },
    }
}
