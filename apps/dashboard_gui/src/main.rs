mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::{
    config::{load_settings, normalize_base_url},
    Route,
};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{DashboardApp, StartupConfig};

#[derive(Parser, Debug)]
#[command(about = "Desktop dashboard for users and topic insights")]
struct Args {
    /// Backend origin, e.g. http://127.0.0.1:8080
    #[arg(long)]
    base_url: Option<String>,
    /// Page to open first: /, /users, /users/new, /users/{id}, /users/{id}/edit
    #[arg(long)]
    route: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings();
    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(route) = args.route {
        settings.initial_route = Some(route);
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .init();

    let base_url = normalize_base_url(&settings.base_url)?;
    let route = match settings.initial_route.as_deref() {
        Some(raw) => raw
            .parse::<Route>()
            .with_context(|| format!("cannot open start page '{raw}'"))?,
        None => Route::Home,
    };
    tracing::info!(%base_url, %route, "starting dashboard gui");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("AI-Insight Dashboard")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    let startup = StartupConfig {
        base_url: base_url.clone(),
        route,
    };
    eframe::run_native(
        "AI-Insight Dashboard",
        options,
        Box::new(move |cc| {
            backend_bridge::runtime::launch(cmd_rx, ui_tx, base_url, cc.egui_ctx.clone());
            Ok(Box::new(DashboardApp::new(startup, cmd_tx, ui_rx)))
        }),
    )
    .map_err(|err| anyhow!("gui terminated with error: {err}"))
}
