use std::{collections::VecDeque, time::Duration};

use client_core::{Page, Route};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use url::Url;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::DashboardState;
use crate::ui::confirm::NativeConfirm;
use crate::ui::panels::{self, UiAction};

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub base_url: Url,
    pub route: Route,
}

pub struct DashboardApp {
    state: DashboardState,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    confirm: NativeConfirm,
    base_url: Url,
}

impl DashboardApp {
    pub fn new(
        config: StartupConfig,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
    ) -> Self {
        let (state, commands) = DashboardState::new(config.route);
        let mut app = Self {
            state,
            cmd_tx,
            ui_rx,
            confirm: NativeConfirm,
            base_url: config.base_url,
        };
        app.dispatch(commands);
        app
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            let commands = self.state.apply_event(event);
            self.dispatch(commands);
        }
    }

    fn dispatch(&mut self, commands: Vec<BackendCommand>) {
        let mut queue: VecDeque<BackendCommand> = commands.into();
        while let Some(cmd) = queue.pop_front() {
            if let Err(cmd) = dispatch_backend_command(&self.cmd_tx, cmd, &mut self.state.status)
            {
                queue.extend(self.state.reject(cmd));
            }
        }
    }

    fn handle_action(&mut self, action: UiAction) {
        tracing::debug!(?action, "ui action");
        let commands = match action {
            UiAction::Navigate(transition) => self.state.go(transition),
            UiAction::RefreshUsers => self.state.refresh_users(),
            UiAction::SubmitUserForm => self.state.submit_user_form(),
            UiAction::DeleteUser => self.state.delete_user(&mut self.confirm),
            UiAction::SubmitInsight => self.state.submit_insight(),
        };
        self.dispatch(commands);
    }

    fn is_busy(&self) -> bool {
        self.state.user_list.is_loading()
            || self.state.user_form.is_loading()
            || self.state.user_detail.is_loading()
            || self.state.insight.is_loading()
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        let Some(banner) = self.state.banner() else {
            return;
        };
        let text = banner.banner_text();

        egui::Frame::NONE
            .fill(egui::Color32::from_rgb(111, 53, 53))
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new(text).color(egui::Color32::WHITE));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            self.state.dismiss_banner();
                        }
                    });
                });
            });
        ui.add_space(4.0);
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let mut actions = Vec::new();

        egui::TopBottomPanel::top("dashboard_header").show(ctx, |ui| {
            ui.add_space(4.0);
            actions.extend(panels::header(ui, self.state.page()));
            ui.add_space(4.0);
            self.show_status_banner(ui);
        });

        egui::TopBottomPanel::bottom("dashboard_footer").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small(egui::RichText::new(self.state.route().to_string()).monospace());
                ui.separator();
                ui.small(egui::RichText::new(self.base_url.as_str()).weak());
                if !self.state.status.is_empty() {
                    ui.separator();
                    ui.small(egui::RichText::new(&self.state.status).weak());
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let action = match self.state.page() {
                Page::Home => panels::home(ui, &mut self.state.insight),
                Page::Users => panels::user_list(ui, &self.state.user_list),
                Page::UserForm => panels::user_form(ui, &mut self.state.user_form),
                Page::UserView => panels::user_detail(ui, &self.state.user_detail),
            };
            actions.extend(action);
        });

        for action in actions {
            self.handle_action(action);
        }

        if self.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
    }
}
