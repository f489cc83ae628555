//! One render function per page. Panels only read view state and report what the user did;
//! the app turns each [`UiAction`] into state changes and backend commands.

use client_core::{
    InsightFormView, InsightSection, Page, Transition, UserDetailView, UserFormView,
    UserListView,
};
use eframe::egui;

use crate::ui::widgets;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Navigate(Transition),
    RefreshUsers,
    SubmitUserForm,
    DeleteUser,
    SubmitInsight,
}

pub fn header(ui: &mut egui::Ui, page: Page) -> Option<UiAction> {
    let mut action = None;
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("AI-Insight Dashboard").strong().size(18.0));
        ui.add_space(16.0);
        if ui
            .selectable_label(page == Page::Home, "Home")
            .clicked()
        {
            action = Some(UiAction::Navigate(Transition::ShowHome));
        }
        if ui
            .selectable_label(page.is_users_section(), "Users")
            .clicked()
        {
            action = Some(UiAction::Navigate(Transition::ShowUsers));
        }
    });
    action
}

pub fn home(ui: &mut egui::Ui, insight: &mut InsightFormView) -> Option<UiAction> {
    let mut action = None;
    ui.heading("Topic Insights");
    ui.label(
        egui::RichText::new("Enter a topic and get an AI-generated overview of it.").weak(),
    );
    ui.add_space(8.0);

    let loading = insight.is_loading();
    ui.horizontal(|ui| {
        let edit = egui::TextEdit::singleline(insight.topic_mut())
            .id_salt("insight_topic")
            .hint_text("e.g. quantum computing")
            .desired_width(ui.available_width() - 150.0);
        let response = ui.add_enabled(!loading, edit);
        if response.changed() {
            insight.topic_edited();
        }
        let submitted_by_enter =
            response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        let label = if loading {
            "Generating..."
        } else {
            "Generate Insights"
        };
        let clicked = ui
            .add_enabled(!loading, egui::Button::new(label))
            .clicked();
        if clicked || submitted_by_enter {
            action = Some(UiAction::SubmitInsight);
        }
    });

    if let Some(err) = insight.error() {
        ui.add_space(6.0);
        widgets::error_box(ui, err);
    }

    ui.add_space(10.0);
    if insight.show_skeleton() {
        widgets::skeleton_section(ui, 3);
        widgets::skeleton_section(ui, 4);
        widgets::skeleton_section(ui, 2);
        return action;
    }

    egui::ScrollArea::vertical()
        .id_salt("insight_results")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for section in insight.sections() {
                insight_section(ui, section);
            }
        });
    action
}

fn insight_section(ui: &mut egui::Ui, section: InsightSection<'_>) {
    match section {
        InsightSection::Overview(text) => {
            widgets::section_title(ui, "AI Summary");
            ui.label(text);
        }
        InsightSection::KeyConcepts(items) => {
            widgets::section_title(ui, "Key Concepts");
            bullets(ui, items);
        }
        InsightSection::Facts(items) => {
            widgets::section_title(ui, "Key Facts");
            bullets(ui, items);
        }
        InsightSection::Applications(text) => {
            widgets::section_title(ui, "Applications");
            ui.label(text);
        }
        InsightSection::RelatedLinks(links) => {
            widgets::section_title(ui, "Further Reading");
            for link in links {
                ui.horizontal_wrapped(|ui| {
                    ui.hyperlink_to(&link.title, &link.url);
                    if let Some(description) = &link.description {
                        ui.label(egui::RichText::new(description).weak());
                    }
                });
            }
        }
    }
}

fn bullets(ui: &mut egui::Ui, items: &[String]) {
    for item in items {
        ui.horizontal_wrapped(|ui| {
            ui.label("•");
            ui.label(item);
        });
    }
}

pub fn user_list(ui: &mut egui::Ui, list: &UserListView) -> Option<UiAction> {
    let mut action = None;
    ui.horizontal(|ui| {
        ui.heading("Users");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Add New User").clicked() {
                action = Some(UiAction::Navigate(list.new_user()));
            }
            if ui
                .add_enabled(!list.is_loading(), egui::Button::new("Refresh"))
                .clicked()
            {
                action = Some(UiAction::RefreshUsers);
            }
        });
    });
    ui.add_space(8.0);

    if let Some(err) = list.error() {
        widgets::error_box(ui, err);
        ui.add_space(6.0);
    }
    if list.is_loading() {
        widgets::loading_row(ui, "Loading users...");
    }
    if list.is_empty_notice() {
        widgets::info_box(ui, "No users found.");
        return action;
    }
    if list.users().is_empty() {
        return action;
    }

    egui::ScrollArea::vertical()
        .id_salt("user_table")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            egui::Grid::new("users_grid")
                .num_columns(4)
                .striped(true)
                .spacing(egui::vec2(18.0, 6.0))
                .show(ui, |ui| {
                    ui.label(egui::RichText::new("ID").strong());
                    ui.label(egui::RichText::new("Username").strong());
                    ui.label(egui::RichText::new("Email").strong());
                    ui.label(egui::RichText::new("Actions").strong());
                    ui.end_row();

                    for user in list.users() {
                        ui.label(user.id.to_string());
                        ui.label(&user.username);
                        ui.label(&user.email);
                        if ui.button("View").clicked() {
                            action = Some(UiAction::Navigate(list.select(user.id)));
                        }
                        ui.end_row();
                    }
                });
        });
    action
}

pub fn user_form(ui: &mut egui::Ui, form: &mut UserFormView) -> Option<UiAction> {
    let mut action = None;
    ui.heading(if form.is_edit() { "Edit User" } else { "Add New User" });
    ui.add_space(8.0);

    if let Some(err) = form.error() {
        widgets::error_box(ui, err);
        ui.add_space(6.0);
    }
    if form.is_loading() {
        widgets::loading_row(ui, "Working...");
    }

    let enabled = !form.is_loading();
    let width = ui.available_width().min(420.0);
    let draft = form.draft_mut();

    widgets::field_label(ui, "Username");
    ui.add_enabled(
        enabled,
        egui::TextEdit::singleline(&mut draft.username)
            .id_salt("user_form_username")
            .desired_width(width),
    );
    ui.add_space(4.0);
    widgets::field_label(ui, "Email");
    ui.add_enabled(
        enabled,
        egui::TextEdit::singleline(&mut draft.email)
            .id_salt("user_form_email")
            .desired_width(width),
    );

    ui.add_space(10.0);
    ui.horizontal(|ui| {
        if ui
            .add_enabled(enabled, egui::Button::new("Save"))
            .clicked()
        {
            action = Some(UiAction::SubmitUserForm);
        }
        if ui.button("Cancel").clicked() {
            action = Some(UiAction::Navigate(form.cancel()));
        }
    });
    action
}

pub fn user_detail(ui: &mut egui::Ui, detail: &UserDetailView) -> Option<UiAction> {
    let mut action = None;
    ui.heading("User Details");
    ui.add_space(8.0);

    if let Some(err) = detail.error() {
        widgets::error_box(ui, err);
        ui.add_space(6.0);
    }
    if detail.is_loading() {
        widgets::loading_row(ui, "Loading...");
    }

    if let Some(user) = detail.user() {
        egui::Grid::new("user_detail_grid")
            .num_columns(2)
            .spacing(egui::vec2(18.0, 6.0))
            .show(ui, |ui| {
                ui.label(egui::RichText::new("ID").strong());
                ui.label(user.id.to_string());
                ui.end_row();
                ui.label(egui::RichText::new("Username").strong());
                ui.label(&user.username);
                ui.end_row();
                ui.label(egui::RichText::new("Email").strong());
                ui.label(&user.email);
                ui.end_row();
                ui.label(egui::RichText::new("Enabled").strong());
                ui.label(if user.enabled { "yes" } else { "no" });
                ui.end_row();
                if !user.roles.is_empty() {
                    ui.label(egui::RichText::new("Roles").strong());
                    ui.label(user.roles.join(", "));
                    ui.end_row();
                }
                if let Some(created_at) = user.created_at {
                    ui.label(egui::RichText::new("Created").strong());
                    ui.label(created_at.format("%Y-%m-%d %H:%M").to_string());
                    ui.end_row();
                }
                if let Some(last_login) = user.last_login {
                    ui.label(egui::RichText::new("Last login").strong());
                    ui.label(last_login.format("%Y-%m-%d %H:%M").to_string());
                    ui.end_row();
                }
            });
    }

    ui.add_space(10.0);
    ui.horizontal(|ui| {
        if let Some(edit) = detail.edit() {
            if ui
                .add_enabled(detail.user().is_some(), egui::Button::new("Edit"))
                .clicked()
            {
                action = Some(UiAction::Navigate(edit));
            }
        }
        if ui
            .add_enabled(
                detail.user().is_some() && !detail.is_loading(),
                egui::Button::new("Delete"),
            )
            .clicked()
        {
            action = Some(UiAction::DeleteUser);
        }
        if ui.button("Back to List").clicked() {
            action = Some(UiAction::Navigate(detail.back()));
        }
    });
    action
}
