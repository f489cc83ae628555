//! Small reusable widgets: message boxes, loading rows, and skeleton placeholders.

use eframe::egui;

const ERROR_FILL: egui::Color32 = egui::Color32::from_rgb(111, 53, 53);
const ERROR_STROKE: egui::Color32 = egui::Color32::from_rgb(175, 96, 96);
const INFO_FILL: egui::Color32 = egui::Color32::from_rgb(46, 66, 94);
const INFO_STROKE: egui::Color32 = egui::Color32::from_rgb(92, 128, 176);

pub fn error_box(ui: &mut egui::Ui, message: &str) {
    message_box(ui, message, ERROR_FILL, ERROR_STROKE);
}

pub fn info_box(ui: &mut egui::Ui, message: &str) {
    message_box(ui, message, INFO_FILL, INFO_STROKE);
}

fn message_box(ui: &mut egui::Ui, message: &str, fill: egui::Color32, stroke: egui::Color32) {
    egui::Frame::NONE
        .fill(fill)
        .stroke(egui::Stroke::new(1.0, stroke))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
        });
}

pub fn loading_row(ui: &mut egui::Ui, label: &str) {
    ui.horizontal(|ui| {
        ui.add(egui::Spinner::new());
        ui.label(egui::RichText::new(label).weak());
    });
}

pub fn section_title(ui: &mut egui::Ui, title: &str) {
    ui.add_space(8.0);
    ui.label(egui::RichText::new(title).strong().size(16.0));
    ui.add_space(2.0);
}

/// Pulsing grey bars standing in for `lines` lines of text.
pub fn skeleton_lines(ui: &mut egui::Ui, lines: usize) {
    let time = ui.input(|i| i.time);
    let pulse = 0.55 + 0.25 * ((time * 3.0).sin() as f32);
    let base = ui.visuals().widgets.inactive.bg_fill;
    let fill = base.gamma_multiply(pulse);
    let full_width = ui.available_width();

    for line in 0..lines {
        let width = if line + 1 == lines {
            full_width * 0.6
        } else {
            full_width
        };
        let (rect, _) = ui.allocate_exact_size(egui::vec2(width, 12.0), egui::Sense::hover());
        ui.painter()
            .rect_filled(rect, egui::CornerRadius::same(4), fill);
        ui.add_space(4.0);
    }
}

pub fn skeleton_section(ui: &mut egui::Ui, lines: usize) {
    let time = ui.input(|i| i.time);
    let pulse = 0.7 + 0.2 * ((time * 3.0).sin() as f32);
    let fill = ui.visuals().widgets.inactive.bg_fill.gamma_multiply(pulse);
    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(ui.available_width() * 0.35, 16.0),
        egui::Sense::hover(),
    );
    ui.painter()
        .rect_filled(rect, egui::CornerRadius::same(4), fill);
    ui.add_space(6.0);
    skeleton_lines(ui, lines);
    ui.add_space(8.0);
}

pub fn field_label(ui: &mut egui::Ui, label: &str) {
    ui.label(egui::RichText::new(label).strong());
}
