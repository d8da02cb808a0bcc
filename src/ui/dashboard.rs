//! Dashboard panel with stats, tool cards, and activity log.

use eframe::egui::{self, Color32, CornerRadius, Margin, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{
    FILE_ARCHIVE, FILE_PDF, GRADUATION_CAP, IDENTIFICATION_CARD, IMAGES, KEYBOARD, TEXT_T, USER_PLUS,
};

use super::app::{App, LogLevel, Panel};
use super::components::dashboard_card;

/// Show the dashboard panel.
///
/// Returns `Some(panel)` if navigation is requested.
pub fn show(app: &mut App, ui: &mut Ui) -> Option<Panel> {
    let mut next_panel = None;

    ui.vertical_centered(|ui| {
        ui.add_space(30.0);

        // Header
        ui.label(RichText::new("Deskkit").size(32.0).strong());
        ui.add_space(5.0);
        ui.label(RichText::new("Desktop utility suite").size(14.0).weak());

        ui.add_space(30.0);

        // Stat cards row
        ui.horizontal(|ui| {
            let available = ui.available_width();
            let start_offset = ((available - 510.0) / 2.0).max(0.0);
            ui.add_space(start_offset);

            stat_card(ui, "Users", &app.counts.users.to_string(), "Registered accounts");
            stat_card(ui, "Students", &app.counts.students.to_string(), "Student records");
            stat_card(ui, "Employees", &app.counts.employees.to_string(), "Employee records");
        });

        ui.add_space(30.0);

        // Tool cards, two rows of four
        let available = ui.available_width();
        let num_cards = 4.0;
        let spacing = 30.0;
        let total_spacing = spacing * (num_cards - 1.0);
        let card_width = ((available - total_spacing) / num_cards).clamp(150.0, 250.0);
        let card_height = card_width * 0.75;
        let card_size = egui::vec2(card_width, card_height);
        let total_width = card_width * num_cards + total_spacing;
        let start_offset = ((available - total_width) / 2.0).max(0.0);

        let top_row = [
            ("Register User", "Create a login account", USER_PLUS, Panel::Users),
            ("Student Records", "Manage student data", GRADUATION_CAP, Panel::Students),
            (
                "Employee Records",
                "Records and invoices",
                IDENTIFICATION_CARD,
                Panel::Employees,
            ),
            ("PDF Text", "Extract text from PDFs", FILE_PDF, Panel::PdfText),
        ];
        let bottom_row = [
            ("PDF Images", "Extract or combine images", IMAGES, Panel::PdfImages),
            ("Image to Text", "Recognize text in images", TEXT_T, Panel::Ocr),
            ("Keyboard Tester", "Check every key", KEYBOARD, Panel::Keyboard),
            ("Zip Manager", "Create and extract archives", FILE_ARCHIVE, Panel::Archive),
        ];

        for row in [top_row, bottom_row] {
            ui.horizontal(|ui| {
                ui.add_space(start_offset);
                for (i, (title, description, icon, panel)) in row.iter().enumerate() {
                    if i > 0 {
                        ui.add_space(spacing);
                    }
                    if dashboard_card(ui, title, description, icon, card_size).clicked() {
                        next_panel = Some(*panel);
                    }
                }
            });
            ui.add_space(spacing);
        }
    });

    // Recent Activity
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .outer_margin(Margin::symmetric(10, 0))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.label(RichText::new("Recent Activity").strong());
            ui.add_space(10.0);

            ScrollArea::vertical().max_height(150.0).show(ui, |ui| {
                if app.log_messages.is_empty() {
                    ui.label(RichText::new("No recent activity").weak());
                } else {
                    for entry in app.log_messages.iter().rev().take(10) {
                        let color = match entry.level {
                            LogLevel::Info => Color32::GRAY,
                            LogLevel::Success => Color32::from_rgb(100, 200, 100),
                            LogLevel::Warning => Color32::from_rgb(230, 180, 50),
                            LogLevel::Error => Color32::from_rgb(230, 100, 100),
                        };

                        ui.horizontal(|ui| {
                            ui.label(
                                RichText::new(entry.timestamp.format("%H:%M:%S").to_string())
                                    .small()
                                    .color(Color32::DARK_GRAY),
                            );
                            ui.label(RichText::new(&entry.message).color(color));
                        });
                    }
                }
            });
        });

    next_panel
}

/// Render a stat card with title, value, and subtitle.
fn stat_card(ui: &mut Ui, title: &str, value: &str, subtitle: &str) {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .outer_margin(Margin::same(5))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.set_min_width(150.0);

            ui.vertical(|ui| {
                ui.label(RichText::new(title).small());
                ui.label(RichText::new(value).heading().strong());
                ui.label(RichText::new(subtitle).small().weak());
            });
        });
}
