//! User registration panel.

use eframe::egui::{self, Ui};
use egui_phosphor::regular::USER_PLUS;

use super::app::App;
use super::components::{back_button, colors, panel_header, primary_button_with_icon};
use crate::models::user::CreateUser;

/// Show the registration panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    panel_header(ui, "Register User");

    ui.label("Create a login account for the student records manager.");
    ui.add_space(15.0);

    egui::Grid::new("user_form_grid")
        .num_columns(2)
        .spacing([20.0, 10.0])
        .show(ui, |ui| {
            ui.label("Username:");
            ui.add(egui::TextEdit::singleline(&mut app.user_form.username).desired_width(220.0));
            ui.end_row();

            ui.label("Password:");
            ui.add(
                egui::TextEdit::singleline(&mut app.user_form.password)
                    .desired_width(220.0)
                    .password(true),
            );
            ui.end_row();

            ui.label("Confirm Password:");
            ui.add(
                egui::TextEdit::singleline(&mut app.user_form.confirm)
                    .desired_width(220.0)
                    .password(true),
            );
            ui.end_row();
        });

    if !app.user_form.confirm.is_empty() && app.user_form.password != app.user_form.confirm {
        ui.add_space(5.0);
        ui.colored_label(colors::ERROR, "Passwords do not match");
    }

    ui.add_space(15.0);

    if primary_button_with_icon(ui, USER_PLUS, "Register").clicked() {
        submit(app);
    }

    go_back
}

fn submit(app: &mut App) {
    let username = app.user_form.username.trim().to_string();

    if username.is_empty() {
        app.error_message = Some("Username is required".to_string());
        return;
    }
    if app.user_form.password.is_empty() {
        app.error_message = Some("Password is required".to_string());
        return;
    }
    if app.user_form.password != app.user_form.confirm {
        app.error_message = Some("Passwords do not match".to_string());
        return;
    }

    app.register_user(CreateUser {
        username,
        password: app.user_form.password.clone(),
    });
}
