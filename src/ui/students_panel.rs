//! Student records panel with login gate, CRUD, and CSV export.

use eframe::egui::{self, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, FILE_CSV, LOCK, PENCIL, PLUS, TRASH};

use super::app::{App, DeleteTarget, StudentForm};
use super::components::{
    action_button, back_button, colors, danger_action_button, panel_header, primary_button_with_icon, styled_button,
    styled_button_with_icon,
};
use crate::models::student::{CreateStudent, UpdateStudent};

/// Show the student records panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    panel_header(ui, "Student Records");

    if !app.students_unlocked {
        show_login(app, ui);
        return go_back;
    }

    // Toolbar
    ui.horizontal(|ui| {
        if primary_button_with_icon(ui, PLUS, "Add Student").clicked() {
            app.student_form = StudentForm {
                is_open: true,
                ..Default::default()
            };
        }

        ui.add_space(10.0);

        if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            app.load_students();
        }

        ui.add_space(10.0);

        if styled_button_with_icon(ui, FILE_CSV, "Export CSV").clicked() {
            app.export_students();
        }

        ui.add_space(20.0);

        ui.label("Search:");
        ui.add(
            egui::TextEdit::singleline(&mut app.student_search)
                .desired_width(200.0)
                .hint_text("Name or school..."),
        );
    });

    ui.add_space(15.0);

    show_table(app, ui);

    // Form dialog
    if app.student_form.is_open {
        show_form_dialog(app, ui.ctx());
    }

    go_back
}

fn show_login(app: &mut App, ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.label(format!("{LOCK} Sign in to manage student records"));
        ui.add_space(20.0);

        egui::Grid::new("student_login_grid")
            .num_columns(2)
            .spacing([20.0, 10.0])
            .show(ui, |ui| {
                ui.label("Username:");
                ui.add(egui::TextEdit::singleline(&mut app.login_form.username).desired_width(200.0));
                ui.end_row();

                ui.label("Password:");
                ui.add(
                    egui::TextEdit::singleline(&mut app.login_form.password)
                        .desired_width(200.0)
                        .password(true),
                );
                ui.end_row();
            });

        ui.add_space(10.0);

        if app.login_form.failed {
            ui.colored_label(colors::ERROR, "Invalid username or password");
            ui.add_space(5.0);
        }

        ui.horizontal(|ui| {
            let available = ui.available_width();
            ui.add_space((available - 100.0).max(0.0) / 2.0);

            if app.login_form.in_flight {
                ui.spinner();
                ui.label("Signing in...");
            } else if primary_button_with_icon(ui, "", "Sign In").clicked() {
                if app.login_form.username.trim().is_empty() || app.login_form.password.is_empty() {
                    app.error_message = Some("Username and password are required".to_string());
                } else {
                    app.try_login();
                }
            }
        });
    });
}

fn show_table(app: &mut App, ui: &mut Ui) {
    let query = app.student_search.to_lowercase();
    let filtered: Vec<_> = app
        .students
        .iter()
        .filter(|s| {
            query.is_empty()
                || s.student_name.to_lowercase().contains(&query)
                || s.school_name.to_lowercase().contains(&query)
        })
        .collect();

    ui.label(format!("Showing {} of {} students", filtered.len(), app.students.len()));
    ui.add_space(10.0);

    let mut delete_request = None;

    ScrollArea::vertical().id_salt("students_scroll").show(ui, |ui| {
        ui.add_space(4.0);
        egui::Grid::new("students_grid")
            .num_columns(5)
            .striped(true)
            .min_col_width(60.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                // Header
                ui.strong("ID");
                ui.strong("Student Name");
                ui.strong("School Name");
                ui.strong("Created");
                ui.strong("Actions");
                ui.end_row();

                // Data rows
                for record in filtered {
                    ui.label(record.id.to_string());
                    ui.label(&record.student_name);
                    ui.label(&record.school_name);
                    ui.label(record.created_at.format("%Y-%m-%d").to_string());

                    ui.horizontal(|ui| {
                        ui.add_space(8.0);
                        if action_button(ui, PENCIL, "Edit").clicked() {
                            app.student_form = StudentForm::edit(record);
                        }
                        ui.add_space(4.0);
                        if danger_action_button(ui, TRASH, "Delete").clicked() {
                            delete_request = Some(DeleteTarget::Student(record.id, record.student_name.clone()));
                        }
                    });

                    ui.end_row();
                }
            });
    });

    if let Some(target) = delete_request {
        app.request_delete(target);
    }
}

fn show_form_dialog(app: &mut App, ctx: &egui::Context) {
    let title = if app.student_form.is_editing {
        "Edit Student"
    } else {
        "Add Student"
    };

    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .default_width(400.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(10.0);

            egui::Grid::new("student_form_grid")
                .num_columns(2)
                .spacing([20.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Student Name:");
                    ui.add(egui::TextEdit::singleline(&mut app.student_form.student_name).desired_width(250.0));
                    ui.end_row();

                    ui.label("School Name:");
                    ui.add(egui::TextEdit::singleline(&mut app.student_form.school_name).desired_width(250.0));
                    ui.end_row();
                });

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if styled_button(ui, "Cancel").clicked() {
                    app.student_form.reset();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if primary_button_with_icon(ui, "", "Save").clicked() {
                        save_student(app);
                    }
                });
            });
        });
}

fn save_student(app: &mut App) {
    let form = &app.student_form;

    if form.student_name.trim().is_empty() {
        app.error_message = Some("Student name is required".to_string());
        return;
    }
    if form.school_name.trim().is_empty() {
        app.error_message = Some("School name is required".to_string());
        return;
    }

    if form.is_editing {
        let id = form.id.unwrap();
        let data = UpdateStudent {
            student_name: Some(form.student_name.trim().to_string()),
            school_name: Some(form.school_name.trim().to_string()),
        };
        app.update_student(id, data);
    } else {
        let data = CreateStudent {
            student_name: form.student_name.trim().to_string(),
            school_name: form.school_name.trim().to_string(),
        };
        app.create_student(data);
    }
}
