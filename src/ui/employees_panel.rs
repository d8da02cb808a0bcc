//! Employee records panel with CRUD, exports, and invoice generation.

use eframe::egui::{self, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, FILE_CSV, FILE_PDF, FILE_XLS, PENCIL, PLUS, TRASH};

use super::app::{App, DeleteTarget, EmployeeForm};
use super::components::{
    action_button, back_button, danger_action_button, panel_header, primary_button_with_icon, styled_button,
    styled_button_with_icon,
};
use crate::models::employee::{CreateEmployee, UpdateEmployee};

/// Show the employee records panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    panel_header(ui, "Employee Records");

    // Toolbar
    ui.horizontal(|ui| {
        if primary_button_with_icon(ui, PLUS, "Add Employee").clicked() {
            app.employee_form = EmployeeForm {
                is_open: true,
                ..Default::default()
            };
        }

        ui.add_space(10.0);

        if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            app.load_employees();
        }

        ui.add_space(10.0);

        if styled_button_with_icon(ui, FILE_CSV, "Export CSV").clicked() {
            app.export_employees_csv();
        }

        ui.add_space(10.0);

        if styled_button_with_icon(ui, FILE_XLS, "Export Excel").clicked() {
            app.export_employees_excel();
        }

        ui.add_space(20.0);

        ui.label("Search:");
        ui.add(
            egui::TextEdit::singleline(&mut app.employee_search)
                .desired_width(200.0)
                .hint_text("Name..."),
        );
    });

    ui.add_space(15.0);

    show_table(app, ui);

    // Form dialog
    if app.employee_form.is_open {
        show_form_dialog(app, ui.ctx());
    }

    go_back
}

fn show_table(app: &mut App, ui: &mut Ui) {
    let query = app.employee_search.to_lowercase();
    let filtered: Vec<_> = app
        .employees
        .iter()
        .filter(|e| query.is_empty() || e.name.to_lowercase().contains(&query))
        .collect();

    ui.label(format!(
        "Showing {} of {} employees",
        filtered.len(),
        app.employees.len()
    ));
    ui.add_space(10.0);

    let mut invoice_for = None;
    let mut delete_request = None;

    ScrollArea::vertical().id_salt("employees_scroll").show(ui, |ui| {
        ui.add_space(4.0);
        egui::Grid::new("employees_grid")
            .num_columns(6)
            .striped(true)
            .min_col_width(60.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                // Header
                ui.strong("ID");
                ui.strong("Name");
                ui.strong("Age");
                ui.strong("Salary");
                ui.strong("Created");
                ui.strong("Actions");
                ui.end_row();

                // Data rows
                for emp in filtered {
                    ui.label(emp.id.to_string());
                    ui.label(&emp.name);
                    ui.label(emp.age.to_string());
                    ui.label(emp.salary_display());
                    ui.label(emp.created_at.format("%Y-%m-%d").to_string());

                    ui.horizontal(|ui| {
                        ui.add_space(8.0);
                        if action_button(ui, PENCIL, "Edit").clicked() {
                            app.employee_form = EmployeeForm::edit(emp);
                        }
                        ui.add_space(4.0);
                        if action_button(ui, FILE_PDF, "Generate Invoice").clicked() {
                            invoice_for = Some(emp.clone());
                        }
                        ui.add_space(4.0);
                        if danger_action_button(ui, TRASH, "Delete").clicked() {
                            delete_request = Some(DeleteTarget::Employee(emp.id, emp.name.clone()));
                        }
                    });

                    ui.end_row();
                }
            });
    });

    if let Some(target) = delete_request {
        app.request_delete(target);
    }
    if let Some(emp) = invoice_for {
        app.generate_invoice(&emp);
    }
}

fn show_form_dialog(app: &mut App, ctx: &egui::Context) {
    let title = if app.employee_form.is_editing {
        "Edit Employee"
    } else {
        "Add Employee"
    };

    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .default_width(400.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(10.0);

            egui::Grid::new("employee_form_grid")
                .num_columns(2)
                .spacing([20.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Name:");
                    ui.add(egui::TextEdit::singleline(&mut app.employee_form.name).desired_width(250.0));
                    ui.end_row();

                    ui.label("Age:");
                    ui.add(
                        egui::TextEdit::singleline(&mut app.employee_form.age_input)
                            .desired_width(80.0)
                            .hint_text("e.g. 35"),
                    );
                    ui.end_row();

                    ui.label("Monthly Salary:");
                    ui.add(
                        egui::TextEdit::singleline(&mut app.employee_form.salary_input)
                            .desired_width(120.0)
                            .hint_text("e.g. 4500.00"),
                    );
                    ui.end_row();
                });

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if styled_button(ui, "Cancel").clicked() {
                    app.employee_form.reset();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if primary_button_with_icon(ui, "", "Save").clicked() {
                        save_employee(app);
                    }
                });
            });
        });
}

fn save_employee(app: &mut App) {
    let (name, age, salary_cents) = match app.employee_form.parse() {
        Ok(parsed) => parsed,
        Err(e) => {
            app.error_message = Some(e);
            return;
        }
    };

    if app.employee_form.is_editing {
        let id = app.employee_form.id.unwrap();
        let data = UpdateEmployee {
            name: Some(name),
            age: Some(age),
            salary_cents: Some(salary_cents),
        };
        app.update_employee(id, data);
    } else {
        let data = CreateEmployee {
            name,
            age,
            salary_cents,
        };
        app.create_employee(data);
    }
}
