//! PDF text extraction panel.

use eframe::egui::{self, ScrollArea, Ui};
use egui_phosphor::regular::{FILE_PDF, FLOPPY_DISK};

use super::app::App;
use super::components::{back_button, panel_header, primary_button_with_icon, styled_button_with_icon};

/// Show the PDF text panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    panel_header(ui, "PDF Text Extraction");

    ui.horizontal(|ui| {
        let busy = app.pdf_text_busy;
        ui.add_enabled_ui(!busy, |ui| {
            if primary_button_with_icon(ui, FILE_PDF, "Open PDF...").clicked()
                && let Some(path) = rfd::FileDialog::new().add_filter("PDF", &["pdf"]).pick_file()
            {
                app.extract_pdf_text(path);
            }
        });

        if busy {
            ui.add_space(10.0);
            ui.spinner();
            ui.label("Extracting...");
        }

        ui.add_space(10.0);

        let has_text = !app.pdf_text.is_empty();
        ui.add_enabled_ui(has_text, |ui| {
            if styled_button_with_icon(ui, FLOPPY_DISK, "Save as Text...").clicked() {
                save_text(app);
            }
        });
    });

    if let Some(source) = &app.pdf_text_source {
        ui.add_space(5.0);
        ui.weak(format!("Source: {}", source.display()));
    }

    ui.add_space(15.0);

    ScrollArea::vertical().id_salt("pdf_text_scroll").show(ui, |ui| {
        if app.pdf_text.is_empty() && !app.pdf_text_busy {
            ui.weak("Open a PDF to extract its text.");
        } else {
            ui.add(
                egui::TextEdit::multiline(&mut app.pdf_text.as_str())
                    .desired_width(f32::INFINITY)
                    .desired_rows(24)
                    .code_editor(),
            );
        }
    });

    go_back
}

fn save_text(app: &mut App) {
    let default_name = crate::export::generate_export_filename("extracted_text", "txt");
    let Some(path) = crate::export::show_save_dialog(&default_name, "Text", &["txt"]) else {
        return;
    };

    match std::fs::write(&path, &app.pdf_text) {
        Ok(()) => {
            app.success_message = Some(format!("Saved to: {}", path.display()));
            app.log_success(format!("Saved extracted text: {}", path.display()));
        }
        Err(e) => {
            app.error_message = Some(format!("Save failed: {e}"));
            app.log_error(format!("Save failed: {e}"));
        }
    }
}
