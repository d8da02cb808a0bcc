//! Image-to-text panel backed by the OCR engine.

use eframe::egui::{self, ScrollArea, Ui};
use egui_phosphor::regular::{FLOPPY_DISK, FOLDER_OPEN, TEXT_T, X};

use super::app::App;
use super::components::{back_button, panel_header, primary_button_with_icon, styled_button, styled_button_with_icon};

/// Show the OCR panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    panel_header(ui, "Image to Text");

    let models_configured = app.config.ocr.encoder_model.exists();
    if !models_configured {
        ui.weak("OCR models are not configured. Set the model paths in the config file.");
        ui.add_space(10.0);
    }

    ui.horizontal(|ui| {
        if styled_button_with_icon(ui, FOLDER_OPEN, "Add Images...").clicked()
            && let Some(mut paths) = rfd::FileDialog::new()
                .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "tiff"])
                .pick_files()
        {
            app.ocr_selection.append(&mut paths);
        }

        ui.add_space(10.0);

        let can_run = !app.ocr_selection.is_empty() && !app.ocr_busy && models_configured;
        ui.add_enabled_ui(can_run, |ui| {
            if primary_button_with_icon(ui, TEXT_T, "Recognize Text").clicked() {
                app.run_ocr();
            }
        });

        if app.ocr_busy {
            ui.add_space(10.0);
            ui.spinner();
            ui.label("Recognizing...");
        }

        if !app.ocr_selection.is_empty() {
            ui.add_space(10.0);
            if styled_button(ui, "Clear").clicked() {
                app.ocr_selection.clear();
            }
        }

        ui.add_space(10.0);

        let has_text = !app.ocr_text.is_empty();
        ui.add_enabled_ui(has_text, |ui| {
            if styled_button_with_icon(ui, FLOPPY_DISK, "Save as Text...").clicked() {
                save_text(app);
            }
        });
    });

    ui.add_space(10.0);

    // Selected files
    let mut remove_index = None;
    if !app.ocr_selection.is_empty() {
        ScrollArea::vertical()
            .id_salt("ocr_selection_scroll")
            .max_height(120.0)
            .show(ui, |ui| {
                for (idx, path) in app.ocr_selection.iter().enumerate() {
                    ui.horizontal(|ui| {
                        if ui.small_button(X).on_hover_text("Remove").clicked() {
                            remove_index = Some(idx);
                        }
                        ui.label(path.display().to_string());
                    });
                }
            });
    }
    if let Some(idx) = remove_index {
        app.ocr_selection.remove(idx);
    }

    ui.add_space(15.0);

    ScrollArea::vertical().id_salt("ocr_text_scroll").show(ui, |ui| {
        if app.ocr_text.is_empty() && !app.ocr_busy {
            ui.weak("Recognized text appears here.");
        } else {
            ui.add(
                egui::TextEdit::multiline(&mut app.ocr_text.as_str())
                    .desired_width(f32::INFINITY)
                    .desired_rows(18)
                    .code_editor(),
            );
        }
    });

    go_back
}

fn save_text(app: &mut App) {
    let default_name = crate::export::generate_export_filename("recognized_text", "txt");
    let Some(path) = crate::export::show_save_dialog(&default_name, "Text", &["txt"]) else {
        return;
    };

    match std::fs::write(&path, &app.ocr_text) {
        Ok(()) => {
            app.success_message = Some(format!("Saved to: {}", path.display()));
            app.log_success(format!("Saved recognized text: {}", path.display()));
        }
        Err(e) => {
            app.error_message = Some(format!("Save failed: {e}"));
            app.log_error(format!("Save failed: {e}"));
        }
    }
}
