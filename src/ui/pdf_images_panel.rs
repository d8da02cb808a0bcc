//! PDF image panel: extract embedded images and combine images into a
//! new PDF.

use eframe::egui::{self, ScrollArea, Ui};
use egui_phosphor::regular::{FILE_PDF, FOLDER_OPEN, IMAGES, X};

use super::app::App;
use super::components::{back_button, panel_header, primary_button_with_icon, styled_button, styled_button_with_icon};

/// Show the PDF images panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    panel_header(ui, "PDF Images");

    show_extract_section(app, ui);

    ui.add_space(20.0);
    ui.separator();
    ui.add_space(20.0);

    show_combine_section(app, ui);

    go_back
}

fn show_extract_section(app: &mut App, ui: &mut Ui) {
    ui.strong("Extract embedded images");
    ui.add_space(10.0);

    ui.horizontal(|ui| {
        ui.add_enabled_ui(!app.pdf_images_busy, |ui| {
            if primary_button_with_icon(ui, FILE_PDF, "Open PDF...").clicked()
                && let Some(pdf) = rfd::FileDialog::new().add_filter("PDF", &["pdf"]).pick_file()
                && let Some(out_dir) = rfd::FileDialog::new().pick_folder()
            {
                app.extract_pdf_images(pdf, out_dir);
            }
        });

        if app.pdf_images_busy {
            ui.add_space(10.0);
            ui.spinner();
            ui.label("Working...");
        }
    });

    if let Some(source) = &app.pdf_images_source {
        ui.add_space(5.0);
        ui.weak(format!("Source: {}", source.display()));
    }
    if let Some(dir) = &app.pdf_images_dir {
        ui.weak(format!("Output: {}", dir.display()));
    }

    if !app.pdf_images.is_empty() {
        ui.add_space(10.0);
        ScrollArea::vertical()
            .id_salt("pdf_images_scroll")
            .max_height(220.0)
            .show(ui, |ui| {
                egui::Grid::new("pdf_images_grid")
                    .num_columns(3)
                    .striped(true)
                    .min_col_width(80.0)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        ui.strong("File");
                        ui.strong("Page");
                        ui.strong("Size");
                        ui.end_row();

                        for img in &app.pdf_images {
                            ui.label(&img.filename);
                            ui.label(img.page.to_string());
                            ui.label(format_bytes(img.byte_size));
                            ui.end_row();
                        }
                    });
            });
    }
}

fn show_combine_section(app: &mut App, ui: &mut Ui) {
    ui.strong("Combine images into a PDF");
    ui.add_space(10.0);

    ui.horizontal(|ui| {
        if styled_button_with_icon(ui, FOLDER_OPEN, "Add Images...").clicked()
            && let Some(mut paths) = rfd::FileDialog::new()
                .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "gif"])
                .pick_files()
        {
            app.combine_selection.append(&mut paths);
        }

        ui.add_space(10.0);

        let can_combine = !app.combine_selection.is_empty() && !app.pdf_images_busy;
        ui.add_enabled_ui(can_combine, |ui| {
            if primary_button_with_icon(ui, IMAGES, "Combine to PDF...").clicked() {
                let default_name = crate::export::generate_export_filename("combined", "pdf");
                if let Some(output) = crate::export::show_save_dialog(&default_name, "PDF", &["pdf"]) {
                    app.combine_images(output);
                }
            }
        });

        if !app.combine_selection.is_empty() {
            ui.add_space(10.0);
            if styled_button(ui, "Clear").clicked() {
                app.combine_selection.clear();
            }
        }
    });

    if app.combine_selection.is_empty() {
        ui.add_space(5.0);
        ui.weak("Selected images become one page each, in order.");
        return;
    }

    ui.add_space(10.0);

    let mut remove_index = None;
    ScrollArea::vertical()
        .id_salt("combine_scroll")
        .max_height(180.0)
        .show(ui, |ui| {
            for (idx, path) in app.combine_selection.iter().enumerate() {
                ui.horizontal(|ui| {
                    if ui.small_button(X).on_hover_text("Remove").clicked() {
                        remove_index = Some(idx);
                    }
                    ui.label(format!("{}. {}", idx + 1, path.display()));
                });
            }
        });

    if let Some(idx) = remove_index {
        app.combine_selection.remove(idx);
    }
}

fn format_bytes(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}
