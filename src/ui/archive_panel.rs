//! Zip manager panel: create archives from files/folders and extract
//! existing archives.

use eframe::egui::{self, ProgressBar, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{FILE_ARCHIVE, FILE_PLUS, FOLDER_OPEN, FOLDER_PLUS, MAGNIFYING_GLASS, X};

use super::app::{App, ArchiveState};
use super::components::{
    back_button, colors, panel_header, primary_button_with_icon, styled_button, styled_button_with_icon,
};

/// Show the zip manager panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    panel_header(ui, "Zip Manager");

    let busy = matches!(app.archive_state, ArchiveState::InProgress { .. });

    show_create_section(app, ui, busy);

    ui.add_space(20.0);
    ui.separator();
    ui.add_space(20.0);

    show_extract_section(app, ui, busy);

    ui.add_space(20.0);
    ui.separator();
    ui.add_space(20.0);

    show_inspect_section(app, ui);

    ui.add_space(20.0);

    show_status(app, ui);

    go_back
}

fn show_create_section(app: &mut App, ui: &mut Ui, busy: bool) {
    ui.strong("Create archive");
    ui.add_space(10.0);

    ui.horizontal(|ui| {
        if styled_button_with_icon(ui, FILE_PLUS, "Add Files...").clicked()
            && let Some(mut paths) = rfd::FileDialog::new().pick_files()
        {
            app.archive_items.append(&mut paths);
        }

        ui.add_space(10.0);

        if styled_button_with_icon(ui, FOLDER_PLUS, "Add Folder...").clicked()
            && let Some(path) = rfd::FileDialog::new().pick_folder()
        {
            app.archive_items.push(path);
        }

        ui.add_space(10.0);

        let can_create = !app.archive_items.is_empty() && !busy;
        ui.add_enabled_ui(can_create, |ui| {
            if primary_button_with_icon(ui, FILE_ARCHIVE, "Create Zip...").clicked() {
                let default_name = crate::export::generate_export_filename("archive", "zip");
                if let Some(dest) = crate::export::show_save_dialog(&default_name, "Zip archive", &["zip"]) {
                    app.start_archive_create(dest);
                }
            }
        });

        if !app.archive_items.is_empty() {
            ui.add_space(10.0);
            if styled_button(ui, "Clear").clicked() {
                app.archive_items.clear();
            }
        }
    });

    if app.archive_items.is_empty() {
        ui.add_space(5.0);
        ui.weak("Files are stored at the archive root; folders keep their structure.");
        return;
    }

    ui.add_space(10.0);

    let mut remove_index = None;
    ScrollArea::vertical()
        .id_salt("archive_items_scroll")
        .max_height(160.0)
        .show(ui, |ui| {
            for (idx, item) in app.archive_items.iter().enumerate() {
                ui.horizontal(|ui| {
                    if ui.small_button(X).on_hover_text("Remove").clicked() {
                        remove_index = Some(idx);
                    }
                    let kind = if item.is_dir() { "folder" } else { "file" };
                    ui.label(format!("{} ({kind})", item.display()));
                });
            }
        });

    if let Some(idx) = remove_index {
        app.archive_items.remove(idx);
    }
}

fn show_extract_section(app: &mut App, ui: &mut Ui, busy: bool) {
    ui.strong("Extract archive");
    ui.add_space(10.0);

    ui.horizontal(|ui| {
        ui.add_enabled_ui(!busy, |ui| {
            if primary_button_with_icon(ui, FOLDER_OPEN, "Extract Zip...").clicked()
                && let Some(src) = rfd::FileDialog::new().add_filter("Zip archive", &["zip"]).pick_file()
                && let Some(dest) = rfd::FileDialog::new().pick_folder()
            {
                app.start_archive_extract(src, dest);
            }
        });
    });

    ui.add_space(5.0);
    ui.weak("Entries that would escape the chosen directory are rejected.");
}

fn show_inspect_section(app: &mut App, ui: &mut Ui) {
    ui.strong("Inspect archive");
    ui.add_space(10.0);

    ui.horizontal(|ui| {
        if styled_button_with_icon(ui, MAGNIFYING_GLASS, "List Contents...").clicked()
            && let Some(src) = rfd::FileDialog::new().add_filter("Zip archive", &["zip"]).pick_file()
        {
            app.list_archive(src);
        }

        if !app.archive_listing.is_empty() {
            ui.add_space(10.0);
            if styled_button(ui, "Clear").clicked() {
                app.archive_listing.clear();
                app.archive_listing_source = None;
            }
        }
    });

    if app.archive_listing.is_empty() {
        return;
    }

    ui.add_space(10.0);

    if let Some(src) = &app.archive_listing_source {
        ui.label(format!("{} ({} entries)", src.display(), app.archive_listing.len()));
        ui.add_space(5.0);
    }

    ScrollArea::vertical()
        .id_salt("archive_listing_scroll")
        .max_height(160.0)
        .show(ui, |ui| {
            for entry in &app.archive_listing {
                let kind = if entry.is_dir { "folder" } else { "file" };
                ui.label(format!("{} ({kind})", entry.path));
            }
        });
}

fn show_status(app: &App, ui: &mut Ui) {
    match &app.archive_state {
        ArchiveState::Idle => {}
        ArchiveState::InProgress { progress, message } => {
            ui.add(ProgressBar::new(*progress).text(message).animate(true));
        }
        ArchiveState::Completed(summary) => {
            ui.label(RichText::new(summary).color(colors::SUCCESS));
        }
        ArchiveState::Error(e) => {
            ui.label(RichText::new(e).color(colors::ERROR));
        }
    }
}
