//! GUI panels and application state.

pub mod app;
pub mod archive_panel;
pub mod components;
pub mod dashboard;
pub mod employees_panel;
pub mod keyboard_panel;
pub mod ocr_panel;
pub mod pdf_images_panel;
pub mod pdf_text_panel;
pub mod students_panel;
pub mod users_panel;

pub use app::App;
