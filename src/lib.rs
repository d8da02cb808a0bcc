pub mod archive;
pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod export;
pub mod keyboard;
pub mod models;
pub mod ocr;
pub mod pdf;
pub mod template;
pub mod ui;

pub use error::{AppError, Result};
