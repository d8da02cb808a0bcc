//! PDF reading and composition built on lopdf.

pub mod compose;
pub mod images;
pub mod text;

pub use images::{ExtractedImage, extract_images};
pub use text::{extract_text, page_count};
