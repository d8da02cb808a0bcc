//! Image-to-text recognition backed by ONNX TrOCR models.

pub mod engine;

pub use engine::OcrEngine;

use std::path::PathBuf;

use crate::error::Result;

/// Run recognition over a batch of image files, concatenating the
/// results with a header per source file.
pub fn recognize_files(engine: &mut OcrEngine, paths: &[PathBuf]) -> Result<String> {
    let mut out = String::new();
    for path in paths {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("--- Text from {} ---\n", path.display()));
        match engine.recognize_file(path) {
            Ok(text) => out.push_str(text.trim()),
            Err(e) => {
                tracing::warn!("OCR failed for {}: {e}", path.display());
                out.push_str(&format!("[error: {e}]"));
            }
        }
        out.push('\n');
    }
    Ok(out)
}
