//! PDF text extraction.

use std::path::Path;

use lopdf::Document;

use crate::error::Result;

/// Extract text from every page of a PDF, one block per page joined with
/// newlines. A page that yields no text contributes an empty line rather
/// than aborting the whole document.
pub fn extract_text(path: &Path) -> Result<String> {
    let doc = Document::load(path)?;
    extract_text_from_doc(&doc)
}

/// Extract text from an already-parsed document.
pub fn extract_text_from_doc(doc: &Document) -> Result<String> {
    let mut out = String::new();

    for (page_num, _) in doc.get_pages() {
        let page_text = doc.extract_text(&[page_num]).unwrap_or_default();
        out.push_str(page_text.trim_end());
        out.push('\n');
    }

    Ok(out)
}

/// Number of pages in a PDF file.
pub fn page_count(path: &Path) -> Result<usize> {
    let doc = Document::load(path)?;
    Ok(doc.get_pages().len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::compose;

    #[test]
    fn test_extract_text_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixture.pdf");

        compose::text_to_pdf("Invoice INV-0042\nEmployee: Evan", &path).unwrap();

        let text = extract_text(&path).unwrap();
        assert!(text.contains("INV-0042"), "extracted: {text:?}");
        assert!(text.contains("Evan"));
        assert_eq!(page_count(&path).unwrap(), 1);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(extract_text(Path::new("/nonexistent/never.pdf")).is_err());
    }
}
