//! Plain-text document templates with `{{TOKEN}}` placeholders.
//!
//! Tokens are replaced verbatim; a token without a supplied value is left
//! in place so a half-filled document is visible rather than silently
//! truncated.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{AppError, Result};

/// Built-in invoice template used when no template file is configured.
pub const DEFAULT_INVOICE_TEMPLATE: &str = "\
INVOICE {{INVOICE_NO}}
Date: {{DATE}}

Employee: {{NAME}}
Age: {{AGE}}

Monthly salary: {{SALARY}}

Generated by deskkit
";

/// Fill `{{TOKEN}}` placeholders in a template string.
pub fn fill(template: &str, values: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let token = &after[..end];
                match values.get(token) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(token);
                        out.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                // Unterminated opener, emit as-is.
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

/// Load a template from disk, falling back to the built-in invoice
/// template when the path is empty.
pub fn load(path: &Path) -> Result<String> {
    if path.as_os_str().is_empty() {
        return Ok(DEFAULT_INVOICE_TEMPLATE.to_string());
    }
    std::fs::read_to_string(path)
        .map_err(|e| AppError::template(format!("Cannot read {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_fill_replaces_tokens_verbatim() {
        let filled = fill(
            "Hello {{NAME}}, you are {{AGE}}.",
            &values(&[("NAME", "Ada"), ("AGE", "36")]),
        );
        assert_eq!(filled, "Hello Ada, you are 36.");
    }

    #[test]
    fn test_unknown_token_left_in_place() {
        let filled = fill("{{KNOWN}} and {{UNKNOWN}}", &values(&[("KNOWN", "yes")]));
        assert_eq!(filled, "yes and {{UNKNOWN}}");
    }

    #[test]
    fn test_unterminated_opener_kept() {
        let filled = fill("broken {{TOKEN", &values(&[("TOKEN", "x")]));
        assert_eq!(filled, "broken {{TOKEN");
    }

    #[test]
    fn test_repeated_token() {
        let filled = fill("{{X}}-{{X}}", &values(&[("X", "a")]));
        assert_eq!(filled, "a-a");
    }

    #[test]
    fn test_load_empty_path_uses_builtin_template() {
        assert_eq!(load(Path::new("")).unwrap(), DEFAULT_INVOICE_TEMPLATE);
    }

    #[test]
    fn test_load_missing_file_is_template_error() {
        let err = load(Path::new("/nonexistent/invoice.txt")).unwrap_err();
        assert!(matches!(err, AppError::Template(_)));
    }

    #[test]
    fn test_default_template_fills_completely() {
        let filled = fill(
            DEFAULT_INVOICE_TEMPLATE,
            &values(&[
                ("INVOICE_NO", "INV-0042"),
                ("DATE", "2026-01-15"),
                ("NAME", "Evan"),
                ("AGE", "41"),
                ("SALARY", "5500.00"),
            ]),
        );
        assert!(!filled.contains("{{"));
        assert!(filled.contains("INV-0042"));
        assert!(filled.contains("5500.00"));
    }
}
