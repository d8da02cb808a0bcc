//! Employee DTOs for create and update operations.

use serde::{Deserialize, Serialize};

/// DTO for creating an employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEmployee {
    pub name: String,
    pub age: i32,
    pub salary_cents: i64,
}

/// DTO for updating an employee.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEmployee {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub salary_cents: Option<i64>,
}

/// Parse a salary string like `1234.5` or `1,234.50` into cents.
///
/// Only digits, a decimal point, thousands commas, and whitespace are
/// accepted; anything else (signs, currency symbols) is rejected.
pub fn parse_salary_cents(input: &str) -> Option<i64> {
    let trimmed = input.trim();
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c == ',' || c.is_whitespace())
    {
        return None;
    }

    let cleaned: String = trimmed.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
    if cleaned.is_empty() {
        return None;
    }

    let mut parts = cleaned.splitn(2, '.');
    let whole: i64 = parts.next()?.parse().ok()?;
    let cents = match parts.next() {
        None | Some("") => 0,
        Some(frac) => {
            let frac = if frac.len() > 2 { &frac[..2] } else { frac };
            let mut value: i64 = frac.parse().ok()?;
            if frac.len() == 1 {
                value *= 10;
            }
            value
        }
    };
    whole.checked_mul(100)?.checked_add(cents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_salary_cents() {
        assert_eq!(parse_salary_cents("1234.50"), Some(123_450));
        assert_eq!(parse_salary_cents("1,234.5"), Some(123_450));
        assert_eq!(parse_salary_cents("1000"), Some(100_000));
        assert_eq!(parse_salary_cents("0.99"), Some(99));
        assert_eq!(parse_salary_cents("1 000.50"), Some(100_050));
        assert_eq!(parse_salary_cents(""), None);
        assert_eq!(parse_salary_cents("abc"), None);
    }

    #[test]
    fn test_parse_salary_cents_rejects_signs_and_symbols() {
        assert_eq!(parse_salary_cents("-500"), None);
        assert_eq!(parse_salary_cents("+500"), None);
        assert_eq!(parse_salary_cents("$1,000"), None);
        assert_eq!(parse_salary_cents("500 EUR"), None);
    }
}
