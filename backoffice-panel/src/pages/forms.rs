//! Client-side form checks, run before any mutation is sent

use crate::error::{PanelError, PanelResult};

/// Non-blank text field, trimmed
pub fn required(label: &str, value: &str) -> PanelResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(PanelError::validation(format!("Pole \"{}\" jest wymagane", label)));
    }
    Ok(value.to_string())
}

/// Non-negative whole number (prices and amounts are entered in grosz)
pub fn parse_count(label: &str, value: &str) -> PanelResult<i64> {
    let value = required(label, value)?;
    match value.parse::<i64>() {
        Ok(n) if n >= 0 => Ok(n),
        _ => Err(PanelError::validation(format!(
            "Pole \"{}\" musi być nieujemną liczbą całkowitą",
            label
        ))),
    }
}

/// Positive identifier
pub fn parse_id(label: &str, value: &str) -> PanelResult<i64> {
    match parse_count(label, value)? {
        0 => Err(PanelError::validation(format!("Pole \"{}\" musi być większe od zera", label))),
        n => Ok(n),
    }
}

/// Empty input becomes `None`
pub(crate) fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert_eq!(required("Nazwa", "  Pizza ").unwrap(), "Pizza");
        assert!(required("Nazwa", "   ").is_err());
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("Cena (gr)", "2500").unwrap(), 2500);
        assert_eq!(parse_count("Cena (gr)", " 0 ").unwrap(), 0);
        for bad in ["", "-1", "12.50", "abc"] {
            let err = parse_count("Cena (gr)", bad).unwrap_err();
            assert!(err.user_message().contains("Cena (gr)"), "{}", bad);
        }
    }

    #[test]
    fn test_parse_id_rejects_zero() {
        assert_eq!(parse_id("Kategoria", "3").unwrap(), 3);
        assert!(parse_id("Kategoria", "0").is_err());
    }

    #[test]
    fn test_optional() {
        assert_eq!(optional(""), None);
        assert_eq!(optional(" en "), Some("en".to_string()));
    }
}
