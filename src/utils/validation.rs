//! Input validation utilities
//!
//! Normalization shared by the registry, event, raceclass and contestant
//! services. Length and range checks live on the request DTOs through
//! `validator`; these cover what it cannot express.

use crate::error::{AppError, AppResult, DomainError};

/// Trimmed `value`, or `None` when nothing is left
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Trim an optional text field; blank values become `None`
pub fn optional_text(value: Option<String>) -> Option<String> {
    value.as_deref().and_then(non_blank)
}

/// Trimmed required field, rejecting blank input as a validation error
pub fn required_text(field: &str, value: &str) -> AppResult<String> {
    non_blank(value).ok_or_else(|| AppError::Validation(format!("{} must not be empty", field)))
}

/// A capacity limit is either absent (unbounded) or a positive integer
pub fn validate_capacity(field: &str, value: Option<i32>) -> Result<(), DomainError> {
    match value {
        Some(limit) if limit < 1 => Err(DomainError::InvalidFormat {
            field: field.to_string(),
            message: format!("must be a positive integer, got {}", limit),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank("  Sprint "), Some("Sprint".to_string()));
        assert_eq!(non_blank(" J 15 år "), Some("J 15 år".to_string()));
        assert_eq!(non_blank("\t"), None);
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(Some(" IL Tyrving ".into())), Some("IL Tyrving".into()));
        assert_eq!(optional_text(Some("  ".into())), None);
        assert_eq!(optional_text(None), None);
    }

    #[test]
    fn test_required_text() {
        assert_eq!(required_text("name", " Ski NM ").unwrap(), "Ski NM");

        let err = required_text("name", "   ").unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_validate_capacity() {
        assert!(validate_capacity("max_no_of_contestants_in_race", None).is_ok());
        assert!(validate_capacity("max_no_of_contestants_in_race", Some(1)).is_ok());
        assert!(validate_capacity("max_no_of_contestants_in_race", Some(0)).is_err());

        let err = validate_capacity("max_no_of_contestants_in_raceclass", Some(-3)).unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidFormat { ref field, .. } if field == "max_no_of_contestants_in_raceclass"
        ));
    }
}
