//! Native validation failures to the host's uniform shape.

use std::collections::BTreeMap;

use sqlmodel_admin_core::{FieldError, ValidationError};
use sqlmodel_admin_schema::ValidationFailure;

/// Reshapes a [`ValidationFailure`] into a [`ValidationError`].
pub struct ValidationErrorMapper;

impl ValidationErrorMapper {
    /// Map every sub-error to `{path: {message, kind}}`.
    ///
    /// When two sub-errors share a path the later one is kept.
    pub fn map(resource: &str, failure: &ValidationFailure) -> ValidationError {
        let errors: BTreeMap<String, FieldError> = failure
            .errors
            .iter()
            .map(|item| {
                (
                    item.path.clone(),
                    FieldError {
                        message: item.message.clone(),
                        kind: item.validator_key.clone(),
                    },
                )
            })
            .collect();
        ValidationError::new(format!("{} validation failed", resource), errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlmodel_admin_schema::ValidationItem;

    fn item(path: &str, message: &str, key: &str) -> ValidationItem {
        ValidationItem {
            path: path.to_string(),
            message: message.to_string(),
            validator_key: key.to_string(),
        }
    }

    #[test]
    fn test_maps_each_item() {
        let failure = ValidationFailure {
            message: "Validation error".to_string(),
            errors: vec![
                item("name", "users.name cannot be null", "is_null"),
                item("role", "Validation isIn on role failed", "isIn"),
            ],
        };
        let err = ValidationErrorMapper::map("users", &failure);
        assert_eq!(err.message, "users validation failed");
        assert_eq!(err.errors.len(), 2);
        assert_eq!(err.field("name").unwrap().kind, "is_null");
        assert_eq!(err.field("role").unwrap().message, "Validation isIn on role failed");
    }

    #[test]
    fn test_duplicate_path_last_wins() {
        let failure = ValidationFailure {
            message: "Validation error".to_string(),
            errors: vec![item("age", "first", "isInt"), item("age", "second", "min")],
        };
        let err = ValidationErrorMapper::map("people", &failure);
        assert_eq!(err.errors.len(), 1);
        let age = err.field("age").unwrap();
        assert_eq!(age.message, "second");
        assert_eq!(age.kind, "min");
    }

    #[test]
    fn test_empty_failure() {
        let failure = ValidationFailure {
            message: "Validation error".to_string(),
            errors: Vec::new(),
        };
        assert!(ValidationErrorMapper::map("users", &failure).is_empty());
    }
}
