//! Error types surfaced to the host framework.
//!
//! Only native validation failures are reshaped (into [`ValidationError`]).
//! Every other store failure is carried verbatim in [`Error::Store`] so the
//! host can apply its own generic presentation.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::value::Value;

/// The error type for all adapter operations.
#[derive(Debug)]
pub enum Error {
    /// A write was rejected by the store's declared constraints.
    Validation(ValidationError),
    /// A lookup by identity found no row.
    NotFound(NotFoundError),
    /// A field name that does not exist on the model.
    UnknownField(UnknownFieldError),
    /// A sort direction other than ascending/descending.
    InvalidSort(InvalidSortError),
    /// The model declares no primary key column.
    MissingPrimaryKey {
        /// Resource (table) name.
        resource: String,
    },
    /// Native store failure, passed through unchanged.
    Store(Box<dyn std::error::Error + Send + Sync>),
}

/// Result alias for synchronous adapter operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap a native store error without altering it.
    pub fn store(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Error::Store(Box::new(err))
    }

    /// Whether this is a validation failure.
    pub const fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Whether this is a not-found condition.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Get the validation error, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Error::Validation(v) => Some(v),
            _ => None,
        }
    }

    /// Downcast a passed-through store error to its native type.
    pub fn store_error<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            Error::Store(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation(e) => write!(f, "{}", e),
            Error::NotFound(e) => write!(f, "{}", e),
            Error::UnknownField(e) => write!(f, "{}", e),
            Error::InvalidSort(e) => write!(f, "{}", e),
            Error::MissingPrimaryKey { resource } => {
                write!(f, "resource `{}` has no primary key column", resource)
            }
            Error::Store(e) => write!(f, "store error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Store(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::Validation(err)
    }
}

impl From<NotFoundError> for Error {
    fn from(err: NotFoundError) -> Self {
        Error::NotFound(err)
    }
}

impl From<UnknownFieldError> for Error {
    fn from(err: UnknownFieldError) -> Self {
        Error::UnknownField(err)
    }
}

impl From<InvalidSortError> for Error {
    fn from(err: InvalidSortError) -> Self {
        Error::InvalidSort(err)
    }
}

// ============================================================================
// Validation
// ============================================================================

/// One field's validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Human readable message.
    pub message: String,
    /// Identifier of the validator that rejected the value (e.g. `is_null`).
    pub kind: String,
}

/// Uniform validation error keyed by field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Summary message.
    pub message: String,
    /// Per-field failures.
    pub errors: BTreeMap<String, FieldError>,
}

impl ValidationError {
    /// Create a validation error from a message and its field map.
    pub fn new(message: impl Into<String>, errors: BTreeMap<String, FieldError>) -> Self {
        Self {
            message: message.into(),
            errors,
        }
    }

    /// Get the failure recorded for one field.
    pub fn field(&self, path: &str) -> Option<&FieldError> {
        self.errors.get(path)
    }

    /// Whether any field failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        let mut first = true;
        for (path, err) in &self.errors {
            f.write_str(if first { ": " } else { "; " })?;
            write!(f, "{}: {}", path, err.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// Lookup errors
// ============================================================================

/// No row matched a primary key lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct NotFoundError {
    /// Resource (table) name.
    pub resource: String,
    /// The primary key that was looked up.
    pub id: Value,
}

impl fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} record with id {} not found", self.resource, self.id)
    }
}

impl std::error::Error for NotFoundError {}

/// A field name absent from the model schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFieldError {
    /// Resource (table) name.
    pub resource: String,
    /// The requested field.
    pub field: String,
}

impl fmt::Display for UnknownFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown field `{}` on resource `{}`",
            self.field, self.resource
        )
    }
}

impl std::error::Error for UnknownFieldError {}

/// Sort direction that is neither `asc` nor `desc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSortError {
    /// The direction as supplied by the caller.
    pub direction: String,
}

impl fmt::Display for InvalidSortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid sort direction `{}` (expected `asc` or `desc`)",
            self.direction
        )
    }
}

impl std::error::Error for InvalidSortError {}
