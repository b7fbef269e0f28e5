//! The query API a native store exposes for one model.
//!
//! Drivers implement [`ModelStore`]; adapters consume it. Failures are tagged
//! by the driver as [`StoreError::Validation`] or [`StoreError::Other`] so
//! callers never inspect error text to classify them.

// Allow `impl Future` return types in trait methods - intentional for async trait compat
#![allow(clippy::manual_async_fn)]

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use asupersync::{Cx, Outcome};
use sqlmodel_admin_core::{Params, Value};

use crate::model::ModelDef;
use crate::query::{FindQuery, Row, WhereClause};

// ============================================================================
// Errors
// ============================================================================

/// One rejected field inside a native validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationItem {
    /// Field path.
    pub path: String,
    /// Human readable message.
    pub message: String,
    /// Identifier of the validator (`is_null`, `isIn`, ...).
    pub validator_key: String,
}

/// A write rejected by declared constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    /// Summary message.
    pub message: String,
    /// Sub-errors, one per rejected field check.
    pub errors: Vec<ValidationItem>,
}

/// Category of a non-validation store failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtherFailureKind {
    /// Connection could not be used.
    Connection,
    /// Constraint violation outside validation (unique, foreign key).
    Constraint,
    /// Malformed query.
    Query,
    /// Operation timed out.
    Timeout,
}

/// Any store failure that is not a validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherFailure {
    /// Category.
    pub kind: OtherFailureKind,
    /// Message from the store.
    pub message: String,
}

/// Error returned by [`ModelStore`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Declared constraints rejected the write.
    Validation(ValidationFailure),
    /// Everything else.
    Other(OtherFailure),
}

impl StoreError {
    /// Build a validation failure.
    pub fn validation(message: impl Into<String>, errors: Vec<ValidationItem>) -> Self {
        StoreError::Validation(ValidationFailure {
            message: message.into(),
            errors,
        })
    }

    /// Build a non-validation failure.
    pub fn other(kind: OtherFailureKind, message: impl Into<String>) -> Self {
        StoreError::Other(OtherFailure {
            kind,
            message: message.into(),
        })
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Validation(v) => {
                write!(f, "Validation error: {}", v.message)?;
                for item in &v.errors {
                    write!(f, ",\n{}", item.message)?;
                }
                Ok(())
            }
            StoreError::Other(o) => write!(f, "{:?} error: {}", o.kind, o.message),
        }
    }
}

impl std::error::Error for StoreError {}

// ============================================================================
// Store contract
// ============================================================================

/// Schema introspection and query API for one native model.
pub trait ModelStore: Send + Sync {
    /// The model's schema.
    fn model(&self) -> &ModelDef;

    /// Count rows matching a predicate.
    fn count(
        &self,
        cx: &Cx,
        where_clause: &WhereClause,
    ) -> impl Future<Output = Outcome<u64, StoreError>> + Send;

    /// Fetch rows with predicate, limit, offset and order.
    fn find_all(
        &self,
        cx: &Cx,
        query: &FindQuery,
    ) -> impl Future<Output = Outcome<Vec<Row>, StoreError>> + Send;

    /// Fetch one row by primary key.
    fn find_by_pk(
        &self,
        cx: &Cx,
        pk: &Value,
    ) -> impl Future<Output = Outcome<Option<Row>, StoreError>> + Send;

    /// Insert a row and return it as stored (generated keys included).
    fn create(
        &self,
        cx: &Cx,
        values: &Params,
    ) -> impl Future<Output = Outcome<Row, StoreError>> + Send;

    /// Update the row with the given primary key; returns rows affected.
    fn update(
        &self,
        cx: &Cx,
        pk: &Value,
        values: &Params,
    ) -> impl Future<Output = Outcome<u64, StoreError>> + Send;

    /// Delete the row with the given primary key; returns rows removed.
    fn destroy(
        &self,
        cx: &Cx,
        pk: &Value,
    ) -> impl Future<Output = Outcome<u64, StoreError>> + Send;
}

impl<S: ModelStore> ModelStore for Arc<S> {
    fn model(&self) -> &ModelDef {
        (**self).model()
    }

    fn count(
        &self,
        cx: &Cx,
        where_clause: &WhereClause,
    ) -> impl Future<Output = Outcome<u64, StoreError>> + Send {
        (**self).count(cx, where_clause)
    }

    fn find_all(
        &self,
        cx: &Cx,
        query: &FindQuery,
    ) -> impl Future<Output = Outcome<Vec<Row>, StoreError>> + Send {
        (**self).find_all(cx, query)
    }

    fn find_by_pk(
        &self,
        cx: &Cx,
        pk: &Value,
    ) -> impl Future<Output = Outcome<Option<Row>, StoreError>> + Send {
        (**self).find_by_pk(cx, pk)
    }

    fn create(
        &self,
        cx: &Cx,
        values: &Params,
    ) -> impl Future<Output = Outcome<Row, StoreError>> + Send {
        (**self).create(cx, values)
    }

    fn update(
        &self,
        cx: &Cx,
        pk: &Value,
        values: &Params,
    ) -> impl Future<Output = Outcome<u64, StoreError>> + Send {
        (**self).update(cx, pk, values)
    }

    fn destroy(
        &self,
        cx: &Cx,
        pk: &Value,
    ) -> impl Future<Output = Outcome<u64, StoreError>> + Send {
        (**self).destroy(cx, pk)
    }
}
