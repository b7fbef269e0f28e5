//! Native model schema and store contract for SQLModel admin adapters.
//!
//! This crate describes what a relational store exposes about itself:
//!
//! - **Schema introspection**: [`ModelDef`] and its ordered [`ColumnDef`]s,
//!   with native types as the tagged [`ColumnType`] enum and the three-state
//!   [`Nullability`] declaration.
//! - **Query API**: the [`ModelStore`] trait (count, find, find-by-pk, create,
//!   update, destroy) over [`WhereClause`] predicates.
//! - **Failure tagging**: [`StoreError`] separates validation failures from
//!   everything else at the driver boundary.
//!
//! Drivers (such as `sqlmodel-admin-memory`) implement `ModelStore`; the
//! adapters in `sqlmodel-admin` consume it.

use std::any::Any;

pub mod column;
pub mod model;
pub mod query;
pub mod store;

pub use column::{ColumnDef, ColumnType, ForeignKey, Nullability};
pub use model::ModelDef;
pub use query::{Condition, FindQuery, Order, Row, WhereClause};
pub use store::{
    ModelStore, OtherFailure, OtherFailureKind, StoreError, ValidationFailure, ValidationItem,
};

/// Check whether a type-erased candidate is a handle of store type `S`.
///
/// Accepts both `S` and `Arc<S>`.
pub fn is_model_store<S: ModelStore + 'static>(candidate: &dyn Any) -> bool {
    candidate.is::<S>() || candidate.is::<std::sync::Arc<S>>()
}
