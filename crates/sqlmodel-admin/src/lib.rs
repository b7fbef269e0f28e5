//! Relational models as admin resources.
//!
//! `sqlmodel-admin` lets an administrative host framework list, filter,
//! create, edit and delete rows of any model a [`ModelStore`] exposes,
//! without knowing the store's query API.
//!
//! # Components
//!
//! - [`PropertyAdapter`] describes one column in host terms (semantic type,
//!   editability, visibility, reference target).
//! - [`ResourceAdapter`] implements the host [`Resource`] contract over a
//!   store handle.
//! - [`FilterTranslator`] turns host filters into native predicates.
//! - [`ValidationErrorMapper`] reshapes native validation failures into the
//!   host's [`ValidationError`](sqlmodel_admin_core::ValidationError).
//!
//! # Example
//!
//! ```ignore
//! use sqlmodel_admin::prelude::*;
//!
//! let db = MemoryDatabase::new("app");
//! let users = ResourceAdapter::new(db.define(users_model()))?;
//!
//! let filter = Filter::new().value("name", "ali");
//! let page = users
//!     .find(&cx, Some(&filter), &FindOptions::new(Sort::new("id", "asc")))
//!     .await;
//! ```

pub mod config;
pub mod filter;
pub mod property;
pub mod resource;
pub mod validation;

pub use config::{DEFAULT_LIMIT, ResourceConfig};
pub use filter::FilterTranslator;
pub use property::{HIDDEN_FIELD_MARKER, PropertyAdapter, semantic_type};
pub use resource::ResourceAdapter;
pub use validation::ValidationErrorMapper;

pub use sqlmodel_admin_core::{
    Cx, Error, Filter, FilterValue, FindOptions, Outcome, Params, Property, PropertyType, Record,
    Resource, Result, Sort, SortDirection, Value,
};
pub use sqlmodel_admin_schema::{ColumnDef, ColumnType, ModelDef, ModelStore, StoreError};

/// Common imports for host integrations.
pub mod prelude {
    pub use crate::{
        Cx, Error, Filter, FindOptions, ModelStore, Outcome, Params, Property, PropertyAdapter,
        Record, Resource, ResourceAdapter, ResourceConfig, Sort, Value,
    };
}
