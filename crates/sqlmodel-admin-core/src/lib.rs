//! Host contracts for SQLModel admin adapters.
//!
//! `sqlmodel-admin-core` defines what an administrative host framework asks of
//! a data source: the [`Resource`] and [`Property`] traits, and the plain data
//! types that flow across them ([`Record`], [`Filter`], [`FindOptions`],
//! [`Value`], [`Error`]).
//!
//! # Role In The Architecture
//!
//! - **Contract layer**: adapters in `sqlmodel-admin` implement these traits.
//! - **Shared data model**: `Value` and `Params` are also used by
//!   `sqlmodel-admin-schema` for rows and predicates.
//! - **Structured concurrency**: re-exports `Cx` and `Outcome` from asupersync;
//!   every store-touching call is cancel-correct.

// Re-export asupersync primitives for structured concurrency
pub use asupersync::{Cx, Outcome};

pub mod error;
pub mod filter;
pub mod property;
pub mod record;
pub mod resource;
pub mod value;

pub use error::{
    Error, FieldError, InvalidSortError, NotFoundError, Result, UnknownFieldError,
    ValidationError,
};
pub use filter::{Filter, FilterValue};
pub use property::{Property, PropertyType};
pub use record::Record;
pub use resource::{FindOptions, Resource, Sort, SortDirection};
pub use value::{Params, Value};
