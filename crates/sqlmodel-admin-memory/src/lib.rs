//! In-memory model store driver for SQLModel admin adapters.
//!
//! Implements [`ModelStore`](sqlmodel_admin_schema::ModelStore) over process
//! memory with the checks a relational ORM performs before writing:
//!
//! - NOT NULL (`is_null`), enum membership (`isIn`) and type compatibility
//!   (`isInt`, `isFloat`, `isBoolean`, `isDate`, ...) reported as
//!   [`StoreError::Validation`](sqlmodel_admin_schema::StoreError::Validation);
//! - unique and primary key collisions reported as constraint failures;
//! - auto-increment keys and column defaults;
//! - case-insensitive regular expression (`~*`) and inclusive range filters.
//!
//! # Example
//!
//! ```ignore
//! let db = MemoryDatabase::new("app");
//! let users = db.define(
//!     ModelDef::new("users")
//!         .column(ColumnDef::new("id", ColumnType::Integer).primary_key().auto_increment())
//!         .column(ColumnDef::new("name", ColumnType::String).required()),
//! );
//! let row = users.create(&cx, &params).await;
//! ```

mod matcher;
mod store;
mod validate;

pub use store::{DIALECT, MemoryDatabase, MemoryModel};
