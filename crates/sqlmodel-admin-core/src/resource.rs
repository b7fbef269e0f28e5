//! Resource contract: the host's CRUD/query surface over one model.

// Allow `impl Future` return types in trait methods - intentional for async trait compat
#![allow(clippy::manual_async_fn)]

use std::future::Future;

use asupersync::{Cx, Outcome};

use crate::error::{Error, InvalidSortError};
use crate::filter::Filter;
use crate::property::Property;
use crate::record::Record;
use crate::value::{Params, Value};

/// Normalized sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// Parse a direction case-insensitively (`asc`, `ASC`, `desc`, ...).
    pub fn parse(direction: &str) -> Result<Self, InvalidSortError> {
        if direction.eq_ignore_ascii_case("asc") {
            Ok(SortDirection::Asc)
        } else if direction.eq_ignore_ascii_case("desc") {
            Ok(SortDirection::Desc)
        } else {
            Err(InvalidSortError {
                direction: direction.to_string(),
            })
        }
    }

    /// SQL keyword.
    pub const fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Sort request as sent by the host. The direction is mandatory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    /// Field to order by.
    pub sort_by: String,
    /// `asc` or `desc`, any case.
    pub direction: String,
}

impl Sort {
    /// Create a sort request.
    pub fn new(sort_by: impl Into<String>, direction: impl Into<String>) -> Self {
        Self {
            sort_by: sort_by.into(),
            direction: direction.into(),
        }
    }
}

/// Pagination and ordering for `find`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindOptions {
    /// Maximum rows; `None` uses the adapter's default.
    pub limit: Option<u64>,
    /// Rows to skip; `None` means 0.
    pub offset: Option<u64>,
    /// Ordering.
    pub sort: Sort,
}

impl FindOptions {
    /// Options with default pagination.
    pub fn new(sort: Sort) -> Self {
        Self {
            limit: None,
            offset: None,
            sort,
        }
    }

    /// Set the page size.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the number of rows to skip.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// The CRUD/query surface the host drives for one registered model.
///
/// Metadata methods are synchronous projections of the schema; every
/// store-touching method is async and may fail.
pub trait Resource: Send + Sync {
    /// Property view type.
    type Property: Property;

    /// Stable registry key, unique per host.
    fn id(&self) -> String;

    /// Underlying table name.
    fn name(&self) -> &str;

    /// Name of the database the model lives in.
    fn database_name(&self) -> &str;

    /// Store dialect (e.g. `postgres`).
    fn database_type(&self) -> &str;

    /// One property per column, in declaration order.
    fn properties(&self) -> Vec<Self::Property>;

    /// The property for one field.
    fn property(&self, field: &str) -> Result<Self::Property, Error>;

    /// Count rows matching a filter.
    fn count(
        &self,
        cx: &Cx,
        filter: Option<&Filter>,
    ) -> impl Future<Output = Outcome<u64, Error>> + Send;

    /// Fetch one page of rows matching a filter.
    fn find(
        &self,
        cx: &Cx,
        filter: Option<&Filter>,
        options: &FindOptions,
    ) -> impl Future<Output = Outcome<Vec<Record>, Error>> + Send;

    /// Fetch the row with the given primary key.
    fn find_one(&self, cx: &Cx, id: &Value)
    -> impl Future<Output = Outcome<Record, Error>> + Send;

    /// Insert a row.
    fn create(&self, cx: &Cx, params: &Params)
    -> impl Future<Output = Outcome<Record, Error>> + Send;

    /// Update a row and return its new state.
    fn update(
        &self,
        cx: &Cx,
        id: &Value,
        params: &Params,
    ) -> impl Future<Output = Outcome<Record, Error>> + Send;

    /// Delete a row, returning how many rows were removed.
    fn delete(&self, cx: &Cx, id: &Value) -> impl Future<Output = Outcome<u64, Error>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_direction_case_insensitive() {
        assert_eq!(SortDirection::parse("asc").unwrap(), SortDirection::Asc);
        assert_eq!(SortDirection::parse("DESC").unwrap(), SortDirection::Desc);
        assert_eq!(SortDirection::parse("Desc").unwrap(), SortDirection::Desc);
    }

    #[test]
    fn test_sort_direction_rejects_unknown() {
        let err = SortDirection::parse("up").unwrap_err();
        assert_eq!(err.direction, "up");
    }

    #[test]
    fn test_find_options_builder() {
        let opts = FindOptions::new(Sort::new("id", "asc")).limit(5).offset(10);
        assert_eq!(opts.limit, Some(5));
        assert_eq!(opts.offset, Some(10));
        assert_eq!(opts.sort.sort_by, "id");
    }
}
