//! In-memory database and per-model store handles.

// Allow `impl Future` return types in trait methods - intentional for async trait compat
#![allow(clippy::manual_async_fn)]

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};

use asupersync::{Cx, Outcome};
use sqlmodel_admin_core::{Params, Value};
use sqlmodel_admin_schema::{
    FindQuery, ModelDef, ModelStore, OtherFailureKind, Row, StoreError, WhereClause,
};

use crate::matcher::{RowMatcher, column_index, order_values};
use crate::validate::{coerce, prepare_insert, prepare_update};

/// Dialect reported for models defined in a [`MemoryDatabase`].
pub const DIALECT: &str = "memory";

#[derive(Debug)]
struct TableData {
    rows: Vec<Vec<Value>>,
    next_id: i64,
}

/// A named in-memory database holding one table per defined model.
///
/// Cloning is cheap; clones share the same tables.
#[derive(Debug, Clone)]
pub struct MemoryDatabase {
    name: Arc<str>,
    tables: Arc<RwLock<HashMap<String, MemoryModel>>>,
}

impl MemoryDatabase {
    /// Create an empty database.
    pub fn new(name: impl Into<String>) -> Self {
        let name: String = name.into();
        Self {
            name: Arc::from(name),
            tables: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Database name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Create (or recreate, empty) the table for a model and return its handle.
    ///
    /// The model's database name and dialect are set to this database's.
    pub fn define(&self, model: ModelDef) -> MemoryModel {
        let model = model.database(&*self.name, DIALECT);
        let handle = MemoryModel {
            model: Arc::new(model),
            table: Arc::new(RwLock::new(TableData {
                rows: Vec::new(),
                next_id: 1,
            })),
        };
        tracing::debug!(
            database = %self.name,
            table = %handle.model.table_name,
            columns = handle.model.columns.len(),
            "Defined in-memory table"
        );
        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(handle.model.table_name.clone(), handle.clone());
        handle
    }

    /// Another handle to an already defined table.
    pub fn model(&self, table_name: &str) -> Option<MemoryModel> {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(table_name)
            .cloned()
    }
}

/// Store handle for one in-memory table.
///
/// Every operation takes the table lock for its synchronous duration only.
#[derive(Debug, Clone)]
pub struct MemoryModel {
    model: Arc<ModelDef>,
    table: Arc<RwLock<TableData>>,
}

impl MemoryModel {
    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.read().rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, TableData> {
        self.table.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, TableData> {
        self.table.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn to_row(&self, values: &[Value]) -> Row {
        Row::new(
            self.model
                .columns
                .iter()
                .zip(values)
                .map(|(c, v)| (c.name.clone(), v.clone()))
                .collect(),
        )
    }

    /// Resolve the primary key column and coerce the lookup value to its type.
    fn pk_lookup(&self, pk: &Value) -> Result<(usize, Value), StoreError> {
        let Some(index) = self.model.columns.iter().position(|c| c.primary_key) else {
            return Err(StoreError::other(
                OtherFailureKind::Query,
                format!("table \"{}\" has no primary key", self.model.table_name),
            ));
        };
        let column_type = &self.model.columns[index].column_type;
        let key = coerce(column_type, pk).unwrap_or_else(|_| pk.clone());
        Ok((index, key))
    }

    /// Reject duplicates in unique and primary key columns.
    fn check_unique(
        &self,
        rows: &[Vec<Value>],
        candidate: &[Value],
        skip: Option<usize>,
    ) -> Result<(), StoreError> {
        for (index, column) in self.model.columns.iter().enumerate() {
            if !(column.unique || column.primary_key) || candidate[index].is_null() {
                continue;
            }
            let duplicate = rows
                .iter()
                .enumerate()
                .filter(|(i, _)| Some(*i) != skip)
                .any(|(_, row)| row[index] == candidate[index]);
            if duplicate {
                return Err(StoreError::other(
                    OtherFailureKind::Constraint,
                    format!(
                        "duplicate key value violates unique constraint on \"{}\".\"{}\"",
                        self.model.table_name, column.name
                    ),
                ));
            }
        }
        Ok(())
    }

    fn count_sync(&self, where_clause: &WhereClause) -> Result<u64, StoreError> {
        let matcher = RowMatcher::new(&self.model, where_clause)?;
        let table = self.read();
        Ok(table.rows.iter().filter(|r| matcher.matches(r)).count() as u64)
    }

    fn find_all_sync(&self, query: &FindQuery) -> Result<Vec<Row>, StoreError> {
        let matcher = RowMatcher::new(&self.model, &query.where_clause)?;
        let order_index = column_index(&self.model, &query.order.column)?;
        let table = self.read();

        let mut matched: Vec<&Vec<Value>> =
            table.rows.iter().filter(|r| matcher.matches(r)).collect();
        matched.sort_by(|a, b| order_values(&a[order_index], &b[order_index]));
        if query.order.direction == sqlmodel_admin_core::SortDirection::Desc {
            matched.reverse();
        }

        let offset = usize::try_from(query.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);
        Ok(matched
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|r| self.to_row(r))
            .collect())
    }

    fn find_by_pk_sync(&self, pk: &Value) -> Result<Option<Row>, StoreError> {
        let (index, key) = self.pk_lookup(pk)?;
        let table = self.read();
        Ok(table
            .rows
            .iter()
            .find(|r| r[index] == key)
            .map(|r| self.to_row(r)))
    }

    fn create_sync(&self, values: &Params) -> Result<Row, StoreError> {
        let mut table = self.write();
        let mut next_id = table.next_id;
        let row = prepare_insert(&self.model, values, &mut next_id)?;
        self.check_unique(&table.rows, &row, None)?;
        table.next_id = next_id;
        table.rows.push(row.clone());
        Ok(self.to_row(&row))
    }

    fn update_sync(&self, pk: &Value, values: &Params) -> Result<u64, StoreError> {
        let changes = prepare_update(&self.model, values)?;
        let (index, key) = self.pk_lookup(pk)?;
        let mut table = self.write();
        let Some(position) = table.rows.iter().position(|r| r[index] == key) else {
            return Ok(0);
        };

        let mut updated = table.rows[position].clone();
        for (column, value) in changes {
            updated[column] = value;
        }
        self.check_unique(&table.rows, &updated, Some(position))?;
        table.rows[position] = updated;
        Ok(1)
    }

    fn destroy_sync(&self, pk: &Value) -> Result<u64, StoreError> {
        let (index, key) = self.pk_lookup(pk)?;
        let mut table = self.write();
        let before = table.rows.len();
        table.rows.retain(|r| r[index] != key);
        Ok((before - table.rows.len()) as u64)
    }
}

fn outcome<T>(result: Result<T, StoreError>) -> Outcome<T, StoreError> {
    match result {
        Ok(v) => Outcome::Ok(v),
        Err(e) => Outcome::Err(e),
    }
}

impl ModelStore for MemoryModel {
    fn model(&self) -> &ModelDef {
        &self.model
    }

    fn count(
        &self,
        _cx: &Cx,
        where_clause: &WhereClause,
    ) -> impl Future<Output = Outcome<u64, StoreError>> + Send {
        async move { outcome(self.count_sync(where_clause)) }
    }

    fn find_all(
        &self,
        _cx: &Cx,
        query: &FindQuery,
    ) -> impl Future<Output = Outcome<Vec<Row>, StoreError>> + Send {
        async move { outcome(self.find_all_sync(query)) }
    }

    fn find_by_pk(
        &self,
        _cx: &Cx,
        pk: &Value,
    ) -> impl Future<Output = Outcome<Option<Row>, StoreError>> + Send {
        async move { outcome(self.find_by_pk_sync(pk)) }
    }

    fn create(
        &self,
        _cx: &Cx,
        values: &Params,
    ) -> impl Future<Output = Outcome<Row, StoreError>> + Send {
        async move {
            let result = self.create_sync(values);
            if let Err(e) = &result {
                tracing::debug!(table = %self.model.table_name, error = %e, "Insert rejected");
            }
            outcome(result)
        }
    }

    fn update(
        &self,
        _cx: &Cx,
        pk: &Value,
        values: &Params,
    ) -> impl Future<Output = Outcome<u64, StoreError>> + Send {
        async move { outcome(self.update_sync(pk, values)) }
    }

    fn destroy(
        &self,
        _cx: &Cx,
        pk: &Value,
    ) -> impl Future<Output = Outcome<u64, StoreError>> + Send {
        async move { outcome(self.destroy_sync(pk)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlmodel_admin_core::SortDirection;
    use sqlmodel_admin_schema::{ColumnDef, ColumnType, Order};

    fn users_def() -> ModelDef {
        ModelDef::new("users")
            .column(
                ColumnDef::new("id", ColumnType::Integer)
                    .primary_key()
                    .auto_increment(),
            )
            .column(ColumnDef::new("email", ColumnType::String).required().unique())
    }

    fn email(addr: &str) -> Params {
        let mut p = Params::new();
        p.insert("email".to_string(), Value::from(addr));
        p
    }

    #[test]
    fn test_define_sets_database() {
        let db = MemoryDatabase::new("app");
        let users = db.define(users_def());
        assert_eq!(users.model().database_name, "app");
        assert_eq!(users.model().dialect, DIALECT);
        assert!(db.model("users").is_some());
        assert!(db.model("teams").is_none());
    }

    #[test]
    fn test_handles_share_rows() {
        let db = MemoryDatabase::new("app");
        let users = db.define(users_def());
        users.create_sync(&email("a@example.com")).unwrap();
        assert_eq!(db.model("users").unwrap().len(), 1);
    }

    #[test]
    fn test_unique_violation_is_constraint_failure() {
        let users = MemoryDatabase::new("app").define(users_def());
        users.create_sync(&email("a@example.com")).unwrap();
        let err = users.create_sync(&email("a@example.com")).unwrap_err();
        assert!(matches!(err, StoreError::Other(ref o) if o.kind == OtherFailureKind::Constraint));
        assert_eq!(users.len(), 1);
    }

    #[test]
    fn test_explicit_max_id_does_not_panic() {
        let users = MemoryDatabase::new("app").define(users_def());
        let mut values = email("max@example.com");
        values.insert("id".to_string(), Value::Int(i64::MAX));
        let err = users.create_sync(&values).unwrap_err();
        assert!(matches!(err, StoreError::Other(ref o) if o.kind == OtherFailureKind::Constraint));
        assert!(users.is_empty());

        users.create_sync(&email("next@example.com")).unwrap();
        let row = users.find_by_pk_sync(&Value::Int(1)).unwrap();
        assert!(row.is_some());
    }

    #[test]
    fn test_pk_lookup_coerces_text_ids() {
        let users = MemoryDatabase::new("app").define(users_def());
        users.create_sync(&email("a@example.com")).unwrap();
        let row = users.find_by_pk_sync(&Value::from("1")).unwrap();
        assert_eq!(row.and_then(|r| r.get("email").cloned()), Some(Value::from("a@example.com")));
    }

    #[test]
    fn test_find_all_orders_and_pages() {
        let users = MemoryDatabase::new("app").define(users_def());
        for addr in ["c@x.io", "a@x.io", "b@x.io"] {
            users.create_sync(&email(addr)).unwrap();
        }
        let rows = users
            .find_all_sync(&FindQuery {
                where_clause: WhereClause::new(),
                limit: 2,
                offset: 1,
                order: Order::new("email", SortDirection::Desc),
            })
            .unwrap();
        let emails: Vec<_> = rows
            .iter()
            .filter_map(|r| r.get("email").and_then(Value::as_str).map(str::to_string))
            .collect();
        assert_eq!(emails, vec!["b@x.io", "a@x.io"]);
    }

    #[test]
    fn test_update_and_destroy_missing_rows() {
        let users = MemoryDatabase::new("app").define(users_def());
        assert_eq!(users.update_sync(&Value::Int(7), &email("z@x.io")).unwrap(), 0);
        assert_eq!(users.destroy_sync(&Value::Int(7)).unwrap(), 0);
    }
}
