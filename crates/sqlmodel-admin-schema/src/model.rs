//! Native model (table) definitions.

use crate::column::ColumnDef;

/// Schema of one native model: table identity plus ordered columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDef {
    /// Table name.
    pub table_name: String,
    /// Database the table lives in.
    pub database_name: String,
    /// Store dialect (e.g. `postgres`, `mysql`).
    pub dialect: String,
    /// Columns in declaration order.
    pub columns: Vec<ColumnDef>,
}

impl ModelDef {
    /// Create a model with no columns.
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            database_name: String::new(),
            dialect: String::new(),
            columns: Vec::new(),
        }
    }

    /// Set database name and dialect.
    pub fn database(mut self, name: impl Into<String>, dialect: impl Into<String>) -> Self {
        self.database_name = name.into();
        self.dialect = dialect.into();
        self
    }

    /// Append a column.
    pub fn column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }

    /// Look up a column by name.
    pub fn get(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Position of a column in declaration order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// The primary key column, if declared.
    pub fn primary_key(&self) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.primary_key)
    }

    /// Column names in declaration order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}
