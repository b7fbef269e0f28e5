//! Native query shapes: rows, predicates and ordering.

use sqlmodel_admin_core::{Params, SortDirection, Value};

/// A row returned by the store, in column declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    fields: Vec<(String, Value)>,
}

impl Row {
    /// Create a row from `(column, value)` pairs.
    pub fn new(fields: Vec<(String, Value)>) -> Self {
        Self { fields }
    }

    /// Get a value by column name.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, v)| v)
    }

    /// Iterate over `(column, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, v)| (name.as_str(), v))
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Convert into a field map (the `toJSON` shape).
    pub fn into_params(self) -> Params {
        self.fields.into_iter().collect()
    }
}

/// Native predicate on one column.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `column >= gte AND column <= lte`; either bound may be absent.
    Between {
        /// Inclusive lower bound.
        gte: Option<Value>,
        /// Inclusive upper bound.
        lte: Option<Value>,
    },
    /// Case-insensitive regular expression match (`~*`).
    IRegexp(String),
}

/// Conjunction of per-column predicates. One predicate per column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WhereClause {
    conditions: Vec<(String, Condition)>,
}

impl WhereClause {
    /// An empty clause matching every row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the predicate for a column, replacing any previous one.
    pub fn insert(&mut self, column: impl Into<String>, condition: Condition) {
        let column = column.into();
        if let Some(slot) = self.conditions.iter_mut().find(|(c, _)| *c == column) {
            slot.1 = condition;
        } else {
            self.conditions.push((column, condition));
        }
    }

    /// Builder form of [`WhereClause::insert`].
    pub fn and(mut self, column: impl Into<String>, condition: Condition) -> Self {
        self.insert(column, condition);
        self
    }

    /// Get the predicate for a column.
    pub fn get(&self, column: &str) -> Option<&Condition> {
        self.conditions
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, cond)| cond)
    }

    /// Iterate over `(column, predicate)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Condition)> {
        self.conditions.iter().map(|(c, cond)| (c.as_str(), cond))
    }

    /// Number of predicates.
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Whether the clause matches everything.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// Single-column ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Column to order by.
    pub column: String,
    /// Direction.
    pub direction: SortDirection,
}

impl Order {
    /// Create an ordering.
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }
}

/// Arguments of a `find_all` call.
#[derive(Debug, Clone, PartialEq)]
pub struct FindQuery {
    /// Row predicate.
    pub where_clause: WhereClause,
    /// Maximum rows.
    pub limit: u64,
    /// Rows to skip.
    pub offset: u64,
    /// Ordering.
    pub order: Order,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_access() {
        let row = Row::new(vec![
            ("id".to_string(), Value::Int(1)),
            ("name".to_string(), Value::from("Alice")),
        ]);
        assert_eq!(row.get("id"), Some(&Value::Int(1)));
        assert_eq!(row.len(), 2);
        let params = row.into_params();
        assert_eq!(params.get("name"), Some(&Value::from("Alice")));
    }

    #[test]
    fn test_where_clause_replaces_per_column() {
        let clause = WhereClause::new()
            .and("name", Condition::IRegexp("a".to_string()))
            .and("name", Condition::IRegexp("b".to_string()));
        assert_eq!(clause.len(), 1);
        assert_eq!(clause.get("name"), Some(&Condition::IRegexp("b".to_string())));
    }
}
