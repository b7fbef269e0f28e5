//! Predicate evaluation over stored rows.

use std::cmp::Ordering;

use regex::{Regex, RegexBuilder};
use sqlmodel_admin_core::Value;
use sqlmodel_admin_schema::{Condition, ModelDef, OtherFailureKind, StoreError, WhereClause};

use crate::validate::coerce;

enum Compiled {
    Between {
        gte: Option<Value>,
        lte: Option<Value>,
    },
    IRegexp(Regex),
}

/// A [`WhereClause`] resolved against a model's column positions.
pub(crate) struct RowMatcher {
    conditions: Vec<(usize, Compiled)>,
}

impl RowMatcher {
    /// Resolve columns and compile patterns.
    ///
    /// Unknown columns and invalid patterns are query errors, as a SQL
    /// backend would report them.
    pub(crate) fn new(model: &ModelDef, where_clause: &WhereClause) -> Result<Self, StoreError> {
        let mut conditions = Vec::with_capacity(where_clause.len());
        for (column, condition) in where_clause.iter() {
            let index = column_index(model, column)?;
            let column_type = &model.columns[index].column_type;
            let compiled = match condition {
                Condition::Between { gte, lte } => {
                    let bound = |v: &Value| coerce(column_type, v).unwrap_or_else(|_| v.clone());
                    Compiled::Between {
                        gte: gte.as_ref().map(bound),
                        lte: lte.as_ref().map(bound),
                    }
                }
                Condition::IRegexp(pattern) => {
                    let regex = RegexBuilder::new(pattern)
                        .case_insensitive(true)
                        .build()
                        .map_err(|e| {
                            StoreError::other(
                                OtherFailureKind::Query,
                                format!("invalid regular expression for \"{}\": {}", column, e),
                            )
                        })?;
                    Compiled::IRegexp(regex)
                }
            };
            conditions.push((index, compiled));
        }
        Ok(Self { conditions })
    }

    /// Whether every condition holds for the row.
    pub(crate) fn matches(&self, row: &[Value]) -> bool {
        self.conditions.iter().all(|(index, condition)| {
            let value = &row[*index];
            match condition {
                Compiled::Between { gte, lte } => {
                    let above = gte.as_ref().is_none_or(|b| {
                        matches!(value.compare(b), Some(Ordering::Greater | Ordering::Equal))
                    });
                    let below = lte.as_ref().is_none_or(|b| {
                        matches!(value.compare(b), Some(Ordering::Less | Ordering::Equal))
                    });
                    above && below
                }
                Compiled::IRegexp(regex) => {
                    value.to_text().is_some_and(|text| regex.is_match(&text))
                }
            }
        })
    }
}

/// Position of a column, or a query error naming it.
pub(crate) fn column_index(model: &ModelDef, column: &str) -> Result<usize, StoreError> {
    model.position(column).ok_or_else(|| {
        StoreError::other(
            OtherFailureKind::Query,
            format!(
                "column \"{}\" does not exist on \"{}\"",
                column, model.table_name
            ),
        )
    })
}

/// Total order used for ORDER BY: NULLs sort last, incomparable values tie.
pub(crate) fn order_values(a: &Value, b: &Value) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.compare(b).unwrap_or(Ordering::Equal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlmodel_admin_schema::{ColumnDef, ColumnType};

    fn events() -> ModelDef {
        ModelDef::new("events")
            .column(ColumnDef::new("id", ColumnType::Integer).primary_key())
            .column(ColumnDef::new("title", ColumnType::String))
            .column(ColumnDef::new("created_at", ColumnType::Date))
    }

    fn row(id: i64, title: &str, created_at: &str) -> Vec<Value> {
        vec![Value::Int(id), Value::from(title), Value::from(created_at)]
    }

    #[test]
    fn test_iregexp_is_case_insensitive_substring() {
        let clause = WhereClause::new().and("title", Condition::IRegexp("ali".to_string()));
        let matcher = RowMatcher::new(&events(), &clause).unwrap();
        assert!(matcher.matches(&row(1, "Alice", "2023-01-01")));
        assert!(matcher.matches(&row(2, "Kalina", "2023-01-01")));
        assert!(!matcher.matches(&row(3, "Bob", "2023-01-01")));
    }

    #[test]
    fn test_between_open_ended() {
        let clause = WhereClause::new().and(
            "created_at",
            Condition::Between {
                gte: Some(Value::from("2023-01-01")),
                lte: None,
            },
        );
        let matcher = RowMatcher::new(&events(), &clause).unwrap();
        assert!(matcher.matches(&row(1, "a", "2023-01-01")));
        assert!(matcher.matches(&row(2, "a", "2024-06-01T12:00:00Z")));
        assert!(!matcher.matches(&row(3, "a", "2022-12-31")));
    }

    #[test]
    fn test_null_never_matches() {
        let clause = WhereClause::new().and("title", Condition::IRegexp(".*".to_string()));
        let matcher = RowMatcher::new(&events(), &clause).unwrap();
        assert!(!matcher.matches(&[Value::Int(1), Value::Null, Value::Null]));
    }

    #[test]
    fn test_unknown_column_is_query_error() {
        let clause = WhereClause::new().and("nope", Condition::IRegexp("x".to_string()));
        let err = RowMatcher::new(&events(), &clause).err().unwrap();
        assert!(matches!(err, StoreError::Other(ref o) if o.kind == OtherFailureKind::Query));
    }

    #[test]
    fn test_invalid_pattern_is_query_error() {
        let clause = WhereClause::new().and("title", Condition::IRegexp("[unclosed".to_string()));
        assert!(RowMatcher::new(&events(), &clause).is_err());
    }

    #[test]
    fn test_order_nulls_last() {
        assert_eq!(order_values(&Value::Null, &Value::Int(1)), Ordering::Greater);
        assert_eq!(order_values(&Value::Int(1), &Value::Int(2)), Ordering::Less);
    }
}
