//! Host filters to native predicates.

use sqlmodel_admin_core::{Error, Filter, FilterValue, Result, UnknownFieldError, Value};
use sqlmodel_admin_schema::{Condition, ModelDef, WhereClause};

/// Translates a host [`Filter`] into a [`WhereClause`] for one model.
pub struct FilterTranslator;

impl FilterTranslator {
    /// Translate `filter` against `model`.
    ///
    /// - a `{from, to}` range becomes an inclusive [`Condition::Between`],
    ///   either bound optional;
    /// - a scalar value becomes a case-insensitive, unanchored
    ///   [`Condition::IRegexp`] over its text form;
    /// - an object or array value is matched against its escaped JSON text;
    /// - a null value leaves the field unfiltered.
    ///
    /// Fields absent from the model are rejected.
    pub fn translate(filter: Option<&Filter>, model: &ModelDef) -> Result<WhereClause> {
        let mut where_clause = WhereClause::new();
        let Some(filter) = filter else {
            return Ok(where_clause);
        };

        for (field, value) in filter.iter() {
            if model.get(field).is_none() {
                return Err(Error::UnknownField(UnknownFieldError {
                    resource: model.table_name.clone(),
                    field: field.to_string(),
                }));
            }

            let condition = match value {
                FilterValue::Range { from, to } => Condition::Between {
                    gte: from.clone(),
                    lte: to.clone(),
                },
                FilterValue::Value(Value::Null) => continue,
                FilterValue::Value(literal @ (Value::Json(_) | Value::Array(_))) => {
                    Condition::IRegexp(regex::escape(&literal.to_text().unwrap_or_default()))
                }
                FilterValue::Value(scalar) => {
                    Condition::IRegexp(scalar.to_text().unwrap_or_default())
                }
            };
            where_clause.insert(field, condition);
        }

        tracing::trace!(
            table = %model.table_name,
            conditions = where_clause.len(),
            "Translated filter"
        );
        Ok(where_clause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlmodel_admin_schema::{ColumnDef, ColumnType};

    fn users() -> ModelDef {
        ModelDef::new("users")
            .column(ColumnDef::new("id", ColumnType::Integer).primary_key())
            .column(ColumnDef::new("name", ColumnType::String))
            .column(ColumnDef::new("born_on", ColumnType::DateOnly))
            .column(ColumnDef::new("created_at", ColumnType::Date))
            .column(ColumnDef::new("team_id", ColumnType::Date).references("teams"))
    }

    #[test]
    fn test_absent_and_empty_filter() {
        assert!(FilterTranslator::translate(None, &users()).unwrap().is_empty());
        let empty = Filter::new();
        assert!(FilterTranslator::translate(Some(&empty), &users()).unwrap().is_empty());
    }

    #[test]
    fn test_plain_value_is_iregexp() {
        let filter = Filter::new().value("name", "ali").value("id", 7);
        let clause = FilterTranslator::translate(Some(&filter), &users()).unwrap();
        assert_eq!(clause.get("name"), Some(&Condition::IRegexp("ali".to_string())));
        assert_eq!(clause.get("id"), Some(&Condition::IRegexp("7".to_string())));
    }

    #[test]
    fn test_range_on_temporal_columns() {
        let filter = Filter::new()
            .range("created_at", Some("2023-01-01".into()), None)
            .range("born_on", None, Some("2000-12-31".into()));
        let clause = FilterTranslator::translate(Some(&filter), &users()).unwrap();
        assert_eq!(
            clause.get("created_at"),
            Some(&Condition::Between {
                gte: Some(Value::from("2023-01-01")),
                lte: None,
            })
        );
        assert_eq!(
            clause.get("born_on"),
            Some(&Condition::Between {
                gte: None,
                lte: Some(Value::from("2000-12-31")),
            })
        );
    }

    #[test]
    fn test_range_on_any_column_is_between() {
        let filter = Filter::new()
            .range("id", Some(18.into()), Some(30.into()))
            .range("team_id", Some("2023-01-01".into()), None);
        let clause = FilterTranslator::translate(Some(&filter), &users()).unwrap();
        assert_eq!(
            clause.get("id"),
            Some(&Condition::Between {
                gte: Some(Value::Int(18)),
                lte: Some(Value::Int(30)),
            })
        );
        assert!(matches!(clause.get("team_id"), Some(Condition::Between { .. })));
    }

    #[test]
    fn test_object_value_is_escaped_literal() {
        let filter = Filter::from_json(&serde_json::json!({
            "name": {"from": "", "other": 1},
        }));
        let clause = FilterTranslator::translate(Some(&filter), &users()).unwrap();
        let Some(Condition::IRegexp(pattern)) = clause.get("name") else {
            panic!("expected a pattern condition");
        };
        assert_eq!(pattern, &regex::escape(r#"{"from":"","other":1}"#));
        assert!(regex::Regex::new(pattern).is_ok());
    }

    #[test]
    fn test_null_value_is_skipped() {
        let filter = Filter::from_json(&serde_json::json!({"name": null, "id": 3}));
        let clause = FilterTranslator::translate(Some(&filter), &users()).unwrap();
        assert_eq!(clause.len(), 1);
        assert_eq!(clause.get("name"), None);
    }

    #[test]
    fn test_unknown_field() {
        let filter = Filter::new().value("nickname", "x");
        let err = FilterTranslator::translate(Some(&filter), &users()).unwrap_err();
        match err {
            Error::UnknownField(e) => {
                assert_eq!(e.field, "nickname");
                assert_eq!(e.resource, "users");
            }
            other => panic!("expected UnknownField, got {other:?}"),
        }
    }

    #[test]
    fn test_from_json_round_through() {
        let json = serde_json::json!({
            "name": "bob",
            "created_at": {"from": "2023-01-01", "to": "2023-12-31"},
        });
        let filter = Filter::from_json(&json);
        let clause = FilterTranslator::translate(Some(&filter), &users()).unwrap();
        assert_eq!(clause.len(), 2);
        assert!(matches!(clause.get("created_at"), Some(Condition::Between { .. })));
    }
}
