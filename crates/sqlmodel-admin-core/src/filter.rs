//! Filter requests as the host sends them.

use serde::Serialize;

use crate::value::Value;

/// Condition requested for one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// `{from?, to?}` bounds; at least one is set.
    Range {
        /// Inclusive lower bound.
        #[serde(skip_serializing_if = "Option::is_none")]
        from: Option<Value>,
        /// Inclusive upper bound.
        #[serde(skip_serializing_if = "Option::is_none")]
        to: Option<Value>,
    },
    /// A plain value to match.
    Value(Value),
}

impl FilterValue {
    /// Build a range, dropping falsy bounds.
    ///
    /// Returns `None` if neither bound is truthy.
    pub fn range(from: Option<Value>, to: Option<Value>) -> Option<Self> {
        let from = from.filter(Value::is_truthy);
        let to = to.filter(Value::is_truthy);
        if from.is_none() && to.is_none() {
            return None;
        }
        Some(FilterValue::Range { from, to })
    }
}

/// Mapping from field name to requested condition, in request order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    fields: Vec<(String, FilterValue)>,
}

impl Filter {
    /// Create an empty filter (matches everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the condition for a field.
    pub fn with(mut self, field: impl Into<String>, value: FilterValue) -> Self {
        self.insert(field, value);
        self
    }

    /// Add a plain value condition.
    pub fn value(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(field, FilterValue::Value(value.into()))
    }

    /// Add a range condition. Falsy bounds are dropped; if both are falsy
    /// the field is left unfiltered.
    pub fn range(
        self,
        field: impl Into<String>,
        from: Option<Value>,
        to: Option<Value>,
    ) -> Self {
        match FilterValue::range(from, to) {
            Some(range) => self.with(field, range),
            None => self,
        }
    }

    /// Add or replace the condition for a field.
    pub fn insert(&mut self, field: impl Into<String>, value: FilterValue) {
        let field = field.into();
        if let Some(slot) = self.fields.iter_mut().find(|(name, _)| *name == field) {
            slot.1 = value;
        } else {
            self.fields.push((field, value));
        }
    }

    /// Get the condition for a field.
    pub fn get(&self, field: &str) -> Option<&FilterValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, v)| v)
    }

    /// Iterate over `(field, condition)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.fields.iter().map(|(name, v)| (name.as_str(), v))
    }

    /// Number of filtered fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field is filtered.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build a filter from the host's JSON request body.
    ///
    /// An object carrying a truthy `from` or `to` becomes a range; any other
    /// shape (including objects without those keys) is a plain value.
    /// A non-object root yields an empty filter.
    pub fn from_json(json: &serde_json::Value) -> Self {
        let mut filter = Filter::new();
        let Some(object) = json.as_object() else {
            return filter;
        };
        for (field, raw) in object {
            let range = raw.as_object().and_then(|bounds| {
                FilterValue::range(
                    bounds.get("from").cloned().map(Value::from),
                    bounds.get("to").cloned().map(Value::from),
                )
            });
            let value = range.unwrap_or_else(|| FilterValue::Value(Value::from(raw.clone())));
            filter.insert(field.clone(), value);
        }
        filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_range_and_value() {
        let filter = Filter::from_json(&json!({
            "created_at": {"from": "2023-01-01"},
            "name": "ali",
        }));
        assert_eq!(filter.len(), 2);
        assert_eq!(
            filter.get("created_at"),
            Some(&FilterValue::Range {
                from: Some(Value::from("2023-01-01")),
                to: None,
            })
        );
        assert_eq!(
            filter.get("name"),
            Some(&FilterValue::Value(Value::from("ali")))
        );
    }

    #[test]
    fn test_from_json_object_without_bounds_is_value() {
        let filter = Filter::from_json(&json!({"meta": {"from": "", "other": 1}}));
        assert!(matches!(
            filter.get("meta"),
            Some(FilterValue::Value(Value::Json(_)))
        ));
    }

    #[test]
    fn test_range_drops_falsy_bounds() {
        let filter = Filter::new().range("created_at", Some(Value::Null), None);
        assert!(filter.is_empty());

        let filter = Filter::new().range("created_at", None, Some(Value::from("2024-01-01")));
        assert_eq!(
            filter.get("created_at"),
            Some(&FilterValue::Range {
                from: None,
                to: Some(Value::from("2024-01-01")),
            })
        );
    }

    #[test]
    fn test_insert_replaces() {
        let filter = Filter::new().value("name", "a").value("name", "b");
        assert_eq!(filter.len(), 1);
        assert_eq!(filter.get("name"), Some(&FilterValue::Value(Value::from("b"))));
    }
}
