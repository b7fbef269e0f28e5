//! Native write validation for the memory driver.
//!
//! Mirrors what a relational ORM checks before touching storage: NOT NULL,
//! enum membership and value/type compatibility. Every rejected check becomes
//! one [`ValidationItem`]; all items of a write are reported together.

use sqlmodel_admin_core::{Params, Value};
use sqlmodel_admin_schema::{
    ColumnDef, ColumnType, ModelDef, OtherFailureKind, StoreError, ValidationItem,
};

const VALIDATION_MESSAGE: &str = "Validation error";

/// Coerce a value into the representation stored for `column_type`.
///
/// On mismatch returns the validator key that rejected it.
pub(crate) fn coerce(column_type: &ColumnType, value: &Value) -> Result<Value, &'static str> {
    if value.is_null() {
        return Ok(Value::Null);
    }
    match column_type {
        ColumnType::TinyInt
        | ColumnType::SmallInt
        | ColumnType::MediumInt
        | ColumnType::Integer
        | ColumnType::BigInt => match value {
            Value::Int(i) => Ok(Value::Int(*i)),
            Value::Float(f) if f.fract() == 0.0 => Ok(Value::Int(*f as i64)),
            Value::Text(s) => s.trim().parse().map(Value::Int).map_err(|_| "isInt"),
            _ => Err("isInt"),
        },
        ColumnType::Float | ColumnType::Real | ColumnType::Double | ColumnType::Decimal => {
            let parsed = match value {
                Value::Int(i) => Some(*i as f64),
                Value::Float(f) => Some(*f),
                Value::Text(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            };
            parsed
                .filter(|f| f.is_finite())
                .map(Value::Float)
                .ok_or("isFloat")
        }
        ColumnType::Boolean => match value {
            Value::Bool(b) => Ok(Value::Bool(*b)),
            Value::Int(0) => Ok(Value::Bool(false)),
            Value::Int(1) => Ok(Value::Bool(true)),
            Value::Text(s) => match s.to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(Value::Bool(true)),
                "false" | "0" => Ok(Value::Bool(false)),
                _ => Err("isBoolean"),
            },
            _ => Err("isBoolean"),
        },
        ColumnType::Date | ColumnType::DateOnly => match value {
            Value::Text(s) if !s.trim().is_empty() => Ok(Value::Text(s.clone())),
            _ => Err("isDate"),
        },
        ColumnType::Array(element) => match value {
            Value::Array(items) => items
                .iter()
                .map(|item| coerce(element, item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            _ => Err("isArray"),
        },
        ColumnType::Json | ColumnType::Jsonb | ColumnType::Other(_) => Ok(value.clone()),
        _ => match value {
            Value::Array(_) | Value::Json(_) => Err("isString"),
            scalar => Ok(scalar.to_text().map_or(Value::Null, Value::Text)),
        },
    }
}

/// Check one supplied value against its column, recording failures.
fn check(
    model: &ModelDef,
    column: &ColumnDef,
    raw: &Value,
    items: &mut Vec<ValidationItem>,
) -> Value {
    if raw.is_null() {
        if column.nullability.is_required() {
            items.push(ValidationItem {
                path: column.name.clone(),
                message: format!("{}.{} cannot be null", model.table_name, column.name),
                validator_key: "is_null".to_string(),
            });
        }
        return Value::Null;
    }

    let value = match coerce(&column.column_type, raw) {
        Ok(v) => v,
        Err(key) => {
            items.push(ValidationItem {
                path: column.name.clone(),
                message: format!("Validation {} on {} failed", key, column.name),
                validator_key: key.to_string(),
            });
            return raw.clone();
        }
    };

    if !column.values.is_empty() && !column.values.contains(&value) {
        items.push(ValidationItem {
            path: column.name.clone(),
            message: format!("Validation isIn on {} failed", column.name),
            validator_key: "isIn".to_string(),
        });
    }
    value
}

fn finish<T>(items: Vec<ValidationItem>, ok: T) -> Result<T, StoreError> {
    if items.is_empty() {
        Ok(ok)
    } else {
        Err(StoreError::validation(VALIDATION_MESSAGE, items))
    }
}

/// Next sequence value after `id` has been used.
///
/// A sequence that cannot advance past `i64::MAX` rejects the insert.
fn advance_sequence(
    model: &ModelDef,
    column: &ColumnDef,
    next_id: i64,
    id: i64,
) -> Result<i64, StoreError> {
    match id.checked_add(1) {
        Some(following) => Ok(next_id.max(following)),
        None => Err(StoreError::other(
            OtherFailureKind::Constraint,
            format!(
                "sequence for \"{}\".\"{}\" is exhausted",
                model.table_name, column.name
            ),
        )),
    }
}

/// Build a full row for INSERT, in column order.
///
/// Unknown keys in `values` are ignored. Auto-increment keys left empty take
/// `next_id`; generated and defaulted columns are filled without a NOT NULL
/// check.
pub(crate) fn prepare_insert(
    model: &ModelDef,
    values: &Params,
    next_id: &mut i64,
) -> Result<Vec<Value>, StoreError> {
    let mut items = Vec::new();
    let mut row = Vec::with_capacity(model.columns.len());

    for column in &model.columns {
        let supplied = values.get(&column.name).filter(|v| !v.is_null());
        let value = match supplied {
            Some(raw) => check(model, column, raw, &mut items),
            None if column.auto_increment => Value::Int(*next_id),
            None => match &column.default {
                Some(default) => default.clone(),
                None if column.auto_generated => Value::Null,
                None => check(model, column, &Value::Null, &mut items),
            },
        };
        if column.auto_increment {
            if let Value::Int(id) = value {
                *next_id = advance_sequence(model, column, *next_id, id)?;
            }
        }
        row.push(value);
    }

    finish(items, row)
}

/// Validate the columns touched by an UPDATE.
///
/// Returns `(column index, new value)` pairs; unknown keys are ignored.
pub(crate) fn prepare_update(
    model: &ModelDef,
    values: &Params,
) -> Result<Vec<(usize, Value)>, StoreError> {
    let mut items = Vec::new();
    let mut changes = Vec::new();

    for (name, raw) in values {
        let Some(index) = model.position(name) else {
            continue;
        };
        let column = &model.columns[index];
        changes.push((index, check(model, column, raw, &mut items)));
    }

    finish(items, changes)
}
