//! Property adapter: host metadata over one native column.

use sqlmodel_admin_core::{Property, PropertyType, Value};
use sqlmodel_admin_schema::{ColumnDef, ColumnType};

/// Field names containing this marker are hidden by default.
///
/// A display default only; real access control belongs to the host.
pub const HIDDEN_FIELD_MARKER: &str = "password";

/// Semantic type for a native scalar tag.
///
/// Closed table over [`ColumnType`]; tags without an entry fail open to
/// [`PropertyType::String`] so metadata display never breaks on an
/// unrecognized column.
pub fn semantic_type(column_type: &ColumnType) -> PropertyType {
    match column_type {
        ColumnType::String
        | ColumnType::Char
        | ColumnType::Text
        | ColumnType::Citext
        | ColumnType::Enum
        | ColumnType::Blob
        | ColumnType::Uuid
        | ColumnType::Cidr
        | ColumnType::Inet
        | ColumnType::MacAddr
        | ColumnType::Range
        | ColumnType::Geometry
        | ColumnType::Time => PropertyType::String,
        ColumnType::TinyInt
        | ColumnType::SmallInt
        | ColumnType::MediumInt
        | ColumnType::Integer
        | ColumnType::BigInt => PropertyType::Number,
        ColumnType::Float | ColumnType::Real | ColumnType::Double | ColumnType::Decimal => {
            PropertyType::Float
        }
        ColumnType::Date => PropertyType::Datetime,
        ColumnType::DateOnly => PropertyType::Date,
        ColumnType::Boolean => PropertyType::Boolean,
        ColumnType::Array(_) => PropertyType::Array,
        ColumnType::Json | ColumnType::Jsonb => PropertyType::Object,
        ColumnType::Other(tag) => {
            tracing::trace!(tag = %tag, "Unmapped column type, treating as string");
            PropertyType::String
        }
    }
}

/// Read-only [`Property`] view over one [`ColumnDef`].
///
/// Created per request and never cached; every method is a pure projection
/// of the column definition.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyAdapter {
    column: ColumnDef,
}

impl PropertyAdapter {
    /// Wrap a column definition.
    pub fn new(column: ColumnDef) -> Self {
        Self { column }
    }

    /// The wrapped column.
    pub fn column(&self) -> &ColumnDef {
        &self.column
    }
}

impl Property for PropertyAdapter {
    fn name(&self) -> &str {
        &self.column.name
    }

    fn property_type(&self) -> PropertyType {
        if self.reference().is_some() {
            return PropertyType::Reference;
        }
        match &self.column.column_type {
            ColumnType::Array(element) => semantic_type(element),
            other => semantic_type(other),
        }
    }

    fn is_editable(&self) -> bool {
        !self.column.auto_generated && !self.column.auto_increment
    }

    fn is_visible(&self) -> bool {
        !self.column.name.contains(HIDDEN_FIELD_MARKER)
    }

    fn is_required(&self) -> bool {
        self.column.nullability.is_required()
    }

    fn is_id(&self) -> bool {
        self.column.primary_key
    }

    fn is_array(&self) -> bool {
        self.column.column_type.is_array()
    }

    fn is_sortable(&self) -> bool {
        self.property_type() != PropertyType::Mixed && !self.is_array()
    }

    fn reference(&self) -> Option<&str> {
        if self.is_array() {
            return None;
        }
        self.column.references.as_ref().map(|fk| fk.model.as_str())
    }

    fn available_values(&self) -> Option<&[Value]> {
        if self.column.values.is_empty() {
            None
        } else {
            Some(&self.column.values)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlmodel_admin_schema::Nullability;

    fn prop(column: ColumnDef) -> PropertyAdapter {
        PropertyAdapter::new(column)
    }

    #[test]
    fn test_type_table() {
        let cases = [
            (ColumnType::String, PropertyType::String),
            (ColumnType::Char, PropertyType::String),
            (ColumnType::Text, PropertyType::String),
            (ColumnType::Citext, PropertyType::String),
            (ColumnType::Time, PropertyType::String),
            (ColumnType::TinyInt, PropertyType::Number),
            (ColumnType::SmallInt, PropertyType::Number),
            (ColumnType::MediumInt, PropertyType::Number),
            (ColumnType::Integer, PropertyType::Number),
            (ColumnType::BigInt, PropertyType::Number),
            (ColumnType::Float, PropertyType::Float),
            (ColumnType::Real, PropertyType::Float),
            (ColumnType::Double, PropertyType::Float),
            (ColumnType::Decimal, PropertyType::Float),
            (ColumnType::Date, PropertyType::Datetime),
            (ColumnType::DateOnly, PropertyType::Date),
            (ColumnType::Enum, PropertyType::String),
            (ColumnType::Json, PropertyType::Object),
            (ColumnType::Jsonb, PropertyType::Object),
            (ColumnType::Blob, PropertyType::String),
            (ColumnType::Uuid, PropertyType::String),
            (ColumnType::Cidr, PropertyType::String),
            (ColumnType::Inet, PropertyType::String),
            (ColumnType::MacAddr, PropertyType::String),
            (ColumnType::Range, PropertyType::String),
            (ColumnType::Geometry, PropertyType::String),
            (ColumnType::Boolean, PropertyType::Boolean),
            (ColumnType::array_of(ColumnType::Json), PropertyType::Object),
            (ColumnType::array_of(ColumnType::DateOnly), PropertyType::Date),
        ];
        for (column_type, expected) in cases {
            let p = prop(ColumnDef::new("f", column_type.clone()));
            assert_eq!(p.property_type(), expected, "{}", column_type);
        }
    }

    #[test]
    fn test_unknown_tag_is_string() {
        let p = prop(ColumnDef::new("f", ColumnType::Other("HSTORE".to_string())));
        assert_eq!(p.property_type(), PropertyType::String);
        assert!(p.is_sortable());
    }

    #[test]
    fn test_array_uses_element_type() {
        let p = prop(ColumnDef::new("scores", ColumnType::array_of(ColumnType::Integer)));
        assert!(p.is_array());
        assert_eq!(p.property_type(), PropertyType::Number);
        assert!(!p.is_sortable());

        let nested = prop(ColumnDef::new(
            "grid",
            ColumnType::array_of(ColumnType::array_of(ColumnType::Text)),
        ));
        assert_eq!(nested.property_type(), PropertyType::Array);
        assert!(!nested.is_sortable());
    }

    #[test]
    fn test_reference_wins_over_native_type() {
        let p = prop(ColumnDef::new("team_id", ColumnType::Uuid).references("teams"));
        assert_eq!(p.reference(), Some("teams"));
        assert_eq!(p.property_type(), PropertyType::Reference);
        assert!(p.is_sortable());
    }

    #[test]
    fn test_array_foreign_key_is_not_reference() {
        let p = prop(
            ColumnDef::new("tag_ids", ColumnType::array_of(ColumnType::Integer)).references("tags"),
        );
        assert_eq!(p.reference(), None);
        assert_eq!(p.property_type(), PropertyType::Number);
    }

    #[test]
    fn test_visibility() {
        assert!(!prop(ColumnDef::new("password_hash", ColumnType::String)).is_visible());
        assert!(prop(ColumnDef::new("username", ColumnType::String)).is_visible());
        // case-sensitive
        assert!(prop(ColumnDef::new("Password", ColumnType::String)).is_visible());
    }

    #[test]
    fn test_editability() {
        let id = prop(
            ColumnDef::new("id", ColumnType::Integer)
                .primary_key()
                .auto_increment(),
        );
        assert!(!id.is_editable());
        assert!(id.is_id());

        let created = prop(ColumnDef::new("created_at", ColumnType::Date).auto_generated());
        assert!(!created.is_editable());

        let name = prop(ColumnDef::new("name", ColumnType::String));
        assert!(name.is_editable());
        assert!(!name.is_id());
    }

    #[test]
    fn test_required_only_when_declared() {
        let required = prop(ColumnDef::new("a", ColumnType::String).required());
        let optional = prop(ColumnDef::new("b", ColumnType::String).optional());
        let unspecified = prop(ColumnDef::new("c", ColumnType::String));
        assert!(required.is_required());
        assert!(!optional.is_required());
        assert!(!unspecified.is_required());
        assert_eq!(unspecified.column().nullability, Nullability::Unspecified);
    }

    #[test]
    fn test_available_values() {
        let role = prop(ColumnDef::new("role", ColumnType::Enum).values(["admin", "user"]));
        assert_eq!(
            role.available_values(),
            Some(&[Value::from("admin"), Value::from("user")][..])
        );
        assert_eq!(prop(ColumnDef::new("name", ColumnType::String)).available_values(), None);
    }
}
