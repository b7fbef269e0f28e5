//! Property contract: the host's view of one model field.

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// UI-facing semantic type of a property.
///
/// Every native column type is normalized into one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    /// Free text.
    #[default]
    String,
    /// Integer.
    Number,
    /// Floating point or decimal.
    Float,
    /// True/false.
    Boolean,
    /// Calendar date without time.
    Date,
    /// Date with time.
    Datetime,
    /// Homogeneous list.
    Array,
    /// Structured document.
    Object,
    /// Pointer to a record of another resource.
    Reference,
    /// Untyped catch-all.
    Mixed,
}

impl PropertyType {
    /// Lower-case name as the host expects it.
    pub const fn as_str(self) -> &'static str {
        match self {
            PropertyType::String => "string",
            PropertyType::Number => "number",
            PropertyType::Float => "float",
            PropertyType::Boolean => "boolean",
            PropertyType::Date => "date",
            PropertyType::Datetime => "datetime",
            PropertyType::Array => "array",
            PropertyType::Object => "object",
            PropertyType::Reference => "reference",
            PropertyType::Mixed => "mixed",
        }
    }

    /// Whether values of this type are filtered by `from`/`to` ranges.
    pub const fn is_temporal(self) -> bool {
        matches!(self, PropertyType::Date | PropertyType::Datetime)
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata questions the host asks about one field.
///
/// Implementations are pure projections of a column definition.
pub trait Property {
    /// Field identifier.
    fn name(&self) -> &str;

    /// Semantic type.
    fn property_type(&self) -> PropertyType;

    /// Whether the host may offer the field for editing.
    fn is_editable(&self) -> bool;

    /// Whether the field is shown by default.
    fn is_visible(&self) -> bool;

    /// Whether a value must be supplied.
    fn is_required(&self) -> bool;

    /// Whether the field is the record identity.
    fn is_id(&self) -> bool;

    /// Whether the field holds a list of values.
    fn is_array(&self) -> bool;

    /// Whether listings may be ordered by this field.
    fn is_sortable(&self) -> bool;

    /// Identifier of the referenced resource, if this is a foreign key.
    fn reference(&self) -> Option<&str>;

    /// Allowed values, if the field is an enumeration.
    fn available_values(&self) -> Option<&[Value]>;
}
