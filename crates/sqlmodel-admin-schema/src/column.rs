//! Native column definitions.

use std::fmt;
use std::str::FromStr;

use sqlmodel_admin_core::Value;

/// Native column type tag, as exposed by the store's type system.
///
/// Produced once at schema definition time. Tags that the store knows but
/// this enum does not are kept verbatim in [`ColumnType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Variable-length string (VARCHAR).
    String,
    /// Fixed-length string.
    Char,
    /// Unbounded text.
    Text,
    /// Case-insensitive text.
    Citext,
    /// 8-bit integer.
    TinyInt,
    /// 16-bit integer.
    SmallInt,
    /// 24-bit integer.
    MediumInt,
    /// 32-bit integer.
    Integer,
    /// 64-bit integer.
    BigInt,
    /// Single precision float.
    Float,
    /// Real.
    Real,
    /// Double precision float.
    Double,
    /// Exact decimal.
    Decimal,
    /// Timestamp (date with time).
    Date,
    /// Calendar date only.
    DateOnly,
    /// Time of day.
    Time,
    /// Boolean.
    Boolean,
    /// Enumerated string.
    Enum,
    /// Homogeneous array of the element type.
    Array(Box<ColumnType>),
    /// JSON document.
    Json,
    /// Binary JSON document.
    Jsonb,
    /// Binary large object.
    Blob,
    /// UUID.
    Uuid,
    /// Network address block.
    Cidr,
    /// Network address.
    Inet,
    /// MAC address.
    MacAddr,
    /// Range of values.
    Range,
    /// Geometry.
    Geometry,
    /// Any tag without a dedicated variant.
    Other(String),
}

impl ColumnType {
    /// Convenience constructor for array columns.
    pub fn array_of(element: ColumnType) -> Self {
        ColumnType::Array(Box::new(element))
    }

    /// Element type for arrays.
    pub fn element(&self) -> Option<&ColumnType> {
        match self {
            ColumnType::Array(inner) => Some(inner),
            _ => None,
        }
    }

    /// Whether this is an array type.
    pub const fn is_array(&self) -> bool {
        matches!(self, ColumnType::Array(_))
    }

    /// The store's tag name for this type.
    pub fn tag(&self) -> &str {
        match self {
            ColumnType::String => "STRING",
            ColumnType::Char => "CHAR",
            ColumnType::Text => "TEXT",
            ColumnType::Citext => "CITEXT",
            ColumnType::TinyInt => "TINYINT",
            ColumnType::SmallInt => "SMALLINT",
            ColumnType::MediumInt => "MEDIUMINT",
            ColumnType::Integer => "INTEGER",
            ColumnType::BigInt => "BIGINT",
            ColumnType::Float => "FLOAT",
            ColumnType::Real => "REAL",
            ColumnType::Double => "DOUBLE",
            ColumnType::Decimal => "DECIMAL",
            ColumnType::Date => "DATE",
            ColumnType::DateOnly => "DATEONLY",
            ColumnType::Time => "TIME",
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::Enum => "ENUM",
            ColumnType::Array(_) => "ARRAY",
            ColumnType::Json => "JSON",
            ColumnType::Jsonb => "JSONB",
            ColumnType::Blob => "BLOB",
            ColumnType::Uuid => "UUID",
            ColumnType::Cidr => "CIDR",
            ColumnType::Inet => "INET",
            ColumnType::MacAddr => "MACADDR",
            ColumnType::Range => "RANGE",
            ColumnType::Geometry => "GEOMETRY",
            ColumnType::Other(tag) => tag,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Array(inner) => write!(f, "ARRAY({})", inner),
            other => f.write_str(other.tag()),
        }
    }
}

impl FromStr for ColumnType {
    type Err = std::convert::Infallible;

    /// Parse a tag such as `INTEGER`, `double precision` or `ARRAY(TEXT)`.
    ///
    /// Length/precision suffixes (`VARCHAR(255)`) are ignored. Unknown tags
    /// become [`ColumnType::Other`]; parsing never fails.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let upper = trimmed.to_ascii_uppercase();

        if let Some(inner) = upper
            .strip_prefix("ARRAY(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return Ok(ColumnType::array_of(inner.parse()?));
        }
        if let Some(inner) = upper.strip_suffix("[]") {
            return Ok(ColumnType::array_of(inner.parse()?));
        }

        let base = upper.split('(').next().unwrap_or_default().trim();
        let parsed = match base {
            "STRING" | "VARCHAR" | "CHARACTER VARYING" => ColumnType::String,
            "CHAR" | "CHARACTER" => ColumnType::Char,
            "TEXT" => ColumnType::Text,
            "CITEXT" => ColumnType::Citext,
            "TINYINT" => ColumnType::TinyInt,
            "SMALLINT" => ColumnType::SmallInt,
            "MEDIUMINT" => ColumnType::MediumInt,
            "INTEGER" | "INT" => ColumnType::Integer,
            "BIGINT" => ColumnType::BigInt,
            "FLOAT" => ColumnType::Float,
            "REAL" => ColumnType::Real,
            "DOUBLE" | "DOUBLE PRECISION" => ColumnType::Double,
            "DECIMAL" | "NUMERIC" => ColumnType::Decimal,
            "DATE" | "DATETIME" | "TIMESTAMP" | "TIMESTAMPTZ" => ColumnType::Date,
            "DATEONLY" => ColumnType::DateOnly,
            "TIME" => ColumnType::Time,
            "BOOLEAN" | "BOOL" => ColumnType::Boolean,
            "ENUM" => ColumnType::Enum,
            "JSON" => ColumnType::Json,
            "JSONB" => ColumnType::Jsonb,
            "BLOB" | "BYTEA" => ColumnType::Blob,
            "UUID" => ColumnType::Uuid,
            "CIDR" => ColumnType::Cidr,
            "INET" => ColumnType::Inet,
            "MACADDR" => ColumnType::MacAddr,
            "RANGE" => ColumnType::Range,
            "GEOMETRY" => ColumnType::Geometry,
            _ => ColumnType::Other(trimmed.to_string()),
        };
        Ok(parsed)
    }
}

/// Explicit nullability declaration of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Nullability {
    /// NOT NULL.
    Required,
    /// Explicitly nullable.
    Optional,
    /// No declaration; the store treats the column as nullable.
    #[default]
    Unspecified,
}

impl Nullability {
    /// Whether NULL is rejected.
    pub const fn is_required(self) -> bool {
        matches!(self, Nullability::Required)
    }

    /// Map an `allow_null` flag to a declaration.
    pub const fn from_allow_null(allow_null: bool) -> Self {
        if allow_null {
            Nullability::Optional
        } else {
            Nullability::Required
        }
    }
}

/// Foreign key target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    /// Referenced model (table) name.
    pub model: String,
    /// Referenced column, usually the target's primary key.
    pub key: Option<String>,
}

/// Schema metadata for one field of a native model.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    /// Field name.
    pub name: String,
    /// Native type.
    pub column_type: ColumnType,
    /// Nullability declaration.
    pub nullability: Nullability,
    /// Whether this is the primary key.
    pub primary_key: bool,
    /// Whether the store assigns the value by incrementing a sequence.
    pub auto_increment: bool,
    /// Whether the store generates the value itself (timestamps, etc.).
    pub auto_generated: bool,
    /// Whether values must be unique.
    pub unique: bool,
    /// Value used when a write omits the field.
    pub default: Option<Value>,
    /// Allowed values for enumerations.
    pub values: Vec<Value>,
    /// Foreign key target.
    pub references: Option<ForeignKey>,
}

impl ColumnDef {
    /// Create a column with no constraints.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullability: Nullability::Unspecified,
            primary_key: false,
            auto_increment: false,
            auto_generated: false,
            unique: false,
            default: None,
            values: Vec::new(),
            references: None,
        }
    }

    /// Declare NOT NULL.
    pub fn required(mut self) -> Self {
        self.nullability = Nullability::Required;
        self
    }

    /// Declare explicitly nullable.
    pub fn optional(mut self) -> Self {
        self.nullability = Nullability::Optional;
        self
    }

    /// Set nullability.
    pub fn nullability(mut self, nullability: Nullability) -> Self {
        self.nullability = nullability;
        self
    }

    /// Mark as primary key.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Mark as auto-incrementing.
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Mark as generated by the store.
    pub fn auto_generated(mut self) -> Self {
        self.auto_generated = true;
        self
    }

    /// Add a unique constraint.
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Set the default value.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Set the enumerated values.
    pub fn values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Reference another model's primary key.
    pub fn references(mut self, model: impl Into<String>) -> Self {
        self.references = Some(ForeignKey {
            model: model.into(),
            key: None,
        });
        self
    }

    /// Reference a specific column of another model.
    pub fn references_key(mut self, model: impl Into<String>, key: impl Into<String>) -> Self {
        self.references = Some(ForeignKey {
            model: model.into(),
            key: Some(key.into()),
        });
        self
    }
}
