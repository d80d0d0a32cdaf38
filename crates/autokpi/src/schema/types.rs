//! Core type definitions for schema representation.

use serde::{Deserialize, Serialize};

/// Storage type of a column, as a dataframe loader would have typed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Whole numbers with no missing cells.
    Integer,
    /// Floating-point numbers (or integers with gaps).
    Float,
    /// Boolean values (true/false).
    Boolean,
    /// Native date/time values.
    DateTime,
    /// Text/string values.
    String,
    /// Unable to determine type.
    #[default]
    Unknown,
}

impl ColumnType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }

    /// Returns true if this type is an integer type.
    pub fn is_integer(&self) -> bool {
        matches!(self, ColumnType::Integer)
    }

    /// Short dtype label used in schema summaries.
    pub fn dtype(&self) -> &'static str {
        match self {
            ColumnType::Integer => "int64",
            ColumnType::Float => "float64",
            ColumnType::Boolean => "bool",
            ColumnType::DateTime => "datetime64",
            ColumnType::String => "object",
            ColumnType::Unknown => "unknown",
        }
    }
}

/// Semantic role of a column. Every column receives exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    /// Row identifier or surrogate key (e.g., order_id).
    Identifier,
    /// Date or timestamp.
    Datetime,
    /// Low-cardinality grouping variable (e.g., region, status).
    Categorical,
    /// Measure that can be aggregated (e.g., amount).
    Numeric,
    /// Free text.
    Text,
}

impl ColumnRole {
    /// All roles in schema order.
    pub const ALL: [ColumnRole; 5] = [
        ColumnRole::Identifier,
        ColumnRole::Datetime,
        ColumnRole::Categorical,
        ColumnRole::Numeric,
        ColumnRole::Text,
    ];

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnRole::Identifier => "ID",
            ColumnRole::Datetime => "Datetime",
            ColumnRole::Categorical => "Categorical",
            ColumnRole::Numeric => "Numeric",
            ColumnRole::Text => "Text",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_types() {
        assert!(ColumnType::Integer.is_numeric());
        assert!(ColumnType::Float.is_numeric());
        assert!(!ColumnType::Boolean.is_numeric());
        assert!(ColumnType::Integer.is_integer());
        assert!(!ColumnType::Float.is_integer());
    }

    #[test]
    fn test_role_serializes_snake_case() {
        let json = serde_json::to_string(&ColumnRole::Datetime).unwrap();
        assert_eq!(json, "\"datetime\"");
    }
}
