//! Inference fusion - combining name and value evidence into a role.

use tracing::debug;

use crate::input::DataTable;
use crate::schema::{ColumnRole, ColumnType, Schema};

use super::semantic::{analyze_name, NameAnalysis};
use super::statistical::{sample_coerces_to_dates, sample_parses_as_dates, ColumnProfile};

/// Integer columns more unique than this are treated as surrogate keys.
const ID_UNIQUE_RATIO: f64 = 0.95;

/// Infer the role of every column, in table order.
///
/// Total and deterministic: every column lands in exactly one role list.
pub fn infer_schema(table: &DataTable) -> Schema {
    let mut schema = Schema::new();
    for (idx, name) in table.headers.iter().enumerate() {
        schema.push(name.clone(), infer_column_role(table, idx));
    }

    debug!(
        ids = schema.id_columns.len(),
        datetimes = schema.datetime_columns.len(),
        categoricals = schema.categorical_columns.len(),
        numerics = schema.numeric_columns.len(),
        texts = schema.text_columns.len(),
        "inferred schema"
    );
    schema
}

/// Infer the role of the column at `index`.
pub fn infer_column_role(table: &DataTable, index: usize) -> ColumnRole {
    let name = table.headers.get(index).map(String::as_str).unwrap_or("");
    let (role, rule) = decide(table, index, &analyze_name(name));
    debug!(column = name, role = role.label(), rule, "column role");
    role
}

/// Walk the precedence chain; the first rule that fires wins.
fn decide(table: &DataTable, index: usize, names: &NameAnalysis) -> (ColumnRole, &'static str) {
    if names.identifier {
        return (ColumnRole::Identifier, "identifier name");
    }

    if names.datetime && sample_coerces_to_dates(table, index) {
        return (ColumnRole::Datetime, "temporal name with date values");
    }

    let profile = ColumnProfile::of(table, index);

    match profile.storage {
        ColumnType::Integer | ColumnType::Float => {
            if profile.storage.is_integer() && profile.unique_ratio > ID_UNIQUE_RATIO {
                (ColumnRole::Identifier, "unique integers")
            } else {
                (ColumnRole::Numeric, "numeric storage")
            }
        }
        ColumnType::DateTime => (ColumnRole::Datetime, "datetime storage"),
        ColumnType::String => {
            if sample_parses_as_dates(table, index) {
                (ColumnRole::Datetime, "date values")
            } else {
                classify_strings(&profile, names)
            }
        }
        ColumnType::Boolean => (ColumnRole::Categorical, "boolean storage"),
        ColumnType::Unknown => (ColumnRole::Categorical, "fallback"),
    }
}

/// Split string columns between categorical and free text.
fn classify_strings(profile: &ColumnProfile, names: &NameAnalysis) -> (ColumnRole, &'static str) {
    if profile.unique_ratio < 0.5 && profile.avg_length < 50.0 {
        if names.categorical {
            return (ColumnRole::Categorical, "categorical name");
        }
        if profile.has_few_distinct_values() {
            return (ColumnRole::Categorical, "few distinct values");
        }
    }

    if profile.avg_length > 100.0 {
        (ColumnRole::Text, "long strings")
    } else if profile.unique_ratio < 0.3 {
        (ColumnRole::Categorical, "low cardinality")
    } else {
        (ColumnRole::Text, "high cardinality")
    }
}
