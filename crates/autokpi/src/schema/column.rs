//! Per-column summaries of an inferred schema.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::table::Schema;
use crate::error::Result;
use crate::input::DataTable;

/// Timestamp layout used for datetime bounds.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Number of most frequent values kept for categorical columns.
const TOP_VALUES: usize = 5;

/// Summary of an identifier column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifierSummary {
    pub name: String,
    pub dtype: String,
    pub unique_count: usize,
    pub null_count: usize,
}

/// Summary of a datetime column. Bounds are `None` when no cell parses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatetimeSummary {
    pub name: String,
    pub dtype: String,
    pub min: Option<String>,
    pub max: Option<String>,
    /// Cells that are missing or do not parse as dates.
    pub null_count: usize,
}

/// Summary of a categorical column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalSummary {
    pub name: String,
    pub dtype: String,
    pub unique_count: usize,
    /// Most frequent values, highest count first; ties keep row order.
    pub top_values: IndexMap<String, usize>,
    pub null_count: usize,
}

/// Summary of a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub name: String,
    pub dtype: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub null_count: usize,
}

/// Summary of a free-text column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSummary {
    pub name: String,
    pub dtype: String,
    pub avg_length: f64,
    pub null_count: usize,
}

/// Detailed summary of a schema against the table it was inferred from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaSummary {
    pub total_rows: usize,
    pub total_columns: usize,
    pub id_columns: Vec<IdentifierSummary>,
    pub datetime_columns: Vec<DatetimeSummary>,
    pub categorical_columns: Vec<CategoricalSummary>,
    pub numeric_columns: Vec<NumericSummary>,
    pub text_columns: Vec<TextSummary>,
}

/// Summarize every column of `schema` using the cells of `table`.
///
/// Fails only if the schema names a column the table does not have.
pub fn summarize_schema(table: &DataTable, schema: &Schema) -> Result<SchemaSummary> {
    let mut summary = SchemaSummary {
        total_rows: table.row_count(),
        total_columns: table.column_count(),
        ..SchemaSummary::default()
    };

    for name in &schema.id_columns {
        let idx = table.require_column(name)?;
        summary.id_columns.push(IdentifierSummary {
            name: name.clone(),
            dtype: table.storage_type(idx).dtype().to_string(),
            unique_count: table.unique_count(idx),
            null_count: table.null_count(idx),
        });
    }

    for name in &schema.datetime_columns {
        let parsed: Vec<_> = table.datetime_column(name)?.into_iter().flatten().collect();
        let min = parsed.iter().min().map(|d| d.format(TIMESTAMP_FORMAT).to_string());
        let max = parsed.iter().max().map(|d| d.format(TIMESTAMP_FORMAT).to_string());
        summary.datetime_columns.push(DatetimeSummary {
            name: name.clone(),
            dtype: "datetime64".to_string(),
            min,
            max,
            null_count: table.row_count() - parsed.len(),
        });
    }

    for name in &schema.categorical_columns {
        let idx = table.require_column(name)?;
        summary.categorical_columns.push(CategoricalSummary {
            name: name.clone(),
            dtype: table.storage_type(idx).dtype().to_string(),
            unique_count: table.unique_count(idx),
            top_values: top_values(table, idx, TOP_VALUES),
            null_count: table.null_count(idx),
        });
    }

    for name in &schema.numeric_columns {
        let idx = table.require_column(name)?;
        let values: Vec<f64> = table.numeric_column(name)?.into_iter().flatten().collect();
        let (min, max, mean) = if values.is_empty() {
            (None, None, None)
        } else {
            (
                Some(values.iter().copied().fold(f64::INFINITY, f64::min)),
                Some(values.iter().copied().fold(f64::NEG_INFINITY, f64::max)),
                Some(values.iter().sum::<f64>() / values.len() as f64),
            )
        };
        summary.numeric_columns.push(NumericSummary {
            name: name.clone(),
            dtype: table.storage_type(idx).dtype().to_string(),
            min,
            max,
            mean,
            null_count: table.null_count(idx),
        });
    }

    for name in &schema.text_columns {
        let idx = table.require_column(name)?;
        summary.text_columns.push(TextSummary {
            name: name.clone(),
            dtype: table.storage_type(idx).dtype().to_string(),
            avg_length: table.avg_length(idx),
            null_count: table.null_count(idx),
        });
    }

    Ok(summary)
}

fn top_values(table: &DataTable, index: usize, limit: usize) -> IndexMap<String, usize> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for value in table.non_null_values(index) {
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }
    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|_, a, _, b| b.cmp(a));
    counts.truncate(limit);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnRole;

    fn fixture() -> (DataTable, Schema) {
        let table = DataTable::from_columns(vec![
            ("order_id", vec!["1", "2", "3", "4"]),
            ("when", vec!["2024-01-02", "2024-01-01", "bad", ""]),
            ("region", vec!["west", "east", "west", ""]),
            ("amount", vec!["10", "20", "", "30"]),
            ("notes", vec!["abc", "", "abcdef", "ab"]),
        ])
        .unwrap();

        let mut schema = Schema::new();
        schema.push("order_id", ColumnRole::Identifier);
        schema.push("when", ColumnRole::Datetime);
        schema.push("region", ColumnRole::Categorical);
        schema.push("amount", ColumnRole::Numeric);
        schema.push("notes", ColumnRole::Text);
        (table, schema)
    }

    #[test]
    fn test_summary_counts() {
        let (table, schema) = fixture();
        let summary = summarize_schema(&table, &schema).unwrap();

        assert_eq!(summary.total_rows, 4);
        assert_eq!(summary.total_columns, 5);
        assert_eq!(summary.id_columns[0].unique_count, 4);
        assert_eq!(summary.id_columns[0].dtype, "int64");
    }

    #[test]
    fn test_datetime_bounds() {
        let (table, schema) = fixture();
        let summary = summarize_schema(&table, &schema).unwrap();
        let when = &summary.datetime_columns[0];

        assert_eq!(when.min.as_deref(), Some("2024-01-01 00:00:00"));
        assert_eq!(when.max.as_deref(), Some("2024-01-02 00:00:00"));
        assert_eq!(when.null_count, 2);
    }

    #[test]
    fn test_categorical_top_values() {
        let (table, schema) = fixture();
        let summary = summarize_schema(&table, &schema).unwrap();
        let region = &summary.categorical_columns[0];

        assert_eq!(region.unique_count, 2);
        assert_eq!(region.null_count, 1);
        let top: Vec<_> = region.top_values.iter().collect();
        assert_eq!(top[0], (&"west".to_string(), &2));
        assert_eq!(top[1], (&"east".to_string(), &1));
    }

    #[test]
    fn test_numeric_and_text() {
        let (table, schema) = fixture();
        let summary = summarize_schema(&table, &schema).unwrap();
        let amount = &summary.numeric_columns[0];

        assert_eq!(amount.min, Some(10.0));
        assert_eq!(amount.max, Some(30.0));
        assert_eq!(amount.mean, Some(20.0));
        assert_eq!(amount.null_count, 1);

        let notes = &summary.text_columns[0];
        assert!((notes.avg_length - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_missing_column_is_error() {
        let (table, mut schema) = fixture();
        schema.push("ghost", ColumnRole::Numeric);
        assert!(summarize_schema(&table, &schema).is_err());
    }
}
