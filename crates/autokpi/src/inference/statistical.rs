//! Value-level profiling of a single column.

use crate::input::DataTable;
use crate::schema::ColumnType;

use super::dates::{all_coerce_to_dates, all_parse_as_dates};

/// Number of leading non-null values checked when probing for dates.
pub const DATE_SAMPLE_SIZE: usize = 100;

/// Value statistics that drive role inference.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnProfile {
    /// Storage type of the column.
    pub storage: ColumnType,
    /// Total rows, missing cells included.
    pub row_count: usize,
    /// Distinct non-null values.
    pub unique_count: usize,
    /// `unique_count / max(row_count, 1)`.
    pub unique_ratio: f64,
    /// Mean rendered cell length; missing cells count as `nan`.
    pub avg_length: f64,
}

impl ColumnProfile {
    /// Profile the column at `index`.
    pub fn of(table: &DataTable, index: usize) -> Self {
        let row_count = table.row_count();
        let unique_count = table.unique_count(index);

        Self {
            storage: table.storage_type(index),
            row_count,
            unique_count,
            unique_ratio: unique_count as f64 / row_count.max(1) as f64,
            avg_length: table.avg_length(index),
        }
    }

    /// Whether the values look like a small closed set.
    ///
    /// True when fewer than `min(50, 10% of rows)` distinct values occur.
    pub fn has_few_distinct_values(&self) -> bool {
        (self.unique_count as f64) < 50f64.min(self.row_count as f64 * 0.1)
    }
}

/// Check whether the first [`DATE_SAMPLE_SIZE`] non-null values of a column
/// all parse as dates. A column with no values does not.
pub fn sample_parses_as_dates(table: &DataTable, index: usize) -> bool {
    let numeric = table.storage_type(index).is_numeric();
    all_parse_as_dates(table.non_null_values(index).take(DATE_SAMPLE_SIZE), numeric)
}

/// Check whether the leading non-null values of a column coerce to
/// timestamps. Numeric cells count as epoch nanoseconds and a column with
/// no values passes.
pub fn sample_coerces_to_dates(table: &DataTable, index: usize) -> bool {
    let numeric = table.storage_type(index).is_numeric();
    all_coerce_to_dates(table.non_null_values(index).take(DATE_SAMPLE_SIZE), numeric)
}
