//! Data source abstraction and metadata.

use std::collections::HashSet;
use std::path::PathBuf;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AutoKpiError, Result};
use crate::inference::parse_datetime;
use crate::schema::ColumnType;

/// Cell spellings treated as missing values (compared case-insensitively).
const NULL_TOKENS: &[&str] = &[
    "", "na", "n/a", "nan", "-nan", "null", "none", "<na>", "#n/a", "#n/a n/a", "#na",
];

/// Metadata about the source data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been parsed.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            loaded_at: Utc::now(),
        }
    }

    /// File name without its extension, used as the default table name.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "your_table".to_string())
    }
}

/// Represents parsed tabular data.
///
/// Cells are kept as strings; each column also carries the storage type a
/// dataframe loader would have given it, derived from the cells on
/// construction and overridable with [`DataTable::with_storage_type`].
#[derive(Debug, Clone)]
pub struct DataTable {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data as strings (row-major order).
    pub rows: Vec<Vec<String>>,
    /// The delimiter used.
    pub delimiter: u8,
    storage_types: Vec<ColumnType>,
}

impl DataTable {
    /// Create a new data table, inferring each column's storage type.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>, delimiter: u8) -> Self {
        let storage_types = (0..headers.len())
            .map(|idx| {
                infer_storage_type(
                    rows.len(),
                    rows.iter().map(|row| row.get(idx).map(String::as_str).unwrap_or("")),
                )
            })
            .collect();

        Self {
            headers,
            rows,
            delimiter,
            storage_types,
        }
    }

    /// Build a table from named columns of equal length.
    pub fn from_columns<N, V>(columns: Vec<(N, Vec<V>)>) -> Result<Self>
    where
        N: Into<String>,
        V: Into<String>,
    {
        let mut headers = Vec::with_capacity(columns.len());
        let mut cells: Vec<Vec<String>> = Vec::with_capacity(columns.len());

        for (name, values) in columns {
            headers.push(name.into());
            cells.push(values.into_iter().map(Into::into).collect());
        }

        let row_count = cells.first().map(Vec::len).unwrap_or(0);
        for (name, column) in headers.iter().zip(&cells) {
            if column.len() != row_count {
                return Err(AutoKpiError::RaggedColumns {
                    column: name.clone(),
                    expected: row_count,
                    found: column.len(),
                });
            }
        }

        let rows = (0..row_count)
            .map(|r| cells.iter().map(|column| column[r].clone()).collect())
            .collect();

        Ok(Self::new(headers, rows, b','))
    }

    /// Declare the storage type of a column, e.g. native spreadsheet dates.
    pub fn with_storage_type(mut self, name: &str, column_type: ColumnType) -> Self {
        if let Some(idx) = self.column_index(name) {
            self.storage_types[idx] = column_type;
        }
        self
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Position of a column by name, or a [`AutoKpiError::ColumnNotFound`].
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| AutoKpiError::ColumnNotFound(name.to_string()))
    }

    /// Storage type of a column by index.
    pub fn storage_type(&self, index: usize) -> ColumnType {
        self.storage_types.get(index).copied().unwrap_or_default()
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows.iter().map(move |row| {
            row.get(index)
                .map(|s| s.as_str())
                .unwrap_or("")
        })
    }

    /// Get a column by name.
    pub fn column_by_name(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.column_index(name)?;
        Some(self.column_values(index).collect())
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(|s| s.as_str()))
    }

    /// Non-null values of a column, in row order.
    pub fn non_null_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.column_values(index)
            .filter(|v| !DataTable::is_null_value(v))
    }

    /// Number of distinct non-null values in a column.
    pub fn unique_count(&self, index: usize) -> usize {
        self.non_null_values(index)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Distinct non-null values in first-encountered row order.
    pub fn unique_values(&self, index: usize) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.non_null_values(index)
            .filter(|v| seen.insert(*v))
            .collect()
    }

    /// Number of missing cells in a column.
    pub fn null_count(&self, index: usize) -> usize {
        self.column_values(index)
            .filter(|v| DataTable::is_null_value(v))
            .count()
    }

    /// Mean rendered length of a column's cells, in characters.
    ///
    /// Missing cells render as `nan`. Returns 0.0 for an empty table.
    pub fn avg_length(&self, index: usize) -> f64 {
        if self.rows.is_empty() {
            return 0.0;
        }
        let total: usize = self
            .column_values(index)
            .map(|v| {
                if DataTable::is_null_value(v) {
                    3
                } else {
                    v.chars().count()
                }
            })
            .sum();
        total as f64 / self.rows.len() as f64
    }

    /// Numeric view of a column; missing or unparseable cells are `None`.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let index = self.require_column(name)?;
        Ok(self.column_values(index).map(parse_number).collect())
    }

    /// Date/time view of a column with coercion; unparseable cells are `None`.
    pub fn datetime_column(&self, name: &str) -> Result<Vec<Option<NaiveDateTime>>> {
        let index = self.require_column(name)?;
        let numeric = self.storage_type(index).is_numeric();
        Ok(self
            .column_values(index)
            .map(|v| {
                if DataTable::is_null_value(v) {
                    None
                } else {
                    parse_datetime(v, numeric).map(|parsed| parsed.value)
                }
            })
            .collect())
    }

    /// Check if a value represents a missing/null value.
    pub fn is_null_value(value: &str) -> bool {
        let trimmed = value.trim();
        NULL_TOKENS
            .iter()
            .any(|token| trimmed.eq_ignore_ascii_case(token))
    }
}

/// Parse a cell as a number, treating nulls as missing.
fn parse_number(value: &str) -> Option<f64> {
    if DataTable::is_null_value(value) {
        return None;
    }
    value.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Derive the storage type a dataframe loader would assign to a column.
fn infer_storage_type<'a>(row_count: usize, values: impl Iterator<Item = &'a str>) -> ColumnType {
    if row_count == 0 {
        return ColumnType::String;
    }

    let mut non_null = 0usize;
    let mut has_nulls = false;
    let mut all_integer = true;
    let mut all_float = true;
    let mut all_boolean = true;

    for value in values {
        if DataTable::is_null_value(value) {
            has_nulls = true;
            continue;
        }
        non_null += 1;

        let trimmed = value.trim();
        if all_integer && trimmed.parse::<i64>().is_err() {
            all_integer = false;
        }
        if all_float && trimmed.parse::<f64>().is_err() {
            all_float = false;
        }
        if all_boolean
            && !(trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("false"))
        {
            all_boolean = false;
        }
    }

    if non_null == 0 {
        // Entirely missing columns load as float NaN.
        return ColumnType::Float;
    }
    if all_integer {
        return if has_nulls {
            ColumnType::Float
        } else {
            ColumnType::Integer
        };
    }
    if all_float {
        return ColumnType::Float;
    }
    if all_boolean && !has_nulls {
        return ColumnType::Boolean;
    }
    ColumnType::String
}
