//! Table-level schema definition.

use serde::{Deserialize, Serialize};

use super::types::ColumnRole;

/// Columns of a table partitioned by semantic role.
///
/// Each role list keeps the table's column order. Together the five lists
/// contain every entry of `raw_columns` exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Identifier columns.
    pub id_columns: Vec<String>,
    /// Date/time columns.
    pub datetime_columns: Vec<String>,
    /// Categorical columns.
    pub categorical_columns: Vec<String>,
    /// Numeric measure columns.
    pub numeric_columns: Vec<String>,
    /// Free-text columns.
    pub text_columns: Vec<String>,
    /// All column names in table order.
    pub raw_columns: Vec<String>,
}

impl Schema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column to the list for its role and to the raw list.
    pub fn push(&mut self, name: impl Into<String>, role: ColumnRole) {
        let name = name.into();
        self.raw_columns.push(name.clone());
        self.columns_mut(role).push(name);
    }

    /// Columns assigned to a role.
    pub fn columns(&self, role: ColumnRole) -> &[String] {
        match role {
            ColumnRole::Identifier => &self.id_columns,
            ColumnRole::Datetime => &self.datetime_columns,
            ColumnRole::Categorical => &self.categorical_columns,
            ColumnRole::Numeric => &self.numeric_columns,
            ColumnRole::Text => &self.text_columns,
        }
    }

    fn columns_mut(&mut self, role: ColumnRole) -> &mut Vec<String> {
        match role {
            ColumnRole::Identifier => &mut self.id_columns,
            ColumnRole::Datetime => &mut self.datetime_columns,
            ColumnRole::Categorical => &mut self.categorical_columns,
            ColumnRole::Numeric => &mut self.numeric_columns,
            ColumnRole::Text => &mut self.text_columns,
        }
    }

    /// Look up the role of a column.
    pub fn role_of(&self, name: &str) -> Option<ColumnRole> {
        ColumnRole::ALL
            .into_iter()
            .find(|role| self.columns(*role).iter().any(|c| c == name))
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.raw_columns.len()
    }

    /// Check that the role lists partition the raw column list.
    pub fn is_partition(&self) -> bool {
        let assigned: usize = ColumnRole::ALL
            .iter()
            .map(|role| self.columns(*role).len())
            .sum();

        assigned == self.raw_columns.len()
            && self
                .raw_columns
                .iter()
                .all(|name| {
                    ColumnRole::ALL
                        .iter()
                        .map(|role| self.columns(*role).iter().filter(|c| *c == name).count())
                        .sum::<usize>()
                        == 1
                })
    }
}
