//! Schema types for representing inferred column roles.

mod column;
mod table;
mod types;

pub use column::{
    summarize_schema, CategoricalSummary, DatetimeSummary, IdentifierSummary, NumericSummary,
    SchemaSummary, TextSummary,
};
pub use table::Schema;
pub use types::{ColumnRole, ColumnType};
