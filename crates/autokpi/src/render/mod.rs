//! Rendering hints for generated KPIs: SQL templates and chart types.

mod chart;
mod sql;

pub use chart::{suggest_chart_type, ChartType};
pub use sql::{sanitize_column_name, SqlTemplater};
