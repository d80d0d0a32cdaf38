//! AutoKPI: schema inference and rule-based KPI generation for tabular
//! datasets.
//!
//! AutoKPI reads a delimited file, assigns every column one of five roles
//! (identifier, datetime, categorical, numeric, text) and turns that schema
//! into a catalogue of KPI definitions with SQL templates and chart hints.
//! Each analysis also carries a data quality score and prioritised insights.
//!
//! # Core Principles
//!
//! - **Deterministic**: the same table always yields the same schema and
//!   catalogue, in the same order
//! - **Total**: inference never fails on messy values; degenerate
//!   statistics make a rule decline instead of erroring
//! - **First wins**: KPI names are unique, and the earliest rule to emit a
//!   name keeps it
//!
//! # Example
//!
//! ```no_run
//! use autokpi::AutoKpi;
//!
//! let result = AutoKpi::new().analyze("orders.csv").unwrap();
//!
//! println!("Numeric columns: {:?}", result.schema.numeric_columns);
//! for kpi in &result.kpis {
//!     println!("{}: {}", kpi.name, kpi.logic);
//! }
//! ```

pub mod error;
pub mod export;
pub mod inference;
pub mod input;
pub mod insights;
pub mod kpi;
pub mod quality;
pub mod refine;
pub mod render;
pub mod schema;
pub mod stats;

mod autokpi;

pub use crate::autokpi::{AnalysisResult, AutoKpi, AutoKpiConfig};
pub use error::{AutoKpiError, Result};
pub use inference::infer_schema;
pub use input::{DataTable, SourceMetadata};
pub use insights::{generate_insights, generate_statistical_summary, Insight, StatisticalSummary};
pub use kpi::{generate_kpis, Category, KpiCatalogue, KpiDescriptor, KpiDetail, KpiEngine};
pub use quality::{check_data_quality, QualityReport, Severity};
pub use render::{suggest_chart_type, ChartType, SqlTemplater};
pub use schema::{ColumnRole, ColumnType, Schema, SchemaSummary};
