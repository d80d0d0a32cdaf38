//! Inference engine for column role detection.

mod dates;
mod fusion;
mod semantic;
mod statistical;

pub use dates::{
    all_coerce_to_dates, all_parse_as_dates, coerce_datetime, parse_datetime, DatePrecision,
    ParsedDate,
};
pub use fusion::{infer_column_role, infer_schema};
pub use semantic::{analyze_name, NameAnalysis};
pub use statistical::{
    sample_coerces_to_dates, sample_parses_as_dates, ColumnProfile, DATE_SAMPLE_SIZE,
};
