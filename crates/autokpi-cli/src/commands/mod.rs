//! CLI command implementations.

pub mod analyze;
pub mod schema;
pub mod sql;

use autokpi::SchemaSummary;
use colored::Colorize;

/// Print the per-role column summaries.
pub fn print_schema(summary: &SchemaSummary) {
    println!(
        "{} ({} rows, {} columns)",
        "Schema:".yellow().bold(),
        summary.total_rows,
        summary.total_columns
    );

    for col in &summary.id_columns {
        println!(
            "  {:24} {:12} {:8} unique={}",
            col.name,
            "identifier".magenta(),
            col.dtype,
            col.unique_count
        );
    }
    for col in &summary.datetime_columns {
        println!(
            "  {:24} {:12} {:8} {} .. {}",
            col.name,
            "datetime".cyan(),
            col.dtype,
            col.min.as_deref().unwrap_or("?"),
            col.max.as_deref().unwrap_or("?")
        );
    }
    for col in &summary.categorical_columns {
        let top: Vec<&str> = col.top_values.keys().map(String::as_str).collect();
        println!(
            "  {:24} {:12} {:8} unique={} top=[{}]",
            col.name,
            "categorical".green(),
            col.dtype,
            col.unique_count,
            top.join(", ")
        );
    }
    for col in &summary.numeric_columns {
        let fmt = |v: Option<f64>| v.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "?".into());
        println!(
            "  {:24} {:12} {:8} min={} max={} mean={}",
            col.name,
            "numeric".blue(),
            col.dtype,
            fmt(col.min),
            fmt(col.max),
            fmt(col.mean)
        );
    }
    for col in &summary.text_columns {
        println!(
            "  {:24} {:12} {:8} avg_length={:.1}",
            col.name,
            "text".white(),
            col.dtype,
            col.avg_length
        );
    }
}
