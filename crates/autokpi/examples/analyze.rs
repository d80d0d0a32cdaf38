//! Example: Generate a KPI catalogue for a tabular data file.
//!
//! Usage:
//!   cargo run --example analyze -- <file_path>
//!
//! Example:
//!   cargo run --example analyze -- orders.csv

use std::env;
use std::path::Path;

use autokpi::refine::MockRefiner;
use autokpi::AutoKpi;

fn main() -> autokpi::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example analyze -- <file_path>");
        eprintln!("\nExample:");
        eprintln!("  cargo run --example analyze -- orders.csv");
        std::process::exit(1);
    }

    let file_path = &args[1];
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Error: File not found: {}", file_path);
        std::process::exit(1);
    }

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("AutoKPI Analysis: {}", file_path);
    println!("{}", separator);
    println!();

    // Mock refiner rewords KPIs without any external service
    let autokpi = AutoKpi::new()
        .with_refiner(MockRefiner::new())
        .with_context("example dataset");

    let result = autokpi.analyze(path)?;

    if let Some(source) = &result.source {
        println!("## Source Metadata");
        println!("  File: {}", source.file);
        println!("  Format: {}", source.format);
        println!("  Rows: {}", source.row_count);
        println!("  Columns: {}", source.column_count);
        println!();
    }

    println!("## Schema ({} columns)", result.schema.column_count());
    println!();
    for (label, columns) in [
        ("identifier", &result.schema.id_columns),
        ("datetime", &result.schema.datetime_columns),
        ("categorical", &result.schema.categorical_columns),
        ("numeric", &result.schema.numeric_columns),
        ("text", &result.schema.text_columns),
    ] {
        println!("  {:12} {:?}", label, columns);
    }
    println!();

    println!("## KPIs ({} total)", result.kpis.len());
    println!();
    for (name, sql) in result.sql_queries() {
        println!("  {}", name);
        for line in sql.lines() {
            println!("      {}", line);
        }
    }

    println!();
    println!(
        "## Data Quality: {:.1}/100 ({})",
        result.quality.overall_score,
        result.quality.grade()
    );
    for (dimension, score) in result.quality.dimension_scores() {
        println!("  {:14} {:.1}", dimension, score);
    }
    for issue in &result.quality.issues {
        println!("  [{}] {}", issue.severity.label(), issue.message);
    }

    println!();
    println!("## Insights ({} total)", result.insights.len());
    for insight in &result.insights {
        println!("  [{}] {}: {}", insight.priority, insight.title, insight.message);
    }

    for warning in &result.warnings {
        println!("  warning: {}", warning);
    }

    Ok(())
}
