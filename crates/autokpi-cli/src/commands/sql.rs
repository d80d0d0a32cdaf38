//! SQL command - print the query behind every KPI.

use std::path::PathBuf;

use autokpi::kpi::EngineConfig;
use autokpi::{AutoKpi, AutoKpiConfig};
use colored::Colorize;

pub fn run(file: PathBuf, table: String, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let config = AutoKpiConfig {
        engine: EngineConfig {
            table_name: table,
            ..Default::default()
        },
        ..Default::default()
    };
    let result = AutoKpi::with_config(config).analyze(&file)?;

    for (name, sql) in result.sql_queries() {
        println!("{} {}", "--".dimmed(), name.bold());
        println!("{}", sql);
        println!();
    }

    if verbose {
        for warning in &result.warnings {
            eprintln!("{} {}", "warning:".yellow().bold(), warning);
        }
    }

    Ok(())
}
