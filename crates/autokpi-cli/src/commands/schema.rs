//! Schema command - show inferred column roles.

use std::path::PathBuf;

use autokpi::input::Parser;
use autokpi::schema::summarize_schema;
use autokpi::infer_schema;
use colored::Colorize;

pub fn run(file: PathBuf, json_output: bool, _verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let (table, source) = Parser::new().parse_file(&file)?;
    let schema = infer_schema(&table);
    let summary = summarize_schema(&table, &schema)?;

    if json_output {
        let output = serde_json::json!({
            "file": source.file,
            "schema": schema,
            "summary": summary,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "{} {} ({})",
            "Schema for".cyan().bold(),
            source.file.white(),
            source.format
        );
        println!();
        super::print_schema(&summary);
    }

    Ok(())
}
