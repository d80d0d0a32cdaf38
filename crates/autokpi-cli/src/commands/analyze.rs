//! Analyze command - generate a KPI catalogue and export it.

use std::collections::BTreeMap;
use std::path::PathBuf;

use autokpi::kpi::EngineConfig;
use autokpi::refine::MockRefiner;
use autokpi::{AnalysisResult, AutoKpi, AutoKpiConfig};
use colored::Colorize;
use tracing::debug;

use crate::cli::ExportFormat;

/// Options of the `analyze` subcommand.
pub struct AnalyzeArgs {
    pub file: PathBuf,
    pub output: Option<PathBuf>,
    pub format: ExportFormat,
    pub table: String,
    pub context: Option<String>,
    pub mock_refine: bool,
    pub core_only: bool,
    pub max_rows: Option<usize>,
}

pub fn run(args: AnalyzeArgs, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    // Validate input file exists
    if !args.file.exists() {
        return Err(format!("File not found: {}", args.file.display()).into());
    }

    println!(
        "{} {}",
        "Analyzing".cyan().bold(),
        args.file.display().to_string().white()
    );

    let config = AutoKpiConfig {
        engine: EngineConfig {
            creative: !args.core_only,
            table_name: args.table.clone(),
        },
        max_rows: args.max_rows,
        context: args.context.clone(),
        ..Default::default()
    };

    let mut autokpi = AutoKpi::with_config(config);
    if args.mock_refine {
        autokpi = autokpi.with_refiner(MockRefiner::new());
    }

    let result = autokpi.analyze(&args.file)?;

    if verbose {
        println!();
        super::print_schema(&result.summary);
        println!();
    }

    print_summary(&result);

    let rendered = match args.format {
        ExportFormat::Json => result.to_json()?,
        ExportFormat::Markdown => result.to_markdown(),
        ExportFormat::Dashboard => result.to_dashboard_spec()?,
    };

    // Determine output path
    let output_path = args.output.unwrap_or_else(|| {
        let mut p = args.file.clone();
        let stem = p.file_stem().unwrap_or_default().to_string_lossy();
        p.set_file_name(format!("{}.{}", stem, args.format.extension()));
        p
    });

    std::fs::write(&output_path, rendered)?;
    debug!(path = %output_path.display(), format = %args.format, "Catalogue written");

    println!();
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output_path.display().to_string().white()
    );

    Ok(())
}

fn print_summary(result: &AnalysisResult) {
    let mut by_category: BTreeMap<&str, usize> = BTreeMap::new();
    for kpi in &result.kpis {
        *by_category.entry(kpi.category().label()).or_default() += 1;
    }

    println!(
        "Generated {} KPIs from {} rows",
        result.kpis.len().to_string().white().bold(),
        result.summary.total_rows
    );
    for (category, count) in by_category {
        println!("  {:28} {}", category, count.to_string().blue());
    }

    println!(
        "Data quality {}/100 ({})",
        format!("{:.1}", result.quality.overall_score).white().bold(),
        result.quality.grade()
    );
    for insight in result.insights.iter().filter(|i| i.is_high_priority()).take(5) {
        println!("  {} {}", "*".cyan(), insight.title);
    }

    for warning in &result.warnings {
        println!("{} {}", "warning:".yellow().bold(), warning);
    }
}
