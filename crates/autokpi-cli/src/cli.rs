//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// AutoKPI: schema inference and KPI catalogue generation
#[derive(Parser)]
#[command(name = "autokpi")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a KPI catalogue for a data file
    Analyze {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path (default: <file>.kpis.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,

        /// Table name used in generated SQL
        #[arg(short, long, default_value = "your_table")]
        table: String,

        /// Free-text description of the dataset, passed to the refiner
        #[arg(short, long)]
        context: Option<String>,

        /// Reword KPIs with the offline mock refiner
        #[arg(long)]
        mock_refine: bool,

        /// Skip the anomaly, pattern, comparative, distribution and trend rules
        #[arg(long)]
        core_only: bool,

        /// Maximum rows to analyze
        #[arg(long)]
        max_rows: Option<usize>,
    },

    /// Show the inferred column roles of a data file
    Schema {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the SQL for every generated KPI
    Sql {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Table name used in generated SQL
        #[arg(short, long, default_value = "your_table")]
        table: String,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Json,
    Markdown,
    Dashboard,
}

impl ExportFormat {
    /// File extension for the default output path.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "kpis.json",
            ExportFormat::Markdown => "kpis.md",
            ExportFormat::Dashboard => "dashboard.json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "dashboard" => Ok(ExportFormat::Dashboard),
            _ => Err(format!(
                "Unknown format: {}. Use json, markdown, or dashboard.",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Markdown => write!(f, "markdown"),
            ExportFormat::Dashboard => write!(f, "dashboard"),
        }
    }
}
