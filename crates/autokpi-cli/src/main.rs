//! AutoKPI CLI - KPI catalogue generation for tabular data.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Analyze {
            file,
            output,
            format,
            table,
            context,
            mock_refine,
            core_only,
            max_rows,
        } => commands::analyze::run(
            commands::analyze::AnalyzeArgs {
                file,
                output,
                format,
                table,
                context,
                mock_refine,
                core_only,
                max_rows,
            },
            cli.verbose,
        ),

        Commands::Schema { file, json } => commands::schema::run(file, json, cli.verbose),

        Commands::Sql { file, table } => commands::sql::run(file, table, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
