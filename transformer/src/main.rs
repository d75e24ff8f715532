//! Growth360 CLI - reshape monthly report CSVs into one long table
//!
//! ```bash
//! growth360                                  # gh_data/*.csv -> transformed_cv_data.csv
//! growth360 --data-folder ke_data -o ke.csv  # Custom input and output
//! growth360 --config growth360.json          # Settings from a JSON file
//! growth360 --report run.json                # Also write a JSON run report
//! ```

use clap::Parser;
use growth360::logs::{log_error, LogLevel, LOGGER};
use growth360::{Transformer, TransformerConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "growth360")]
#[command(about = "Reshape wide monthly report CSVs into a single long-format table", long_about = None)]
struct Cli {
    /// Folder containing the monthly report CSV files (default: gh_data)
    #[arg(short, long, env = "GROWTH360_DATA_FOLDER")]
    data_folder: Option<PathBuf>,

    /// Output CSV file (default: transformed_cv_data.csv)
    #[arg(short, long, env = "GROWTH360_OUTPUT")]
    output: Option<PathBuf>,

    /// JSON configuration file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of rows to preview after the run (default: 5)
    #[arg(long)]
    preview_rows: Option<usize>,

    /// Write a JSON run report to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Only print warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        log_error(format!("Error: {}", e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.quiet {
        LOGGER.set_min_level(LogLevel::Warning);
    }

    let mut config = match &cli.config {
        Some(path) => TransformerConfig::from_json_file(path)?,
        None => TransformerConfig::default(),
    };
    if let Some(dir) = cli.data_folder {
        config.data_folder = dir;
    }
    if let Some(output) = cli.output {
        config.output_path = output;
    }
    if let Some(n) = cli.preview_rows {
        config.preview_rows = n;
    }

    let output_path = config.output_path.clone();
    let preview_rows = config.preview_rows;
    let transformer = Transformer::with_config(config);
    let outcome = transformer.save_transformed(&output_path)?;

    if let Some(report_path) = &cli.report {
        outcome.report(Some(output_path.as_path())).write_json(report_path)?;
    }

    if !cli.quiet {
        let table = &outcome.table;
        println!(
            "Successfully transformed data with {} rows and {} columns",
            table.row_count(),
            table.column_count()
        );
        println!("\nFirst few rows:");
        println!("{}", table.preview(preview_rows));
        println!("\nColumn names:");
        println!("{:?}", table.columns);
    }

    Ok(())
}
