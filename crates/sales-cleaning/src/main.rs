//! CLI entry point for the sales data cleaning pipeline.

use anyhow::{Result, anyhow};
use clap::Parser;
use dotenv::dotenv;
use polars::prelude::DataFrame;
use sales_cleaning::config::{DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH};
use sales_cleaning::{CleaningReport, CleaningSummary, Pipeline, PipelineConfig};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Clean a raw sales CSV export",
    long_about = "Loads a sales CSV, normalizes column names, trims product/category text, \
                  coerces price/quantity to numbers (unparsable values become 0), drops rows \
                  with negative price or quantity, and writes the cleaned CSV.\n\n\
                  EXAMPLES:\n  \
                  # Clean the default files\n  \
                  sales-cleaning\n\n  \
                  # Clean a specific export and keep a JSON report\n  \
                  sales-cleaning -i exports/march.csv -o clean/march.csv --create-dirs --emit-report clean/march.json"
)]
struct Args {
    /// Path to the raw CSV file
    #[arg(short, long, default_value = DEFAULT_INPUT_PATH)]
    input: PathBuf,

    /// Path of the cleaned CSV file to write
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Fail when the input file does not exist instead of writing an empty output
    #[arg(long)]
    strict: bool,

    /// Create the output directory if it does not exist
    #[arg(long)]
    create_dirs: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and errors)
    #[arg(short, long)]
    quiet: bool,

    /// Number of cleaned rows to print after the run (0 to disable)
    #[arg(long, default_value = "5")]
    preview: usize,

    /// Print the run report as JSON to stdout instead of the human-readable summary
    ///
    /// Disables all logging so stdout only contains the JSON report.
    #[arg(long)]
    json: bool,

    /// Write the run report as JSON to this path
    #[arg(long, value_name = "PATH")]
    emit_report: Option<PathBuf>,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load environment variables (e.g. RUST_LOG) from .env file
    dotenv().ok();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = PipelineConfig::builder()
        .input_path(&args.input)
        .output_path(&args.output)
        .fail_on_missing_input(args.strict)
        .create_output_dir(args.create_dirs)
        .build()?;

    let mut builder = Pipeline::builder().config(config);
    if !args.quiet && !args.json {
        builder = builder.on_progress(|update| {
            info!(
                "[{:.0}%] {}: {}",
                update.progress * 100.0,
                update.stage.display_name(),
                update.message
            );
        });
    }

    // Pipeline::run already logs the failure
    let result = builder
        .build()?
        .run()
        .map_err(|e| anyhow!("Pipeline failed: {}", e))?;

    let report = CleaningReport::from_summary(&result.summary);

    if let Some(ref path) = args.emit_report {
        report.write_to_file(path)?;
    }

    if args.json {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    if !args.quiet {
        print_human_readable_summary(&result.summary);
        print_preview(&result.data, args.preview);
    }

    Ok(())
}

/// Print a human-readable summary of the run.
///
/// Uses `println!` rather than logging since this is the primary output of
/// the command and should be visible regardless of log level.
fn print_human_readable_summary(summary: &CleaningSummary) {
    println!();
    println!("{}", "=".repeat(60));
    println!("CLEANING COMPLETE");
    println!("{}", "=".repeat(60));

    if summary.input_missing() {
        println!(
            "Input:  {} (not found, treated as empty)",
            summary.input_path.display()
        );
    } else {
        println!(
            "Input:  {} ({} rows x {} columns)",
            summary.input_path.display(),
            summary.rows_loaded,
            summary.columns_loaded
        );
    }
    println!(
        "Output: {} ({} rows x {} columns)",
        summary.output_path.display(),
        summary.rows_written,
        summary.columns.len()
    );
    println!();

    println!("Columns: {}", summary.columns.join(", "));
    for (column, count) in &summary.field_stats.trimmed_cells {
        println!("  - Trimmed {} cells in '{}'", count, column);
    }
    for (column, count) in &summary.field_stats.coerced_cells {
        println!("  - Set {} invalid or missing '{}' values to 0", count, column);
    }
    println!("  - Removed {} rows with negative values", summary.rows_removed);
    println!("Duration: {}ms", summary.duration_ms);
    println!("{}", "=".repeat(60));
}

fn print_preview(df: &DataFrame, rows: usize) {
    if rows == 0 || df.width() == 0 {
        return;
    }
    println!("Cleaning complete. First few rows:");
    println!("{}", df.head(Some(rows)));
}
