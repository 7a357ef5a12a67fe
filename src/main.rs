use anyhow::Result;
use clap::{Parser, Subcommand};
use complexity_report::metrics::DerivedMetrics;
use complexity_report::report::{metrics_json, print_report};
use complexity_report::{ImageFormat, ReportConfig, TableError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

#[derive(Parser)]
#[command(name = "complexity-report")]
#[command(about = "Compare suffix array benchmark timings against theoretical complexity curves")]
struct Cli {
    /// CSV written by the benchmark harness
    #[arg(short, long, global = true, default_value = "./docs/benchmark_results.csv")]
    input: PathBuf,

    /// Output directory for charts
    #[arg(short, long, global = true, default_value = "./docs")]
    output: PathBuf,

    /// Image format for charts
    #[arg(short, long, global = true, value_enum, default_value_t = ImageFormat::Png)]
    format: ImageFormat,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true, default_value = "false")]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render all complexity charts (default)
    Charts,

    /// Print the complexity analysis without writing any file
    Summary {
        /// Emit the derived series as JSON instead of a table
        #[arg(long, default_value = "false")]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let config = ReportConfig::new(cli.input, cli.output, cli.format);

    let outcome = match cli.command.unwrap_or(Commands::Charts) {
        Commands::Charts => run_charts(&config),
        Commands::Summary { json } => run_summary(&config, json),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_failure(&err);
            ExitCode::FAILURE
        }
    }
}

fn run_charts(config: &ReportConfig) -> Result<()> {
    complexity_report::run(config)?;

    println!("\nAll graphs generated successfully!");
    println!("Graphs saved to: {}/", config.output_dir.display());
    Ok(())
}

fn run_summary(config: &ReportConfig, json: bool) -> Result<()> {
    let table = complexity_report::load_table(config)?;
    let metrics = DerivedMetrics::derive(&table);

    if json {
        println!("{}", metrics_json(&metrics)?);
    } else {
        print_report(&table, &metrics)?;
    }
    Ok(())
}

fn report_failure(err: &anyhow::Error) {
    match err.downcast_ref::<TableError>() {
        Some(TableError::MissingResource(path)) => {
            eprintln!("Error: Benchmark data not found at {}", path.display());
            eprintln!("Please run the PerformanceBenchmark harness first to generate data.");
        }
        _ => eprintln!("Error: {:#}", err),
    }
}
