//! Gridsheet - NetCDF grids to spreadsheets.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use gridsheet::batch::{process_batch, BatchResult};
use gridsheet::config::ExportConfig;
use gridsheet::export::{write_outputs, ARCHIVE_NAME};
use gridsheet::select::SelectionPolicy;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gridsheet", version)]
#[command(about = "Flatten gridded NetCDF files into spreadsheets", long_about = None)]
struct Args {
    /// NetCDF files to convert, processed in the given order
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory receiving the archive and spreadsheets
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// File name of the zip archive
    #[arg(long, default_value = ARCHIVE_NAME)]
    archive_name: String,

    /// Only write the archive, not the individual spreadsheets
    #[arg(long)]
    archive_only: bool,

    /// Single-variable candidates in priority order
    #[arg(long, value_delimiter = ',')]
    candidates: Option<Vec<String>>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Write logs to the specified file instead of stderr
    #[arg(long)]
    log: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> ExportConfig {
        let mut policy = SelectionPolicy::default();
        if let Some(candidates) = &self.candidates {
            policy = policy.with_candidates(candidates.iter().map(|c| c.trim().to_string()));
        }
        ExportConfig::default()
            .with_output_dir(&self.output_dir)
            .with_archive_name(&self.archive_name)
            .with_individual_files(!self.archive_only)
            .with_policy(policy)
    }
}

fn init_logging(verbosity: u8, log: Option<&PathBuf>) -> Result<()> {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gridsheet={level}")));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, args.log.as_ref())?;
    tracing::info!("Starting Gridsheet");

    let config = args.config();
    let mut result = BatchResult::new();
    process_batch(&args.inputs, &config.policy, &mut result)?;

    for failure in result.failures() {
        eprintln!("{}", failure.message);
    }

    let written = write_outputs(result.records(), &config).context("Failed to write outputs")?;
    tracing::info!("{} output files written", written.len());

    println!("{}", result.summary());
    Ok(())
}
