//! CSI Export CLI Application
//!
//! Command-line front end for the csi-export library:
//! - Single-file conversion with flags
//! - Batch conversion driven by a TOML config file
//! - Log output on stderr, controlled with -v / -q

use anyhow::{Context, Result};
use clap::Parser;
use csi_export::{convert_file, CsiMetric, ExportConfig, ExtractionConfig};
use std::path::{Path, PathBuf};

mod config;

/// CSI Export - Write CSI captures as tab-separated matrices
#[derive(Parser, Debug)]
#[command(name = "csi-export-cli")]
#[command(about = "Convert CSI captures to tab-separated files", long_about = None)]
#[command(version)]
struct Args {
    /// Capture file to convert
    #[arg(value_name = "CAPTURE")]
    input: Option<PathBuf>,

    /// Output file (default: capture path with a .csv extension)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Quantity to export: complex, amplitude or phase
    #[arg(long, value_name = "METRIC", default_value = "complex")]
    metric: CsiMetric,

    /// Express amplitudes in dB (only with --metric amplitude)
    #[arg(long)]
    db: bool,

    /// Reject matrices whose shape does not match the capture
    #[arg(long)]
    strict: bool,

    /// Path to batch configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    log::debug!("CSI Export CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using csi-export library v{}", csi_export::VERSION);

    if let Some(input) = &args.input {
        single_file_mode(input, &args)?;
    } else if let Some(config_path) = &args.config {
        batch_mode(config_path)?;
    } else {
        println!("CSI Export - No input specified");
        println!("\nQuick Start:");
        println!("  csi-export-cli capture.json -o capture.csv");
        println!("  csi-export-cli capture.json --metric amplitude --db");
        println!("\nBatch conversion:");
        println!("  csi-export-cli --config config.toml");
        println!("\nUse --help for more options");
    }

    Ok(())
}

/// Convert one capture using command-line flags
fn single_file_mode(input: &Path, args: &Args) -> Result<()> {
    let dest = args
        .output
        .clone()
        .unwrap_or_else(|| input.with_extension("csv"));

    let extraction = ExtractionConfig::new()
        .with_metric(args.metric)
        .with_amplitude_db(args.db);
    let export = ExportConfig::new().with_strict(args.strict);

    convert_one(input, &dest, &extraction, &export)
}

/// Convert every capture listed in a config file, stopping at the first failure
fn batch_mode(config_path: &Path) -> Result<()> {
    log::info!("Loading configuration from: {:?}", config_path);
    let config = config::load_config(config_path)?;
    log::debug!("Configuration loaded successfully");

    let export = config.export.to_export_config();

    for input in &config.input.files {
        let dest = config.output.destination_for(input);
        convert_one(input, &dest, &config.extraction, &export)?;
    }

    log::info!("Converted {} capture(s)", config.input.files.len());
    Ok(())
}

fn convert_one(
    input: &Path,
    dest: &Path,
    extraction: &ExtractionConfig,
    export: &ExportConfig,
) -> Result<()> {
    if extraction.amplitude_db && extraction.metric != CsiMetric::Amplitude {
        log::warn!("dB conversion only applies to the amplitude metric; ignoring");
    }

    log::info!("Converting {:?} -> {:?}", input, dest);
    let summary = convert_file(input, dest, extraction, export)
        .with_context(|| format!("Failed to convert {:?}", input))?;

    log::info!(
        "Wrote {} subcarrier rows x {} frames to {:?}",
        summary.subcarrier_count,
        summary.frame_count,
        dest
    );
    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
