//! Contact Fingerprints - residue interaction frequency tables
//!
//! A CLI tool that merges per-condition residue-interaction frequency
//! files into one aligned table, filters out rare interactions, and
//! renders the result as a TSV table and/or a clustered heatmap.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (bad input file, malformed line, plot failure, etc.)
//!   2 - Usage error (rejected command line)

mod aggregate;
mod cli;
mod config;
mod error;
mod models;
mod plot;
mod sources;
mod table;

use anyhow::{Context, Result};
use cli::Args;
use config::Config;
use plot::PlotOptions;
use std::fs::File;
use std::io::BufWriter;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(2);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    // Initialize logging
    init_logging(&args);

    info!("contact-fingerprints v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args) {
        error!("Aggregation failed: {}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Handle --init-config: generate a default .fingerprints.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".fingerprints.toml");

    if path.exists() {
        anyhow::bail!(".fingerprints.toml already exists. Remove it first or edit it manually.");
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .fingerprints.toml")?;

    println!("✅ Created .fingerprints.toml with default settings.");
    println!("   Edit it to customize the cutoff and heatmap options.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete aggregation workflow.
fn run(args: Args) -> Result<()> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);
    let cutoff = config.filter.frequency_cutoff;

    // Resolve column labels up front; a count mismatch means no file is
    // even opened.
    let labels = sources::resolve_labels(
        &args.input_frequencies,
        args.column_headers.as_deref(),
    )?;

    println!(
        "📥 Reading {} frequency file(s)...",
        args.input_frequencies.len()
    );
    let inputs = sources::open_sources(&args.input_frequencies)?;

    let freq_table = aggregate::aggregate(inputs, cutoff)?;
    println!(
        "   {} interaction(s) above cutoff {}",
        freq_table.len(),
        cutoff
    );

    if let Some(ref path) = args.table_output {
        let file = File::create(path)
            .with_context(|| format!("Failed to create table file: {}", path.display()))?;
        table::write_table(&freq_table, &labels, &mut BufWriter::new(file))
            .with_context(|| format!("Failed to write table to {}", path.display()))?;
        println!("📝 Wrote frequency table to {}", path.display());
    }

    if let Some(ref path) = args.plot_output {
        let options = PlotOptions {
            cluster_columns: config.plot.cluster_columns,
            annotate: config.plot.annotate,
            cell_size: config.plot.cell_size,
        };
        plot::render(&freq_table, &labels, path, &options)?;
        println!("📊 Wrote fingerprint heatmap to {}", path.display());
    } else {
        debug!("No --plot-output given; skipping the heatmap");
    }

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .fingerprints.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
