//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// Merge residue-frequency files into one table and plot a fingerprint heatmap
///
/// Takes one or more residue-interaction frequency files, aligns them into
/// a single table by residue-pair identity, drops interactions that never
/// exceed the frequency cutoff, and writes the result as TSV and/or as a
/// clustered heatmap image.
///
/// Examples:
///   contact-fingerprints --input-frequencies wt.tsv mutant.tsv --table-output fingerprints.tsv
///   contact-fingerprints --input-frequencies wt.tsv mutant.tsv --plot-output fingerprints.svg
///   contact-fingerprints --input-frequencies a.tsv b.tsv --column-headers WT R273H --cluster-columns
///   contact-fingerprints --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Paths to one or more residue frequency files
    #[arg(
        short,
        long,
        value_name = "FILE",
        num_args = 1..,
        required_unless_present = "init_config"
    )]
    pub input_frequencies: Vec<PathBuf>,

    /// Header column labels
    ///
    /// One per input file, in the same order. If nothing is specified,
    /// the input file paths are used.
    #[arg(long, value_name = "LABEL", num_args = 1..)]
    pub column_headers: Option<Vec<String>>,

    /// Write the tab-separated frequency table to this file
    #[arg(short, long, value_name = "FILE")]
    pub table_output: Option<PathBuf>,

    /// Write the heatmap to this file (.svg or .png, chosen by extension)
    #[arg(short, long, value_name = "FILE")]
    pub plot_output: Option<PathBuf>,

    /// Keep only interactions occurring more frequently than this value
    ///
    /// The comparison is strict: an interaction whose best frequency is
    /// exactly the cutoff is dropped. Defaults to the config file value,
    /// or 0.6. Can also be set via FINGERPRINTS_CUTOFF.
    #[arg(short, long, value_name = "FLOAT", env = "FINGERPRINTS_CUTOFF")]
    pub frequency_cutoff: Option<f64>,

    /// Perform hierarchical clustering on the heatmap columns
    #[arg(long)]
    pub cluster_columns: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .fingerprints.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .fingerprints.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.input_frequencies.is_empty() {
            return Err("At least one --input-frequencies file is required".to_string());
        }

        if let Some(cutoff) = self.frequency_cutoff {
            if !cutoff.is_finite() {
                return Err("Frequency cutoff must be a finite number".to_string());
            }
            if cutoff < 0.0 {
                return Err("Frequency cutoff must not be negative".to_string());
            }
        }

        if let Some(ref headers) = self.column_headers {
            if headers.len() != self.input_frequencies.len() {
                return Err(format!(
                    "--column-headers count ({}) must match --input-frequencies count ({})",
                    headers.len(),
                    self.input_frequencies.len()
                ));
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
