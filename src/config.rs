//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.fingerprints.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Filtering settings.
    #[serde(default)]
    pub filter: FilterConfig,

    /// Heatmap settings.
    #[serde(default)]
    pub plot: PlotConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Frequency filtering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Interactions survive only when some file reports them more
    /// frequently than this value.
    #[serde(default = "default_cutoff")]
    pub frequency_cutoff: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            frequency_cutoff: default_cutoff(),
        }
    }
}

fn default_cutoff() -> f64 {
    0.6
}

/// Heatmap rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Perform hierarchical clustering on the columns.
    #[serde(default)]
    pub cluster_columns: bool,

    /// Write each cell's value into the cell.
    #[serde(default = "default_true")]
    pub annotate: bool,

    /// Cell edge length in pixels.
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            cluster_columns: false,
            annotate: true,
            cell_size: default_cell_size(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_cell_size() -> u32 {
    64
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".fingerprints.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(cutoff) = args.frequency_cutoff {
            self.filter.frequency_cutoff = cutoff;
        }

        // Flags always override
        if args.cluster_columns {
            self.plot.cluster_columns = true;
        }
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
