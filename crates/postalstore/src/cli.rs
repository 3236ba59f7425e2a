//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};

/// Postal code data-access CLI.
#[derive(Debug, Parser)]
#[command(name = "postalstore")]
#[command(about = "Postal code data-access CLI", long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List all postal codes with their locations.
    List,
    /// List postal codes for a location.
    ByLocation {
        /// Location ID.
        location_id: i64,
    },
    /// Look up a postal code by its code value.
    Get {
        /// Postal code value.
        code: String,
    },
    /// Create a new postal code.
    Add {
        /// Postal code value.
        #[arg(long)]
        code: String,
        /// Location the code belongs to.
        #[arg(long)]
        location_id: i64,
    },
    /// Update a postal code by ID.
    Update {
        /// Postal code ID.
        id: i64,
        /// New code value.
        #[arg(long)]
        code: Option<String>,
        /// New location reference.
        #[arg(long)]
        location_id: Option<i64>,
    },
    /// Delete a postal code by ID.
    Remove {
        /// Postal code ID.
        id: i64,
    },
}
