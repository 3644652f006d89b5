//! Command-line interface for rowdiff

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rowdiff")]
#[command(about = "A key-indexed tabular data comparison tool")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the fields of a tabular file (for choosing a key)
    Fields {
        /// Input file path
        input: PathBuf,

        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// Compare two tabular files on a shared key field
    Compare {
        /// Left ("before") file path
        left: PathBuf,

        /// Right ("after") file path
        right: PathBuf,

        /// Key field used to match rows between the two files
        #[arg(long)]
        key: String,

        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,

        /// Include unchanged rows in the entry listing
        #[arg(long)]
        include_same: bool,

        /// Write an exportable report (workbook, or flat text fallback)
        #[arg(long)]
        export: bool,

        /// Report base path; the export format picks the extension.
        /// Defaults to a timestamped name in the working directory.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Initialize logging for the CLI. The verbosity choice has to be made
/// before the logger is built: raising `log::set_max_level` afterwards
/// would not loosen the logger's own filter.
pub fn setup_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

/// Parse output format string
#[derive(Debug, Clone)]
pub enum OutputFormat {
    Pretty,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {}. Use 'pretty' or 'json'", s)),
        }
    }
}
