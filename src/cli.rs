//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`Command`] - The pipeline stage to run
//! - [`OutputFormat`] - Row output format options
//!
//! [`Args::build_config`] turns the parsed flags into the one
//! [`StatsConfig`] the run uses.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{EmptyConversationPolicy, StatsConfig};
use crate::core::content::ContentKind;
use crate::error::Result;

/// Validate an Instagram chat export and summarize it.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatstats")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatstats stats message_1.json
    chatstats stats message_1.json --json
    chatstats timeline message_1.json -o months.csv
    chatstats content message_1.json --kind photos
    chatstats --fix-encoding content message_1.json --kind text -f jsonl")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// JSON configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Repair mojibake in names and text
    #[arg(long, global = true)]
    pub fix_encoding: bool,

    /// Fail on exports with no messages instead of reporting invalid dates
    #[arg(long, global = true)]
    pub reject_empty: bool,
}

/// Pipeline stage to run.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print conversation statistics
    Stats {
        /// Path to the export file
        input: PathBuf,

        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print messages per month
    Timeline {
        /// Path to the export file
        input: PathBuf,

        /// Output format [default: from the output extension, else json]
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List text or media items, most recent first
    Content {
        /// Path to the export file
        input: PathBuf,

        /// Content to list
        #[arg(short, long, value_enum)]
        kind: ContentKind,

        /// Output format [default: from the output extension, else json]
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

impl Command {
    /// The export file this command reads.
    pub fn input(&self) -> &Path {
        match self {
            Command::Stats { input, .. }
            | Command::Timeline { input, .. }
            | Command::Content { input, .. } => input,
        }
    }
}

/// Picks the row format: `--format` wins, then the `--output` extension,
/// then JSON.
pub fn resolve_format(
    format: Option<OutputFormat>,
    output: Option<&Path>,
) -> Result<crate::format::OutputFormat> {
    match (format, output) {
        (Some(format), _) => Ok(format.into()),
        (None, Some(path)) => crate::format::OutputFormat::from_path(&path.to_string_lossy()),
        (None, None) => Ok(crate::format::OutputFormat::Json),
    }
}

impl Args {
    /// Builds the run configuration: defaults, then `--config`, then flags.
    pub fn build_config(&self) -> Result<StatsConfig> {
        let mut config = match &self.config {
            Some(path) => StatsConfig::load(path)?,
            None => StatsConfig::default(),
        };

        if self.fix_encoding {
            config = config.with_fix_encoding(true);
        }
        if self.reject_empty {
            config = config.with_empty_conversation(EmptyConversationPolicy::Reject);
        }

        Ok(config)
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON array (default)
    #[default]
    Json,

    /// JSON Lines - one JSON object per line
    #[value(alias = "ndjson")]
    Jsonl,

    /// CSV with semicolon delimiter
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&crate::format::OutputFormat::from(*self), f)
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
        }
    }
}
