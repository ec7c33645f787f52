//! Command line argument parsing for the xiphos CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::search::ModelKind;

/// xiphos - an embeddable text search engine
#[derive(Parser, Debug, Clone)]
#[command(name = "xiphos")]
#[command(about = "Ranked and boolean search over JSON documents")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct XiphosArgs {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl XiphosArgs {
    /// Effective verbosity: 0 quiet, 1 normal, 2 info, 3 and above debug.
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Load a document file and run a query against it
    Search(SearchArgs),

    /// Load a document file and print the index summary
    Stats(StatsArgs),

    /// Parse a boolean query and print its tree
    Parse(ParseArgs),
}

/// Arguments for the `search` command
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// JSON file holding one document object or an array of them
    #[arg(value_name = "DOCUMENTS")]
    pub documents: PathBuf,

    /// Query string
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Search model: tfidf, bm25 or bool
    #[arg(short, long, default_value = "tfidf")]
    pub model: ModelKind,

    /// Maximum number of hits (0 for all)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Index configuration file
    #[arg(short, long, env = "XIPHOS_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Arguments for the `stats` command
#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    /// JSON file holding one document object or an array of them
    #[arg(value_name = "DOCUMENTS")]
    pub documents: PathBuf,

    /// Index configuration file
    #[arg(short, long, env = "XIPHOS_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Arguments for the `parse` command
#[derive(Args, Debug, Clone)]
pub struct ParseArgs {
    /// Boolean query, e.g. "(cat OR dog) AND NOT bird"
    #[arg(value_name = "QUERY")]
    pub query: String,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
