//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Route files between a relational and a document store
#[derive(Parser, Debug)]
#[command(name = "dualstore")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze the structure of a JSON file
    Analyze {
        /// JSON file to analyze
        file: PathBuf,
    },

    /// Pick a store for a single file
    Select {
        /// File to route
        file: PathBuf,

        /// MIME type (guessed from the extension when omitted)
        #[arg(long)]
        mime: Option<String>,
    },

    /// Pick one store for a batch of files
    Batch {
        /// Files to route together
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Show the field outline of a JSON file
    Outline {
        /// JSON file to outline
        file: PathBuf,
    },

    /// Merge two JSON files
    Merge {
        /// First file (receives the merge)
        first: PathBuf,

        /// Second file
        second: PathBuf,

        /// Merge strategy: shallow, deep, override, combine
        #[arg(short, long, default_value = "deep")]
        strategy: String,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Ingest files into in-memory stores and report where they landed
    Ingest {
        /// Files to ingest
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Tags to attach (comma-separated)
        #[arg(long)]
        tags: Option<String>,

        /// Route all files to a single store
        #[arg(long)]
        batch: bool,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Human-readable output
    Pretty,
}
