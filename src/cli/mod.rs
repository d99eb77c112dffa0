//! CLI module
//!
//! Command-line interface for routing files between stores.
//!
//! # Commands
//!
//! - `analyze` - Structure analysis of a JSON file
//! - `select` - Store choice for one file
//! - `batch` - Store choice for a group of files
//! - `outline` - Field outline of a JSON file
//! - `merge` - Merge two JSON files
//! - `ingest` - Route files into in-memory stores

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
