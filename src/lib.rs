// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # dualstore
//!
//! Routes uploaded files to either a relational or a document store.
//!
//! ## Features
//!
//! - **Structure analysis**: Measure how table-like a JSON document is
//! - **Store selection**: Pick a store per file or per batch
//! - **Outline and merge**: Inspect and combine JSON documents
//! - **Stores**: Async store capability with an in-memory implementation
//!
//! ## Quick Start
//!
//! ```rust
//! use dualstore::{select_store, FileDescriptor, SelectOptions, StorageTarget};
//! use serde_json::json;
//!
//! let file = FileDescriptor::new("users.json", 64, "application/json")
//!     .with_content(json!([{"id": 1, "name": "a"}, {"id": 2, "name": "b"}]));
//!
//! assert_eq!(select_store(&file, SelectOptions::default()), StorageTarget::Relational);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      Ingestor                            │
//! │   ingest(upload)   ingest_batch(uploads)   merge_records │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌────────────┬───────────────┴────────────┬────────────────┐
//! │  Analyze   │          Select            │     Store      │
//! ├────────────┼────────────────────────────┼────────────────┤
//! │ Walker     │ Extension categories       │ Store trait    │
//! │ Metrics    │ Single file heuristics     │ MemoryStore    │
//! │ Policy     │ Batch majority             │ StoreRegistry  │
//! └────────────┴────────────────────────────┴────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// JSON structure analysis
pub mod analyze;

/// Store selection for files and batches
pub mod select;

/// Field outlines of JSON documents
pub mod outline;

/// JSON merge strategies
pub mod merge;

/// Record stores
pub mod store;

/// Upload pipeline
pub mod ingest;

/// Application configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use analyze::{analyze_structure, StructureAnalysis};
pub use select::{select_store, select_store_for_batch, FileDescriptor, SelectOptions};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
