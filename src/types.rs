//! Common types used throughout dualstore
//!
//! This module contains shared type definitions used across the analyzer,
//! the selectors and the stores.

use serde::{Deserialize, Serialize};

// ============================================================================
// Storage Target
// ============================================================================

/// The backing store a file's metadata is persisted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageTarget {
    /// Schema-oriented store with fixed columns
    #[default]
    Relational,
    /// Schema-flexible store with arbitrary nested records
    Document,
}

impl StorageTarget {
    /// Lowercase name used in logs and serialized records
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageTarget::Relational => "relational",
            StorageTarget::Document => "document",
        }
    }

    /// Prefix used for record identifiers minted by this store
    pub fn id_prefix(&self) -> &'static str {
        match self {
            StorageTarget::Relational => "rel",
            StorageTarget::Document => "doc",
        }
    }
}

impl std::fmt::Display for StorageTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StorageTarget {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "relational" => Ok(StorageTarget::Relational),
            "document" => Ok(StorageTarget::Document),
            other => Err(crate::Error::config(format!(
                "unknown storage target '{other}'"
            ))),
        }
    }
}
