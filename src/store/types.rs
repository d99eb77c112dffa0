//! Store types and traits
//!
//! Defines the file record model and the storage capability every backend
//! implements.

use crate::analyze::StructureAnalysis;
use crate::error::Result;
use crate::select::FileCategory;
use crate::types::StorageTarget;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Why a record was routed to its store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingAudit {
    /// Store the record was persisted in
    pub recommended_storage: StorageTarget,
    /// Confidence of the structure analysis, 0-100
    pub confidence: f64,
    /// Reasons in evaluation order; the first one names the chosen store
    pub reasoning: Vec<String>,
}

impl RoutingAudit {
    /// Audit of a file routed by its own structure analysis
    pub fn from_analysis(analysis: StructureAnalysis) -> Self {
        Self {
            recommended_storage: analysis.recommended_storage,
            confidence: analysis.confidence,
            reasoning: analysis.reasoning,
        }
    }

    /// Record that a batch decision sent the file to `target`
    #[must_use]
    pub fn with_batch_target(mut self, target: StorageTarget) -> Self {
        if self.recommended_storage != target {
            self.reasoning.insert(
                0,
                format!(
                    "Batch upload routed to the {target} store; structure analysis alone recommended the {} store",
                    self.recommended_storage
                ),
            );
            self.recommended_storage = target;
        }
        self
    }
}

/// A record not yet persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFileRecord {
    pub filename: String,
    pub original_name: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub extension: String,
    pub category: FileCategory,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Parsed JSON content, `{}` for other files
    #[serde(default)]
    pub metadata: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit: Option<RoutingAudit>,
}

/// Metadata of a stored file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: String,
    pub filename: String,
    pub original_name: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub extension: String,
    pub category: FileCategory,
    pub tags: Vec<String>,
    pub metadata: Value,
    pub storage: StorageTarget,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit: Option<RoutingAudit>,
    pub uploaded_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FileRecord {
    /// Build a stored record from a new one
    pub fn from_new(
        id: impl Into<String>,
        storage: StorageTarget,
        record: NewFileRecord,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            filename: record.filename,
            original_name: record.original_name,
            size_bytes: record.size_bytes,
            mime_type: record.mime_type,
            extension: record.extension,
            category: record.category,
            tags: record.tags,
            metadata: record.metadata,
            storage,
            audit: record.audit,
            uploaded_at: now,
            updated_at: now,
        }
    }

    /// Whether the record holds JSON content
    pub fn is_json(&self) -> bool {
        self.extension == "json"
    }

    /// Whether the record satisfies every filter of `params`
    pub fn matches(&self, params: &SearchParams) -> bool {
        if let Some(query) = params.query.as_deref().filter(|q| !q.is_empty()) {
            let query = query.to_lowercase();
            let in_name = self.original_name.to_lowercase().contains(&query);
            let in_tags = self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&query));
            if !in_name && !in_tags {
                return false;
            }
        }

        if !params.tags.iter().all(|tag| self.tags.contains(tag)) {
            return false;
        }

        if params.category.is_some_and(|category| category != self.category) {
            return false;
        }

        params
            .extension
            .as_deref()
            .map_or(true, |ext| ext.eq_ignore_ascii_case(&self.extension))
    }
}

/// Filters and paging for listing records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    /// Case-insensitive substring of the original name or any tag
    pub query: Option<String>,
    /// Tags that must all be present
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: Option<FileCategory>,
    pub extension: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl SearchParams {
    /// Match everything
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: FileCategory) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    #[must_use]
    pub fn with_page(mut self, limit: usize, offset: usize) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }
}

/// Record counts of one store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreCounts {
    pub total: usize,
    pub by_category: BTreeMap<String, usize>,
    pub by_extension: BTreeMap<String, usize>,
}

impl StoreCounts {
    /// Count one record
    pub fn record(&mut self, record: &FileRecord) {
        self.total += 1;
        *self
            .by_category
            .entry(record.category.to_string())
            .or_insert(0) += 1;
        *self
            .by_extension
            .entry(record.extension.clone())
            .or_insert(0) += 1;
    }

    /// Add another store's counts to these
    pub fn absorb(&mut self, other: &StoreCounts) {
        self.total += other.total;
        for (category, count) in &other.by_category {
            *self.by_category.entry(category.clone()).or_insert(0) += count;
        }
        for (extension, count) in &other.by_extension {
            *self.by_extension.entry(extension.clone()).or_insert(0) += count;
        }
    }
}

/// Counts per store plus the combined view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    pub relational: StoreCounts,
    pub document: StoreCounts,
    pub combined: StoreCounts,
}

/// Capability to persist file records
///
/// Implementations own their connection lifecycle and are handed to the
/// rest of the application at startup.
#[async_trait]
pub trait Store: Send + Sync + std::fmt::Debug {
    /// Which store this is
    fn target(&self) -> StorageTarget;

    /// Persist a new record and return it with its id
    async fn insert(&self, record: NewFileRecord) -> Result<FileRecord>;

    /// Fetch a record by id
    async fn get(&self, id: &str) -> Result<Option<FileRecord>>;

    /// List matching records, newest first
    async fn list(&self, params: &SearchParams) -> Result<Vec<FileRecord>>;

    /// Change the displayed name of a record
    async fn rename(&self, id: &str, original_name: &str) -> Result<FileRecord>;

    /// Replace the tags of a record
    async fn set_tags(&self, id: &str, tags: Vec<String>) -> Result<FileRecord>;

    /// Replace the JSON metadata of a record
    async fn update_metadata(&self, id: &str, metadata: Value) -> Result<FileRecord>;

    /// Delete a record, returning whether it existed
    async fn delete(&self, id: &str) -> Result<bool>;

    /// Record counts
    async fn stats(&self) -> Result<StoreCounts>;
}
