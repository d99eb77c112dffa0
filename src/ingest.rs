//! Upload pipeline
//!
//! Parses uploads, picks a store for each one and records the choice next
//! to the file metadata.

use crate::analyze::analyze_structure;
use crate::error::{Error, Result};
use crate::merge::{merge, MergeStrategy};
use crate::select::{
    file_extension, select_store_for_batch, select_store_with_analysis, FileCategory,
    FileDescriptor, SelectOptions,
};
use crate::store::{FileRecord, NewFileRecord, RoutingAudit, StoreRegistry};
use crate::types::StorageTarget;
use chrono::Utc;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

/// A file received from a client
#[derive(Debug, Clone, Default)]
pub struct Upload {
    pub original_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
    pub tags: Vec<String>,
}

impl Upload {
    pub fn new(
        original_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            original_name: original_name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    fn extension(&self) -> String {
        file_extension(&self.original_name)
    }
}

/// Parse upload bytes as JSON
pub fn parse_json(bytes: &[u8]) -> Result<Value> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Routes uploads to the stores of a registry
#[derive(Debug, Clone)]
pub struct Ingestor {
    registry: StoreRegistry,
    options: SelectOptions,
}

impl Ingestor {
    pub fn new(registry: StoreRegistry, options: SelectOptions) -> Self {
        Self { registry, options }
    }

    pub fn registry(&self) -> &StoreRegistry {
        &self.registry
    }

    /// Route a single upload by its own characteristics and persist it
    pub async fn ingest(&self, upload: Upload) -> Result<FileRecord> {
        let (mut record, descriptor) = prepare(upload);
        let (target, analysis) = select_store_with_analysis(&descriptor, self.options);
        record.audit = analysis.map(RoutingAudit::from_analysis);
        self.persist(record, target).await
    }

    /// Route a whole batch to one store and persist every file
    ///
    /// JSON files keep the audit of their own analysis, amended when the
    /// batch target differs from it.
    pub async fn ingest_batch(&self, uploads: Vec<Upload>) -> Result<Vec<FileRecord>> {
        let prepared: Vec<(NewFileRecord, FileDescriptor)> =
            uploads.into_iter().map(prepare).collect();
        let descriptors: Vec<FileDescriptor> =
            prepared.iter().map(|(_, d)| d.clone()).collect();
        let target = select_store_for_batch(&descriptors);
        info!(count = prepared.len(), storage = %target, "routing batch");

        let mut stored = Vec::with_capacity(prepared.len());
        for (mut record, descriptor) in prepared {
            record.audit = descriptor.content.as_ref().map(|content| {
                RoutingAudit::from_analysis(analyze_structure(content)).with_batch_target(target)
            });
            stored.push(self.persist(record, target).await?);
        }
        Ok(stored)
    }

    /// Merge the JSON content of `second` into `first`
    pub async fn merge_records(
        &self,
        first_id: &str,
        second_id: &str,
        strategy: MergeStrategy,
    ) -> Result<FileRecord> {
        let first = self.registry.require(first_id).await?;
        let second = self.registry.require(second_id).await?;

        for record in [&first, &second] {
            if !record.is_json() {
                return Err(Error::not_json(&record.id));
            }
        }

        let merged = merge(&first.metadata, &second.metadata, strategy);
        info!(first = first_id, second = second_id, %strategy, "merged records");

        self.registry
            .for_target(first.storage)
            .update_metadata(first_id, merged)
            .await
    }

    async fn persist(&self, record: NewFileRecord, target: StorageTarget) -> Result<FileRecord> {
        let stored = self.registry.for_target(target).insert(record).await?;
        debug!(id = %stored.id, name = %stored.original_name, storage = %target, "stored file");
        Ok(stored)
    }
}

/// Build the record and the selector input for an upload
fn prepare(upload: Upload) -> (NewFileRecord, FileDescriptor) {
    let extension = upload.extension();
    let category = FileCategory::from_extension(&extension);
    let size_bytes = upload.bytes.len() as u64;

    let content = if extension == "json" {
        match parse_json(&upload.bytes) {
            Ok(content) => Some(content).filter(|content| !content.is_null()),
            Err(e) => {
                warn!(name = %upload.original_name, "Failed to parse JSON upload: {e}");
                None
            }
        }
    } else {
        None
    };

    let filename = format!(
        "{}-{}",
        Utc::now().timestamp_millis(),
        upload.original_name.replace(['/', '\\'], "_")
    );

    let descriptor = FileDescriptor {
        filename: filename.clone(),
        size_bytes,
        mime_type: upload.mime_type.clone(),
        content: content.clone(),
    };

    let record = NewFileRecord {
        filename,
        original_name: upload.original_name,
        size_bytes,
        mime_type: upload.mime_type,
        extension,
        category,
        tags: upload.tags,
        metadata: content.unwrap_or_else(|| json!({})),
        audit: None,
    };

    (record, descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::FileCategory;

    fn ingestor() -> Ingestor {
        Ingestor::new(StoreRegistry::in_memory(), SelectOptions::default())
    }

    #[test]
    fn test_parse_json_error() {
        let err = parse_json(b"{not json").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert!(err.to_string().starts_with("Failed to parse JSON"));
    }

    #[tokio::test]
    async fn test_ingest_uniform_json_goes_relational_with_audit() {
        let upload = Upload::new(
            "users.json",
            "application/json",
            br#"[{"id": 1, "name": "a"}, {"id": 2, "name": "b"}]"#.to_vec(),
        )
        .with_tags(vec!["people".to_string()]);

        let record = ingestor().ingest(upload).await.unwrap();

        assert_eq!(record.storage, StorageTarget::Relational);
        assert_eq!(record.category, FileCategory::Data);
        assert_eq!(record.extension, "json");
        assert_eq!(record.tags, vec!["people"]);
        assert!(record.filename.ends_with("-users.json"));
        let audit = record.audit.unwrap();
        assert_eq!(audit.recommended_storage, StorageTarget::Relational);
        assert_eq!(audit.confidence, 100.0);
        assert!(audit.reasoning[0].ends_with("relational store selected"));
    }

    #[tokio::test]
    async fn test_ingest_divergent_json_goes_document() {
        let upload = Upload::new(
            "events.json",
            "application/json",
            br#"[{"a": 1}, {"b": 2}, {"c": 3}]"#.to_vec(),
        );

        let record = ingestor().ingest(upload).await.unwrap();
        assert_eq!(record.storage, StorageTarget::Document);
        assert_eq!(record.metadata[0]["a"], 1);
    }

    #[tokio::test]
    async fn test_ingest_invalid_json_falls_back_to_category() {
        let upload = Upload::new("broken.json", "application/json", b"{oops".to_vec());

        let record = ingestor().ingest(upload).await.unwrap();
        assert_eq!(record.storage, StorageTarget::Document);
        assert_eq!(record.metadata, json!({}));
        assert!(record.audit.is_none());
    }

    #[tokio::test]
    async fn test_ingest_image_goes_relational() {
        let upload = Upload::new("photo.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF]);

        let record = ingestor().ingest(upload).await.unwrap();
        assert_eq!(record.storage, StorageTarget::Relational);
        assert_eq!(record.size_bytes, 3);
        assert_eq!(record.category, FileCategory::Images);
    }

    #[tokio::test]
    async fn test_ingest_batch_uses_one_store() {
        let uploads = vec![
            Upload::new("a.json", "application/json", b"[{\"a\": 1}]".to_vec()),
            Upload::new("b.xml", "application/xml", b"<b/>".to_vec()),
            Upload::new("c.png", "image/png", vec![1, 2]),
        ];

        let ingestor = ingestor();
        let records = ingestor.ingest_batch(uploads).await.unwrap();

        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.storage == StorageTarget::Document));
        let stats = ingestor.registry().stats().await.unwrap();
        assert_eq!(stats.document.total, 3);
        assert_eq!(stats.relational.total, 0);
    }

    #[tokio::test]
    async fn test_batch_audit_follows_batch_target() {
        let uploads = vec![
            Upload::new(
                "events.json",
                "application/json",
                br#"[{"a": 1}, {"b": 2}, {"c": 3}]"#.to_vec(),
            ),
            Upload::new("a.png", "image/png", vec![1]),
            Upload::new("b.png", "image/png", vec![2]),
        ];

        let records = ingestor().ingest_batch(uploads).await.unwrap();
        let events = &records[0];
        assert_eq!(events.storage, StorageTarget::Relational);

        let audit = events.audit.as_ref().unwrap();
        assert_eq!(audit.recommended_storage, events.storage);
        assert_eq!(
            audit.reasoning[0],
            "Batch upload routed to the relational store; structure analysis alone recommended the document store"
        );
        assert!(audit.reasoning[1].ends_with("document store selected"));
        assert!(records[1].audit.is_none());
    }

    #[tokio::test]
    async fn test_batch_audit_unchanged_when_targets_agree() {
        let uploads = vec![
            Upload::new(
                "events.json",
                "application/json",
                br#"[{"a": 1}, {"b": 2}]"#.to_vec(),
            ),
            Upload::new("c.xml", "application/xml", b"<c/>".to_vec()),
        ];

        let records = ingestor().ingest_batch(uploads).await.unwrap();
        let audit = records[0].audit.as_ref().unwrap();

        assert_eq!(records[0].storage, StorageTarget::Document);
        assert_eq!(audit.recommended_storage, StorageTarget::Document);
        assert!(audit.reasoning[0].ends_with("document store selected"));
    }

    #[tokio::test]
    async fn test_merge_records_updates_first() {
        let ingestor = ingestor();
        let first = ingestor
            .ingest(Upload::new(
                "a.json",
                "application/json",
                br#"{"x": 1}"#.to_vec(),
            ))
            .await
            .unwrap();
        let second = ingestor
            .ingest(Upload::new(
                "b.json",
                "application/json",
                br#"{"y": 2}"#.to_vec(),
            ))
            .await
            .unwrap();

        let merged = ingestor
            .merge_records(&first.id, &second.id, MergeStrategy::Shallow)
            .await
            .unwrap();

        assert_eq!(merged.id, first.id);
        assert_eq!(merged.metadata, json!({"x": 1, "y": 2}));
        let stored = ingestor.registry().require(&first.id).await.unwrap();
        assert_eq!(stored.metadata, merged.metadata);
    }

    #[tokio::test]
    async fn test_merge_records_rejects_non_json() {
        let ingestor = ingestor();
        let json_record = ingestor
            .ingest(Upload::new("a.json", "application/json", b"{}".to_vec()))
            .await
            .unwrap();
        let image = ingestor
            .ingest(Upload::new("b.png", "image/png", vec![1]))
            .await
            .unwrap();

        let err = ingestor
            .merge_records(&json_record.id, &image.id, MergeStrategy::Deep)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotJson { id } if id == image.id));

        let missing = ingestor
            .merge_records("nope", &image.id, MergeStrategy::Deep)
            .await
            .unwrap_err();
        assert!(matches!(missing, Error::RecordNotFound { .. }));
    }
}
