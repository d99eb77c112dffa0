//! In-memory store implementation

use super::types::{FileRecord, NewFileRecord, SearchParams, Store, StoreCounts};
use crate::error::{Error, Result};
use crate::types::StorageTarget;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Store keeping records in a process-local map
///
/// Records are keyed by id and carry their insertion sequence number, which
/// orders listings.
#[derive(Debug)]
pub struct MemoryStore {
    target: StorageTarget,
    records: Arc<RwLock<HashMap<String, (u64, FileRecord)>>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    /// Create an empty store acting as `target`
    pub fn new(target: StorageTarget) -> Self {
        Self {
            target,
            records: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicU64::new(1),
        }
    }

    fn mint_id(&self) -> (u64, String) {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        (n, format!("{}-{n}", self.target.id_prefix()))
    }

    /// Apply `change` to a record and bump its update time
    async fn modify<F>(&self, id: &str, change: F) -> Result<FileRecord>
    where
        F: FnOnce(&mut FileRecord) + Send,
    {
        let mut records = self.records.write().await;
        let (_, record) = records.get_mut(id).ok_or_else(|| Error::not_found(id))?;
        change(record);
        record.updated_at = Utc::now();
        Ok(record.clone())
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn target(&self) -> StorageTarget {
        self.target
    }

    async fn insert(&self, record: NewFileRecord) -> Result<FileRecord> {
        let (seq, id) = self.mint_id();
        let stored = FileRecord::from_new(id, self.target, record, Utc::now());
        self.records
            .write()
            .await
            .insert(stored.id.clone(), (seq, stored.clone()));
        Ok(stored)
    }

    async fn get(&self, id: &str) -> Result<Option<FileRecord>> {
        Ok(self
            .records
            .read()
            .await
            .get(id)
            .map(|(_, record)| record.clone()))
    }

    async fn list(&self, params: &SearchParams) -> Result<Vec<FileRecord>> {
        let records = self.records.read().await;
        let mut matching: Vec<&(u64, FileRecord)> = records
            .values()
            .filter(|(_, record)| record.matches(params))
            .collect();
        matching.sort_by(|a, b| b.0.cmp(&a.0));

        Ok(matching
            .into_iter()
            .skip(params.offset.unwrap_or(0))
            .take(params.limit.unwrap_or(usize::MAX))
            .map(|(_, record)| record.clone())
            .collect())
    }

    async fn rename(&self, id: &str, original_name: &str) -> Result<FileRecord> {
        let name = original_name.to_string();
        self.modify(id, move |record| record.original_name = name)
            .await
    }

    async fn set_tags(&self, id: &str, tags: Vec<String>) -> Result<FileRecord> {
        self.modify(id, move |record| record.tags = tags).await
    }

    async fn update_metadata(&self, id: &str, metadata: Value) -> Result<FileRecord> {
        self.modify(id, move |record| record.metadata = metadata)
            .await
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.records.write().await.remove(id).is_some())
    }

    async fn stats(&self) -> Result<StoreCounts> {
        let mut counts = StoreCounts::default();
        for (_, record) in self.records.read().await.values() {
            counts.record(record);
        }
        Ok(counts)
    }
}
