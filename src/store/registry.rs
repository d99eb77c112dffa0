//! Registry holding the two injected stores

use super::memory::MemoryStore;
use super::types::{FileRecord, Store, StoreStats};
use crate::error::{Error, Result};
use crate::types::StorageTarget;
use std::sync::Arc;

/// The relational and document stores used by the application
///
/// Built once at startup and shared by handle; there is no global
/// connection state.
#[derive(Debug, Clone)]
pub struct StoreRegistry {
    relational: Arc<dyn Store>,
    document: Arc<dyn Store>,
}

impl StoreRegistry {
    /// Create a registry from two stores
    ///
    /// Each store must report the target it is registered under.
    pub fn new(relational: Arc<dyn Store>, document: Arc<dyn Store>) -> Result<Self> {
        if relational.target() != StorageTarget::Relational {
            return Err(Error::store("relational slot holds a document store"));
        }
        if document.target() != StorageTarget::Document {
            return Err(Error::store("document slot holds a relational store"));
        }
        Ok(Self {
            relational,
            document,
        })
    }

    /// Registry backed by two in-memory stores
    pub fn in_memory() -> Self {
        Self {
            relational: Arc::new(MemoryStore::new(StorageTarget::Relational)),
            document: Arc::new(MemoryStore::new(StorageTarget::Document)),
        }
    }

    /// Store for a target
    pub fn for_target(&self, target: StorageTarget) -> &Arc<dyn Store> {
        match target {
            StorageTarget::Relational => &self.relational,
            StorageTarget::Document => &self.document,
        }
    }

    /// Look a record up in either store
    pub async fn find(&self, id: &str) -> Result<Option<FileRecord>> {
        for store in [&self.relational, &self.document] {
            if let Some(record) = store.get(id).await? {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }

    /// Like [`find`](Self::find) but missing records are an error
    pub async fn require(&self, id: &str) -> Result<FileRecord> {
        self.find(id).await?.ok_or_else(|| Error::not_found(id))
    }

    /// Counts per store and combined
    pub async fn stats(&self) -> Result<StoreStats> {
        let relational = self.relational.stats().await?;
        let document = self.document.stats().await?;

        let mut combined = relational.clone();
        combined.absorb(&document);

        Ok(StoreStats {
            relational,
            document,
            combined,
        })
    }
}
