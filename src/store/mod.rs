//! Storage module
//!
//! File records and the capability to persist them.
//!
//! # Overview
//!
//! - `Store` - async trait every backend implements
//! - `MemoryStore` - process-local implementation
//! - `StoreRegistry` - the relational and document stores, injected at startup

mod memory;
mod registry;
mod types;

pub use memory::MemoryStore;
pub use registry::StoreRegistry;
pub use types::{
    FileRecord, NewFileRecord, RoutingAudit, SearchParams, Store, StoreCounts, StoreStats,
};
