//! Store selection for single files and batches

use super::category::{file_extension, FileCategory};
use crate::analyze::{analyze_structure, nesting_depth, render_summary, StructureAnalysis};
use crate::types::StorageTarget;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

/// JSON content above this size goes straight to the document store
pub const LARGE_JSON_BYTES: u64 = 1024 * 1024;
/// Content nested deeper than this goes to the document store
pub const MAX_RELATIONAL_DEPTH: usize = 3;

/// Description of an incoming file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptor {
    pub filename: String,
    pub size_bytes: u64,
    pub mime_type: String,
    /// Parsed content, when the caller has it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
}

impl FileDescriptor {
    /// Create a descriptor without content
    pub fn new(filename: impl Into<String>, size_bytes: u64, mime_type: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            size_bytes,
            mime_type: mime_type.into(),
            content: None,
        }
    }

    /// Attach parsed content
    #[must_use]
    pub fn with_content(mut self, content: Value) -> Self {
        self.content = Some(content);
        self
    }

    /// Lowercase extension of the file name
    pub fn extension(&self) -> String {
        file_extension(&self.filename)
    }

    /// Category derived from the extension
    pub fn category(&self) -> FileCategory {
        FileCategory::of_filename(&self.filename)
    }

    /// Content, unless absent or `null`
    fn provided_content(&self) -> Option<&Value> {
        self.content.as_ref().filter(|value| !value.is_null())
    }
}

/// Options for [`select_store`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOptions {
    /// Log the full analysis summary for JSON content
    #[serde(default)]
    pub log_analysis: bool,
}

/// Choose the store a file's metadata should be persisted in
pub fn select_store(file: &FileDescriptor, options: SelectOptions) -> StorageTarget {
    select_store_with_analysis(file, options).0
}

/// Like [`select_store`], also returning the structure analysis that made
/// the choice when the file was routed by its JSON content
pub fn select_store_with_analysis(
    file: &FileDescriptor,
    options: SelectOptions,
) -> (StorageTarget, Option<StructureAnalysis>) {
    let extension = file.extension();
    let category = FileCategory::from_extension(&extension);

    if extension == "json" {
        if let Some(content) = file.provided_content() {
            let analysis = analyze_structure(content);
            if options.log_analysis {
                info!("{}\n{}", file.filename, render_summary(&analysis));
            }
            debug!(
                file = %file.filename,
                storage = %analysis.recommended_storage,
                confidence = analysis.confidence,
                "structure analysis selected store"
            );
            return (analysis.recommended_storage, Some(analysis));
        }
    }

    let target = if file.mime_type.contains("json") && file.size_bytes > LARGE_JSON_BYTES {
        StorageTarget::Document
    } else if file
        .provided_content()
        .filter(|content| content.is_object() || content.is_array())
        .is_some_and(|content| nesting_depth(content) > MAX_RELATIONAL_DEPTH)
    {
        StorageTarget::Document
    } else if category == FileCategory::Data {
        StorageTarget::Document
    } else {
        // Media and everything else
        StorageTarget::Relational
    };

    debug!(
        file = %file.filename,
        category = %category,
        storage = %target,
        "heuristics selected store"
    );
    (target, None)
}

/// Choose one store for a whole batch of files
///
/// A Data majority goes to the document store; everything else, including
/// single-category media batches, goes to the relational store.
pub fn select_store_for_batch(files: &[FileDescriptor]) -> StorageTarget {
    let categories: Vec<FileCategory> = files.iter().map(FileDescriptor::category).collect();

    let data_files = categories
        .iter()
        .filter(|category| **category == FileCategory::Data)
        .count();
    if data_files * 2 > files.len() {
        return StorageTarget::Document;
    }

    let first = categories.first().copied();
    let uniform = categories.iter().all(|category| Some(*category) == first);
    if uniform && first.is_some_and(|category| category.is_media()) {
        debug!(count = files.len(), "uniform media batch");
        return StorageTarget::Relational;
    }

    StorageTarget::Relational
}
