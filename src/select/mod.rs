//! Storage selection module
//!
//! Public entry point for routing files. JSON files with parsed content go
//! through the structure analyzer; everything else is routed by size, MIME
//! type and extension category.

mod category;
mod selector;

pub use category::{file_extension, format_file_size, FileCategory};
pub use selector::{
    select_store, select_store_for_batch, select_store_with_analysis, FileDescriptor,
    SelectOptions, LARGE_JSON_BYTES, MAX_RELATIONAL_DEPTH,
};

#[cfg(test)]
mod tests;
