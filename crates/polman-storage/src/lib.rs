//! Storage adapter: the policy store persisted as one JSON file.
//!
//! This crate is allowed to do filesystem IO. The file is rewritten wholesale after every
//! successful mutation; there is no locking and the last writer wins.

#![forbid(unsafe_code)]

mod error;
mod file;

use camino::Utf8Path;
use polman_types::StoreDocument;

pub use error::StorageError;
pub use file::FilePolicyStore;

/// Fuzz-friendly API for testing parsing robustness without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    use super::*;

    /// Parse arbitrary text as a store document and rebuild the store from it.
    ///
    /// Returns the number of policies on success. **Never panics** on any input.
    pub fn parse_store_document(text: &str) -> anyhow::Result<usize> {
        let doc: StoreDocument = serde_json::from_str(text)?;
        let store = polman_domain::PolicyStore::from_document(doc)?;
        Ok(store.len())
    }
}

/// Read and parse a store file.
pub fn read_document(path: &Utf8Path) -> Result<StoreDocument, StorageError> {
    let text = std::fs::read_to_string(path).map_err(|source| StorageError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| StorageError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Pretty JSON with a trailing newline.
pub fn serialize_document(doc: &StoreDocument) -> Result<String, StorageError> {
    let mut json = serde_json::to_string_pretty(doc).map_err(StorageError::Serialize)?;
    json.push('\n');
    Ok(json)
}

/// Overwrite a store file with the given document, creating parent directories.
pub fn write_document(path: &Utf8Path, doc: &StoreDocument) -> Result<(), StorageError> {
    let data = serialize_document(doc)?;
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| StorageError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, data).map_err(|source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    })
}
