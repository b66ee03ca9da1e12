//! Stable DTOs and IDs used across the polman workspace.
//!
//! This crate is intentionally boring:
//! - version snapshot records
//! - the persisted store document shape
//! - stable string IDs and defaults

#![forbid(unsafe_code)]

pub mod document;
pub mod ids;
pub mod snapshot;

pub use document::{LibraryRecord, PolicyRecord, StoreDocument, StoredVersion};
pub use snapshot::{ChangeKind, VersionRecord};
