//! The persisted store document.
//!
//! Shape: `{"schema", "policies": {<id>: PolicyRecord}, "libraries": {<id>: LibraryRecord}}`.
//! Only `policies` is required on read so that older files holding plain
//! content strings as versions still load.

use crate::ids::{DEFAULT_LIBRARY, SCHEMA_STORE_V1};
use crate::snapshot::VersionRecord;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StoreDocument {
    /// Optional schema string (`polman.store.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Policies keyed by id, in insertion order.
    #[serde(default)]
    pub policies: IndexMap<String, PolicyRecord>,

    /// Named libraries keyed by id, in insertion order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub libraries: IndexMap<String, LibraryRecord>,
}

impl StoreDocument {
    /// An empty document stamped with the current schema id.
    pub fn new() -> Self {
        Self {
            schema: Some(SCHEMA_STORE_V1.to_string()),
            policies: IndexMap::new(),
            libraries: IndexMap::new(),
        }
    }
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyRecord {
    pub policy_id: String,
    pub title: String,
    #[serde(default = "default_library")]
    pub library: String,
    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[schemars(with = "Option<String>")]
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub created_at: Option<OffsetDateTime>,

    #[schemars(with = "Option<String>")]
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub last_reviewed_at: Option<OffsetDateTime>,

    #[serde(default)]
    pub versions: Vec<StoredVersion>,
}

/// One entry of a persisted version list.
///
/// Current writers always emit `Record`; `Content` is the legacy shape where
/// only the text of each version was kept.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum StoredVersion {
    Record(VersionRecord),
    Content(String),
}

impl StoredVersion {
    pub fn content(&self) -> &str {
        match self {
            StoredVersion::Record(r) => &r.content,
            StoredVersion::Content(c) => c,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LibraryRecord {
    pub library_id: String,
    #[serde(default)]
    pub policy_ids: Vec<String>,
}

fn default_library() -> String {
    DEFAULT_LIBRARY.to_string()
}
