//! Conversion between the in-memory store and the persisted document.

use crate::error::DocumentError;
use crate::library::PolicyLibrary;
use crate::policy::Policy;
use crate::store::PolicyStore;
use polman_types::ids::SCHEMA_STORE_V1;
use polman_types::{
    ChangeKind, LibraryRecord, PolicyRecord, StoreDocument, StoredVersion, VersionRecord,
};
use time::OffsetDateTime;

impl Policy {
    pub fn to_record(&self) -> PolicyRecord {
        PolicyRecord {
            policy_id: self.policy_id.clone(),
            title: self.title.clone(),
            library: self.library.clone(),
            content: self.content.clone(),
            owner: self.owner.clone(),
            status: self.status.clone(),
            created_at: Some(self.created_at),
            last_reviewed_at: self.last_reviewed_at,
            versions: self
                .versions
                .iter()
                .cloned()
                .map(StoredVersion::Record)
                .collect(),
        }
    }

    /// Rebuild a policy from its persisted record.
    ///
    /// The current state is always taken from the last version, whatever the
    /// record's top-level fields say. Legacy content-only versions are
    /// upgraded using the record's metadata and `created_at` as their time.
    pub fn from_record(key: &str, record: PolicyRecord) -> Result<Self, DocumentError> {
        if record.policy_id != key {
            return Err(DocumentError::PolicyKeyMismatch {
                key: key.to_string(),
                policy_id: record.policy_id,
            });
        }

        let created_at = record
            .created_at
            .or_else(|| {
                record.versions.iter().find_map(|v| match v {
                    StoredVersion::Record(r) => Some(r.created_at),
                    StoredVersion::Content(_) => None,
                })
            })
            .unwrap_or(OffsetDateTime::UNIX_EPOCH);

        let upgrade = |idx: usize, content: String| VersionRecord {
            content,
            title: record.title.clone(),
            library: record.library.clone(),
            owner: record.owner.clone(),
            status: record.status.clone(),
            created_at,
            last_reviewed_at: record.last_reviewed_at,
            change: if idx == 0 {
                ChangeKind::Created
            } else {
                ChangeKind::Edited
            },
            recorded_at: created_at,
            actor: None,
        };

        let mut versions: Vec<VersionRecord> = record
            .versions
            .iter()
            .cloned()
            .enumerate()
            .map(|(idx, v)| match v {
                StoredVersion::Record(r) => r,
                StoredVersion::Content(c) => upgrade(idx, c),
            })
            .collect();
        if versions.is_empty() {
            versions.push(upgrade(0, record.content.clone()));
        }

        let last = &versions[versions.len() - 1];
        Ok(Policy {
            policy_id: record.policy_id,
            title: last.title.clone(),
            content: last.content.clone(),
            library: last.library.clone(),
            owner: last.owner.clone(),
            status: last.status.clone(),
            created_at,
            last_reviewed_at: last.last_reviewed_at,
            versions,
        })
    }
}

impl PolicyStore {
    pub fn to_document(&self) -> StoreDocument {
        StoreDocument {
            schema: Some(SCHEMA_STORE_V1.to_string()),
            policies: self
                .policies
                .iter()
                .map(|(id, p)| (id.clone(), p.to_record()))
                .collect(),
            libraries: self
                .libraries
                .iter()
                .map(|(id, l)| {
                    (
                        id.clone(),
                        LibraryRecord {
                            library_id: l.library_id().to_string(),
                            policy_ids: l.policy_ids().map(str::to_string).collect(),
                        },
                    )
                })
                .collect(),
        }
    }

    /// Rebuild a store from a persisted document.
    ///
    /// Library members that do not resolve to a stored policy are dropped.
    pub fn from_document(doc: StoreDocument) -> Result<Self, DocumentError> {
        let mut store = PolicyStore::new();

        for (key, record) in doc.policies {
            let policy = Policy::from_record(&key, record)?;
            store.policies.insert(key, policy);
        }

        for (key, record) in doc.libraries {
            if record.library_id != key {
                return Err(DocumentError::LibraryKeyMismatch {
                    key,
                    library_id: record.library_id,
                });
            }
            let mut library = PolicyLibrary::new(key.clone());
            for id in record.policy_ids {
                if store.policies.contains_key(&id) {
                    library.add(id);
                }
            }
            store.libraries.insert(key, library);
        }

        Ok(store)
    }
}
