use std::fmt;
use thiserror::Error;

/// Which kind of entity an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Policy,
    Library,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Policy => f.write_str("Policy"),
            EntityKind::Library => f.write_str("Library"),
        }
    }
}

/// Errors raised by store and policy operations.
///
/// Every operation that returns one of these has left the store unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("{kind} {id} already exists")]
    AlreadyExists { kind: EntityKind, id: String },

    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: String },

    #[error(
        "Version {requested} is out of range for policy {policy_id} (valid: 1..={available})"
    )]
    VersionOutOfRange {
        policy_id: String,
        requested: i64,
        available: usize,
    },
}

impl PolicyError {
    pub(crate) fn policy_not_found(id: &str) -> Self {
        PolicyError::NotFound {
            kind: EntityKind::Policy,
            id: id.to_string(),
        }
    }

    pub(crate) fn library_not_found(id: &str) -> Self {
        PolicyError::NotFound {
            kind: EntityKind::Library,
            id: id.to_string(),
        }
    }
}

/// Errors raised while rebuilding a store from a persisted document.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("policy stored under key {key} declares policy_id {policy_id}")]
    PolicyKeyMismatch { key: String, policy_id: String },

    #[error("library stored under key {key} declares library_id {library_id}")]
    LibraryKeyMismatch { key: String, library_id: String },
}
