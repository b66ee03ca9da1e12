use camino::Utf8PathBuf;
use polman_domain::{DocumentError, PolicyError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// The store rejected the operation; nothing was written.
    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error("read store file {path}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("write store file {path}")]
    Write {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse store file {path}")]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialize store document")]
    Serialize(#[source] serde_json::Error),

    #[error("invalid store file {path}")]
    Document {
        path: Utf8PathBuf,
        #[source]
        source: DocumentError,
    },
}

impl StorageError {
    /// The domain error, if the store itself rejected the operation.
    pub fn as_policy_error(&self) -> Option<&PolicyError> {
        match self {
            StorageError::Policy(err) => Some(err),
            _ => None,
        }
    }
}
