use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// What produced a version record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChangeKind {
    Created,
    Edited,
    Reviewed,
    OwnerChanged,
    StatusChanged,
    /// Content restored from an earlier 1-based version number.
    Reverted { restored_from: usize },
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Created => "created",
            ChangeKind::Edited => "edited",
            ChangeKind::Reviewed => "reviewed",
            ChangeKind::OwnerChanged => "owner_changed",
            ChangeKind::StatusChanged => "status_changed",
            ChangeKind::Reverted { .. } => "reverted",
        }
    }
}

/// Immutable snapshot of a policy's full state right after one mutation.
///
/// The current fields of a policy always equal the fields of its last record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VersionRecord {
    pub content: String,
    pub title: String,
    pub library: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,

    #[schemars(with = "Option<String>")]
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub last_reviewed_at: Option<OffsetDateTime>,

    pub change: ChangeKind,

    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub recorded_at: OffsetDateTime,

    /// Who made the change, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
}
