use crate::error::PolicyError;
use polman_types::ids::DEFAULT_LIBRARY;
use polman_types::{ChangeKind, VersionRecord};
use time::OffsetDateTime;

/// Who performed a mutation and when.
///
/// `at` defaults to the current UTC time when the change is applied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attribution {
    pub actor: Option<String>,
    pub at: Option<OffsetDateTime>,
}

impl Attribution {
    /// Anonymous change at the current time.
    pub fn now() -> Self {
        Self::default()
    }

    pub fn by<S: Into<String>>(actor: S) -> Self {
        Self {
            actor: Some(actor.into()),
            at: None,
        }
    }

    pub fn at(mut self, at: OffsetDateTime) -> Self {
        self.at = Some(at);
        self
    }

    fn resolve(self) -> (Option<String>, OffsetDateTime) {
        let at = self.at.unwrap_or_else(OffsetDateTime::now_utc);
        (self.actor, at)
    }
}

/// Input for creating a policy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPolicy {
    pub policy_id: String,
    pub title: String,
    pub content: String,
    /// Home library; `None` means [`DEFAULT_LIBRARY`].
    pub library: Option<String>,
    pub owner: Option<String>,
    pub status: Option<String>,
    /// The attribution time becomes `created_at`.
    pub attribution: Attribution,
}

impl NewPolicy {
    pub fn new<I, T, C>(policy_id: I, title: T, content: C) -> Self
    where
        I: Into<String>,
        T: Into<String>,
        C: Into<String>,
    {
        Self {
            policy_id: policy_id.into(),
            title: title.into(),
            content: content.into(),
            library: None,
            owner: None,
            status: None,
            attribution: Attribution::now(),
        }
    }

    pub fn in_library<S: Into<String>>(mut self, library: S) -> Self {
        self.library = Some(library.into());
        self
    }

    pub fn owned_by<S: Into<String>>(mut self, owner: S) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_status<S: Into<String>>(mut self, status: S) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn attributed(mut self, attribution: Attribution) -> Self {
        self.attribution = attribution;
        self
    }
}

/// Input for editing a policy. Unset metadata keeps its prior value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PolicyEdit {
    pub content: String,
    pub title: Option<String>,
    pub library: Option<String>,
    pub owner: Option<String>,
    pub status: Option<String>,
}

impl PolicyEdit {
    pub fn content<S: Into<String>>(content: S) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }
}

/// A versioned policy document.
///
/// `versions` is never empty and only grows; the current fields always equal
/// the fields of the last version record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Policy {
    pub(crate) policy_id: String,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) library: String,
    pub(crate) owner: Option<String>,
    pub(crate) status: Option<String>,
    pub(crate) created_at: OffsetDateTime,
    pub(crate) last_reviewed_at: Option<OffsetDateTime>,
    pub(crate) versions: Vec<VersionRecord>,
}

impl Policy {
    /// Create a policy with its first version recorded.
    pub fn create(new: NewPolicy) -> Self {
        let (actor, at) = new.attribution.resolve();
        let mut policy = Policy {
            policy_id: new.policy_id,
            title: new.title,
            content: new.content,
            library: new.library.unwrap_or_else(|| DEFAULT_LIBRARY.to_string()),
            owner: new.owner,
            status: new.status,
            created_at: at,
            last_reviewed_at: None,
            versions: Vec::new(),
        };
        policy.record(ChangeKind::Created, actor, at);
        policy
    }

    /// Replace the content (and any supplied metadata). Returns the new version count.
    pub fn update(&mut self, edit: PolicyEdit, attribution: Attribution) -> usize {
        let (actor, at) = attribution.resolve();
        self.content = edit.content;
        if let Some(title) = edit.title {
            self.title = title;
        }
        if let Some(library) = edit.library {
            self.library = library;
        }
        if let Some(owner) = edit.owner {
            self.owner = Some(owner);
        }
        if let Some(status) = edit.status {
            self.status = Some(status);
        }
        self.record(ChangeKind::Edited, actor, at)
    }

    pub fn mark_reviewed(&mut self, attribution: Attribution) -> usize {
        let (actor, at) = attribution.resolve();
        self.last_reviewed_at = Some(at);
        self.record(ChangeKind::Reviewed, actor, at)
    }

    pub fn change_owner<S: Into<String>>(&mut self, owner: S, attribution: Attribution) -> usize {
        let (actor, at) = attribution.resolve();
        self.owner = Some(owner.into());
        self.record(ChangeKind::OwnerChanged, actor, at)
    }

    pub fn change_status<S: Into<String>>(&mut self, status: S, attribution: Attribution) -> usize {
        let (actor, at) = attribution.resolve();
        self.status = Some(status.into());
        self.record(ChangeKind::StatusChanged, actor, at)
    }

    /// Restore the content of a 1-based version as a new version.
    ///
    /// History is never truncated: on success the version count grows by one.
    pub fn revert(
        &mut self,
        version_number: i64,
        attribution: Attribution,
    ) -> Result<usize, PolicyError> {
        let (restored_from, restored) = usize::try_from(version_number)
            .ok()
            .and_then(|n| {
                let version = self.versions.get(n.checked_sub(1)?)?;
                Some((n, version.content.clone()))
            })
            .ok_or_else(|| PolicyError::VersionOutOfRange {
                policy_id: self.policy_id.clone(),
                requested: version_number,
                available: self.versions.len(),
            })?;

        let (actor, at) = attribution.resolve();
        self.content = restored;
        Ok(self.record(
            ChangeKind::Reverted { restored_from },
            actor,
            at,
        ))
    }

    pub fn policy_id(&self) -> &str {
        &self.policy_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn library(&self) -> &str {
        &self.library
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    pub fn last_reviewed_at(&self) -> Option<OffsetDateTime> {
        self.last_reviewed_at
    }

    pub fn versions(&self) -> &[VersionRecord] {
        &self.versions
    }

    pub fn version_count(&self) -> usize {
        self.versions.len()
    }

    pub fn latest_version(&self) -> &VersionRecord {
        &self.versions[self.versions.len() - 1]
    }

    /// Time of the most recent mutation.
    pub fn last_updated(&self) -> OffsetDateTime {
        self.latest_version().recorded_at
    }

    fn record(&mut self, change: ChangeKind, actor: Option<String>, at: OffsetDateTime) -> usize {
        let snapshot = VersionRecord {
            content: self.content.clone(),
            title: self.title.clone(),
            library: self.library.clone(),
            owner: self.owner.clone(),
            status: self.status.clone(),
            created_at: self.created_at,
            last_reviewed_at: self.last_reviewed_at,
            change,
            recorded_at: at,
            actor,
        };
        self.versions.push(snapshot);
        self.versions.len()
    }
}
