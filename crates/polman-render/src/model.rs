use polman_types::ChangeKind;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableVersion {
    /// 1-based version number.
    pub number: usize,
    pub content: String,
    pub change: ChangeKind,
    /// Already formatted (RFC 3339).
    pub recorded_at: String,
    pub actor: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderablePolicy {
    pub policy_id: String,
    pub title: String,
    pub library: String,
    pub owner: Option<String>,
    pub status: Option<String>,
    pub content: String,
    pub last_reviewed_at: Option<String>,
    pub versions: Vec<RenderableVersion>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableListEntry {
    pub policy_id: String,
    pub title: String,
    pub library: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableStats {
    pub total: usize,
    /// Sorted by library name.
    pub libraries: Vec<(String, usize)>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableRecommendation {
    pub code: String,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableScan {
    pub policy_id: String,
    pub last_updated: String,
    pub recommendations: Vec<RenderableRecommendation>,
}

/// A named library and the policies it currently holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableLibrary {
    pub library_id: String,
    pub members: Vec<RenderableListEntry>,
}
