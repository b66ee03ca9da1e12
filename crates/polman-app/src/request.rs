use time::OffsetDateTime;

/// One CLI command, already parsed and typed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    Add {
        policy_id: String,
        title: String,
        content: String,
        /// Falls back to the configured default library.
        library: Option<String>,
        owner: Option<String>,
        status: Option<String>,
    },
    Edit {
        policy_id: String,
        content: String,
        title: Option<String>,
    },
    Delete {
        policy_id: String,
    },
    View {
        policy_id: String,
    },
    History {
        policy_id: String,
    },
    List {
        library: Option<String>,
    },
    Revert {
        policy_id: String,
        version_number: i64,
    },
    Stats,
    Review {
        policy_id: String,
    },
    Owner {
        policy_id: String,
        owner: String,
    },
    Status {
        policy_id: String,
        status: String,
    },
    /// Uses the resolved `staleness_days` threshold.
    Scan {
        /// Evaluate staleness as of this instant instead of now.
        as_of: Option<OffsetDateTime>,
    },
    Library(LibraryRequest),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LibraryRequest {
    Create { library_id: String },
    Delete { library_id: String },
    Add { library_id: String, policy_id: String },
    Remove { library_id: String, policy_id: String },
    Show { library_id: String },
    List,
}

impl Request {
    /// Stable command name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Request::Add { .. } => "add",
            Request::Edit { .. } => "edit",
            Request::Delete { .. } => "delete",
            Request::View { .. } => "view",
            Request::History { .. } => "history",
            Request::List { .. } => "list",
            Request::Revert { .. } => "revert",
            Request::Stats => "stats",
            Request::Review { .. } => "review",
            Request::Owner { .. } => "owner",
            Request::Status { .. } => "status",
            Request::Scan { .. } => "scan",
            Request::Library(LibraryRequest::Create { .. }) => "library create",
            Request::Library(LibraryRequest::Delete { .. }) => "library delete",
            Request::Library(LibraryRequest::Add { .. }) => "library add",
            Request::Library(LibraryRequest::Remove { .. }) => "library remove",
            Request::Library(LibraryRequest::Show { .. }) => "library show",
            Request::Library(LibraryRequest::List) => "library list",
        }
    }
}
