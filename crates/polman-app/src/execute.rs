//! Request dispatch: one request, one store call (plus a save), one rendered outcome.

use crate::present;
use crate::request::{LibraryRequest, Request};
use polman_domain::{Attribution, NewPolicy, PolicyEdit};
use polman_render::{RenderableLibrary, RenderableStats};
use polman_settings::ResolvedConfig;
use polman_storage::{FilePolicyStore, StorageError};
use time::OffsetDateTime;
use tracing::{debug, info};

/// Text to print on stdout. Always newline-terminated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub stdout: String,
}

impl Outcome {
    fn line(text: String) -> Self {
        Self {
            stdout: format!("{text}\n"),
        }
    }

    fn text(stdout: String) -> Self {
        Self { stdout }
    }
}

/// Execute a request against an open store.
///
/// `now` stamps every mutation made by this request. Errors are the store's own; a rejected
/// request leaves both the store and its file unchanged.
pub fn execute(
    store: &mut FilePolicyStore,
    cfg: &ResolvedConfig,
    request: Request,
    now: OffsetDateTime,
) -> Result<Outcome, StorageError> {
    debug!(command = request.name(), store = %store.path(), "executing request");
    let attribution = || Attribution {
        actor: cfg.actor.clone(),
        at: Some(now),
    };

    let outcome = match request {
        Request::Add {
            policy_id,
            title,
            content,
            library,
            owner,
            status,
        } => {
            let new = NewPolicy {
                policy_id: policy_id.clone(),
                title,
                content,
                library: library.or_else(|| Some(cfg.default_library.clone())),
                owner,
                status,
                attribution: attribution(),
            };
            store.add_policy(new)?;
            info!(policy_id = %policy_id, "policy added");
            Outcome::line(format!("Policy {policy_id} added."))
        }
        Request::Edit {
            policy_id,
            content,
            title,
        } => {
            let edit = PolicyEdit {
                content,
                title,
                ..PolicyEdit::default()
            };
            let version = store.edit_policy(&policy_id, edit, attribution())?;
            info!(policy_id = %policy_id, version, "policy edited");
            Outcome::line(format!("Policy {policy_id} updated to version {version}."))
        }
        Request::Delete { policy_id } => {
            store.delete_policy(&policy_id)?;
            info!(policy_id = %policy_id, "policy deleted");
            Outcome::line(format!("Policy {policy_id} deleted."))
        }
        Request::View { policy_id } => {
            let policy = store.view_policy(&policy_id)?;
            Outcome::text(polman_render::render_policy(&present::policy(policy)))
        }
        Request::History { policy_id } => {
            let policy = store.view_policy(&policy_id)?;
            Outcome::text(polman_render::render_history(&present::policy(policy)))
        }
        Request::List { library } => {
            let entries: Vec<_> = store
                .list_policies(library.as_deref())
                .into_iter()
                .map(present::list_entry)
                .collect();
            Outcome::text(polman_render::render_policy_list(&entries))
        }
        Request::Revert {
            policy_id,
            version_number,
        } => {
            let version = store.revert_policy(&policy_id, version_number, attribution())?;
            info!(policy_id = %policy_id, restored_from = version_number, version, "policy reverted");
            Outcome::line(format!(
                "Policy {policy_id} reverted to version {version_number}. Current version is {version}."
            ))
        }
        Request::Stats => {
            let stats = RenderableStats {
                total: store.store().len(),
                libraries: store.library_summary().into_iter().collect(),
            };
            Outcome::text(polman_render::render_stats(&stats))
        }
        Request::Review { policy_id } => {
            let version = store.mark_policy_reviewed(&policy_id, attribution())?;
            info!(policy_id = %policy_id, version, "policy reviewed");
            Outcome::line(format!(
                "Policy {policy_id} marked reviewed (version {version})."
            ))
        }
        Request::Owner { policy_id, owner } => {
            let version = store.change_policy_owner(&policy_id, &owner, attribution())?;
            info!(policy_id = %policy_id, version, "policy owner changed");
            Outcome::line(format!(
                "Policy {policy_id} owner set to {owner} (version {version})."
            ))
        }
        Request::Status { policy_id, status } => {
            let version = store.change_policy_status(&policy_id, &status, attribution())?;
            info!(policy_id = %policy_id, version, "policy status changed");
            Outcome::line(format!(
                "Policy {policy_id} status set to {status} (version {version})."
            ))
        }
        Request::Scan { as_of } => {
            let scans: Vec<_> = store
                .scan_policies(cfg.staleness_days, as_of.unwrap_or(now))
                .iter()
                .map(present::scan)
                .collect();
            Outcome::text(polman_render::render_scan(&scans))
        }
        Request::Library(library) => execute_library(store, library)?,
    };
    Ok(outcome)
}

fn execute_library(
    store: &mut FilePolicyStore,
    request: LibraryRequest,
) -> Result<Outcome, StorageError> {
    let outcome = match request {
        LibraryRequest::Create { library_id } => {
            store.create_library(&library_id)?;
            info!(library_id = %library_id, "library created");
            Outcome::line(format!("Library {library_id} created."))
        }
        LibraryRequest::Delete { library_id } => {
            store.delete_library(&library_id)?;
            info!(library_id = %library_id, "library deleted");
            Outcome::line(format!("Library {library_id} deleted."))
        }
        LibraryRequest::Add {
            library_id,
            policy_id,
        } => {
            let inserted = store.add_policy_to_library(&policy_id, &library_id)?;
            if inserted {
                Outcome::line(format!("Policy {policy_id} added to library {library_id}."))
            } else {
                Outcome::line(format!(
                    "Policy {policy_id} is already in library {library_id}."
                ))
            }
        }
        LibraryRequest::Remove {
            library_id,
            policy_id,
        } => {
            let removed = store.remove_policy_from_library(&policy_id, &library_id)?;
            if removed {
                Outcome::line(format!(
                    "Policy {policy_id} removed from library {library_id}."
                ))
            } else {
                Outcome::line(format!("Policy {policy_id} is not in library {library_id}."))
            }
        }
        LibraryRequest::Show { library_id } => {
            let members = store
                .list_policies_in_library(&library_id)?
                .into_iter()
                .map(present::list_entry)
                .collect();
            Outcome::text(polman_render::render_library(&RenderableLibrary {
                library_id,
                members,
            }))
        }
        LibraryRequest::List => {
            let libraries: Vec<_> = store
                .list_libraries()
                .into_iter()
                .map(|l| (l.library_id().to_string(), l.len()))
                .collect();
            Outcome::text(polman_render::render_library_list(&libraries))
        }
    };
    Ok(outcome)
}
