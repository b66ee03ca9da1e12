use crate::error::{EntityKind, PolicyError};
use crate::library::PolicyLibrary;
use crate::policy::{Attribution, NewPolicy, Policy, PolicyEdit};
use crate::scan::{self, PolicyScan};
use indexmap::IndexMap;
use std::collections::BTreeMap;
use time::OffsetDateTime;

/// In-memory registry of policies and libraries.
///
/// Both maps keep insertion order. Library membership always refers to
/// existing policies: deleting a policy removes it from every library.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PolicyStore {
    pub(crate) policies: IndexMap<String, Policy>,
    pub(crate) libraries: IndexMap<String, PolicyLibrary>,
}

impl PolicyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    pub fn contains_policy(&self, policy_id: &str) -> bool {
        self.policies.contains_key(policy_id)
    }

    // ------------------------------------------------------------------
    // Policies
    // ------------------------------------------------------------------

    pub fn add_policy(&mut self, new: NewPolicy) -> Result<&Policy, PolicyError> {
        if self.policies.contains_key(&new.policy_id) {
            return Err(PolicyError::AlreadyExists {
                kind: EntityKind::Policy,
                id: new.policy_id,
            });
        }
        let policy = Policy::create(new);
        let (idx, _) = self
            .policies
            .insert_full(policy.policy_id().to_string(), policy);
        Ok(&self.policies[idx])
    }

    /// Returns the new version count.
    pub fn edit_policy(
        &mut self,
        policy_id: &str,
        edit: PolicyEdit,
        attribution: Attribution,
    ) -> Result<usize, PolicyError> {
        Ok(self.policy_mut(policy_id)?.update(edit, attribution))
    }

    pub fn mark_policy_reviewed(
        &mut self,
        policy_id: &str,
        attribution: Attribution,
    ) -> Result<usize, PolicyError> {
        Ok(self.policy_mut(policy_id)?.mark_reviewed(attribution))
    }

    pub fn change_policy_owner(
        &mut self,
        policy_id: &str,
        owner: &str,
        attribution: Attribution,
    ) -> Result<usize, PolicyError> {
        Ok(self.policy_mut(policy_id)?.change_owner(owner, attribution))
    }

    pub fn change_policy_status(
        &mut self,
        policy_id: &str,
        status: &str,
        attribution: Attribution,
    ) -> Result<usize, PolicyError> {
        Ok(self.policy_mut(policy_id)?.change_status(status, attribution))
    }

    /// Remove a policy and drop it from every library it belonged to.
    pub fn delete_policy(&mut self, policy_id: &str) -> Result<Policy, PolicyError> {
        let policy = self
            .policies
            .shift_remove(policy_id)
            .ok_or_else(|| PolicyError::policy_not_found(policy_id))?;
        for library in self.libraries.values_mut() {
            library.remove(policy_id);
        }
        Ok(policy)
    }

    pub fn view_policy(&self, policy_id: &str) -> Result<&Policy, PolicyError> {
        self.policies
            .get(policy_id)
            .ok_or_else(|| PolicyError::policy_not_found(policy_id))
    }

    /// Policies in insertion order, optionally restricted to a home library.
    ///
    /// An unknown library yields an empty list, not an error.
    pub fn list_policies(&self, library: Option<&str>) -> Vec<&Policy> {
        self.policies
            .values()
            .filter(|p| library.is_none_or(|l| p.library() == l))
            .collect()
    }

    /// Returns the new version count.
    pub fn revert_policy(
        &mut self,
        policy_id: &str,
        version_number: i64,
        attribution: Attribution,
    ) -> Result<usize, PolicyError> {
        self.policy_mut(policy_id)?
            .revert(version_number, attribution)
    }

    /// Count of policies per home library.
    pub fn library_summary(&self) -> BTreeMap<String, usize> {
        let mut summary = BTreeMap::new();
        for policy in self.policies.values() {
            *summary.entry(policy.library().to_string()).or_insert(0) += 1;
        }
        summary
    }

    /// One scan entry per policy, in insertion order.
    pub fn scan_policies(&self, staleness_days: u32, now: OffsetDateTime) -> Vec<PolicyScan> {
        self.policies
            .values()
            .map(|p| scan::scan_policy(p, staleness_days, now))
            .collect()
    }

    fn policy_mut(&mut self, policy_id: &str) -> Result<&mut Policy, PolicyError> {
        self.policies
            .get_mut(policy_id)
            .ok_or_else(|| PolicyError::policy_not_found(policy_id))
    }

    // ------------------------------------------------------------------
    // Libraries
    // ------------------------------------------------------------------

    pub fn create_library(&mut self, library_id: &str) -> Result<&PolicyLibrary, PolicyError> {
        if self.libraries.contains_key(library_id) {
            return Err(PolicyError::AlreadyExists {
                kind: EntityKind::Library,
                id: library_id.to_string(),
            });
        }
        let (idx, _) = self
            .libraries
            .insert_full(library_id.to_string(), PolicyLibrary::new(library_id));
        Ok(&self.libraries[idx])
    }

    pub fn delete_library(&mut self, library_id: &str) -> Result<PolicyLibrary, PolicyError> {
        self.libraries
            .shift_remove(library_id)
            .ok_or_else(|| PolicyError::library_not_found(library_id))
    }

    pub fn view_library(&self, library_id: &str) -> Result<&PolicyLibrary, PolicyError> {
        self.libraries
            .get(library_id)
            .ok_or_else(|| PolicyError::library_not_found(library_id))
    }

    pub fn list_libraries(&self) -> Vec<&PolicyLibrary> {
        self.libraries.values().collect()
    }

    /// Both ids must exist. Returns `true` if the policy was newly added.
    pub fn add_policy_to_library(
        &mut self,
        policy_id: &str,
        library_id: &str,
    ) -> Result<bool, PolicyError> {
        if !self.policies.contains_key(policy_id) {
            return Err(PolicyError::policy_not_found(policy_id));
        }
        let library = self
            .libraries
            .get_mut(library_id)
            .ok_or_else(|| PolicyError::library_not_found(library_id))?;
        Ok(library.add(policy_id))
    }

    /// The library must exist; removing a non-member is a no-op returning `false`.
    pub fn remove_policy_from_library(
        &mut self,
        policy_id: &str,
        library_id: &str,
    ) -> Result<bool, PolicyError> {
        let library = self
            .libraries
            .get_mut(library_id)
            .ok_or_else(|| PolicyError::library_not_found(library_id))?;
        Ok(library.remove(policy_id))
    }

    /// Member policies in membership order; ids that no longer resolve are skipped.
    pub fn list_policies_in_library(&self, library_id: &str) -> Result<Vec<&Policy>, PolicyError> {
        let library = self.view_library(library_id)?;
        Ok(library
            .policy_ids()
            .filter_map(|id| self.policies.get(id))
            .collect())
    }

    /// Ids of the libraries a policy is a member of.
    pub fn libraries_of(&self, policy_id: &str) -> Vec<&str> {
        self.libraries
            .values()
            .filter(|l| l.contains(policy_id))
            .map(PolicyLibrary::library_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{T0, T1, store_with};

    #[test]
    fn add_then_view_returns_single_version() {
        let mut store = PolicyStore::new();
        store
            .add_policy(NewPolicy::new("1", "First", "content v1"))
            .expect("add");

        let policy = store.view_policy("1").expect("view");
        assert_eq!(policy.title(), "First");
        assert_eq!(policy.content(), "content v1");
        assert_eq!(policy.version_count(), 1);
    }

    #[test]
    fn duplicate_add_leaves_existing_policy() {
        let mut store = store_with(&[("1", "default")]);
        let before = store.view_policy("1").expect("view").clone();

        let err = store
            .add_policy(NewPolicy::new("1", "Other", "other"))
            .unwrap_err();
        assert_eq!(
            err,
            PolicyError::AlreadyExists {
                kind: EntityKind::Policy,
                id: "1".to_string(),
            }
        );
        assert_eq!(store.view_policy("1").expect("view"), &before);
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let mut store = PolicyStore::new();
        let missing = PolicyError::policy_not_found("9");

        assert_eq!(store.view_policy("9").unwrap_err(), missing);
        assert_eq!(
            store
                .edit_policy("9", PolicyEdit::content("x"), Attribution::now())
                .unwrap_err(),
            missing
        );
        assert_eq!(store.delete_policy("9").unwrap_err(), missing);
        assert_eq!(
            store.revert_policy("9", 1, Attribution::now()).unwrap_err(),
            missing
        );
        assert_eq!(
            store.view_library("hr").unwrap_err(),
            PolicyError::library_not_found("hr")
        );
    }

    #[test]
    fn edit_returns_version_count() {
        let mut store = store_with(&[("1", "default")]);
        let n = store
            .edit_policy("1", PolicyEdit::content("v2"), Attribution::by("bob").at(T1))
            .expect("edit");
        assert_eq!(n, 2);
        assert_eq!(store.view_policy("1").expect("view").content(), "v2");
    }

    #[test]
    fn metadata_operations_append_versions() {
        let mut store = store_with(&[("1", "default")]);
        store
            .mark_policy_reviewed("1", Attribution::now().at(T1))
            .expect("review");
        store
            .change_policy_owner("1", "Bob", Attribution::now())
            .expect("owner");
        let n = store
            .change_policy_status("1", "Approved", Attribution::now())
            .expect("status");

        let policy = store.view_policy("1").expect("view");
        assert_eq!(n, 4);
        assert_eq!(policy.last_reviewed_at(), Some(T1));
        assert_eq!(policy.owner(), Some("Bob"));
        assert_eq!(policy.status(), Some("Approved"));
    }

    #[test]
    fn revert_via_store_returns_new_count() {
        let mut store = store_with(&[("7", "hr")]);
        store
            .edit_policy("7", PolicyEdit::content("revised"), Attribution::now())
            .expect("edit");
        let n = store.revert_policy("7", 1, Attribution::now()).expect("revert");
        assert_eq!(n, 3);
        assert_eq!(store.view_policy("7").expect("view").content(), "content of 7");
    }

    #[test]
    fn list_filters_by_home_library_in_insertion_order() {
        let store = store_with(&[("b", "hr"), ("a", "ops"), ("c", "hr")]);

        let all: Vec<&str> = store.list_policies(None).iter().map(|p| p.policy_id()).collect();
        assert_eq!(all, vec!["b", "a", "c"]);

        let hr: Vec<&str> = store
            .list_policies(Some("hr"))
            .iter()
            .map(|p| p.policy_id())
            .collect();
        assert_eq!(hr, vec!["b", "c"]);

        assert!(store.list_policies(Some("nonexistent")).is_empty());
    }

    #[test]
    fn delete_keeps_order_of_remaining_policies() {
        let mut store = store_with(&[("a", "x"), ("b", "x"), ("c", "x")]);
        store.delete_policy("b").expect("delete");
        let ids: Vec<&str> = store.list_policies(None).iter().map(|p| p.policy_id()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn summary_counts_home_libraries() {
        let store = store_with(&[("1", "hr"), ("2", "ops"), ("3", "hr")]);
        let summary = store.library_summary();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary["hr"], 2);
        assert_eq!(summary["ops"], 1);
    }

    #[test]
    fn library_lifecycle() {
        let mut store = store_with(&[("1", "default"), ("2", "default")]);
        store.create_library("core").expect("create");
        assert_eq!(
            store.create_library("core").unwrap_err(),
            PolicyError::AlreadyExists {
                kind: EntityKind::Library,
                id: "core".to_string(),
            }
        );

        assert!(store.add_policy_to_library("2", "core").expect("add"));
        assert!(store.add_policy_to_library("1", "core").expect("add"));
        assert!(!store.add_policy_to_library("1", "core").expect("add again"));

        let members: Vec<&str> = store
            .list_policies_in_library("core")
            .expect("list")
            .iter()
            .map(|p| p.policy_id())
            .collect();
        assert_eq!(members, vec!["2", "1"]);
        assert_eq!(store.libraries_of("1"), vec!["core"]);

        assert!(store.remove_policy_from_library("2", "core").expect("remove"));
        assert!(!store.remove_policy_from_library("2", "core").expect("remove again"));

        store.delete_library("core").expect("delete");
        assert!(store.list_libraries().is_empty());
        // Policies outlive their libraries.
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn library_cross_references_must_exist() {
        let mut store = store_with(&[("1", "default")]);
        store.create_library("core").expect("create");

        assert_eq!(
            store.add_policy_to_library("9", "core").unwrap_err(),
            PolicyError::policy_not_found("9")
        );
        assert_eq!(
            store.add_policy_to_library("1", "missing").unwrap_err(),
            PolicyError::library_not_found("missing")
        );
        assert_eq!(
            store.remove_policy_from_library("1", "missing").unwrap_err(),
            PolicyError::library_not_found("missing")
        );
        assert_eq!(
            store.list_policies_in_library("missing").unwrap_err(),
            PolicyError::library_not_found("missing")
        );
    }

    #[test]
    fn delete_policy_cleans_library_membership() {
        let mut store = store_with(&[("1", "default"), ("2", "default")]);
        for lib in ["a", "b"] {
            store.create_library(lib).expect("create");
            store.add_policy_to_library("1", lib).expect("add");
            store.add_policy_to_library("2", lib).expect("add");
        }

        store.delete_policy("1").expect("delete");

        for lib in ["a", "b"] {
            let library = store.view_library(lib).expect("view");
            assert!(!library.contains("1"));
            let ids: Vec<&str> = store
                .list_policies_in_library(lib)
                .expect("list")
                .iter()
                .map(|p| p.policy_id())
                .collect();
            assert_eq!(ids, vec!["2"]);
        }
    }

    #[test]
    fn scan_covers_every_policy() {
        let mut store = PolicyStore::new();
        store
            .add_policy(
                NewPolicy::new("1", "A", "a").attributed(Attribution::by("alice").at(T0)),
            )
            .expect("add");
        store
            .add_policy(NewPolicy::new("2", "B", "b").attributed(Attribution::by("bob").at(T1)))
            .expect("add");

        let scans = store.scan_policies(1, T1);
        assert_eq!(scans.len(), 2);
        assert_eq!(scans[0].policy_id, "1");
        assert!(!scans[0].is_clean());
        assert!(scans[1].is_clean());
    }
}
