use crate::{StorageError, read_document, write_document};
use camino::{Utf8Path, Utf8PathBuf};
use polman_domain::{
    Attribution, NewPolicy, Policy, PolicyEdit, PolicyError, PolicyLibrary, PolicyScan,
    PolicyStore,
};
use std::collections::BTreeMap;
use time::OffsetDateTime;
use tracing::{debug, info};

/// A [`PolicyStore`] that saves its full state to a JSON file after every mutation.
///
/// A mutation that fails, whether rejected by the store or by the file write, leaves the
/// in-memory state untouched. A rejected mutation also leaves the file untouched.
#[derive(Debug)]
pub struct FilePolicyStore {
    path: Utf8PathBuf,
    store: PolicyStore,
}

impl FilePolicyStore {
    /// Load the store at `path`, or create the file with an empty document if it is missing.
    pub fn open<P: Into<Utf8PathBuf>>(path: P) -> Result<Self, StorageError> {
        let path = path.into();
        if !path.exists() {
            let fresh = Self {
                path,
                store: PolicyStore::new(),
            };
            fresh.save()?;
            info!(path = %fresh.path, "initialized empty policy store");
            return Ok(fresh);
        }

        let doc = read_document(&path)?;
        let store = PolicyStore::from_document(doc).map_err(|source| StorageError::Document {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path, policies = store.len(), "loaded policy store");
        Ok(Self { path, store })
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Read-only view of the in-memory store.
    pub fn store(&self) -> &PolicyStore {
        &self.store
    }

    pub fn into_inner(self) -> PolicyStore {
        self.store
    }

    /// Rewrite the whole file from the in-memory state.
    pub fn save(&self) -> Result<(), StorageError> {
        write_document(&self.path, &self.store.to_document())?;
        debug!(path = %self.path, policies = self.store.len(), "saved policy store");
        Ok(())
    }

    /// Apply `op` to a copy of the store and adopt the copy once it is on disk.
    fn persist<T>(
        &mut self,
        op: impl FnOnce(&mut PolicyStore) -> Result<T, PolicyError>,
    ) -> Result<T, StorageError> {
        let mut next = self.store.clone();
        let out = op(&mut next)?;
        write_document(&self.path, &next.to_document())?;
        debug!(path = %self.path, policies = next.len(), "saved policy store");
        self.store = next;
        Ok(out)
    }

    // ------------------------------------------------------------------
    // Mutations (each one saves)
    // ------------------------------------------------------------------

    pub fn add_policy(&mut self, new: NewPolicy) -> Result<&Policy, StorageError> {
        let policy_id = new.policy_id.clone();
        self.persist(|s| s.add_policy(new).map(|_| ()))?;
        Ok(self.store.view_policy(&policy_id)?)
    }

    pub fn edit_policy(
        &mut self,
        policy_id: &str,
        edit: PolicyEdit,
        attribution: Attribution,
    ) -> Result<usize, StorageError> {
        self.persist(|s| s.edit_policy(policy_id, edit, attribution))
    }

    pub fn mark_policy_reviewed(
        &mut self,
        policy_id: &str,
        attribution: Attribution,
    ) -> Result<usize, StorageError> {
        self.persist(|s| s.mark_policy_reviewed(policy_id, attribution))
    }

    pub fn change_policy_owner(
        &mut self,
        policy_id: &str,
        owner: &str,
        attribution: Attribution,
    ) -> Result<usize, StorageError> {
        self.persist(|s| s.change_policy_owner(policy_id, owner, attribution))
    }

    pub fn change_policy_status(
        &mut self,
        policy_id: &str,
        status: &str,
        attribution: Attribution,
    ) -> Result<usize, StorageError> {
        self.persist(|s| s.change_policy_status(policy_id, status, attribution))
    }

    pub fn delete_policy(&mut self, policy_id: &str) -> Result<Policy, StorageError> {
        self.persist(|s| s.delete_policy(policy_id))
    }

    pub fn revert_policy(
        &mut self,
        policy_id: &str,
        version_number: i64,
        attribution: Attribution,
    ) -> Result<usize, StorageError> {
        self.persist(|s| s.revert_policy(policy_id, version_number, attribution))
    }

    pub fn create_library(&mut self, library_id: &str) -> Result<(), StorageError> {
        self.persist(|s| s.create_library(library_id).map(|_| ()))
    }

    pub fn delete_library(&mut self, library_id: &str) -> Result<PolicyLibrary, StorageError> {
        self.persist(|s| s.delete_library(library_id))
    }

    pub fn add_policy_to_library(
        &mut self,
        policy_id: &str,
        library_id: &str,
    ) -> Result<bool, StorageError> {
        self.persist(|s| s.add_policy_to_library(policy_id, library_id))
    }

    pub fn remove_policy_from_library(
        &mut self,
        policy_id: &str,
        library_id: &str,
    ) -> Result<bool, StorageError> {
        self.persist(|s| s.remove_policy_from_library(policy_id, library_id))
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn view_policy(&self, policy_id: &str) -> Result<&Policy, StorageError> {
        Ok(self.store.view_policy(policy_id)?)
    }

    pub fn list_policies(&self, library: Option<&str>) -> Vec<&Policy> {
        self.store.list_policies(library)
    }

    pub fn view_library(&self, library_id: &str) -> Result<&PolicyLibrary, StorageError> {
        Ok(self.store.view_library(library_id)?)
    }

    pub fn list_libraries(&self) -> Vec<&PolicyLibrary> {
        self.store.list_libraries()
    }

    pub fn list_policies_in_library(&self, library_id: &str) -> Result<Vec<&Policy>, StorageError> {
        Ok(self.store.list_policies_in_library(library_id)?)
    }

    pub fn library_summary(&self) -> BTreeMap<String, usize> {
        self.store.library_summary()
    }

    pub fn scan_policies(&self, staleness_days: u32, now: OffsetDateTime) -> Vec<PolicyScan> {
        self.store.scan_policies(staleness_days, now)
    }
}
