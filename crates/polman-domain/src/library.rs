use indexmap::IndexSet;

/// A named grouping of policies by id.
///
/// Membership only: a library never owns the policies it lists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicyLibrary {
    library_id: String,
    policy_ids: IndexSet<String>,
}

impl PolicyLibrary {
    pub fn new<S: Into<String>>(library_id: S) -> Self {
        Self {
            library_id: library_id.into(),
            policy_ids: IndexSet::new(),
        }
    }

    pub fn library_id(&self) -> &str {
        &self.library_id
    }

    /// Returns `true` if the id was not already a member.
    pub fn add<S: Into<String>>(&mut self, policy_id: S) -> bool {
        self.policy_ids.insert(policy_id.into())
    }

    /// Returns `true` if the id was a member. Removing an absent id is a no-op.
    pub fn remove(&mut self, policy_id: &str) -> bool {
        self.policy_ids.shift_remove(policy_id)
    }

    pub fn contains(&self, policy_id: &str) -> bool {
        self.policy_ids.contains(policy_id)
    }

    /// Member ids in insertion order.
    pub fn policy_ids(&self) -> impl Iterator<Item = &str> {
        self.policy_ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.policy_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policy_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_remove_are_idempotent() {
        let mut lib = PolicyLibrary::new("hr");
        assert!(lib.add("1"));
        assert!(!lib.add("1"));
        assert_eq!(lib.len(), 1);

        assert!(lib.remove("1"));
        assert!(!lib.remove("1"));
        assert!(lib.is_empty());
    }

    #[test]
    fn removal_preserves_order_of_the_rest() {
        let mut lib = PolicyLibrary::new("ops");
        for id in ["a", "b", "c"] {
            lib.add(id);
        }
        lib.remove("b");
        assert_eq!(lib.policy_ids().collect::<Vec<_>>(), vec!["a", "c"]);
    }
}
