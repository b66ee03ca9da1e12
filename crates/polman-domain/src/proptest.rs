//! Property-based tests for store invariants.

use crate::error::PolicyError;
use crate::policy::{Attribution, NewPolicy, PolicyEdit};
use crate::store::PolicyStore;
use crate::test_support::T0;
use polman_types::ChangeKind;
use ::proptest::prelude::*;
use std::collections::BTreeMap;

// ============================================================================
// Strategies
// ============================================================================

fn arb_id() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,8}"
}

fn arb_text() -> impl Strategy<Value = String> {
    ".{0,40}"
}

fn arb_library() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("hr".to_string()),
        Just("ops".to_string()),
        Just("it".to_string()),
        Just("default".to_string()),
    ]
}

fn store_with_policy(content: &str) -> PolicyStore {
    let mut store = PolicyStore::new();
    store
        .add_policy(
            NewPolicy::new("p", "Title", content).attributed(Attribution::now().at(T0)),
        )
        .expect("add policy");
    store
}

// ============================================================================
// Property tests: version history
// ============================================================================

proptest! {
    /// Creation records exactly one version holding the supplied state.
    #[test]
    fn add_then_view_has_one_version(id in arb_id(), title in arb_text(), content in arb_text()) {
        let mut store = PolicyStore::new();
        store
            .add_policy(NewPolicy::new(id.clone(), title.clone(), content.clone()))
            .expect("add policy");

        let policy = store.view_policy(&id).expect("view policy");
        prop_assert_eq!(policy.title(), title.as_str());
        prop_assert_eq!(policy.content(), content.as_str());
        prop_assert_eq!(policy.version_count(), 1);
    }

    /// N edits produce N + 1 versions; the last one holds the latest content.
    #[test]
    fn edits_grow_history_by_one(edits in prop::collection::vec(arb_text(), 0..12)) {
        let mut store = store_with_policy("initial");
        for content in &edits {
            store
                .edit_policy("p", PolicyEdit::content(content.clone()), Attribution::now())
                .expect("edit policy");
        }

        let policy = store.view_policy("p").expect("view policy");
        prop_assert_eq!(policy.version_count(), edits.len() + 1);
        let expected = edits.last().map(String::as_str).unwrap_or("initial");
        prop_assert_eq!(policy.content(), expected);
        prop_assert_eq!(policy.latest_version().content.as_str(), expected);
    }

    /// Reverting appends exactly one version and leaves earlier entries intact.
    #[test]
    fn revert_appends_exactly_one(
        edits in prop::collection::vec(arb_text(), 1..8),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut store = store_with_policy("initial");
        for content in &edits {
            store
                .edit_policy("p", PolicyEdit::content(content.clone()), Attribution::now())
                .expect("edit policy");
        }
        let before = store.view_policy("p").expect("view policy").versions().to_vec();
        let k = pick.index(before.len()) + 1;
        let requested = i64::try_from(k).expect("version fits i64");

        let first = store.revert_policy("p", requested, Attribution::now()).expect("revert");
        let second = store
            .revert_policy("p", requested, Attribution::now())
            .expect("revert again");
        prop_assert_eq!(first, before.len() + 1);
        prop_assert_eq!(second, before.len() + 2);

        let policy = store.view_policy("p").expect("view policy");
        prop_assert_eq!(&policy.versions()[..before.len()], before.as_slice());
        let restored = &before[k - 1].content;
        prop_assert_eq!(&policy.versions()[first - 1].content, restored);
        prop_assert_eq!(&policy.versions()[second - 1].content, restored);
        prop_assert_eq!(
            &policy.latest_version().change,
            &ChangeKind::Reverted { restored_from: k }
        );
    }

    /// Out-of-range reverts fail and leave the store untouched.
    #[test]
    fn revert_out_of_range_is_a_no_op(edits in 0i64..6, beyond in 1i64..4) {
        let mut store = store_with_policy("initial");
        for i in 0..edits {
            store
                .edit_policy("p", PolicyEdit::content(format!("v{i}")), Attribution::now())
                .expect("edit policy");
        }
        let before = store.clone();
        let len = edits + 1;

        for k in [-beyond, 0, len + beyond] {
            let err = store.revert_policy("p", k, Attribution::now()).unwrap_err();
            let is_range_error = matches!(err, PolicyError::VersionOutOfRange { .. });
            prop_assert!(is_range_error);
        }
        prop_assert_eq!(store, before);
    }
}

// ============================================================================
// Property tests: libraries
// ============================================================================

proptest! {
    /// The summary counts every policy once, under its home library.
    #[test]
    fn summary_matches_home_libraries(libraries in prop::collection::vec(arb_library(), 0..20)) {
        let mut store = PolicyStore::new();
        let mut expected: BTreeMap<String, usize> = BTreeMap::new();
        for (i, library) in libraries.iter().enumerate() {
            store
                .add_policy(NewPolicy::new(i.to_string(), "T", "c").in_library(library.clone()))
                .expect("add policy");
            *expected.entry(library.clone()).or_insert(0) += 1;
        }

        prop_assert_eq!(store.library_summary(), expected);
        let total: usize = store.library_summary().values().sum();
        prop_assert_eq!(total, store.len());
    }

    /// Deleting policies never leaves dangling library members.
    #[test]
    fn delete_never_leaves_dangling_members(
        count in 1usize..10,
        deletions in prop::collection::vec(any::<prop::sample::Index>(), 0..10),
    ) {
        let mut store = PolicyStore::new();
        store.create_library("all").expect("create library");
        for i in 0..count {
            let id = i.to_string();
            store.add_policy(NewPolicy::new(id.clone(), "T", "c")).expect("add policy");
            store.add_policy_to_library(&id, "all").expect("add to library");
        }

        for pick in deletions {
            let ids: Vec<String> = store
                .list_policies(None)
                .iter()
                .map(|p| p.policy_id().to_string())
                .collect();
            if ids.is_empty() {
                break;
            }
            store.delete_policy(&ids[pick.index(ids.len())]).expect("delete policy");
        }

        let library = store.view_library("all").expect("view library");
        prop_assert_eq!(library.len(), store.len());
        for id in library.policy_ids() {
            prop_assert!(store.contains_policy(id));
        }
    }
}
