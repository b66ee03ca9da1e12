//! Fuzz target for store operation sequences.
//!
//! Applies arbitrary operations to an in-memory store and checks the invariants after each one:
//! every policy has at least one version, its current content equals the last version, version
//! counts never shrink, and library members always resolve. The final state must survive a
//! document round trip unchanged.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_store_operations
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use polman_domain::{Attribution, NewPolicy, PolicyEdit, PolicyStore};

#[derive(Arbitrary, Debug)]
enum Op {
    Add { id: u8, library: u8 },
    Edit { id: u8, content: u8 },
    Delete { id: u8 },
    Revert { id: u8, version: u8 },
    Review { id: u8 },
    CreateLibrary { lib: u8 },
    DeleteLibrary { lib: u8 },
    Join { id: u8, lib: u8 },
    Leave { id: u8, lib: u8 },
}

fn id(n: u8) -> String {
    (n % 8).to_string()
}

fn lib(n: u8) -> String {
    format!("lib{}", n % 4)
}

fuzz_target!(|ops: Vec<Op>| {
    let mut store = PolicyStore::new();

    for op in ops {
        let before = store.clone();
        let result = match op {
            Op::Add { id: n, library } => store
                .add_policy(NewPolicy::new(id(n), "title", "content").in_library(lib(library)))
                .map(|_| ()),
            Op::Edit { id: n, content } => store
                .edit_policy(&id(n), PolicyEdit::content(content.to_string()), Attribution::now())
                .map(|_| ()),
            Op::Delete { id: n } => store.delete_policy(&id(n)).map(|_| ()),
            Op::Revert { id: n, version } => store
                .revert_policy(&id(n), i64::from(version % 7) - 1, Attribution::now())
                .map(|_| ()),
            Op::Review { id: n } => store
                .mark_policy_reviewed(&id(n), Attribution::now())
                .map(|_| ()),
            Op::CreateLibrary { lib: n } => store.create_library(&lib(n)).map(|_| ()),
            Op::DeleteLibrary { lib: n } => store.delete_library(&lib(n)).map(|_| ()),
            Op::Join { id: n, lib: l } => store.add_policy_to_library(&id(n), &lib(l)).map(|_| ()),
            Op::Leave { id: n, lib: l } => store
                .remove_policy_from_library(&id(n), &lib(l))
                .map(|_| ()),
        };

        if result.is_err() {
            assert_eq!(store, before, "failed operation must leave the store unchanged");
        }

        for policy in store.list_policies(None) {
            assert!(policy.version_count() >= 1);
            assert_eq!(policy.content(), policy.latest_version().content);
            if let Ok(old) = before.view_policy(policy.policy_id()) {
                assert!(policy.version_count() >= old.version_count());
            }
        }
        for library in store.list_libraries() {
            for member in library.policy_ids() {
                assert!(store.contains_policy(member), "dangling member {member}");
            }
        }
    }

    let reloaded = PolicyStore::from_document(store.to_document()).expect("round trip");
    assert_eq!(reloaded, store);
});
