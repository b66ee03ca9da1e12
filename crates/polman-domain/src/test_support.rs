use crate::policy::{Attribution, NewPolicy};
use crate::store::PolicyStore;
use time::OffsetDateTime;
use time::macros::datetime;

pub const T0: OffsetDateTime = datetime!(2024-01-01 12:00 UTC);
pub const T1: OffsetDateTime = datetime!(2024-02-01 12:00 UTC);
pub const T2: OffsetDateTime = datetime!(2024-03-01 12:00 UTC);

/// Store holding one policy per `(id, library)` pair, created at `T0`.
pub fn store_with(policies: &[(&str, &str)]) -> PolicyStore {
    let mut store = PolicyStore::new();
    for (id, library) in policies {
        store
            .add_policy(
                NewPolicy::new(*id, format!("Policy {id}"), format!("content of {id}"))
                    .in_library(*library)
                    .attributed(Attribution::now().at(T0)),
            )
            .expect("add policy");
    }
    store
}
