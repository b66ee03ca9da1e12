//! Fuzz target for persisted store parsing and rehydration.
//!
//! Goal: loading a store file should **never panic** on any input.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_store_document
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = polman_storage::fuzz::parse_store_document(text);
    }
});
