//! Fuzz target for `polman.toml` parsing and resolution.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use polman_settings::Overrides;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data)
        && let Ok(cfg) = polman_settings::parse_config_toml(text)
    {
        let _ = polman_settings::resolve_config(cfg, Overrides::default());
    }
});
