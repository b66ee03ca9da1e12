//! Stable identifiers and defaults.

// Schemas
pub const SCHEMA_STORE_V1: &str = "polman.store.v1";
pub const SCHEMA_CONFIG_V1: &str = "polman.config.v1";

// Defaults
pub const DEFAULT_LIBRARY: &str = "default";
pub const DEFAULT_STORE_FILE: &str = "policies.json";
pub const DEFAULT_CONFIG_FILE: &str = "polman.toml";
pub const DEFAULT_STALENESS_DAYS: u32 = 180;

// Scan recommendation codes
pub const CODE_STALE_POLICY: &str = "stale_policy";
pub const CODE_MISSING_ACTOR: &str = "missing_actor";
