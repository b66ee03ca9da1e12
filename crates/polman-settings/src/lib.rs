//! Config parsing and resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::PolmanConfigV1;
pub use resolve::{Overrides, ResolvedConfig};

/// Parse `polman.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<PolmanConfigV1> {
    let cfg: PolmanConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective settings (config file + command line overrides + defaults).
pub fn resolve_config(cfg: PolmanConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
