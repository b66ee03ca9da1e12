//! Config and store bootstrap.

use anyhow::Context;
use polman_settings::{Overrides, PolmanConfigV1, ResolvedConfig};
use polman_storage::FilePolicyStore;
use tracing::debug;

/// Parse and resolve configuration. An empty `config_text` means "no config file".
pub fn load_config(config_text: &str, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let cfg = if config_text.trim().is_empty() {
        PolmanConfigV1::default()
    } else {
        polman_settings::parse_config_toml(config_text).context("parse config")?
    };
    let resolved = polman_settings::resolve_config(cfg, overrides).context("resolve config")?;
    debug!(
        store = %resolved.store_path,
        default_library = %resolved.default_library,
        staleness_days = resolved.staleness_days,
        "resolved config"
    );
    Ok(resolved)
}

/// Open (or initialize) the store file named by the resolved config.
pub fn open_store(cfg: &ResolvedConfig) -> anyhow::Result<FilePolicyStore> {
    FilePolicyStore::open(cfg.store_path.clone())
        .with_context(|| format!("open policy store {}", cfg.store_path))
}
