use crate::model::PolmanConfigV1;
use camino::Utf8PathBuf;
use polman_types::ids::{
    DEFAULT_LIBRARY, DEFAULT_STALENESS_DAYS, DEFAULT_STORE_FILE, SCHEMA_CONFIG_V1,
};

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub store: Option<Utf8PathBuf>,
    pub actor: Option<String>,
    pub staleness_days: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub store_path: Utf8PathBuf,
    pub default_library: String,
    pub staleness_days: u32,
    pub actor: Option<String>,
}

pub fn resolve_config(cfg: PolmanConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != SCHEMA_CONFIG_V1
    {
        anyhow::bail!("unsupported config schema: {schema} (expected {SCHEMA_CONFIG_V1})");
    }

    let store_path = overrides
        .store
        .or(cfg.store.map(Utf8PathBuf::from))
        .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_STORE_FILE));

    let default_library = cfg
        .default_library
        .unwrap_or_else(|| DEFAULT_LIBRARY.to_string());
    if default_library.trim().is_empty() {
        anyhow::bail!("default_library must not be empty");
    }

    let staleness_days = overrides
        .staleness_days
        .or(cfg.staleness_days)
        .unwrap_or(DEFAULT_STALENESS_DAYS);

    let actor = overrides
        .actor
        .or(cfg.actor)
        .filter(|a| !a.trim().is_empty());

    Ok(ResolvedConfig {
        store_path,
        default_library,
        staleness_days,
        actor,
    })
}
