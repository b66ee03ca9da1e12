use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `polman.toml` schema v1.
///
/// Every field is optional; missing values fall back to built-in defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PolmanConfigV1 {
    /// Optional schema string for tooling (`polman.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Path of the JSON store file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,

    /// Home library for policies added without `--library`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_library: Option<String>,

    /// Age in days after which `scan` recommends a review.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staleness_days: Option<u32>,

    /// Actor recorded on mutations when `--actor` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
}
