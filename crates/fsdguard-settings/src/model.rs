use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `fsdguard.toml` schema v1.
///
/// This is a *user-facing* config model: it is intentionally permissive so forward-compat is easy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FsdguardConfigV1 {
    /// Optional schema string for tooling (`fsdguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// When to fail the check: `error` (default) or `warning`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on: Option<String>,

    /// How many findings to emit before truncating the list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_findings: Option<u32>,

    /// Directory whose children are the layers (default `src`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_root: Option<String>,

    /// Specifier prefixes that point at the source root (default `["@", "src"]`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Vec<String>>,

    /// Judge `entities/user`-style specifiers whose first segment is a layer name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bare_layer_imports: Option<bool>,

    /// Resolve `./` and `../` imports against the importing file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolve_relative: Option<bool>,

    /// Permit imports between slices of the same layer (default `true`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_same_layer: Option<bool>,

    /// Globs (relative to the source root) for files exempt from checking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_points: Option<Vec<String>>,

    /// Source file extensions to scan, without the dot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,

    /// Repo-relative globs for files to leave out of the scan.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Per-importer override of the layer graph: layer -> permitted target layers.
    #[serde(default)]
    pub layers: BTreeMap<String, Vec<String>>,

    /// Map of check_id -> config.
    #[serde(default)]
    pub checks: BTreeMap<String, CheckConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CheckConfig {
    /// Override preset enable/disable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Override preset severity: `info`, `warning`, `error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,

    /// Specifier globs exempt from the check.
    #[serde(default)]
    pub allow: Vec<String>,
}
