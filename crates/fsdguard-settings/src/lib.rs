//! Config parsing and profile/preset resolution.
//!
//! This crate is IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{CheckConfig, FsdguardConfigV1};
pub use resolve::{DEFAULT_EXTENSIONS, Overrides, ResolvedConfig, ScanSettings};

/// Parse `fsdguard.toml` into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<FsdguardConfigV1> {
    let cfg: FsdguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config used by the engine (profile, layer graph, resolver, per-check config).
pub fn resolve_config(
    cfg: FsdguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
