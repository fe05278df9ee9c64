use fsdguard_domain::policy::{CheckPolicy, EffectiveConfig, FailOn, Scope};
use fsdguard_domain::{LayerGraph, ResolverConfig};
use fsdguard_types::Severity;
use std::collections::BTreeMap;

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything complex should go into repo config.
pub fn preset(profile: &str) -> EffectiveConfig {
    match profile {
        "warn" => warn_profile(),
        "compat" => compat_profile(),
        // default
        _ => strict_profile(),
    }
}

fn strict_profile() -> EffectiveConfig {
    base("strict", FailOn::Error, Severity::Error)
}

fn warn_profile() -> EffectiveConfig {
    base("warn", FailOn::Warning, Severity::Warning)
}

fn compat_profile() -> EffectiveConfig {
    // Adoption mode: violations are reported as warnings but never fail the run.
    base("compat", FailOn::Error, Severity::Warning)
}

fn base(profile: &str, fail_on: FailOn, severity: Severity) -> EffectiveConfig {
    EffectiveConfig {
        profile: profile.to_string(),
        scope: Scope::Repo,
        fail_on,
        max_findings: 200,
        graph: LayerGraph::canonical(),
        resolver: ResolverConfig::default(),
        checks: default_checks(severity),
    }
}

fn default_checks(default_severity: Severity) -> BTreeMap<String, CheckPolicy> {
    use fsdguard_types::ids::*;
    let mut m = BTreeMap::new();

    m.insert(
        CHECK_FSD_LAYER_IMPORTS.to_string(),
        CheckPolicy::enabled(default_severity),
    );

    m
}
