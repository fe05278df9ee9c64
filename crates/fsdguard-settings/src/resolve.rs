use crate::{model::FsdguardConfigV1, presets};
use anyhow::Context;
use fsdguard_domain::policy::{CheckPolicy, EffectiveConfig, FailOn, Scope};
use fsdguard_domain::resolve::EntryPoints;
use fsdguard_domain::{Layer, LayerGraph, LayerSet};
use fsdguard_types::Severity;
use globset::GlobBuilder;

pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "ts", "tsx", "js", "jsx", "mjs", "cjs", "mts", "cts", "vue", "svelte",
];

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub scope: Option<String>,
    pub max_findings: Option<u32>,
}

/// Which files the repository scan picks up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanSettings {
    pub extensions: Vec<String>,
    pub exclude: Vec<String>,
}

impl Default for ScanSettings {
    fn default() -> Self {
        ScanSettings {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            exclude: Vec::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
    pub scan: ScanSettings,
}

pub fn resolve_config(
    cfg: FsdguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "strict".to_string());

    let mut effective = presets::preset(&profile);

    // Scope
    if let Some(scope_s) = overrides.scope.clone().or(cfg.scope.clone()) {
        effective.scope = parse_scope(&scope_s)?;
    }

    // max findings
    if let Some(mf) = overrides.max_findings.or(cfg.max_findings) {
        effective.max_findings = mf as usize;
    }

    // layer resolution
    if let Some(root) = cfg.source_root.as_deref() {
        let root = root.trim().trim_matches('/');
        if root.is_empty() {
            anyhow::bail!("source_root must not be empty");
        }
        effective.resolver.source_root = root.to_string();
    }
    if let Some(aliases) = cfg.aliases.clone() {
        validate_aliases(&aliases)?;
        effective.resolver.aliases = aliases;
    }
    if let Some(bare) = cfg.bare_layer_imports {
        effective.resolver.bare_layer_imports = bare;
    }
    if let Some(relative) = cfg.resolve_relative {
        effective.resolver.resolve_relative = relative;
    }
    if let Some(patterns) = cfg.entry_points.as_deref() {
        effective.resolver.entry_points =
            EntryPoints::new(patterns).context("invalid entry_points glob")?;
    }

    // layer graph
    let graph = if cfg.layers.is_empty() {
        effective.graph.clone()
    } else {
        build_graph(&effective.graph, &cfg)?
    };
    effective.graph = graph.with_same_layer(cfg.allow_same_layer.unwrap_or(true));

    // per-check overrides
    for (check_id, cc) in cfg.checks.iter() {
        let entry = effective
            .checks
            .entry(check_id.clone())
            .or_insert_with(CheckPolicy::disabled);

        if let Some(enabled) = cc.enabled {
            entry.enabled = enabled;
        }
        if let Some(sev) = cc.severity.as_deref() {
            entry.severity =
                parse_severity(sev).with_context(|| format!("invalid severity for {check_id}"))?;
        }
        if !cc.allow.is_empty() {
            validate_allowlist(check_id, &cc.allow)?;
            entry.allow = cc.allow.clone();
        }
    }

    // fail_on override from config
    if let Some(fail_on_s) = cfg.fail_on.as_deref() {
        effective.fail_on = parse_fail_on(fail_on_s)?;
    }

    let mut scan = ScanSettings::default();
    if let Some(extensions) = cfg.extensions.clone() {
        scan.extensions = extensions
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_string())
            .collect();
        if scan.extensions.iter().any(|e| e.is_empty()) {
            anyhow::bail!("extensions must not contain empty entries");
        }
    }
    if !cfg.exclude.is_empty() {
        validate_allowlist("exclude", &cfg.exclude)?;
        scan.exclude = cfg.exclude.clone();
    }

    Ok(ResolvedConfig { effective, scan })
}

/// Replace the listed importers' targets, keep the rest of `base`, and re-validate.
fn build_graph(base: &LayerGraph, cfg: &FsdguardConfigV1) -> anyhow::Result<LayerGraph> {
    let mut table: Vec<(Layer, LayerSet)> = base.iter().map(|(l, s)| (l, s.clone())).collect();

    for (name, targets) in &cfg.layers {
        let layer: Layer = name
            .parse()
            .with_context(|| format!("invalid [layers] entry '{name}'"))?;
        let targets = targets
            .iter()
            .map(|t| t.parse::<Layer>())
            .collect::<Result<LayerSet, _>>()
            .with_context(|| format!("invalid target in [layers] entry '{name}'"))?;
        for (from, existing) in table.iter_mut() {
            if *from == layer {
                *existing = targets.clone();
            }
        }
    }

    LayerGraph::from_table(table).context("invalid layer graph")
}

fn validate_aliases(aliases: &[String]) -> anyhow::Result<()> {
    for alias in aliases {
        if alias.trim_end_matches('/').is_empty() {
            anyhow::bail!("aliases must not contain empty entries (got {alias:?})");
        }
    }
    Ok(())
}

fn validate_allowlist(check_id: &str, patterns: &[String]) -> anyhow::Result<()> {
    for pattern in patterns {
        GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .with_context(|| format!("invalid allow glob for {check_id}: {pattern}"))?;
    }
    Ok(())
}

fn parse_scope(v: &str) -> anyhow::Result<Scope> {
    match v {
        "repo" => Ok(Scope::Repo),
        "diff" => Ok(Scope::Diff),
        other => anyhow::bail!("unknown scope: {other} (expected 'repo' or 'diff')"),
    }
}

fn parse_severity(v: &str) -> anyhow::Result<Severity> {
    match v {
        "info" => Ok(Severity::Info),
        "warning" | "warn" => Ok(Severity::Warning),
        "error" => Ok(Severity::Error),
        other => anyhow::bail!("unknown severity: {other} (expected info|warning|error)"),
    }
}

fn parse_fail_on(v: &str) -> anyhow::Result<FailOn> {
    match v {
        "error" => Ok(FailOn::Error),
        "warning" | "warn" => Ok(FailOn::Warning),
        other => anyhow::bail!("unknown fail_on: {other} (expected error|warning)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_config_toml;
    use fsdguard_types::ids::CHECK_FSD_LAYER_IMPORTS;

    fn resolve(toml: &str) -> anyhow::Result<ResolvedConfig> {
        resolve_config(parse_config_toml(toml)?, Overrides::default())
    }

    #[test]
    fn empty_config_resolves_to_strict_defaults() {
        let resolved = resolve("").expect("resolve");
        let eff = &resolved.effective;
        assert_eq!(eff.profile, "strict");
        assert_eq!(eff.scope, Scope::Repo);
        assert_eq!(eff.fail_on, FailOn::Error);
        assert_eq!(eff.max_findings, 200);
        assert_eq!(eff.graph, LayerGraph::canonical());
        assert_eq!(eff.resolver.source_root, "src");
        let policy = eff.check_policy(CHECK_FSD_LAYER_IMPORTS).expect("policy");
        assert!(policy.enabled);
        assert_eq!(policy.severity, Severity::Error);
        assert_eq!(resolved.scan, ScanSettings::default());
    }

    #[test]
    fn overrides_win_over_file_values() {
        let cfg = parse_config_toml(
            r#"
profile = "warn"
scope = "repo"
max_findings = 10
"#,
        )
        .expect("parse");
        let resolved = resolve_config(
            cfg,
            Overrides {
                profile: Some("strict".into()),
                scope: Some("diff".into()),
                max_findings: Some(3),
            },
        )
        .expect("resolve");
        assert_eq!(resolved.effective.profile, "strict");
        assert_eq!(resolved.effective.scope, Scope::Diff);
        assert_eq!(resolved.effective.max_findings, 3);
    }

    #[test]
    fn compat_profile_warns_without_failing() {
        let resolved = resolve(r#"profile = "compat""#).expect("resolve");
        let policy = resolved
            .effective
            .check_policy(CHECK_FSD_LAYER_IMPORTS)
            .expect("policy");
        assert_eq!(policy.severity, Severity::Warning);
        assert_eq!(resolved.effective.fail_on, FailOn::Error);
    }

    #[test]
    fn resolver_keys_are_applied() {
        let resolved = resolve(
            r#"
source_root = "app/src/"
aliases = ["~", "@app"]
bare_layer_imports = false
resolve_relative = true
entry_points = ["bootstrap.ts"]
extensions = [".ts", "tsx"]
exclude = ["**/*.test.ts"]
"#,
        )
        .expect("resolve");
        let r = &resolved.effective.resolver;
        assert_eq!(r.source_root, "app/src");
        assert_eq!(r.aliases, vec!["~".to_string(), "@app".to_string()]);
        assert!(!r.bare_layer_imports);
        assert!(r.resolve_relative);
        assert!(r.entry_points.is_match("bootstrap.ts"));
        assert!(!r.entry_points.is_match("main.ts"));
        assert_eq!(resolved.scan.extensions, vec!["ts", "tsx"]);
        assert_eq!(resolved.scan.exclude, vec!["**/*.test.ts"]);
    }

    #[test]
    fn layers_table_replaces_only_listed_importers() {
        let resolved = resolve(
            r#"
[layers]
features = ["shared"]
"#,
        )
        .expect("resolve");
        let graph = &resolved.effective.graph;
        assert!(graph.permits(Layer::Features, Layer::Shared));
        assert!(!graph.permits(Layer::Features, Layer::Entities));
        // self edge is restored by allow_same_layer default
        assert!(graph.permits(Layer::Features, Layer::Features));
        assert!(graph.permits(Layer::Widgets, Layer::Entities));
    }

    #[test]
    fn upward_layer_edge_is_rejected() {
        let err = resolve(
            r#"
[layers]
shared = ["app"]
"#,
        )
        .expect_err("upward edge");
        assert!(format!("{err:#}").contains("invalid layer graph"));
    }

    #[test]
    fn unknown_layer_name_is_rejected() {
        let err = resolve(
            r#"
[layers]
processes = ["shared"]
"#,
        )
        .expect_err("unknown layer");
        assert!(format!("{err:#}").contains("processes"));
    }

    #[test]
    fn same_layer_can_be_disabled() {
        let resolved = resolve("allow_same_layer = false").expect("resolve");
        let graph = &resolved.effective.graph;
        assert!(!graph.permits(Layer::Features, Layer::Features));
        assert!(graph.permits(Layer::Features, Layer::Entities));
        assert!(!graph.permits(Layer::App, Layer::App));
    }

    #[test]
    fn check_overrides_apply() {
        let resolved = resolve(
            r#"
fail_on = "warning"

[checks."fsd.layer_imports"]
severity = "warn"
allow = ["@/app/styles/**"]
"#,
        )
        .expect("resolve");
        let policy = resolved
            .effective
            .check_policy(CHECK_FSD_LAYER_IMPORTS)
            .expect("policy");
        assert_eq!(policy.severity, Severity::Warning);
        assert_eq!(policy.allow, vec!["@/app/styles/**"]);
        assert_eq!(resolved.effective.fail_on, FailOn::Warning);
    }

    #[test]
    fn invalid_values_are_errors() {
        assert!(resolve(r#"scope = "branch""#).is_err());
        assert!(resolve(r#"fail_on = "info""#).is_err());
        assert!(resolve(r#"source_root = "/""#).is_err());
        assert!(resolve(r#"aliases = ["/"]"#).is_err());
        assert!(resolve(r#"entry_points = ["[oops"]"#).is_err());
        assert!(resolve(r#"exclude = ["[oops"]"#).is_err());
        assert!(
            resolve(
                r#"
[checks."fsd.layer_imports"]
allow = ["[oops"]
"#
            )
            .is_err()
        );
        assert!(
            resolve(
                r#"
[checks."fsd.layer_imports"]
severity = "fatal"
"#
            )
            .is_err()
        );
    }
}
