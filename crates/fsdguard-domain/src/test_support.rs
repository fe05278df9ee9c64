use crate::graph::LayerGraph;
use crate::model::{ImportEdge, SourceFile, SourceModel};
use crate::policy::{CheckPolicy, EffectiveConfig, FailOn, Scope};
use crate::resolve::ResolverConfig;
use fsdguard_types::{Location, RepoPath, Severity, ids};
use std::collections::BTreeMap;

pub fn edge_at(file: &str, specifier: &str, line: u32) -> ImportEdge {
    ImportEdge {
        source_file: RepoPath::new(file),
        specifier: specifier.to_string(),
        location: Some(Location {
            path: RepoPath::new(file),
            line: Some(line),
            col: Some(1),
        }),
    }
}

pub fn source_file(path: &str, imports: Vec<ImportEdge>) -> SourceFile {
    SourceFile {
        path: RepoPath::new(path),
        imports,
    }
}

pub fn model(files: Vec<SourceFile>) -> SourceModel {
    SourceModel {
        repo_root: RepoPath::new("."),
        files,
    }
}

pub fn config(severity: Severity) -> EffectiveConfig {
    config_with_allow(severity, Vec::new())
}

pub fn config_with_allow(severity: Severity, allow: Vec<&str>) -> EffectiveConfig {
    let mut policy = CheckPolicy::enabled(severity);
    policy.allow = allow.into_iter().map(|s| s.to_string()).collect();

    let mut checks = BTreeMap::new();
    checks.insert(ids::CHECK_FSD_LAYER_IMPORTS.to_string(), policy);

    EffectiveConfig {
        profile: "test".to_string(),
        scope: Scope::Repo,
        fail_on: FailOn::Error,
        max_findings: 200,
        graph: LayerGraph::canonical(),
        resolver: ResolverConfig::default(),
        checks,
    }
}
