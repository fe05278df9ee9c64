//! The `check` use case: scan the repo, evaluate layer imports, produce a report.

use anyhow::Context;
use camino::Utf8Path;
use fsdguard_domain::is_under_source_root;
use fsdguard_domain::policy::Scope as DomainScope;
use fsdguard_repo::{ScanOptions, ScopeInput};
use fsdguard_settings::{Overrides, ResolvedConfig};
use fsdguard_types::{FsdguardReport, RepoPath, ReportEnvelope, SCHEMA_REPORT_V1, ToolMeta, Verdict};
use time::OffsetDateTime;

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Repository root path.
    pub repo_root: &'a Utf8Path,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
    /// For diff scope: list of changed files (relative to repo root).
    pub changed_files: Option<Vec<RepoPath>>,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    /// The generated report.
    pub report: FsdguardReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
    /// Scanned files that sit below the source-root marker somewhere in their path.
    pub files_in_layer_tree: usize,
}

/// Run the check use case: parse config, discover sources, evaluate policy, produce report.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let resolved = load_config(input.config_text, input.overrides)?;
    run_check_resolved(input.repo_root, resolved, input.changed_files)
}

/// Same as [`run_check`], for callers that already resolved the config.
pub fn run_check_resolved(
    repo_root: &Utf8Path,
    resolved: ResolvedConfig,
    changed_files: Option<Vec<RepoPath>>,
) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    let scope_input = match resolved.effective.scope {
        DomainScope::Repo => ScopeInput::Repo,
        DomainScope::Diff => {
            let changed_files = changed_files.context("diff scope requires changed_files")?;
            ScopeInput::Diff { changed_files }
        }
    };

    let options = ScanOptions {
        extensions: resolved.scan.extensions.clone(),
        exclude: resolved.scan.exclude.clone(),
    };
    let model = fsdguard_repo::build_source_model(repo_root, &options, scope_input)
        .context("build source model")?;

    let resolver = &resolved.effective.resolver;
    let files_in_layer_tree = model
        .files
        .iter()
        .filter(|f| is_under_source_root(f.path.as_str(), resolver))
        .count();
    if files_in_layer_tree == 0 {
        tracing::warn!(
            source_root = %resolver.source_root,
            "no scanned file lies under the source root"
        );
    }

    let domain_report = fsdguard_domain::evaluate(&model, &resolved.effective);
    tracing::info!(
        profile = %resolved.effective.profile,
        scope = resolved.effective.scope.as_str(),
        files = domain_report.data.files_scanned,
        imports = domain_report.data.imports_scanned,
        errors = domain_report.counts.error,
        warnings = domain_report.counts.warning,
        verdict = ?domain_report.verdict,
        "layer import check finished"
    );

    let finished_at = OffsetDateTime::now_utc();

    let report = ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at,
        finished_at,
        verdict: domain_report.verdict,
        findings: domain_report.findings,
        data: domain_report.data,
    };

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
        files_in_layer_tree,
    })
}

/// Parse and resolve config text; empty text means defaults.
pub fn load_config(config_text: &str, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let cfg = if config_text.trim().is_empty() {
        fsdguard_settings::FsdguardConfigV1::default()
    } else {
        fsdguard_settings::parse_config_toml(config_text).context("parse config")?
    };

    fsdguard_settings::resolve_config(cfg, overrides).context("resolve config")
}

pub(crate) fn tool_meta() -> ToolMeta {
    ToolMeta {
        name: "fsdguard".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// Map verdict to exit code: 0 = pass/warn, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Warn => 0,
        Verdict::Fail => 2,
    }
}
