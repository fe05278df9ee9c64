//! The `validate` use case: judge one import edge for an editor or linter host.

use crate::check::load_config;
use camino::Utf8Path;
use fsdguard_domain::EdgeVerdict;
use fsdguard_settings::Overrides;
use fsdguard_types::RepoPath;

#[derive(Clone, Debug)]
pub struct ValidateInput<'a> {
    pub repo_root: &'a Utf8Path,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// Importing file, absolute or relative to the repo root.
    pub file: &'a str,
    pub specifier: &'a str,
}

#[derive(Clone, Debug)]
pub struct ValidateOutput {
    /// Repo-relative path the file was judged as.
    pub file: RepoPath,
    pub verdict: EdgeVerdict,
}

impl ValidateOutput {
    /// One-line summary: `allowed`, `skipped: <reason>`, or the violation message.
    pub fn message(&self) -> String {
        match &self.verdict {
            EdgeVerdict::Allowed => "allowed".to_string(),
            EdgeVerdict::NotApplicable(reason) => format!("skipped: {reason}"),
            EdgeVerdict::Violated(v) => v.to_string(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        if self.verdict.is_violation() { 2 } else { 0 }
    }
}

pub fn run_validate(input: ValidateInput<'_>) -> anyhow::Result<ValidateOutput> {
    let resolved = load_config(input.config_text, Overrides::default())?;

    let file = repo_relative(input.repo_root, input.file);
    let verdict = fsdguard_domain::validate_import(
        file.as_str(),
        input.specifier,
        &resolved.effective.graph,
        &resolved.effective.resolver,
    );
    tracing::debug!(file = %file, specifier = input.specifier, ?verdict, "validated edge");

    Ok(ValidateOutput { file, verdict })
}

fn repo_relative(repo_root: &Utf8Path, file: &str) -> RepoPath {
    let path = Utf8Path::new(file);
    match path.strip_prefix(repo_root) {
        Ok(rel) => RepoPath::from(rel),
        Err(_) => RepoPath::new(file),
    }
}
