//! Repository adapters: discover source files, read them, and extract import edges.
//!
//! This crate is allowed to do filesystem IO. It should not spawn external processes;
//! diff scoping should be supplied as a list of changed paths by the caller (typically the CLI).

#![forbid(unsafe_code)]

mod discover;
mod parse;

use anyhow::Context;
use camino::Utf8Path;
use fsdguard_domain::model::{SourceFile, SourceModel};
use fsdguard_types::RepoPath;
use rayon::prelude::*;
use std::collections::BTreeSet;

pub use discover::discover_sources;

/// Fuzz-friendly API for testing parsing robustness without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    use super::*;

    /// Extract import specifiers from arbitrary text. **Never panics** on any input.
    pub fn extract_specifiers(text: &str) -> Vec<String> {
        parse::parse_source(&RepoPath::new("src/fuzz.ts"), text)
            .into_iter()
            .map(|e| e.specifier)
            .collect()
    }

    /// Blank out comments and literal contents in arbitrary text. **Never panics** on any input.
    pub fn mask_source(text: &str) -> String {
        parse::mask_source(text)
    }
}

/// Which files the scan picks up.
#[derive(Clone, Debug)]
pub struct ScanOptions {
    /// Extensions without the leading dot.
    pub extensions: Vec<String>,
    /// Repo-relative globs for files to leave out.
    pub exclude: Vec<String>,
}

/// Input to scope selection. In `Diff`, the caller provides the changed files (from git).
#[derive(Clone, Debug)]
pub enum ScopeInput {
    Repo,
    Diff { changed_files: Vec<RepoPath> },
}

/// Build the in-memory source model used by the policy engine.
///
/// Files are read and parsed in parallel; the model lists them sorted by path.
/// Files that are not valid UTF-8 are skipped with a warning.
pub fn build_source_model(
    repo_root: &Utf8Path,
    options: &ScanOptions,
    scope: ScopeInput,
) -> anyhow::Result<SourceModel> {
    let discovered = discover::discover_sources(repo_root, &options.extensions, &options.exclude)
        .context("discover sources")?;

    let in_scope: Vec<RepoPath> = match scope {
        ScopeInput::Repo => discovered,
        ScopeInput::Diff { changed_files } => {
            let changed: BTreeSet<String> = changed_files
                .into_iter()
                .map(|p| p.as_str().to_string())
                .collect();
            discovered
                .into_iter()
                .filter(|p| changed.contains(p.as_str()))
                .collect()
        }
    };

    tracing::debug!(root = %repo_root, files = in_scope.len(), "sources in scope");

    let parsed: Vec<Option<SourceFile>> = in_scope
        .par_iter()
        .map(|path| read_source(repo_root, path))
        .collect::<anyhow::Result<_>>()?;

    let mut files: Vec<SourceFile> = parsed.into_iter().flatten().collect();
    files.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(SourceModel {
        repo_root: RepoPath::from(repo_root),
        files,
    })
}

fn read_source(repo_root: &Utf8Path, path: &RepoPath) -> anyhow::Result<Option<SourceFile>> {
    let abs = repo_root.join(path.as_str());
    let bytes = std::fs::read(&abs).with_context(|| format!("read {}", abs))?;
    let Ok(text) = String::from_utf8(bytes) else {
        tracing::warn!(file = %path, "skipping file that is not valid UTF-8");
        return Ok(None);
    };

    let imports = parse::parse_source(path, &text);
    tracing::debug!(file = %path, imports = imports.len(), "parsed source");

    Ok(Some(SourceFile {
        path: path.clone(),
        imports,
    }))
}
