use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fsdguard_types::RepoPath;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::PathBuf;
use walkdir::{DirEntry, WalkDir};

/// Directories that never hold first-party layer code.
const SKIPPED_DIRS: &[&str] = &["node_modules", ".git", "dist", "build", "coverage"];

/// Discover source files under `repo_root` whose extension is in `extensions`
/// and whose repo-relative path matches none of the `exclude` globs.
pub fn discover_sources(
    repo_root: &Utf8Path,
    extensions: &[String],
    exclude: &[String],
) -> anyhow::Result<Vec<RepoPath>> {
    let exclude_set = build_globset(exclude).context("compile exclude globset")?;

    let mut out: Vec<RepoPath> = Vec::new();

    for abs in WalkDir::new(repo_root)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| pathbuf_to_utf8(e.path().to_path_buf()))
    {
        let Some(ext) = abs.extension() else {
            continue;
        };
        if !extensions.iter().any(|e| e == ext) {
            continue;
        }

        let rel = abs
            .strip_prefix(repo_root)
            .unwrap_or(&abs)
            .as_str()
            .replace('\\', "/");
        if exclude_set.is_match(&rel) {
            continue;
        }

        out.push(RepoPath::new(&rel));
    }

    // Stable order.
    out.sort();
    out.dedup();

    Ok(out)
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

fn build_globset(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut b = GlobSetBuilder::new();
    for p in patterns {
        b.add(GlobBuilder::new(p).literal_separator(true).build()?);
    }
    Ok(b.build()?)
}

fn pathbuf_to_utf8(path: PathBuf) -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).ok()
}
