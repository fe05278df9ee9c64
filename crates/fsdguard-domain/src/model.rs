use fsdguard_types::{Location, RepoPath};

/// One observed import statement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportEdge {
    pub source_file: RepoPath,
    pub specifier: String,
    /// Where the statement sits; opaque to validation.
    pub location: Option<Location>,
}

impl ImportEdge {
    pub fn new(source_file: impl AsRef<str>, specifier: impl Into<String>) -> Self {
        ImportEdge {
            source_file: RepoPath::new(source_file),
            specifier: specifier.into(),
            location: None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SourceFile {
    pub path: RepoPath,
    pub imports: Vec<ImportEdge>,
}

#[derive(Clone, Debug, Default)]
pub struct SourceModel {
    pub repo_root: RepoPath,

    /// Files in scope, sorted by path.
    pub files: Vec<SourceFile>,
}

impl SourceModel {
    pub fn import_count(&self) -> usize {
        self.files.iter().map(|f| f.imports.len()).sum()
    }
}
