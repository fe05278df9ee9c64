//! Path-to-layer and specifier-to-layer resolution.

use crate::layer::Layer;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::fmt;

pub const DEFAULT_SOURCE_ROOT: &str = "src";
pub const DEFAULT_ALIASES: &[&str] = &["@", "src"];
pub const DEFAULT_ENTRY_POINTS: &[&str] = &["main.*", "index.*", "app/main.*", "app/index.*"];

/// Files exempt from layer checking, matched against the path below the source root.
#[derive(Clone, Debug)]
pub struct EntryPoints {
    set: GlobSet,
}

impl EntryPoints {
    pub fn new(patterns: &[String]) -> Result<Self, globset::Error> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(GlobBuilder::new(pattern).literal_separator(true).build()?);
        }
        Ok(EntryPoints {
            set: builder.build()?,
        })
    }

    pub fn is_match(&self, below_root: &str) -> bool {
        self.set.is_match(below_root)
    }
}

impl Default for EntryPoints {
    fn default() -> Self {
        let patterns: Vec<String> = DEFAULT_ENTRY_POINTS.iter().map(|p| p.to_string()).collect();
        EntryPoints::new(&patterns).expect("default entry point globs are valid")
    }
}

/// How files and specifiers are mapped onto layers.
#[derive(Clone, Debug)]
pub struct ResolverConfig {
    /// Directory marker whose child directory names the layer (may span segments, e.g. `web/src`).
    pub source_root: String,
    /// Specifier prefixes that stand for the source root, matched as whole segments.
    pub aliases: Vec<String>,
    /// Treat `entities/user` (first segment is a layer name) as a project import.
    pub bare_layer_imports: bool,
    /// Resolve `./` and `../` specifiers against the importing file.
    pub resolve_relative: bool,
    pub entry_points: EntryPoints,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            source_root: DEFAULT_SOURCE_ROOT.to_string(),
            aliases: DEFAULT_ALIASES.iter().map(|a| a.to_string()).collect(),
            bare_layer_imports: true,
            resolve_relative: false,
            entry_points: EntryPoints::default(),
        }
    }
}

/// Layer segment of a file under the source root.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileLayer<'a> {
    Known(Layer),
    Unrecognized(&'a str),
}

/// Why an edge is not judged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    OutsideLayerTree,
    UnrecognizedCurrentLayer(String),
    EmptySpecifier,
    Relative,
    External,
    AliasRoot,
    UnrecognizedTargetLayer(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::OutsideLayerTree => f.write_str("file outside layer tree"),
            SkipReason::UnrecognizedCurrentLayer(s) => {
                write!(f, "unrecognized current layer '{s}'")
            }
            SkipReason::EmptySpecifier => f.write_str("empty import specifier"),
            SkipReason::Relative => f.write_str("relative import"),
            SkipReason::External => f.write_str("external package"),
            SkipReason::AliasRoot => f.write_str("import names no layer"),
            SkipReason::UnrecognizedTargetLayer(s) => {
                write!(f, "unrecognized target layer '{s}'")
            }
        }
    }
}

/// Outcome of resolving an import specifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImportTarget {
    Layer(Layer),
    NotApplicable(SkipReason),
}

fn segments(path: &str) -> Vec<&str> {
    path.split(['/', '\\'])
        .filter(|s| !s.is_empty() && *s != ".")
        .collect()
}

/// Segments below the source-root marker.
///
/// When the marker occurs more than once, the first occurrence followed by a known
/// layer wins; otherwise the first occurrence is used.
fn below_source_root<'a>(parts: &[&'a str], source_root: &str) -> Option<Vec<&'a str>> {
    let marker = segments(source_root);
    if marker.is_empty() || parts.len() <= marker.len() {
        return None;
    }

    let starts: Vec<usize> = (0..=parts.len() - marker.len())
        .filter(|&i| parts[i..i + marker.len()] == marker[..])
        .collect();
    let start = starts
        .iter()
        .copied()
        .find(|&i| {
            parts
                .get(i + marker.len())
                .is_some_and(|s| Layer::parse(s).is_some())
        })
        .or_else(|| starts.first().copied())?;

    let rest = parts[start + marker.len()..].to_vec();
    (!rest.is_empty()).then_some(rest)
}

fn classify(segment: &str) -> FileLayer<'_> {
    match Layer::parse(segment) {
        Some(layer) => FileLayer::Known(layer),
        None => FileLayer::Unrecognized(segment),
    }
}

/// Resolve the layer a source file belongs to.
///
/// Returns `None` for files outside the layer tree: no source-root marker, a file
/// directly under the source root, or a configured entry point.
pub fn resolve_file_layer<'a>(path: &'a str, cfg: &ResolverConfig) -> Option<FileLayer<'a>> {
    let parts = segments(path);
    let rest = below_source_root(&parts, &cfg.source_root)?;
    if rest.len() < 2 {
        return None;
    }
    if cfg.entry_points.is_match(&rest.join("/")) {
        return None;
    }
    Some(classify(rest[0]))
}

/// Whether anything sits below the source-root marker in `path`, wherever the marker occurs.
pub fn is_under_source_root(path: &str, cfg: &ResolverConfig) -> bool {
    below_source_root(&segments(path), &cfg.source_root).is_some()
}

/// Resolve the layer of a module path (file or directory) without entry-point exemptions.
fn resolve_module_layer<'a>(path: &'a str, cfg: &ResolverConfig) -> Option<FileLayer<'a>> {
    let parts = segments(path);
    let rest = below_source_root(&parts, &cfg.source_root)?;
    Some(classify(rest[0]))
}

fn is_relative(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
}

/// Strip the longest alias that matches as a whole leading segment.
fn strip_alias<'a>(specifier: &'a str, aliases: &[String]) -> Option<&'a str> {
    aliases
        .iter()
        .map(|a| a.trim_end_matches('/'))
        .filter(|a| !a.is_empty())
        .filter_map(|alias| {
            let rest = specifier.strip_prefix(alias)?;
            (rest.is_empty() || rest.starts_with('/')).then_some((alias.len(), rest))
        })
        .max_by_key(|(len, _)| *len)
        .map(|(_, rest)| rest)
}

/// Resolve the layer an import specifier points at.
pub fn resolve_import_layer(specifier: &str, cfg: &ResolverConfig) -> ImportTarget {
    let specifier = specifier.trim();
    if specifier.is_empty() {
        return ImportTarget::NotApplicable(SkipReason::EmptySpecifier);
    }
    if is_relative(specifier) {
        return ImportTarget::NotApplicable(SkipReason::Relative);
    }

    let rest = match strip_alias(specifier, &cfg.aliases) {
        Some(rest) => rest,
        None if cfg.bare_layer_imports => {
            let bare = specifier.strip_prefix('/').unwrap_or(specifier);
            let first = bare.split('/').next().unwrap_or_default();
            if Layer::parse(first).is_none() {
                return ImportTarget::NotApplicable(SkipReason::External);
            }
            bare
        }
        None => return ImportTarget::NotApplicable(SkipReason::External),
    };

    match rest.split('/').find(|s| !s.is_empty() && *s != ".") {
        None => ImportTarget::NotApplicable(SkipReason::AliasRoot),
        Some(segment) => match Layer::parse(segment) {
            Some(layer) => ImportTarget::Layer(layer),
            None => ImportTarget::NotApplicable(SkipReason::UnrecognizedTargetLayer(
                segment.to_string(),
            )),
        },
    }
}

/// Join a relative specifier onto the importing file's directory.
///
/// Returns `None` when `..` climbs above the first segment of `file`.
pub fn join_relative(file: &str, specifier: &str) -> Option<String> {
    let mut parts = segments(file);
    parts.pop();
    for seg in specifier.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            other => parts.push(other),
        }
    }
    Some(parts.join("/"))
}

/// Resolve a relative specifier through the file resolver.
pub fn resolve_relative_import(file: &str, specifier: &str, cfg: &ResolverConfig) -> ImportTarget {
    let Some(joined) = join_relative(file, specifier) else {
        return ImportTarget::NotApplicable(SkipReason::OutsideLayerTree);
    };
    match resolve_module_layer(&joined, cfg) {
        Some(FileLayer::Known(layer)) => ImportTarget::Layer(layer),
        Some(FileLayer::Unrecognized(s)) => {
            ImportTarget::NotApplicable(SkipReason::UnrecognizedTargetLayer(s.to_string()))
        }
        None => ImportTarget::NotApplicable(SkipReason::OutsideLayerTree),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> ResolverConfig {
        ResolverConfig::default()
    }

    #[test]
    fn source_root_is_found_below_nested_folders() {
        assert!(is_under_source_root("apps/web/src/entities/user/model.ts", &cfg()));
        assert!(is_under_source_root("src/main.ts", &cfg()));
        assert!(!is_under_source_root("scripts/build.ts", &cfg()));
        assert!(!is_under_source_root("lib/src", &cfg()));
    }

    #[test]
    fn file_layer_from_repo_relative_path() {
        assert_eq!(
            resolve_file_layer("src/features/auth/index.ts", &cfg()),
            Some(FileLayer::Known(Layer::Features))
        );
    }

    #[test]
    fn file_layer_handles_windows_separators() {
        assert_eq!(
            resolve_file_layer("C:\\work\\web\\src\\entities\\user\\model.ts", &cfg()),
            Some(FileLayer::Known(Layer::Entities))
        );
    }

    #[test]
    fn file_layer_prefers_marker_followed_by_layer() {
        assert_eq!(
            resolve_file_layer("/home/dev/src/shop/src/widgets/header/ui.tsx", &cfg()),
            Some(FileLayer::Known(Layer::Widgets))
        );
    }

    #[test]
    fn file_layer_reports_unrecognized_folder() {
        assert_eq!(
            resolve_file_layer("src/lib/date.ts", &cfg()),
            Some(FileLayer::Unrecognized("lib"))
        );
    }

    #[test]
    fn file_outside_layer_tree() {
        assert_eq!(resolve_file_layer("scripts/build.ts", &cfg()), None);
        assert_eq!(resolve_file_layer("src/main.ts", &cfg()), None);
        assert_eq!(resolve_file_layer("src", &cfg()), None);
    }

    #[test]
    fn entry_points_are_exempt() {
        assert_eq!(resolve_file_layer("src/app/main.ts", &cfg()), None);
        assert_eq!(resolve_file_layer("src/app/index.tsx", &cfg()), None);
        assert_eq!(
            resolve_file_layer("src/app/providers/router.tsx", &cfg()),
            Some(FileLayer::Known(Layer::App))
        );
    }

    #[test]
    fn multi_segment_source_root() {
        let cfg = ResolverConfig {
            source_root: "web/src".to_string(),
            ..ResolverConfig::default()
        };
        assert_eq!(
            resolve_file_layer("web/src/pages/home/ui.tsx", &cfg),
            Some(FileLayer::Known(Layer::Pages))
        );
        assert_eq!(resolve_file_layer("src/pages/home/ui.tsx", &cfg), None);
    }

    #[test]
    fn alias_specifiers() {
        assert_eq!(
            resolve_import_layer("@/entities/user", &cfg()),
            ImportTarget::Layer(Layer::Entities)
        );
        assert_eq!(
            resolve_import_layer("src/shared/ui/button", &cfg()),
            ImportTarget::Layer(Layer::Shared)
        );
        assert_eq!(
            resolve_import_layer("@/features", &cfg()),
            ImportTarget::Layer(Layer::Features)
        );
    }

    #[test]
    fn alias_root_names_no_layer() {
        assert_eq!(
            resolve_import_layer("@", &cfg()),
            ImportTarget::NotApplicable(SkipReason::AliasRoot)
        );
        assert_eq!(
            resolve_import_layer("@/", &cfg()),
            ImportTarget::NotApplicable(SkipReason::AliasRoot)
        );
    }

    #[test]
    fn scoped_packages_are_external() {
        assert_eq!(
            resolve_import_layer("@tanstack/react-query", &cfg()),
            ImportTarget::NotApplicable(SkipReason::External)
        );
        assert_eq!(
            resolve_import_layer("lodash", &cfg()),
            ImportTarget::NotApplicable(SkipReason::External)
        );
        assert_eq!(
            resolve_import_layer("srcery", &cfg()),
            ImportTarget::NotApplicable(SkipReason::External)
        );
    }

    #[test]
    fn bare_layer_imports_toggle() {
        assert_eq!(
            resolve_import_layer("entities/user", &cfg()),
            ImportTarget::Layer(Layer::Entities)
        );
        let off = ResolverConfig {
            bare_layer_imports: false,
            ..ResolverConfig::default()
        };
        assert_eq!(
            resolve_import_layer("entities/user", &off),
            ImportTarget::NotApplicable(SkipReason::External)
        );
    }

    #[test]
    fn unrecognized_target_folder_is_not_applicable() {
        assert_eq!(
            resolve_import_layer("@/lib/date", &cfg()),
            ImportTarget::NotApplicable(SkipReason::UnrecognizedTargetLayer("lib".to_string()))
        );
    }

    #[test]
    fn relative_and_empty_specifiers() {
        assert_eq!(
            resolve_import_layer("./model", &cfg()),
            ImportTarget::NotApplicable(SkipReason::Relative)
        );
        assert_eq!(
            resolve_import_layer("../..", &cfg()),
            ImportTarget::NotApplicable(SkipReason::Relative)
        );
        assert_eq!(
            resolve_import_layer("  ", &cfg()),
            ImportTarget::NotApplicable(SkipReason::EmptySpecifier)
        );
    }

    #[test]
    fn longest_alias_wins() {
        let cfg = ResolverConfig {
            aliases: vec!["~".to_string(), "~/app".to_string()],
            ..ResolverConfig::default()
        };
        assert_eq!(
            resolve_import_layer("~/app/shared/api", &cfg),
            ImportTarget::Layer(Layer::Shared)
        );
        assert_eq!(
            resolve_import_layer("~/widgets/header", &cfg),
            ImportTarget::Layer(Layer::Widgets)
        );
    }

    #[test]
    fn relative_resolution_through_file_resolver() {
        assert_eq!(
            join_relative("src/features/auth/ui/form.tsx", "../../../entities/user").as_deref(),
            Some("src/entities/user")
        );
        assert_eq!(
            resolve_relative_import("src/features/auth/ui/form.tsx", "../model", &cfg()),
            ImportTarget::Layer(Layer::Features)
        );
        assert_eq!(
            resolve_relative_import("src/entities/user/index.ts", "../../features", &cfg()),
            ImportTarget::Layer(Layer::Features)
        );
        assert_eq!(
            resolve_relative_import("src/index.ts", "../../../outside", &cfg()),
            ImportTarget::NotApplicable(SkipReason::OutsideLayerTree)
        );
    }
}
