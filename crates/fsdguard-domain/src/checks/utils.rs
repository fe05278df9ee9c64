use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

pub fn build_allowlist(allow: &[String]) -> Option<GlobSet> {
    if allow.is_empty() {
        return None;
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in allow {
        // Case-sensitive globs over the raw specifier; `*` stops at `/`, like entry points.
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .expect("allowlist patterns must be validated in fsdguard-settings");
        builder.add(glob);
    }
    Some(
        builder
            .build()
            .expect("allowlist patterns must be validated in fsdguard-settings"),
    )
}

pub fn is_allowed(allow: Option<&GlobSet>, value: &str) -> bool {
    allow.map(|set| set.is_match(value)).unwrap_or(false)
}
