use fsdguard_domain::model::ImportEdge;
use fsdguard_types::{Location, RepoPath};
use regex::Regex;
use std::sync::LazyLock;

/// `import x from '...'`, `import type { X } from '...'`, multi-line named imports.
static IMPORT_FROM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bimport\b[^'"`;]*?\bfrom\s*['"](?P<spec>[^'"\n]*)['"]"#).expect("valid regex")
});

/// `import './polyfills'`
static IMPORT_SIDE_EFFECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bimport\s*['"](?P<spec>[^'"\n]*)['"]"#).expect("valid regex")
});

/// `export * from '...'`, `export { a } from '...'`
static EXPORT_FROM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bexport\b[^'"`;=(){}]*(?:\{[^'"`;}]*\})?\s*\bfrom\s*['"](?P<spec>[^'"\n]*)['"]"#)
        .expect("valid regex")
});

/// `import('...')`
static DYNAMIC_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bimport\s*\(\s*['"](?P<spec>[^'"\n]*)['"]\s*\)"#).expect("valid regex")
});

/// `require('...')`
static REQUIRE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\brequire\s*\(\s*['"](?P<spec>[^'"\n]*)['"]\s*\)"#).expect("valid regex")
});

/// Extract every import specifier from a JS/TS source file, in source order.
///
/// Statements are matched on the masked text, so nothing inside a comment or a string
/// literal counts; the specifier itself is read back from the original text.
pub fn parse_source(path: &RepoPath, text: &str) -> Vec<ImportEdge> {
    let masked = mask_source(text);
    let lines = LineIndex::new(&masked);

    let mut hits: Vec<(usize, String)> = Vec::new();
    for re in [
        &*IMPORT_FROM,
        &*IMPORT_SIDE_EFFECT,
        &*EXPORT_FROM,
        &*DYNAMIC_IMPORT,
        &*REQUIRE,
    ] {
        for caps in re.captures_iter(&masked) {
            let (Some(stmt), Some(spec)) = (caps.get(0), caps.name("spec")) else {
                continue;
            };
            let Some(original) = text.get(spec.range()) else {
                continue;
            };
            hits.push((stmt.start(), original.to_string()));
        }
    }

    hits.sort();
    hits.dedup();

    hits.into_iter()
        .map(|(offset, specifier)| {
            let (line, col) = lines.line_col(text, offset);
            ImportEdge {
                source_file: path.clone(),
                specifier,
                location: Some(Location {
                    path: path.clone(),
                    line: Some(line),
                    col: Some(col),
                }),
            }
        })
        .collect()
}

/// Replace comments and the contents of string and template literals with spaces,
/// keeping newlines and quote characters, so offsets into the result are offsets into
/// the original text.
pub fn mask_source(text: &str) -> String {
    #[derive(Clone, Copy, PartialEq)]
    enum State {
        Code,
        Line,
        Block,
        Str(u8),
    }

    let src = text.as_bytes();
    let mut out = src.to_vec();
    let mut state = State::Code;
    let mut i = 0;

    while i < src.len() {
        let b = src[i];
        let next = src.get(i + 1).copied();
        match state {
            State::Code => match (b, next) {
                (b'/', Some(b'/')) => {
                    state = State::Line;
                    out[i] = b' ';
                    out[i + 1] = b' ';
                    i += 1;
                }
                (b'/', Some(b'*')) => {
                    state = State::Block;
                    out[i] = b' ';
                    out[i + 1] = b' ';
                    i += 1;
                }
                (b'\'' | b'"' | b'`', _) => state = State::Str(b),
                _ => {}
            },
            State::Line => {
                if b == b'\n' {
                    state = State::Code;
                } else {
                    out[i] = b' ';
                }
            }
            State::Block => {
                if b == b'*' && next == Some(b'/') {
                    out[i] = b' ';
                    out[i + 1] = b' ';
                    i += 1;
                    state = State::Code;
                } else if b != b'\n' {
                    out[i] = b' ';
                }
            }
            State::Str(quote) => {
                if b == quote || (b == b'\n' && quote != b'`') {
                    state = State::Code;
                } else if b == b'\\' {
                    out[i] = b' ';
                    // Only an ASCII byte can be an escaped quote; anything else is blanked on
                    // the next iteration so multi-byte characters are blanked whole.
                    if let Some(n) = next.filter(u8::is_ascii) {
                        if n != b'\n' {
                            out[i + 1] = b' ';
                        }
                        i += 1;
                    }
                } else if b != b'\n' {
                    out[i] = b' ';
                }
            }
        }
        i += 1;
    }

    // Only whole characters are ever blanked, so this stays valid UTF-8.
    String::from_utf8(out).unwrap_or_else(|e| String::from_utf8_lossy(&e.into_bytes()).into_owned())
}

/// Byte offsets of line starts, for 1-based line/column lookup.
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(text: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(
            text.bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );
        LineIndex { starts }
    }

    fn line_col(&self, text: &str, offset: usize) -> (u32, u32) {
        let line = match self.starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        let start = self.starts[line];
        let col = text
            .get(start..offset)
            .map(|s| s.chars().count())
            .unwrap_or(offset - start);
        ((line + 1) as u32, (col + 1) as u32)
    }
}
