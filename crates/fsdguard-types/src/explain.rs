//! Explain registry for checks and codes.
//!
//! Maps check IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check/code.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after code examples.
    pub examples: ExamplePair,
}

/// Before and after code examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Code that would trigger a finding.
    pub before: &'static str,
    /// Code that passes the check.
    pub after: &'static str,
}

/// Look up an explanation by check_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        ids::CHECK_FSD_LAYER_IMPORTS => Some(explain_layer_imports()),
        ids::CODE_INVALID_LAYER_IMPORT => Some(explain_invalid_layer_import()),
        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[ids::CHECK_FSD_LAYER_IMPORTS]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[ids::CODE_INVALID_LAYER_IMPORT]
}

fn explain_layer_imports() -> Explanation {
    Explanation {
        title: "Feature-Sliced Design Layer Imports",
        description: "\
Checks every import edge against the Feature-Sliced Design layer hierarchy:

    app > pages > widgets > features > entities > shared

A module may import from layers below its own and from its own layer. Importing
upwards couples reusable code to the code that consumes it:
- `shared` stops being reusable once it knows about business entities
- `entities` that import `features` drag UI flows into the data model
- refactoring a page can silently break a widget that reached up into it

Only imports between two recognized layers are judged. External packages,
relative imports, files outside the source root and entry-point files are
skipped.",
        remediation: "\
Move the dependency so that it points downwards:
- Push shared logic down into the lower layer (e.g. move a helper from
  `features/auth` into `shared/lib`)
- Lift composition up into the higher layer (e.g. compose a feature and an
  entity inside a widget instead of making the entity import the feature)
- Pass data or callbacks in as props/arguments instead of importing upwards

If a specific import is intentional, add its specifier pattern to the check's
allow list in fsdguard.toml.",
        examples: ExamplePair {
            before: r#"// src/entities/user/model.ts
import { login } from "@/features/auth";"#,
            after: r#"// src/features/auth/model.ts
import { User } from "@/entities/user";"#,
        },
    }
}

fn explain_invalid_layer_import() -> Explanation {
    let mut exp = explain_layer_imports();
    exp.title = "Invalid Layer Import";
    exp
}
