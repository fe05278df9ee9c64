use crate::checks::utils::{build_allowlist, is_allowed};
use crate::fingerprint::fingerprint_for_import;
use crate::model::{ImportEdge, SourceModel};
use crate::policy::{CheckPolicy, EffectiveConfig};
use crate::validate::{EdgeVerdict, Violation, validate};
use fsdguard_types::{Finding, Location, ids};
use serde_json::json;

pub fn run(model: &SourceModel, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(policy) = cfg.check_policy(ids::CHECK_FSD_LAYER_IMPORTS) else {
        return;
    };
    let allow = build_allowlist(&policy.allow);

    for file in &model.files {
        for edge in &file.imports {
            if is_allowed(allow.as_ref(), &edge.specifier) {
                continue;
            }
            if let EdgeVerdict::Violated(violation) = validate(edge, &cfg.graph, &cfg.resolver) {
                out.push(finding(policy, edge, &violation));
            }
        }
    }
}

fn finding(policy: &CheckPolicy, edge: &ImportEdge, violation: &Violation) -> Finding {
    let location = edge.location.clone().unwrap_or_else(|| Location {
        path: edge.source_file.clone(),
        line: None,
        col: None,
    });
    let fingerprint = fingerprint_for_import(
        ids::CHECK_FSD_LAYER_IMPORTS,
        ids::CODE_INVALID_LAYER_IMPORT,
        edge.source_file.as_str(),
        &edge.specifier,
    );

    Finding {
        severity: policy.severity,
        check_id: ids::CHECK_FSD_LAYER_IMPORTS.to_string(),
        code: ids::CODE_INVALID_LAYER_IMPORT.to_string(),
        message: violation.to_string(),
        location: Some(location),
        help: Some(format!(
            "Move the code this import needs into a layer '{}' may use, or compose both from a higher layer.",
            violation.current
        )),
        url: None,
        fingerprint: Some(fingerprint),
        data: json!({
            "from": violation.current.as_str(),
            "to": violation.target.as_str(),
            "allowed": violation.permitted.names(),
            "specifier": edge.specifier,
        }),
    }
}
