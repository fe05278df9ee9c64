use crate::{RenderableLocation, RenderableReport, RenderableSeverity, RenderableVerdictStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# fsdguard report\n\n");
    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "PASS",
        RenderableVerdictStatus::Warn => "WARN",
        RenderableVerdictStatus::Fail => "FAIL",
    };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Scope: {} ({} files, {} imports)\n- Findings: {} (emitted) / {} (total)\n\n",
        verdict,
        report.data.scope,
        report.data.files_scanned,
        report.data.imports_scanned,
        report.data.findings_emitted,
        report.data.findings_total
    ));

    if let Some(r) = &report.data.truncated_reason {
        out.push_str(&format!("> Note: {}\n\n", r));
    }

    if report.findings.is_empty() {
        out.push_str("No findings.\n");
        return out;
    }

    out.push_str("## Findings\n\n");

    for f in &report.findings {
        let sev = match f.severity {
            RenderableSeverity::Info => "INFO",
            RenderableSeverity::Warning => "WARN",
            RenderableSeverity::Error => "ERROR",
        };

        out.push_str(&format!("- [{}] `{}` / `{}`: {}", sev, f.check_id, f.code, f.message));
        if let Some(loc) = &f.location {
            out.push_str(&format!(" ({})", format_location(loc)));
        }
        out.push('\n');

        if let Some(help) = &f.help {
            out.push_str(&format!("  - help: {}\n", help));
        }
        if let Some(url) = &f.url {
            out.push_str(&format!("  - url: {}\n", url));
        }
    }

    out
}

fn format_location(loc: &RenderableLocation) -> String {
    match (loc.line, loc.col) {
        (Some(line), Some(col)) => format!("`{}`:{}:{}", loc.path, line, col),
        (Some(line), None) => format!("`{}`:{}", loc.path, line),
        _ => format!("`{}`", loc.path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RenderableData, RenderableFinding};

    fn data(emitted: u32, total: u32, truncated: Option<&str>) -> RenderableData {
        RenderableData {
            scope: "repo".to_string(),
            files_scanned: 12,
            imports_scanned: 40,
            findings_emitted: emitted,
            findings_total: total,
            truncated_reason: truncated.map(str::to_string),
        }
    }

    #[test]
    fn renders_empty_report() {
        let report = RenderableReport {
            verdict: RenderableVerdictStatus::Pass,
            findings: Vec::new(),
            data: data(0, 0, None),
        };
        let md = render_markdown(&report);
        assert!(md.starts_with("# fsdguard report"));
        assert!(md.contains("Verdict: **PASS**"));
        assert!(md.contains("Scope: repo (12 files, 40 imports)"));
        assert!(md.contains("No findings"));
    }

    #[test]
    fn renders_findings_with_location_help_url_and_truncation() {
        let report = RenderableReport {
            verdict: RenderableVerdictStatus::Fail,
            findings: vec![RenderableFinding {
                severity: RenderableSeverity::Error,
                check_id: "fsd.layer_imports".to_string(),
                code: "invalid_layer_import".to_string(),
                message: "Invalid import from 'shared' to 'app'. Allowed imports: shared"
                    .to_string(),
                location: Some(RenderableLocation {
                    path: "src/shared/lib/x.ts".to_string(),
                    line: Some(7),
                    col: Some(1),
                }),
                help: Some("move the code down a layer".to_string()),
                url: Some("https://example.com/docs".to_string()),
            }],
            data: data(1, 2, Some("findings truncated to 1")),
        };

        let md = render_markdown(&report);
        assert!(md.contains("Verdict: **FAIL**"));
        assert!(md.contains("> Note: findings truncated to 1"));
        assert!(md.contains("## Findings"));
        assert!(md.contains("[ERROR] `fsd.layer_imports` / `invalid_layer_import`"));
        assert!(md.contains("Allowed imports: shared (`src/shared/lib/x.ts`:7:1)"));
        assert!(md.contains("help: move the code down a layer"));
        assert!(md.contains("url: https://example.com/docs"));
    }

    #[test]
    fn renders_finding_without_location() {
        let report = RenderableReport {
            verdict: RenderableVerdictStatus::Warn,
            findings: vec![RenderableFinding {
                severity: RenderableSeverity::Warning,
                check_id: "tool.runtime".to_string(),
                code: "runtime_error".to_string(),
                message: "boom".to_string(),
                location: None,
                help: None,
                url: None,
            }],
            data: data(1, 1, None),
        };

        let md = render_markdown(&report);
        assert!(md.contains("Verdict: **WARN**"));
        assert!(md.contains("- [WARN] `tool.runtime` / `runtime_error`: boom\n"));
    }
}
