//! Rendering helpers (markdown) for human-readable artifacts.

use quickfix_types::apply::{ApplyReceipt, ApplyStatus};
use quickfix_types::report::{FixStatus, ResolveReport};

pub fn render_report_md(report: &ResolveReport) -> String {
    let s = &report.summary;
    let mut out = String::new();
    out.push_str("# quickfix report\n\n");
    out.push_str(&format!("- Passes: {}\n", s.passes));
    out.push_str(&format!(
        "- Diagnostics: {} ({} with fixes)\n",
        s.diagnostics, s.diagnostics_with_fixes
    ));
    out.push_str(&format!(
        "- Fixes: {} offered, {} filtered\n",
        s.fixes_offered, s.fixes_filtered
    ));
    out.push_str(&format!("- Batch mode: `{}`\n", report.run.batch_mode));
    if !report.policy.allow.is_empty() {
        out.push_str(&format!("- Allow: {}\n", code_list(&report.policy.allow)));
    }
    if !report.policy.deny.is_empty() {
        out.push_str(&format!("- Deny: {}\n", code_list(&report.policy.deny)));
    }
    out.push('\n');

    if !report.skipped.is_empty() {
        out.push_str("## Skipped passes\n\n");
        for skipped in &report.skipped {
            out.push_str(&format!("- `{}`: {}\n", skipped.path, skipped.reason));
        }
        out.push('\n');
    }

    out.push_str("## Passes\n\n");
    if report.passes.is_empty() {
        out.push_str("_No passes loaded._\n");
        return out;
    }

    for pass in &report.passes {
        out.push_str(&format!("### {}\n\n", pass.source_name));
        out.push_str(&format!("- Pass file: `{}`\n", pass.path));
        out.push_str(&format!("- Source sha256: `{}`\n\n", pass.source_sha256));

        if pass.diagnostics.is_empty() {
            out.push_str("_No diagnostics._\n\n");
            continue;
        }

        for diag in &pass.diagnostics {
            out.push_str(&format!(
                "#### {}. `{}` at {}\n\n",
                diag.index + 1,
                diag.kind,
                diag.anchor
            ));
            if diag.fixes.is_empty() {
                out.push_str("_No applicable fixes._\n\n");
                continue;
            }
            for fix in &diag.fixes {
                out.push_str(&format!(
                    "- {} `{}` ({}){}\n",
                    fix.title,
                    fix.fix_id,
                    fix.action.name(),
                    status_suffix(fix.status)
                ));
                out.push_str(&format!("  - id: `{}`\n", fix.id));
                if let Some(err) = &fix.preview_error {
                    out.push_str(&format!("  - preview failed: {}\n", err));
                }
                if let Some(preview) = fix.preview.as_deref().filter(|p| !p.is_empty()) {
                    out.push_str("\n```diff\n");
                    out.push_str(preview);
                    if !preview.ends_with('\n') {
                        out.push('\n');
                    }
                    out.push_str("```\n\n");
                }
            }
            out.push('\n');
        }
    }

    out
}

pub fn render_apply_md(receipt: &ApplyReceipt) -> String {
    let mut out = String::new();
    out.push_str("# quickfix apply\n\n");
    out.push_str(&format!("- Source: `{}`\n", receipt.source_name));
    out.push_str(&format!("- Pass file: `{}`\n", receipt.pass_path));
    out.push_str(&format!(
        "- Fix: {} `{}` (`{}`)\n",
        receipt.fix.title, receipt.fix.fix_id, receipt.fix.id
    ));
    out.push_str(&format!("- Status: `{}`\n", status_label(receipt.status)));
    let after = receipt.sha256_after.as_deref().unwrap_or("-");
    out.push_str(&format!(
        "- sha256: {} → {}\n",
        receipt.sha256_before, after
    ));
    if let Some(msg) = &receipt.message {
        out.push_str(&format!("- Message: {}\n", msg));
    }
    out
}

fn code_list(items: &[String]) -> String {
    items
        .iter()
        .map(|i| format!("`{}`", i))
        .collect::<Vec<_>>()
        .join(", ")
}

fn status_suffix(status: FixStatus) -> &'static str {
    match status {
        FixStatus::Offered => "",
        FixStatus::Filtered => " _filtered by policy_",
    }
}

fn status_label(status: ApplyStatus) -> &'static str {
    match status {
        ApplyStatus::Applied => "applied",
        ApplyStatus::DryRun => "dry_run",
        ApplyStatus::Blocked => "blocked",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quickfix_syntax::NodeId;
    use quickfix_types::apply::AppliedFixRef;
    use quickfix_types::report::{
        DiagnosticReport, PassReport, ReportPolicy, ReportRunInfo, ReportedFix, ReportSummary,
    };
    use quickfix_types::{DiagnosticKind, FixAction, ToolInfo};

    fn report() -> ResolveReport {
        let mut report = ResolveReport::new(
            ToolInfo::quickfix("0.0.0"),
            ReportRunInfo {
                started_at: "2026-01-01T00:00:00Z".to_string(),
                ended_at: None,
                duration_ms: None,
                batch_mode: "sequential".to_string(),
            },
            ReportPolicy {
                allow: vec![],
                deny: vec!["modifier.*".to_string()],
            },
        );
        report.passes.push(PassReport {
            path: "passes/main.pass.json".to_string(),
            source_name: "src/Main.kt".to_string(),
            source_sha256: "abc".to_string(),
            diagnostics: vec![
                DiagnosticReport {
                    index: 0,
                    kind: DiagnosticKind::UselessCast,
                    anchor: NodeId(3),
                    fixes: vec![ReportedFix {
                        id: "id-1".to_string(),
                        fix_id: "expression.remove_useless_cast".to_string(),
                        title: "Remove useless cast".to_string(),
                        status: FixStatus::Offered,
                        action: FixAction::ReplaceWithChild {
                            node: NodeId(3),
                            child: NodeId(4),
                        },
                        preview: Some("-x as String\n+x\n".to_string()),
                        preview_error: None,
                    }],
                },
                DiagnosticReport {
                    index: 1,
                    kind: DiagnosticKind::UnusedVariable,
                    anchor: NodeId(9),
                    fixes: vec![],
                },
            ],
        });
        report.summary = ReportSummary {
            passes: 1,
            diagnostics: 2,
            diagnostics_with_fixes: 1,
            fixes_offered: 1,
            fixes_filtered: 0,
        };
        report
    }

    #[test]
    fn report_lists_fixes_per_diagnostic() {
        let md = render_report_md(&report());
        assert!(md.starts_with("# quickfix report\n\n- Passes: 1\n"));
        assert!(md.contains("- Deny: `modifier.*`\n"));
        assert!(md.contains("#### 1. `useless_cast` at #3\n"));
        assert!(md.contains(
            "- Remove useless cast `expression.remove_useless_cast` (replace_with_child)\n"
        ));
        assert!(md.contains("```diff\n-x as String\n+x\n```\n"));
        assert!(md.contains("#### 2. `unused_variable` at #9\n\n_No applicable fixes._\n"));
    }

    #[test]
    fn empty_report_says_so() {
        let mut r = report();
        r.passes.clear();
        assert!(render_report_md(&r).ends_with("## Passes\n\n_No passes loaded._\n"));
    }

    #[test]
    fn apply_receipt_renders_status() {
        let mut receipt = ApplyReceipt::new(
            ToolInfo::quickfix("0.0.0"),
            "p.pass.json",
            "src/Main.kt",
            AppliedFixRef {
                id: "id-1".to_string(),
                fix_id: "expression.remove_useless_cast".to_string(),
                title: "Remove useless cast".to_string(),
            },
            "aaa",
        );
        receipt.status = ApplyStatus::Applied;
        receipt.sha256_after = Some("bbb".to_string());
        let md = render_apply_md(&receipt);
        assert_eq!(
            md,
            "# quickfix apply\n\n\
             - Source: `src/Main.kt`\n\
             - Pass file: `p.pass.json`\n\
             - Fix: Remove useless cast `expression.remove_useless_cast` (`id-1`)\n\
             - Status: `applied`\n\
             - sha256: aaa → bbb\n"
        );
    }
}
