//! Core resolve and apply pipelines, extracted from the CLI.
//!
//! These entry points are I/O-agnostic: all filesystem operations are
//! performed through the port traits.

use crate::load::{LoadedPass, load_pass_file};
use crate::policy::{fix_status, safety_for};
use crate::ports::{PassSource, WritePort};
use crate::settings::{ApplySettings, ResolveSettings};
use anyhow::Context;
use camino::Utf8Path;
use chrono::Utc;
use quickfix_domain::{ResolvedDiagnostic, Resolver};
use quickfix_edit::{apply_fix, preview_patch, render_patch, source_sha256};
use quickfix_render::{render_apply_md, render_report_md};
use quickfix_syntax::SyntaxTree;
use quickfix_types::ToolInfo;
use quickfix_types::apply::{AppliedFixRef, ApplyReceipt, ApplyStatus};
use quickfix_types::pass::PassFile;
use quickfix_types::report::{
    DiagnosticReport, FixStatus, PassReport, ReportPolicy, ReportRunInfo, ReportSummary,
    ReportedFix, ResolveReport, SkippedPass,
};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Error type for pipeline results. Exit code 2 = policy block, 1 = tool error.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("policy block")]
    PolicyBlock,
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl ToolError {
    pub fn exit_code(&self) -> u8 {
        match self {
            ToolError::PolicyBlock => 2,
            ToolError::Internal(_) => 1,
        }
    }
}

/// Outcome of `run_resolve`.
#[derive(Debug)]
pub struct ResolveOutcome {
    pub report: ResolveReport,
}

/// Resolve every diagnostic of every pass the source yields.
///
/// Unreadable passes and passes whose tree is malformed are listed in
/// [`ResolveReport::skipped`]; they never abort the run.
pub fn run_resolve(
    settings: &ResolveSettings,
    source: &dyn PassSource,
    tool: ToolInfo,
) -> Result<ResolveOutcome, ToolError> {
    let started_at = Utc::now();
    let clock = Instant::now();

    let resolver = Resolver::new().context("build fix registry")?;
    let passes = source.load_passes()?;

    let mut report = ResolveReport::new(
        tool,
        ReportRunInfo {
            started_at: started_at.to_rfc3339(),
            ended_at: None,
            duration_ms: None,
            batch_mode: settings.batch_mode.to_string(),
        },
        ReportPolicy {
            allow: settings.allow.clone(),
            deny: settings.deny.clone(),
        },
    );

    for loaded in &passes {
        match prepare(loaded) {
            Ok((pass, tree)) => {
                let resolved = resolver.resolve_pass(&tree, &pass.diagnostics, settings.batch_mode);
                report
                    .passes
                    .push(pass_report(settings, loaded.path.as_str(), pass, &tree, resolved));
            }
            Err(reason) => {
                warn!(path = %loaded.path, reason = %reason, "skipping pass");
                report.skipped.push(SkippedPass {
                    path: loaded.path.to_string(),
                    reason,
                });
            }
        }
    }

    report.summary = summarize(&report.passes);
    report.run.ended_at = Some(Utc::now().to_rfc3339());
    report.run.duration_ms = Some(clock.elapsed().as_millis() as u64);

    debug!(
        passes = report.summary.passes,
        diagnostics = report.summary.diagnostics,
        fixes = report.summary.fixes_offered,
        "resolve finished"
    );
    Ok(ResolveOutcome { report })
}

fn prepare(loaded: &LoadedPass) -> Result<(&PassFile, SyntaxTree), String> {
    let pass = loaded.pass.as_ref().map_err(|e| e.to_string())?;
    let tree = SyntaxTree::from_green(&pass.tree).map_err(|e| format!("invalid tree: {e}"))?;
    Ok((pass, tree))
}

fn pass_report(
    settings: &ResolveSettings,
    path: &str,
    pass: &PassFile,
    tree: &SyntaxTree,
    resolved: Vec<ResolvedDiagnostic>,
) -> PassReport {
    let diagnostics = resolved
        .into_iter()
        .map(|r| DiagnosticReport {
            index: r.index,
            kind: r.kind,
            anchor: r.anchor,
            fixes: r
                .fixes
                .into_iter()
                .map(|fix| {
                    let status = fix_status(&settings.allow, &settings.deny, &fix.fix_id);
                    let (preview, preview_error) = if settings.preview {
                        match preview_patch(&pass.source_name, tree, &fix) {
                            Ok(p) => (Some(p), None),
                            Err(e) => (None, Some(e.to_string())),
                        }
                    } else {
                        (None, None)
                    };
                    ReportedFix {
                        id: fix.id,
                        fix_id: fix.fix_id,
                        title: fix.title,
                        status,
                        action: fix.action,
                        preview,
                        preview_error,
                    }
                })
                .collect(),
        })
        .collect();

    PassReport {
        path: path.to_string(),
        source_name: pass.source_name.clone(),
        source_sha256: source_sha256(tree.source()),
        diagnostics,
    }
}

fn summarize(passes: &[PassReport]) -> ReportSummary {
    let mut summary = ReportSummary {
        passes: passes.len() as u64,
        ..ReportSummary::default()
    };
    for diag in passes.iter().flat_map(|p| &p.diagnostics) {
        summary.diagnostics += 1;
        let offered = diag
            .fixes
            .iter()
            .filter(|f| f.status == FixStatus::Offered)
            .count() as u64;
        summary.fixes_offered += offered;
        summary.fixes_filtered += diag.fixes.len() as u64 - offered;
        if offered > 0 {
            summary.diagnostics_with_fixes += 1;
        }
    }
    summary
}

/// Write `report.json` and `report.md` to the output directory.
pub fn write_resolve_artifacts(
    outcome: &ResolveOutcome,
    out_dir: &Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    writer.create_dir_all(out_dir)?;

    let json = serde_json::to_string_pretty(&outcome.report).context("serialize report")?;
    writer.write_file(&out_dir.join("report.json"), json.as_bytes())?;

    let md = render_report_md(&outcome.report);
    writer.write_file(&out_dir.join("report.md"), md.as_bytes())?;

    info!(out_dir = %out_dir, "wrote resolve artifacts");
    Ok(())
}

/// Outcome of `run_apply`.
#[derive(Debug)]
pub struct ApplyOutcome {
    pub receipt: ApplyReceipt,
    pub patch: String,
    pub policy_block: bool,
}

/// Re-resolve one pass, pick the fix by id, and apply it.
///
/// The fix is blocked when the pass or the on-disk source no longer matches
/// the fingerprint it was resolved against, when it is guarded and guarded
/// fixes are not allowed, or when it no longer lowers cleanly. Writes the
/// patched source only outside dry-run.
pub fn run_apply(
    settings: &ApplySettings,
    writer: &dyn WritePort,
    tool: ToolInfo,
) -> Result<ApplyOutcome, ToolError> {
    let loaded = load_pass_file(&settings.pass_path);
    let pass = loaded
        .pass
        .with_context(|| format!("load pass {}", settings.pass_path))?;
    let tree = SyntaxTree::from_green(&pass.tree)
        .with_context(|| format!("build tree of {}", settings.pass_path))?;

    let resolver = Resolver::new().context("build fix registry")?;
    let fix = resolver
        .resolve_pass(&tree, &pass.diagnostics, Default::default())
        .into_iter()
        .flat_map(|r| r.fixes)
        .find(|f| f.id == settings.fix)
        .with_context(|| {
            format!(
                "no fix with id {} in {}",
                settings.fix, settings.pass_path
            )
        })?;

    let sha_before = source_sha256(tree.source());
    let mut receipt = ApplyReceipt::new(
        tool,
        settings.pass_path.as_str(),
        pass.source_name.as_str(),
        AppliedFixRef {
            id: fix.id.clone(),
            fix_id: fix.fix_id.clone(),
            title: fix.title.clone(),
        },
        sha_before.as_str(),
    );

    let target = settings.source_root.join(&pass.source_name);
    let on_disk = writer.read_file(&target)?;

    let blocked = if settings
        .expected_sha256
        .as_deref()
        .is_some_and(|expected| expected != sha_before)
    {
        Some("pass changed since the fix was resolved".to_string())
    } else if on_disk.is_none() {
        Some(format!("source file {} not found", target))
    } else if on_disk.as_deref().map(source_sha256).as_deref() != Some(sha_before.as_str()) {
        Some(format!("{} differs from the analyzed snapshot", target))
    } else if !settings.dry_run && !settings.allow_guarded && !safety_for(&fix.fix_id).is_safe() {
        Some("guarded fix requires allow_guarded".to_string())
    } else {
        None
    };

    if let Some(reason) = blocked {
        warn!(fix_id = %fix.fix_id, reason = %reason, "apply blocked");
        receipt.status = ApplyStatus::Blocked;
        receipt.message = Some(reason);
        return Ok(ApplyOutcome {
            receipt,
            patch: String::new(),
            policy_block: true,
        });
    }

    let applied = match apply_fix(&tree, &fix) {
        Ok(applied) => applied,
        Err(e) => {
            warn!(fix_id = %fix.fix_id, error = %e, "fix no longer applies");
            receipt.status = ApplyStatus::Blocked;
            receipt.message = Some(e.to_string());
            return Ok(ApplyOutcome {
                receipt,
                patch: String::new(),
                policy_block: true,
            });
        }
    };

    let patch = render_patch(&pass.source_name, tree.source(), &applied.source);
    receipt.sha256_after = Some(source_sha256(&applied.source));

    if settings.dry_run {
        receipt.status = ApplyStatus::DryRun;
    } else {
        writer.write_file(&target, applied.source.as_bytes())?;
        receipt.status = ApplyStatus::Applied;
        info!(path = %target, fix_id = %fix.fix_id, "applied fix");
    }

    Ok(ApplyOutcome {
        receipt,
        patch,
        policy_block: false,
    })
}

/// Write `apply.json`, `apply.md`, and `patch.diff` to the output directory.
pub fn write_apply_artifacts(
    outcome: &ApplyOutcome,
    out_dir: &Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    writer.create_dir_all(out_dir)?;

    let json = serde_json::to_string_pretty(&outcome.receipt).context("serialize apply")?;
    writer.write_file(&out_dir.join("apply.json"), json.as_bytes())?;

    let md = render_apply_md(&outcome.receipt);
    writer.write_file(&out_dir.join("apply.md"), md.as_bytes())?;

    writer.write_file(&out_dir.join("patch.diff"), outcome.patch.as_bytes())?;

    info!(out_dir = %out_dir, "wrote apply artifacts");
    Ok(())
}
