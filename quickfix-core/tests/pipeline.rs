use camino::Utf8PathBuf;
use pretty_assertions::assert_eq;
use quickfix_core::adapters::{FsPassSource, FsWritePort, InMemoryPassSource};
use quickfix_core::pipeline::{
    run_apply, run_resolve, write_apply_artifacts, write_resolve_artifacts,
};
use quickfix_core::ports::PassSource;
use quickfix_core::settings::{ApplySettings, ResolveSettings};
use quickfix_core::{LoadedPass, PassLoadError};
use quickfix_domain::BatchMode;
use quickfix_syntax::{GreenElement, SyntaxKind, SyntaxTree, make};
use quickfix_types::ToolInfo;
use quickfix_types::apply::ApplyStatus;
use quickfix_types::diagnostic::{TooManyArguments, UselessCast};
use quickfix_types::pass::PassFile;
use quickfix_types::report::{FixStatus, ResolveReport};
use tempfile::TempDir;

const SOURCE: &str = "f(1, 2)\nx as String";

fn green() -> GreenElement {
    make::file(vec![
        make::call(
            "f",
            vec![make::arg(make::literal("1")), make::arg(make::literal("2"))],
        ),
        make::cast(make::name_ref("x"), "String"),
    ])
}

fn sample_pass() -> PassFile {
    let tree = SyntaxTree::from_green(&green()).unwrap();
    assert_eq!(tree.source(), SOURCE);
    let extra = tree.nodes_of_kind(SyntaxKind::Literal).nth(1).unwrap();
    let cast = tree.nodes_of_kind(SyntaxKind::CastExpression).next().unwrap();

    let mut pass = PassFile::new("src/Main.kt", green());
    pass.diagnostics = vec![
        TooManyArguments { anchor: extra.id() }.into(),
        UselessCast { anchor: cast.id() }.into(),
    ];
    pass
}

struct Workspace {
    _temp: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        std::fs::create_dir_all(root.join("passes")).unwrap();
        std::fs::create_dir_all(root.join("src")).unwrap();
        std::fs::write(root.join("src/Main.kt"), SOURCE).unwrap();
        std::fs::write(
            root.join("passes/main.pass.json"),
            serde_json::to_string_pretty(&sample_pass()).unwrap(),
        )
        .unwrap();
        Self { _temp: temp, root }
    }

    fn resolve(&self, settings: ResolveSettings) -> ResolveReport {
        let source = FsPassSource::new(self.root.join("passes"));
        run_resolve(&settings, &source, tool()).unwrap().report
    }

    fn apply_settings(&self, fix: &str) -> ApplySettings {
        ApplySettings {
            pass_path: self.root.join("passes/main.pass.json"),
            fix: fix.to_string(),
            source_root: self.root.clone(),
            out_dir: self.root.join("out"),
            ..ApplySettings::default()
        }
    }

    fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.root.join(rel)).unwrap()
    }
}

fn tool() -> ToolInfo {
    ToolInfo::quickfix("0.0.0-test")
}

fn fix_id_of(report: &ResolveReport, key: &str) -> String {
    report.passes[0]
        .diagnostics
        .iter()
        .flat_map(|d| &d.fixes)
        .find(|f| f.fix_id == key)
        .unwrap()
        .id
        .clone()
}

#[test]
fn resolve_reports_fixes_in_diagnostic_order() {
    let ws = Workspace::new();
    let report = ws.resolve(ResolveSettings::default());

    assert_eq!(report.passes.len(), 1);
    let pass = &report.passes[0];
    assert_eq!(pass.source_name, "src/Main.kt");
    assert_eq!(pass.source_sha256, quickfix_edit::source_sha256(SOURCE));
    let keys: Vec<Vec<&str>> = pass
        .diagnostics
        .iter()
        .map(|d| d.fixes.iter().map(|f| f.fix_id.as_str()).collect())
        .collect();
    assert_eq!(
        keys,
        vec![vec!["argument.remove"], vec!["expression.remove_useless_cast"]]
    );
    assert_eq!(report.summary.fixes_offered, 2);
    assert_eq!(report.summary.diagnostics_with_fixes, 2);
    assert!(report.run.ended_at.is_some());
}

#[test]
fn deny_policy_filters_without_dropping() {
    let ws = Workspace::new();
    let report = ws.resolve(ResolveSettings {
        deny: vec!["argument.*".to_string()],
        ..ResolveSettings::default()
    });
    let statuses: Vec<FixStatus> = report.passes[0]
        .diagnostics
        .iter()
        .flat_map(|d| d.fixes.iter().map(|f| f.status))
        .collect();
    assert_eq!(statuses, vec![FixStatus::Filtered, FixStatus::Offered]);
    assert_eq!(report.summary.fixes_filtered, 1);
    assert_eq!(report.summary.diagnostics_with_fixes, 1);
}

#[test]
fn parallel_resolve_matches_sequential() {
    let ws = Workspace::new();
    let seq = ws.resolve(ResolveSettings::default());
    let par = ws.resolve(ResolveSettings {
        batch_mode: BatchMode::Parallel,
        ..ResolveSettings::default()
    });
    assert_eq!(par.run.batch_mode, "parallel");
    assert_eq!(
        serde_json::to_value(&seq.passes).unwrap(),
        serde_json::to_value(&par.passes).unwrap()
    );
}

#[test]
fn previews_are_unified_diffs() {
    let ws = Workspace::new();
    let report = ws.resolve(ResolveSettings {
        preview: true,
        ..ResolveSettings::default()
    });
    let preview = report.passes[0].diagnostics[0].fixes[0].preview.clone().unwrap();
    assert!(preview.starts_with("diff --git a/src/Main.kt b/src/Main.kt\n"));
    assert!(preview.contains("-f(1, 2)\n"));
    assert!(preview.contains("+f(1)\n"));
}

#[test]
fn broken_passes_are_skipped_not_fatal() {
    let source = InMemoryPassSource::new(vec![LoadedPass {
        path: Utf8PathBuf::from("broken.pass.json"),
        pass: Err(PassLoadError::Json {
            message: "expected value".to_string(),
        }),
    }]);
    assert_eq!(source.load_passes().unwrap().len(), 1);
    let report = run_resolve(&ResolveSettings::default(), &source, tool())
        .unwrap()
        .report;
    assert!(report.passes.is_empty());
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].path, "broken.pass.json");
    assert!(report.skipped[0].reason.contains("expected value"));
}

#[test]
fn resolve_artifacts_are_written() {
    let ws = Workspace::new();
    let source = FsPassSource::new(ws.root.join("passes"));
    let outcome = run_resolve(&ResolveSettings::default(), &source, tool()).unwrap();
    let out = ws.root.join("out");
    write_resolve_artifacts(&outcome, &out, &FsWritePort).unwrap();

    let json: serde_json::Value = serde_json::from_str(&ws.read("out/report.json")).unwrap();
    assert_eq!(json["schema"], "quickfix.report.v1");
    assert_eq!(json["summary"]["fixes_offered"], 2);
    assert!(ws.read("out/report.md").starts_with("# quickfix report\n"));
}

#[test]
fn dry_run_leaves_source_untouched() {
    let ws = Workspace::new();
    let report = ws.resolve(ResolveSettings::default());
    let id = fix_id_of(&report, "argument.remove");

    let outcome = run_apply(&ws.apply_settings(&id), &FsWritePort, tool()).unwrap();
    assert_eq!(outcome.receipt.status, ApplyStatus::DryRun);
    assert!(!outcome.policy_block);
    assert!(outcome.patch.contains("+f(1)\n"));
    assert_eq!(
        outcome.receipt.sha256_after.as_deref(),
        Some(quickfix_edit::source_sha256("f(1)\nx as String").as_str())
    );
    assert_eq!(ws.read("src/Main.kt"), SOURCE);
}

#[test]
fn safe_fix_is_written() {
    let ws = Workspace::new();
    let report = ws.resolve(ResolveSettings::default());
    let id = fix_id_of(&report, "expression.remove_useless_cast");

    let settings = ApplySettings {
        dry_run: false,
        expected_sha256: Some(report.passes[0].source_sha256.clone()),
        ..ws.apply_settings(&id)
    };
    let outcome = run_apply(&settings, &FsWritePort, tool()).unwrap();
    assert_eq!(outcome.receipt.status, ApplyStatus::Applied);
    assert_eq!(ws.read("src/Main.kt"), "f(1, 2)\nx");

    write_apply_artifacts(&outcome, &settings.out_dir, &FsWritePort).unwrap();
    let receipt: serde_json::Value = serde_json::from_str(&ws.read("out/apply.json")).unwrap();
    assert_eq!(receipt["status"], "applied");
    let patch = ws.read("out/patch.diff");
    assert!(patch.contains("-x as String"));
    assert!(patch.contains("+x"));
}

#[test]
fn guarded_fix_needs_permission() {
    let ws = Workspace::new();
    let report = ws.resolve(ResolveSettings::default());
    let id = fix_id_of(&report, "argument.remove");

    let blocked = run_apply(
        &ApplySettings {
            dry_run: false,
            ..ws.apply_settings(&id)
        },
        &FsWritePort,
        tool(),
    )
    .unwrap();
    assert_eq!(blocked.receipt.status, ApplyStatus::Blocked);
    assert!(blocked.policy_block);
    assert_eq!(ws.read("src/Main.kt"), SOURCE);

    let allowed = run_apply(
        &ApplySettings {
            dry_run: false,
            allow_guarded: true,
            ..ws.apply_settings(&id)
        },
        &FsWritePort,
        tool(),
    )
    .unwrap();
    assert_eq!(allowed.receipt.status, ApplyStatus::Applied);
    assert_eq!(ws.read("src/Main.kt"), "f(1)\nx as String");
}

#[test]
fn changed_source_blocks_apply() {
    let ws = Workspace::new();
    let report = ws.resolve(ResolveSettings::default());
    let id = fix_id_of(&report, "expression.remove_useless_cast");
    std::fs::write(ws.root.join("src/Main.kt"), "f(1, 2)\ny as String").unwrap();

    let outcome = run_apply(
        &ApplySettings {
            dry_run: false,
            ..ws.apply_settings(&id)
        },
        &FsWritePort,
        tool(),
    )
    .unwrap();
    assert_eq!(outcome.receipt.status, ApplyStatus::Blocked);
    assert!(outcome.receipt.message.unwrap().contains("differs"));
    assert_eq!(ws.read("src/Main.kt"), "f(1, 2)\ny as String");
}

#[test]
fn stale_expected_fingerprint_blocks_apply() {
    let ws = Workspace::new();
    let report = ws.resolve(ResolveSettings::default());
    let id = fix_id_of(&report, "expression.remove_useless_cast");
    let outcome = run_apply(
        &ApplySettings {
            expected_sha256: Some("0".repeat(64)),
            ..ws.apply_settings(&id)
        },
        &FsWritePort,
        tool(),
    )
    .unwrap();
    assert_eq!(outcome.receipt.status, ApplyStatus::Blocked);
}

#[test]
fn unknown_fix_id_is_an_error() {
    let ws = Workspace::new();
    let err = run_apply(&ws.apply_settings("nope"), &FsWritePort, tool()).unwrap_err();
    assert_eq!(err.exit_code(), 1);
    assert!(err.to_string().contains("no fix with id nope"));
}
