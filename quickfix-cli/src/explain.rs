//! Text for `list-fixes` and `explain`.

use quickfix_fixer_catalog::FixerCatalogEntry;
use quickfix_types::FixSafety;
use std::fmt::Write;

pub fn format_safety_class(safety: FixSafety) -> &'static str {
    match safety {
        FixSafety::Safe => "Safe",
        FixSafety::Guarded => "Guarded",
    }
}

pub fn safety_class_meaning(safety: FixSafety) -> &'static str {
    match safety {
        FixSafety::Safe => {
            "SAFE fixes drop syntax the analyzer proved redundant. Program behavior\n\
             does not change, so `quickfix apply --write` writes them directly."
        }
        FixSafety::Guarded => {
            "GUARDED fixes change a declaration or what the code does. They are\n\
             always offered, but writing one needs --allow-guarded (or\n\
             `policy.allow_guarded = true` in quickfix.toml)."
        }
    }
}

const RULE: &str =
    "--------------------------------------------------------------------------------";

/// Full `explain` page for one catalog entry.
pub fn render_explanation(fix: &FixerCatalogEntry) -> String {
    let mut out = String::new();
    let banner = RULE.replace('-', "=");
    let _ = writeln!(out, "{banner}");
    let _ = writeln!(out, "FIX: {}", fix.title);
    let _ = writeln!(out, "{banner}");
    let _ = writeln!(out);
    let _ = writeln!(out, "Key:     {}", fix.key);
    let _ = writeln!(out, "Fix ID:  {}", fix.fix_id);
    let _ = writeln!(out, "Safety:  {}", format_safety_class(fix.safety));
    let _ = writeln!(out);

    let _ = writeln!(out, "DESCRIPTION\n{RULE}\n{}\n", fix.description);

    let _ = writeln!(out, "TRIGGERING DIAGNOSTICS\n{RULE}");
    for kind in fix.triggers {
        let _ = writeln!(out, "  - {kind}");
    }
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "SAFETY CLASS: {}\n{RULE}\n{}",
        format_safety_class(fix.safety),
        safety_class_meaning(fix.safety)
    );
    out
}

/// `list-fixes --format text`.
pub fn render_fix_table(entries: &[FixerCatalogEntry]) -> String {
    let mut out = String::from("Available fixes:\n\n");
    let _ = writeln!(out, "  {:<28} {:<10} TITLE", "KEY", "SAFETY");
    let _ = writeln!(out, "  {:<28} {:<10} -----", "---", "------");
    for fix in entries {
        let _ = writeln!(
            out,
            "  {:<28} {:<10} {}",
            fix.key,
            format_safety_class(fix.safety),
            fix.title
        );
    }
    out.push_str("\nUse 'quickfix explain <key>' for details.\n");
    out
}
