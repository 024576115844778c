//! Edit engine for quickfix fix commands.
//!
//! Responsibilities:
//! - Lower a [`FixCommand`]'s structural action to text edits.
//! - Apply the edits to the tree's source, producing new text.
//! - Fingerprint sources and render a unified diff preview.
//!
//! Trees are never mutated; the result of applying a fix is a new string.

mod error;
mod lower;

pub use error::{EditError, EditResult};
pub use lower::{TextEdit, lower};

use diffy::PatchFormatter;
use quickfix_syntax::{SyntaxTree, TextRange};
use quickfix_types::FixCommand;
use sha2::{Digest, Sha256};
use tracing::debug;

/// A fix realized against one source snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedFix {
    pub fix_id: String,
    pub edits: Vec<TextEdit>,
    /// Source text after the edits.
    pub source: String,
}

impl AppliedFix {
    pub fn is_noop(&self) -> bool {
        self.edits.is_empty()
    }
}

/// Applies `fix` to the source of `tree`.
pub fn apply_fix(tree: &SyntaxTree, fix: &FixCommand) -> EditResult<AppliedFix> {
    let edits = lower(tree, &fix.action)?;
    let source = apply_edits(tree.source(), &edits)?;
    debug!(
        fix_id = %fix.fix_id,
        action = fix.action.name(),
        edits = edits.len(),
        "applied fix"
    );
    Ok(AppliedFix {
        fix_id: fix.fix_id.clone(),
        edits,
        source,
    })
}

/// Applies non-overlapping edits to `source`.
///
/// Insertions at the same offset keep their given order. An insertion strictly
/// inside a replaced range counts as an overlap.
pub fn apply_edits(source: &str, edits: &[TextEdit]) -> EditResult<String> {
    let mut sorted: Vec<&TextEdit> = edits.iter().collect();
    sorted.sort_by_key(|e| (e.range.start, e.range.end));

    for pair in sorted.windows(2) {
        let (a, b) = (pair[0].range, pair[1].range);
        if a.end > b.start {
            return Err(EditError::OverlappingEdits {
                first: a,
                second: b,
            });
        }
    }

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0usize;
    for edit in sorted {
        let (start, end) = (edit.range.start as usize, edit.range.end as usize);
        let kept = source
            .get(cursor..start)
            .ok_or_else(|| out_of_bounds(edit.range, source))?;
        out.push_str(kept);
        if source.get(start..end).is_none() {
            return Err(out_of_bounds(edit.range, source));
        }
        out.push_str(&edit.replacement);
        cursor = end;
    }
    out.push_str(source.get(cursor..).unwrap_or_default());
    Ok(out)
}

fn out_of_bounds(range: TextRange, source: &str) -> EditError {
    EditError::OutOfBounds {
        range,
        len: source.len(),
    }
}

/// Unified diff of applying `fix`, labelled with `name`.
pub fn preview_patch(name: &str, tree: &SyntaxTree, fix: &FixCommand) -> EditResult<String> {
    let applied = apply_fix(tree, fix)?;
    Ok(render_patch(name, tree.source(), &applied.source))
}

/// Git-style unified diff between two versions of one file; empty when equal.
pub fn render_patch(name: &str, before: &str, after: &str) -> String {
    if before == after {
        return String::new();
    }
    let mut out = String::new();
    out.push_str(&format!("diff --git a/{0} b/{0}\n", name));
    out.push_str(&format!("--- a/{0}\n+++ b/{0}\n", name));

    let patch = diffy::create_patch(before, after);
    out.push_str(&PatchFormatter::new().fmt_patch(&patch).to_string());
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// Hex SHA-256 of a source text, used as the apply precondition.
pub fn source_sha256(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn edits_apply_in_offset_order() {
        let edits = vec![
            TextEdit::insert(5, "!"),
            TextEdit::replace(TextRange::new(0, 1), "H"),
        ];
        assert_eq!(apply_edits("hello", &edits).unwrap(), "Hello!");
    }

    #[test]
    fn same_offset_insertions_keep_order() {
        let edits = vec![TextEdit::insert(0, "a"), TextEdit::insert(0, "b")];
        assert_eq!(apply_edits("x", &edits).unwrap(), "abx");
    }

    #[test]
    fn overlapping_edits_are_rejected() {
        let edits = vec![
            TextEdit::delete(TextRange::new(0, 4)),
            TextEdit::insert(2, "x"),
        ];
        assert!(matches!(
            apply_edits("abcdef", &edits),
            Err(EditError::OverlappingEdits { .. })
        ));
    }

    #[test]
    fn out_of_range_edit_is_rejected() {
        let edits = vec![TextEdit::delete(TextRange::new(2, 10))];
        assert_eq!(
            apply_edits("abc", &edits),
            Err(EditError::OutOfBounds {
                range: TextRange::new(2, 10),
                len: 3
            })
        );
    }

    #[test]
    fn sha256_is_hex_of_text() {
        assert_eq!(
            source_sha256(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn identical_sources_have_empty_patch() {
        assert_eq!(render_patch("a.kt", "x\n", "x\n"), "");
        let patch = render_patch("a.kt", "val x\n", "var x\n");
        assert!(patch.starts_with("diff --git a/a.kt b/a.kt\n"));
        assert!(patch.contains("-val x"));
        assert!(patch.contains("+var x"));
    }
}
