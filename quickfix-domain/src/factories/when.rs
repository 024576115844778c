use quickfix_fixer_api::predicate::{ancestor_as, fixes_from};
use quickfix_fixer_api::{FixContext, FixFactory};
use quickfix_syntax::ast::{AstNode, WhenEntry, WhenExpression};
use quickfix_types::diagnostic::{ElseMisplacedInWhen, NoElseInWhen};
use quickfix_types::{FixAction, FixCommand, InsertPosition};

fn when_at<'t>(ctx: &FixContext<'t, NoElseInWhen>) -> Option<WhenExpression<'t>> {
    ancestor_as(ctx.anchor()?, false)
}

/// Adds an empty `else` branch before the closing brace.
#[derive(Debug, Clone, Copy)]
pub struct AddWhenElseFix;

impl FixFactory<NoElseInWhen> for AddWhenElseFix {
    fn key(&self) -> &'static str {
        "when.add_else_branch"
    }

    fn create_fixes(&self, ctx: &FixContext<'_, NoElseInWhen>) -> Vec<FixCommand> {
        fixes_from((|| {
            let when = when_at(ctx)?;
            if when.else_entry().is_some() {
                return None;
            }
            let rbrace = when.rbrace()?;
            Some(vec![FixCommand::new(
                self.key(),
                "Add else branch",
                FixAction::InsertText {
                    anchor: rbrace.id(),
                    position: InsertPosition::Before,
                    text: "else -> {}\n".to_string(),
                },
            )])
        })())
    }
}

/// Adds one `TODO()` branch per uncovered case.
#[derive(Debug, Clone, Copy)]
pub struct AddRemainingBranchesFix;

impl FixFactory<NoElseInWhen> for AddRemainingBranchesFix {
    fn key(&self) -> &'static str {
        "when.add_remaining_branches"
    }

    fn create_fixes(&self, ctx: &FixContext<'_, NoElseInWhen>) -> Vec<FixCommand> {
        fixes_from((|| {
            let missing = &ctx.diagnostic().missing_cases;
            if missing.is_empty() {
                return None;
            }
            let rbrace = when_at(ctx)?.rbrace()?;
            let text: String = missing
                .iter()
                .map(|case| format!("{case} -> TODO()\n"))
                .collect();
            Some(vec![FixCommand::new(
                self.key(),
                "Add remaining branches",
                FixAction::InsertText {
                    anchor: rbrace.id(),
                    position: InsertPosition::Before,
                    text,
                },
            )])
        })())
    }
}

/// Moves an `else` entry that is not last to the end of the `when`.
#[derive(Debug, Clone, Copy)]
pub struct MoveWhenElseFix;

impl FixFactory<ElseMisplacedInWhen> for MoveWhenElseFix {
    fn key(&self) -> &'static str {
        "when.move_else_branch"
    }

    fn create_fixes(&self, ctx: &FixContext<'_, ElseMisplacedInWhen>) -> Vec<FixCommand> {
        fixes_from((|| {
            let entry: WhenEntry<'_> = ancestor_as(ctx.anchor()?, false)?;
            if !entry.is_else() {
                return None;
            }
            let when: WhenExpression<'_> = ancestor_as(entry.syntax(), true)?;
            if when.entries().last()? == entry {
                return None;
            }
            Some(vec![FixCommand::new(
                self.key(),
                "Move else branch to the end",
                FixAction::MoveWhenElseToEnd {
                    when: when.syntax().id(),
                },
            )])
        })())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quickfix_syntax::{SyntaxKind, SyntaxTree, make};

    fn when_tree(entries: Vec<quickfix_syntax::GreenElement>) -> SyntaxTree {
        SyntaxTree::from_green(&make::file(vec![make::when_expr(
            Some(make::name_ref("c")),
            entries,
        )]))
        .unwrap()
    }

    fn red_entry() -> quickfix_syntax::GreenElement {
        make::when_entry(make::name_ref("RED"), make::literal("1"))
    }

    #[test]
    fn else_branch_goes_before_closing_brace() {
        let tree = when_tree(vec![red_entry()]);
        let when = tree.nodes_of_kind(SyntaxKind::WhenExpression).next().unwrap();
        let d = NoElseInWhen {
            anchor: when.id(),
            missing_cases: vec!["GREEN".to_string(), "BLUE".to_string()],
        };
        let ctx = FixContext::new(&tree, &d);
        let rbrace = tree.find_token(SyntaxKind::Punct, "}").unwrap();

        let else_fix = AddWhenElseFix.create_fixes(&ctx);
        assert_eq!(
            else_fix[0].action,
            FixAction::InsertText {
                anchor: rbrace.id(),
                position: InsertPosition::Before,
                text: "else -> {}\n".to_string()
            }
        );

        let branches = AddRemainingBranchesFix.create_fixes(&ctx);
        match &branches[0].action {
            FixAction::InsertText { text, .. } => {
                assert_eq!(text, "GREEN -> TODO()\nBLUE -> TODO()\n")
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn exhaustive_when_gets_no_else() {
        let tree = when_tree(vec![red_entry(), make::else_entry(make::literal("0"))]);
        let when = tree.nodes_of_kind(SyntaxKind::WhenExpression).next().unwrap();
        let d = NoElseInWhen {
            anchor: when.id(),
            missing_cases: vec![],
        };
        let ctx = FixContext::new(&tree, &d);
        assert!(AddWhenElseFix.create_fixes(&ctx).is_empty());
        assert!(AddRemainingBranchesFix.create_fixes(&ctx).is_empty());
    }

    #[test]
    fn misplaced_else_is_moved_once() {
        let misplaced = when_tree(vec![make::else_entry(make::literal("0")), red_entry()]);
        let entry = misplaced.nodes_of_kind(SyntaxKind::WhenEntry).next().unwrap();
        let d = ElseMisplacedInWhen { anchor: entry.id() };
        assert_eq!(
            MoveWhenElseFix
                .create_fixes(&FixContext::new(&misplaced, &d))
                .len(),
            1
        );

        let ordered = when_tree(vec![red_entry(), make::else_entry(make::literal("0"))]);
        let last = ordered.nodes_of_kind(SyntaxKind::WhenEntry).nth(1).unwrap();
        let d = ElseMisplacedInWhen { anchor: last.id() };
        assert!(MoveWhenElseFix
            .create_fixes(&FixContext::new(&ordered, &d))
            .is_empty());
    }
}
