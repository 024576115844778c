use quickfix_fixer_api::predicate::{ancestor_as, fixes_from};
use quickfix_fixer_api::{FixContext, FixFactory};
use quickfix_syntax::SyntaxKind;
use quickfix_syntax::ast::{AstNode, Property};
use quickfix_types::diagnostic::UnusedVariable;
use quickfix_types::{FixAction, FixCommand};

/// Removes an unused local variable.
///
/// An initializer that may have side effects is kept as a bare statement.
#[derive(Debug, Clone, Copy)]
pub struct RemoveUnusedVariableFix;

impl FixFactory<UnusedVariable> for RemoveUnusedVariableFix {
    fn key(&self) -> &'static str {
        "variable.remove_unused"
    }

    fn create_fixes(&self, ctx: &FixContext<'_, UnusedVariable>) -> Vec<FixCommand> {
        fixes_from((|| {
            let property: Property<'_> = ancestor_as(ctx.anchor()?, false)?;
            if !property.is_local() {
                return None;
            }
            let name = property.name()?;
            let fix = match property.initializer() {
                Some(init) if !is_pure(init.kind()) => FixCommand::new(
                    self.key(),
                    format!("Remove variable '{name}', keeping initializer"),
                    FixAction::ReplaceWithChild {
                        node: property.syntax().id(),
                        child: init.id(),
                    },
                ),
                _ => FixCommand::new(
                    self.key(),
                    format!("Remove variable '{name}'"),
                    FixAction::RemoveNode {
                        node: property.syntax().id(),
                    },
                ),
            };
            Some(vec![fix])
        })())
    }
}

/// Renames an unused local to `_`, keeping its initializer.
#[derive(Debug, Clone, Copy)]
pub struct RenameToUnderscoreFix;

impl FixFactory<UnusedVariable> for RenameToUnderscoreFix {
    fn key(&self) -> &'static str {
        "variable.rename_to_underscore"
    }

    fn create_fixes(&self, ctx: &FixContext<'_, UnusedVariable>) -> Vec<FixCommand> {
        fixes_from((|| {
            let property: Property<'_> = ancestor_as(ctx.anchor()?, false)?;
            if !property.is_local() || property.initializer().is_none() {
                return None;
            }
            let name = property.name_token()?;
            if name.token_text() == Some("_") {
                return None;
            }
            Some(vec![FixCommand::new(
                self.key(),
                "Rename to _",
                FixAction::ReplaceToken {
                    token: name.id(),
                    text: "_".to_string(),
                },
            )])
        })())
    }
}

fn is_pure(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Literal | SyntaxKind::NameReference | SyntaxKind::CollectionLiteral
    )
}
