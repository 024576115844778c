use quickfix_fixer_api::predicate::{fixes_from, parent_as};
use quickfix_fixer_api::{FixContext, FixFactory};
use quickfix_syntax::ast::{AstNode, ValueArgument};
use quickfix_syntax::{SyntaxKind, SyntaxNode};
use quickfix_types::diagnostic::{
    MixingNamedAndPositionedArguments, NonVarargSpread, TooManyArguments,
};
use quickfix_types::{FixAction, FixCommand, InsertPosition};

/// The argument node, whether anchored on it or on its expression.
fn argument_at(anchor: SyntaxNode<'_>) -> Option<ValueArgument<'_>> {
    ValueArgument::cast(anchor).or_else(|| parent_as(anchor))
}

/// Drops a surplus argument and its separating comma.
#[derive(Debug, Clone, Copy)]
pub struct RemoveArgumentFix;

impl FixFactory<TooManyArguments> for RemoveArgumentFix {
    fn key(&self) -> &'static str {
        "argument.remove"
    }

    fn create_fixes(&self, ctx: &FixContext<'_, TooManyArguments>) -> Vec<FixCommand> {
        fixes_from((|| {
            // The anchor is the argument's expression; anything deeper is not
            // an argument of this call.
            let argument: ValueArgument<'_> = parent_as(ctx.anchor()?)?;
            Some(vec![FixCommand::new(
                self.key(),
                "Remove argument",
                FixAction::RemoveValueArgument {
                    argument: argument.syntax().id(),
                },
            )])
        })())
    }
}

/// Removes `*` from an argument passed to a non-vararg parameter.
#[derive(Debug, Clone, Copy)]
pub struct RemoveSpreadFix;

impl FixFactory<NonVarargSpread> for RemoveSpreadFix {
    fn key(&self) -> &'static str {
        "argument.remove_spread"
    }

    fn create_fixes(&self, ctx: &FixContext<'_, NonVarargSpread>) -> Vec<FixCommand> {
        fixes_from((|| {
            let anchor = ctx.anchor()?;
            let spread = if anchor.is_token_with(SyntaxKind::Operator, "*") {
                anchor
            } else {
                argument_at(anchor)?.spread_token()?
            };
            Some(vec![FixCommand::new(
                self.key(),
                "Remove '*'",
                FixAction::RemoveNode { node: spread.id() },
            )])
        })())
    }
}

/// Names a positional argument that follows a named one.
#[derive(Debug, Clone, Copy)]
pub struct AddNameToArgumentFix;

impl FixFactory<MixingNamedAndPositionedArguments> for AddNameToArgumentFix {
    fn key(&self) -> &'static str {
        "argument.add_name"
    }

    fn create_fixes(
        &self,
        ctx: &FixContext<'_, MixingNamedAndPositionedArguments>,
    ) -> Vec<FixCommand> {
        fixes_from((|| {
            let name = ctx.diagnostic().parameter_name.as_deref()?;
            let argument = argument_at(ctx.anchor()?)?;
            if argument.is_named() {
                return None;
            }
            let first = argument.syntax().first_significant_child()?;
            Some(vec![FixCommand::new(
                self.key(),
                format!("Add '{name} =' to argument"),
                FixAction::InsertText {
                    anchor: first.id(),
                    position: InsertPosition::Before,
                    text: format!("{name} = "),
                },
            )])
        })())
    }
}
