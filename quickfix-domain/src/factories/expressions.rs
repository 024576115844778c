use quickfix_fixer_api::predicate::{ancestor_as, declaration_owner, fixes_from, parent_as};
use quickfix_fixer_api::{FixContext, FixFactory};
use quickfix_syntax::ast::{
    AstNode, CastExpression, PostfixExpression, Property, SafeQualifiedExpression, TypeReference,
};
use quickfix_syntax::{SyntaxKind, SyntaxNode};
use quickfix_types::diagnostic::{
    InapplicableLateinitModifier, RedundantNullable, UnnecessaryNotNullAssertion,
    UnnecessarySafeCall, UselessCast,
};
use quickfix_types::{FixAction, FixCommand};

/// `x as T` becomes `x`.
#[derive(Debug, Clone, Copy)]
pub struct RemoveUselessCastFix;

impl FixFactory<UselessCast> for RemoveUselessCastFix {
    fn key(&self) -> &'static str {
        "expression.remove_useless_cast"
    }

    fn create_fixes(&self, ctx: &FixContext<'_, UselessCast>) -> Vec<FixCommand> {
        fixes_from((|| {
            let cast: CastExpression<'_> = ancestor_as(ctx.anchor()?, false)?;
            let left = cast.left()?;
            Some(vec![FixCommand::new(
                self.key(),
                "Remove useless cast",
                FixAction::ReplaceWithChild {
                    node: cast.syntax().id(),
                    child: left.id(),
                },
            )])
        })())
    }
}

/// `x?.f()` becomes `x.f()` on a receiver that cannot be null.
#[derive(Debug, Clone, Copy)]
pub struct ReplaceWithDotCallFix;

impl FixFactory<UnnecessarySafeCall> for ReplaceWithDotCallFix {
    fn key(&self) -> &'static str {
        "expression.replace_with_dot_call"
    }

    fn create_fixes(&self, ctx: &FixContext<'_, UnnecessarySafeCall>) -> Vec<FixCommand> {
        fixes_from((|| {
            let anchor = ctx.anchor()?;
            let token = if anchor.is_token_with(SyntaxKind::Operator, "?.") {
                anchor
            } else {
                SafeQualifiedExpression::cast(anchor)?.operation_token()?
            };
            Some(vec![FixCommand::new(
                self.key(),
                "Replace with dot call",
                FixAction::ReplaceToken {
                    token: token.id(),
                    text: ".".to_string(),
                },
            )])
        })())
    }
}

/// `x!!` becomes `x`.
#[derive(Debug, Clone, Copy)]
pub struct RemoveNotNullAssertionFix;

impl FixFactory<UnnecessaryNotNullAssertion> for RemoveNotNullAssertionFix {
    fn key(&self) -> &'static str {
        "expression.remove_not_null_assertion"
    }

    fn create_fixes(&self, ctx: &FixContext<'_, UnnecessaryNotNullAssertion>) -> Vec<FixCommand> {
        fixes_from((|| {
            let anchor = ctx.anchor()?;
            let postfix = PostfixExpression::cast(anchor).or_else(|| parent_as(anchor))?;
            if !postfix.is_not_null_assertion() {
                return None;
            }
            let base = postfix.base()?;
            Some(vec![FixCommand::new(
                self.key(),
                "Remove '!!'",
                FixAction::ReplaceWithChild {
                    node: postfix.syntax().id(),
                    child: base.id(),
                },
            )])
        })())
    }
}

/// Drops the `?` of a nullable type.
#[derive(Debug, Clone, Copy)]
pub struct RemoveNullableFix;

impl RemoveNullableFix {
    const KEY: &'static str = "type.remove_nullable";

    fn fix_for(type_ref: TypeReference<'_>) -> Option<Vec<FixCommand>> {
        let question = type_ref.question_token()?;
        Some(vec![FixCommand::new(
            Self::KEY,
            format!("Change type to '{}'", type_ref.base_name()),
            FixAction::RemoveNode {
                node: question.id(),
            },
        )])
    }

    fn type_ref_at(anchor: SyntaxNode<'_>) -> Option<TypeReference<'_>> {
        TypeReference::cast(anchor).or_else(|| parent_as(anchor))
    }
}

impl FixFactory<RedundantNullable> for RemoveNullableFix {
    fn key(&self) -> &'static str {
        Self::KEY
    }

    fn create_fixes(&self, ctx: &FixContext<'_, RedundantNullable>) -> Vec<FixCommand> {
        fixes_from((|| Self::fix_for(Self::type_ref_at(ctx.anchor()?)?))())
    }
}

impl FixFactory<InapplicableLateinitModifier> for RemoveNullableFix {
    fn key(&self) -> &'static str {
        Self::KEY
    }

    fn create_fixes(&self, ctx: &FixContext<'_, InapplicableLateinitModifier>) -> Vec<FixCommand> {
        fixes_from((|| {
            let property = Property::cast(declaration_owner(ctx.anchor()?)?.syntax())?;
            Self::fix_for(property.type_reference()?)
        })())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quickfix_syntax::{SyntaxTree, make};

    fn tree(expr: quickfix_syntax::GreenElement) -> SyntaxTree {
        SyntaxTree::from_green(&make::file(vec![expr])).unwrap()
    }

    #[test]
    fn cast_is_replaced_by_operand() {
        let t = tree(make::cast(make::name_ref("x"), "String"));
        let cast = t.nodes_of_kind(SyntaxKind::CastExpression).next().unwrap();
        let operand = t.nodes_of_kind(SyntaxKind::NameReference).next().unwrap();
        let d = UselessCast { anchor: cast.id() };
        let fixes = RemoveUselessCastFix.create_fixes(&FixContext::new(&t, &d));
        assert_eq!(
            fixes[0].action,
            FixAction::ReplaceWithChild {
                node: cast.id(),
                child: operand.id()
            }
        );
    }

    #[test]
    fn safe_call_token_becomes_dot() {
        let t = tree(make::safe_call(make::name_ref("x"), make::name_ref("length")));
        let token = t.find_token(SyntaxKind::Operator, "?.").unwrap();
        let d = UnnecessarySafeCall { anchor: token.id() };
        let fixes = ReplaceWithDotCallFix.create_fixes(&FixContext::new(&t, &d));
        assert_eq!(
            fixes[0].action,
            FixAction::ReplaceToken {
                token: token.id(),
                text: ".".to_string()
            }
        );
    }

    #[test]
    fn not_null_assertion_anchored_on_operator() {
        let t = tree(make::not_null(make::name_ref("x")));
        let bang = t.find_token(SyntaxKind::Operator, "!!").unwrap();
        let d = UnnecessaryNotNullAssertion { anchor: bang.id() };
        let fixes = RemoveNotNullAssertionFix.create_fixes(&FixContext::new(&t, &d));
        assert_eq!(fixes.len(), 1);
        assert_eq!(fixes[0].action.name(), "replace_with_child");
    }

    #[test]
    fn nullable_marker_is_removed_from_lateinit_property() {
        let t = tree(make::property(&["lateinit"], "var", "s", Some("String?"), None));
        let lateinit = t.find_token(SyntaxKind::ModifierKeyword, "lateinit").unwrap();
        let question = t.find_token(SyntaxKind::Operator, "?").unwrap();
        let d = InapplicableLateinitModifier {
            anchor: lateinit.id(),
        };
        let fixes = RemoveNullableFix.create_fixes(&FixContext::new(&t, &d));
        assert_eq!(fixes[0].title, "Change type to 'String'");
        assert_eq!(fixes[0].action, FixAction::RemoveNode { node: question.id() });

        let type_ref = t.nodes_of_kind(SyntaxKind::TypeReference).next().unwrap();
        let d = RedundantNullable {
            anchor: type_ref.id(),
        };
        assert_eq!(
            RemoveNullableFix.create_fixes(&FixContext::new(&t, &d)),
            fixes
        );
    }
}
