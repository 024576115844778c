use quickfix_fixer_api::predicate::{
    ancestor_as, body_ends_with_closing_brace, declaration_owner, fixes_from, has_modifier,
};
use quickfix_fixer_api::{FixContext, FixFactory};
use quickfix_syntax::ast::{AstNode, Function, FunctionBody};
use quickfix_syntax::{Modifier, SyntaxNode};
use quickfix_types::{DiagnosticPayload, FixAction, FixCommand, InsertPosition};

fn owning_function(anchor: SyntaxNode<'_>) -> Option<Function<'_>> {
    match declaration_owner(anchor) {
        Some(decl) => Function::cast(decl.syntax()),
        None => ancestor_as(anchor, false),
    }
}

/// Gives a body-less, non-abstract function an empty block body.
#[derive(Debug, Clone, Copy)]
pub struct AddFunctionBodyFix;

impl<D: DiagnosticPayload> FixFactory<D> for AddFunctionBodyFix {
    fn key(&self) -> &'static str {
        "function.add_body"
    }

    fn create_fixes(&self, ctx: &FixContext<'_, D>) -> Vec<FixCommand> {
        fixes_from((|| {
            let function = owning_function(ctx.anchor()?)?;
            if function.has_body() || has_modifier(&function, Modifier::Abstract) {
                return None;
            }
            let last = function.syntax().last_significant_child()?;
            Some(vec![FixCommand::new(
                <Self as FixFactory<D>>::key(self),
                "Add function body",
                FixAction::InsertText {
                    anchor: last.id(),
                    position: InsertPosition::After,
                    text: " {\n}".to_string(),
                },
            )])
        })())
    }
}

/// Removes a function body; block bodies must be closed.
#[derive(Debug, Clone, Copy)]
pub struct RemoveFunctionBodyFix;

impl<D: DiagnosticPayload> FixFactory<D> for RemoveFunctionBodyFix {
    fn key(&self) -> &'static str {
        "function.remove_body"
    }

    fn create_fixes(&self, ctx: &FixContext<'_, D>) -> Vec<FixCommand> {
        fixes_from((|| {
            let function = owning_function(ctx.anchor()?)?;
            match function.body()? {
                FunctionBody::Block(_) if !body_ends_with_closing_brace(&function) => return None,
                _ => {}
            }
            Some(vec![FixCommand::new(
                <Self as FixFactory<D>>::key(self),
                "Remove function body",
                FixAction::RemoveFunctionBody {
                    function: function.syntax().id(),
                },
            )])
        })())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quickfix_syntax::{GreenElement, SyntaxKind, SyntaxTree, TreeBuilder, make};
    use quickfix_types::diagnostic::{AbstractFunctionWithBody, NonMemberFunctionNoBody};

    fn function_tree(modifiers: &[&str], body: Vec<GreenElement>) -> SyntaxTree {
        SyntaxTree::from_green(&make::file(vec![make::function(modifiers, "f", vec![], body)]))
            .unwrap()
    }

    fn function_id(tree: &SyntaxTree) -> quickfix_syntax::NodeId {
        tree.nodes_of_kind(SyntaxKind::Function).next().unwrap().id()
    }

    #[test]
    fn add_body_after_signature() {
        let tree = function_tree(&[], vec![]);
        let d = NonMemberFunctionNoBody {
            anchor: function_id(&tree),
        };
        let fixes = AddFunctionBodyFix.create_fixes(&FixContext::new(&tree, &d));
        let params = tree.nodes_of_kind(SyntaxKind::ParameterList).next().unwrap();
        assert_eq!(
            fixes[0].action,
            FixAction::InsertText {
                anchor: params.id(),
                position: InsertPosition::After,
                text: " {\n}".to_string()
            }
        );

        let with_body = function_tree(&[], make::block_body(vec![]));
        let d = NonMemberFunctionNoBody {
            anchor: function_id(&with_body),
        };
        assert!(AddFunctionBodyFix
            .create_fixes(&FixContext::new(&with_body, &d))
            .is_empty());
    }

    #[test]
    fn remove_body_handles_both_body_shapes() {
        let block = function_tree(&["abstract"], make::block_body(vec![]));
        let d = AbstractFunctionWithBody {
            anchor: function_id(&block),
        };
        assert_eq!(
            RemoveFunctionBodyFix
                .create_fixes(&FixContext::new(&block, &d))
                .len(),
            1
        );

        let expr = function_tree(&["abstract"], make::expr_body(make::literal("1")));
        let d = AbstractFunctionWithBody {
            anchor: function_id(&expr),
        };
        assert_eq!(
            RemoveFunctionBodyFix
                .create_fixes(&FixContext::new(&expr, &d))
                .len(),
            1
        );
    }

    #[test]
    fn unclosed_block_is_left_alone() {
        let mut b = TreeBuilder::new();
        b.start_node(SyntaxKind::File);
        b.start_node(SyntaxKind::Function);
        b.token(SyntaxKind::Keyword, "fun");
        b.token(SyntaxKind::Whitespace, " ");
        b.token(SyntaxKind::Identifier, "f");
        b.start_node(SyntaxKind::ParameterList);
        b.token(SyntaxKind::Punct, "(");
        b.token(SyntaxKind::Punct, ")");
        b.finish_node();
        b.start_node(SyntaxKind::Block);
        b.token(SyntaxKind::Punct, "{");
        b.finish_node();
        b.finish_node();
        b.finish_node();
        let tree = b.finish().unwrap();
        let d = AbstractFunctionWithBody {
            anchor: function_id(&tree),
        };
        assert!(RemoveFunctionBodyFix
            .create_fixes(&FixContext::new(&tree, &d))
            .is_empty());
    }
}
