use quickfix_fixer_api::predicate::{ancestor_as, fixes_from, parent_as};
use quickfix_fixer_api::{FixContext, FixFactory};
use quickfix_syntax::SyntaxKind;
use quickfix_syntax::ast::{AnnotatedExpression, AnnotationEntry, AstNode, ValueArgument};
use quickfix_syntax::walk::followed_by_newline;
use quickfix_types::diagnostic::{
    AnnotationsOnBlockLevelExpressionOnTheSameLine,
    AssigningSingleElementToVarargInNamedFormAnnotation,
};
use quickfix_types::{FixAction, FixCommand, InsertPosition};

/// Puts a line break between block-level annotations and the expression.
#[derive(Debug, Clone, Copy)]
pub struct AddNewlineAfterAnnotationsFix;

impl FixFactory<AnnotationsOnBlockLevelExpressionOnTheSameLine> for AddNewlineAfterAnnotationsFix {
    fn key(&self) -> &'static str {
        "annotation.add_newline"
    }

    fn create_fixes(
        &self,
        ctx: &FixContext<'_, AnnotationsOnBlockLevelExpressionOnTheSameLine>,
    ) -> Vec<FixCommand> {
        fixes_from((|| {
            let annotated: AnnotatedExpression<'_> = ancestor_as(ctx.anchor()?, false)?;
            annotated.base_expression()?;
            let last = annotated.annotation_entries().last()?.syntax();
            if followed_by_newline(last) {
                return None;
            }
            let action = match last.next_sibling() {
                Some(ws) if ws.kind() == SyntaxKind::Whitespace => FixAction::ReplaceToken {
                    token: ws.id(),
                    text: "\n".to_string(),
                },
                _ => FixAction::InsertText {
                    anchor: last.id(),
                    position: InsertPosition::After,
                    text: "\n".to_string(),
                },
            };
            Some(vec![FixCommand::new(
                self.key(),
                "Add line break after annotations",
                action,
            )])
        })())
    }
}

/// `@A(names = "x")` becomes `@A(names = ["x"])`.
#[derive(Debug, Clone, Copy)]
pub struct ReplaceWithArrayLiteralFix;

impl FixFactory<AssigningSingleElementToVarargInNamedFormAnnotation> for ReplaceWithArrayLiteralFix {
    fn key(&self) -> &'static str {
        "annotation.wrap_in_array_literal"
    }

    fn create_fixes(
        &self,
        ctx: &FixContext<'_, AssigningSingleElementToVarargInNamedFormAnnotation>,
    ) -> Vec<FixCommand> {
        fixes_from((|| {
            let element_type = ctx.diagnostic().element_type.as_deref()?;
            let value = ctx.anchor()?;
            if value.kind() == SyntaxKind::CollectionLiteral || !value.kind().is_expression() {
                return None;
            }
            // Only the value of a `name = value` argument of an annotation entry.
            let argument: ValueArgument<'_> = parent_as(value)?;
            if !argument.is_named() || argument.expression()?.id() != value.id() {
                return None;
            }
            argument
                .argument_list()?
                .syntax()
                .parent()
                .and_then(AnnotationEntry::cast)?;
            Some(vec![FixCommand::new(
                self.key(),
                format!("Replace with array of {element_type}"),
                FixAction::WrapInArrayLiteral {
                    expression: value.id(),
                },
            )])
        })())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quickfix_syntax::{GreenElement, SyntaxTree, make};

    fn annotated_tree(separator: &str) -> SyntaxTree {
        SyntaxTree::from_green(&make::file(vec![make::annotated(
            &["Suppress", "Deprecated"],
            separator,
            Some(make::call("run", vec![])),
        )]))
        .unwrap()
    }

    #[test]
    fn same_line_separator_becomes_newline() {
        let tree = annotated_tree(" ");
        let annotated = tree
            .nodes_of_kind(SyntaxKind::AnnotatedExpression)
            .next()
            .unwrap();
        let d = AnnotationsOnBlockLevelExpressionOnTheSameLine {
            anchor: annotated.id(),
        };
        let fixes = AddNewlineAfterAnnotationsFix.create_fixes(&FixContext::new(&tree, &d));
        let separator = annotated
            .children()
            .filter(|c| c.kind() == SyntaxKind::Whitespace)
            .last()
            .unwrap();
        assert_eq!(
            fixes[0].action,
            FixAction::ReplaceToken {
                token: separator.id(),
                text: "\n".to_string()
            }
        );
    }

    #[test]
    fn already_on_own_line_is_skipped() {
        let tree = annotated_tree("\n");
        let annotated = tree
            .nodes_of_kind(SyntaxKind::AnnotatedExpression)
            .next()
            .unwrap();
        let d = AnnotationsOnBlockLevelExpressionOnTheSameLine {
            anchor: annotated.id(),
        };
        assert!(AddNewlineAfterAnnotationsFix
            .create_fixes(&FixContext::new(&tree, &d))
            .is_empty());
    }

    fn annotation_argument_tree(value: GreenElement) -> SyntaxTree {
        SyntaxTree::from_green(&make::file(vec![make::annotated_with(
            vec![make::annotation_with_args(
                "A",
                vec![make::named_arg("names", value)],
            )],
            " ",
            Some(make::name_ref("y")),
        )]))
        .unwrap()
    }

    fn wrap_fixes(tree: &SyntaxTree, anchor: SyntaxKind) -> Vec<FixCommand> {
        let value = tree.nodes_of_kind(anchor).next().unwrap();
        let d = AssigningSingleElementToVarargInNamedFormAnnotation {
            anchor: value.id(),
            element_type: Some("String".to_string()),
        };
        ReplaceWithArrayLiteralFix.create_fixes(&FixContext::new(tree, &d))
    }

    #[test]
    fn named_annotation_value_is_wrapped() {
        let tree = annotation_argument_tree(make::literal("\"x\""));
        let value = tree.nodes_of_kind(SyntaxKind::Literal).next().unwrap();
        let fixes = wrap_fixes(&tree, SyntaxKind::Literal);
        assert_eq!(fixes.len(), 1);
        assert_eq!(fixes[0].title, "Replace with array of String");
        assert_eq!(
            fixes[0].action,
            FixAction::WrapInArrayLiteral {
                expression: value.id()
            }
        );
    }

    #[test]
    fn literal_array_is_left_alone() {
        let tree =
            annotation_argument_tree(make::collection_literal(vec![make::literal("\"y\"")]));
        assert!(wrap_fixes(&tree, SyntaxKind::CollectionLiteral).is_empty());
    }

    #[test]
    fn plain_call_argument_is_not_wrapped() {
        let tree = SyntaxTree::from_green(&make::file(vec![make::call(
            "f",
            vec![make::arg(make::literal("1"))],
        )]))
        .unwrap();
        assert!(wrap_fixes(&tree, SyntaxKind::Literal).is_empty());

        let tree = SyntaxTree::from_green(&make::file(vec![make::call(
            "f",
            vec![make::named_arg("names", make::literal("1"))],
        )]))
        .unwrap();
        assert!(wrap_fixes(&tree, SyntaxKind::Literal).is_empty());
    }

    #[test]
    fn bare_expression_is_not_wrapped() {
        let tree = SyntaxTree::from_green(&make::file(vec![make::literal("\"x\"")])).unwrap();
        assert!(wrap_fixes(&tree, SyntaxKind::Literal).is_empty());
    }
}
