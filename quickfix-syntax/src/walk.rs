//! Generic tree navigation built on [`AstNode`].

use crate::ast::{AstNode, Declaration};
use crate::kind::SyntaxKind;
use crate::tree::SyntaxNode;

/// Nearest ancestor of the given type.
///
/// With `strict == false` the node itself is considered first.
pub fn parent_of_type<'t, T: AstNode<'t>>(node: SyntaxNode<'t>, strict: bool) -> Option<T> {
    let start = if strict { node.parent()? } else { node };
    start.ancestors().find_map(T::cast)
}

/// Nearest ancestor whose kind is one of `kinds`.
pub fn ancestor_of_kind<'t>(
    node: SyntaxNode<'t>,
    kinds: &[SyntaxKind],
    strict: bool,
) -> Option<SyntaxNode<'t>> {
    let start = if strict { node.parent()? } else { node };
    start.ancestors().find(|a| kinds.contains(&a.kind()))
}

/// First descendant of the given type in preorder, including the node itself.
pub fn first_descendant<'t, T: AstNode<'t>>(node: SyntaxNode<'t>) -> Option<T> {
    node.descendants().find_map(T::cast)
}

/// All descendants of the given type in preorder.
pub fn descendants_of_type<'t, T: AstNode<'t>>(
    node: SyntaxNode<'t>,
) -> impl Iterator<Item = T> + use<'t, T> {
    node.descendants().filter_map(T::cast)
}

/// The declaration a node belongs to, e.g. the property owning an initializer.
pub fn containing_declaration(node: SyntaxNode<'_>) -> Option<Declaration<'_>> {
    parent_of_type::<Declaration<'_>>(node, false)
}

/// Whitespace between `node` and its next significant sibling contains a line break.
pub fn followed_by_newline(node: SyntaxNode<'_>) -> bool {
    std::iter::successors(node.next_sibling(), |n| n.next_sibling())
        .take_while(|n| n.is_trivia())
        .any(|n| n.kind() == SyntaxKind::Whitespace && n.text().contains('\n'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ClassLike, Function, Property};
    use crate::make;
    use crate::tree::SyntaxTree;

    fn class_with_members() -> SyntaxTree {
        SyntaxTree::from_green(&make::file(vec![make::class(
            &[],
            "class",
            "A",
            vec![
                make::property(&[], "val", "x", None, Some(make::literal("1"))),
                make::function(&[], "f", vec![], make::block_body(vec![])),
            ],
        )]))
        .unwrap()
    }

    #[test]
    fn parent_of_type_respects_strictness() {
        let tree = class_with_members();
        let prop = tree.nodes_of_kind(SyntaxKind::Property).next().unwrap();
        assert!(parent_of_type::<Property<'_>>(prop, false).is_some());
        assert!(parent_of_type::<Property<'_>>(prop, true).is_none());
        let class = parent_of_type::<ClassLike<'_>>(prop, true).unwrap();
        assert_eq!(class.name(), Some("A"));
    }

    #[test]
    fn containing_declaration_climbs_from_expressions() {
        let tree = class_with_members();
        let lit = tree.nodes_of_kind(SyntaxKind::Literal).next().unwrap();
        let decl = containing_declaration(lit).unwrap();
        assert_eq!(decl.syntax().kind(), SyntaxKind::Property);
        assert_eq!(
            ancestor_of_kind(lit, &[SyntaxKind::ClassBody, SyntaxKind::Block], true)
                .map(|n| n.kind()),
            Some(SyntaxKind::ClassBody)
        );
        assert_eq!(ancestor_of_kind(lit, &[SyntaxKind::Literal], false), Some(lit));
    }

    #[test]
    fn first_descendant_finds_nested_function() {
        let tree = class_with_members();
        let f = first_descendant::<Function<'_>>(tree.root()).unwrap();
        assert_eq!(f.name(), Some("f"));
        assert_eq!(descendants_of_type::<Property<'_>>(tree.root()).count(), 1);
    }

    #[test]
    fn newline_detection_skips_only_trivia() {
        let tree = SyntaxTree::from_green(&make::file(vec![make::annotated(
            &["A"],
            "\n",
            Some(make::name_ref("x")),
        )]))
        .unwrap();
        let entry = tree.nodes_of_kind(SyntaxKind::AnnotationEntry).next().unwrap();
        assert!(followed_by_newline(entry));
        let name = tree.nodes_of_kind(SyntaxKind::NameReference).next().unwrap();
        assert!(!followed_by_newline(name));
    }
}
