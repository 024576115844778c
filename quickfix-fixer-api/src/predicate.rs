//! Applicability checks shared by fix factories.
//!
//! Narrowing helpers return `Option` so they chain with `?` inside a closure
//! returning `Option<Vec<FixCommand>>`; [`fixes_from`] turns that closure's
//! result into the total `Vec` a factory returns.

use quickfix_syntax::ast::{
    AstNode, Declaration, Function, FunctionBody, HasModifiers, ModifierList, Property,
};
use quickfix_syntax::{Modifier, SyntaxKind, SyntaxNode, walk};
use quickfix_types::FixCommand;

pub fn narrow<'t, T: AstNode<'t>>(node: SyntaxNode<'t>) -> Option<T> {
    T::cast(node)
}

/// The direct parent, narrowed.
pub fn parent_as<'t, T: AstNode<'t>>(node: SyntaxNode<'t>) -> Option<T> {
    node.parent().and_then(T::cast)
}

pub fn ancestor_as<'t, T: AstNode<'t>>(node: SyntaxNode<'t>, strict: bool) -> Option<T> {
    walk::parent_of_type(node, strict)
}

/// The declaration a node belongs to.
///
/// A modifier keyword or modifier list resolves to the declaration owning the
/// list; any other node resolves to its nearest enclosing declaration.
pub fn declaration_owner(node: SyntaxNode<'_>) -> Option<Declaration<'_>> {
    let node = if node.kind() == SyntaxKind::ModifierKeyword {
        node.parent()?
    } else {
        node
    };
    if ModifierList::cast(node).is_some() {
        return node.parent().and_then(Declaration::cast);
    }
    walk::containing_declaration(node)
}

pub fn has_modifier<'t>(decl: &impl HasModifiers<'t>, modifier: Modifier) -> bool {
    decl.has_modifier(modifier)
}

pub fn is_mutable_property(property: &Property<'_>) -> bool {
    property.is_var()
}

/// Declared or inferred type is known, non-nullable, and not primitive.
pub fn has_non_nullable_reference_type(property: &Property<'_>) -> bool {
    property
        .resolved_type()
        .is_some_and(|ty| !ty.nullable && !ty.primitive)
}

/// The function has a block body whose closing `}` is present.
pub fn body_ends_with_closing_brace(function: &Function<'_>) -> bool {
    match function.body() {
        Some(FunctionBody::Block(block)) => block.rbrace().is_some(),
        _ => false,
    }
}

pub fn is_class_member(decl: &Declaration<'_>) -> bool {
    decl.containing_class().is_some()
}

/// The enclosing class is abstract or an interface.
pub fn owner_is_abstract_or_interface(decl: &Declaration<'_>) -> bool {
    decl.containing_class()
        .is_some_and(|c| c.is_interface() || c.has_modifier(Modifier::Abstract))
}

/// Flattens an early-exit closure result into the total result type.
pub fn fixes_from(fixes: Option<Vec<FixCommand>>) -> Vec<FixCommand> {
    fixes.unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quickfix_syntax::{SyntaxTree, make};

    fn tree() -> SyntaxTree {
        SyntaxTree::from_green(&make::file(vec![make::class(
            &["abstract"],
            "class",
            "Base",
            vec![
                make::property(&["private"], "var", "name", Some("String"), None),
                make::property(&[], "var", "count", Some("Int"), None),
                make::function(&[], "f", vec![], make::block_body(vec![])),
            ],
        )]))
        .unwrap()
    }

    fn property<'t>(tree: &'t SyntaxTree, name: &str) -> Property<'t> {
        tree.nodes_of_kind(SyntaxKind::Property)
            .filter_map(Property::cast)
            .find(|p| p.name() == Some(name))
            .unwrap()
    }

    #[test]
    fn modifier_token_resolves_to_its_declaration() {
        let t = tree();
        let private = t.find_token(SyntaxKind::ModifierKeyword, "private").unwrap();
        let owner = declaration_owner(private).unwrap();
        assert_eq!(owner.name(), Some("name"));
        assert!(is_class_member(&owner));
        assert!(owner_is_abstract_or_interface(&owner));
    }

    #[test]
    fn reference_type_guard() {
        let t = tree();
        assert!(has_non_nullable_reference_type(&property(&t, "name")));
        assert!(!has_non_nullable_reference_type(&property(&t, "count")));
        assert!(is_mutable_property(&property(&t, "count")));
    }

    #[test]
    fn narrowing_helpers() {
        let t = tree();
        let ident = t.find_token(SyntaxKind::Identifier, "name").unwrap();
        assert!(parent_as::<Property<'_>>(ident).is_some());
        assert!(narrow::<Property<'_>>(ident).is_none());
        assert!(ancestor_as::<Function<'_>>(ident, true).is_none());
        let f = t
            .nodes_of_kind(SyntaxKind::Function)
            .find_map(Function::cast)
            .unwrap();
        assert!(body_ends_with_closing_brace(&f));
        assert!(!has_modifier(&f, Modifier::Abstract));
    }

    #[test]
    fn fixes_from_is_total() {
        assert_eq!(fixes_from(None), vec![]);
    }
}
