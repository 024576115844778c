//! Nested, serializable form of a syntax tree.
//!
//! Pass files carry trees in this shape; [`SyntaxTree::from_green`] rebuilds
//! the arena through [`TreeBuilder`] so ranges are recomputed, never trusted.

use crate::builder::{TreeBuilder, TreeError};
use crate::kind::SyntaxKind;
use crate::tree::{SyntaxNode, SyntaxTree, TypeInfo};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreenElement {
    pub kind: SyntaxKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeInfo>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<GreenElement>,
}

impl GreenElement {
    pub fn node(kind: SyntaxKind, children: Vec<GreenElement>) -> Self {
        Self {
            kind,
            text: None,
            ty: None,
            children,
        }
    }

    pub fn token(kind: SyntaxKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: Some(text.into()),
            ty: None,
            children: Vec::new(),
        }
    }

    pub fn with_type(mut self, ty: TypeInfo) -> Self {
        self.ty = Some(ty);
        self
    }

    fn build_into(&self, b: &mut TreeBuilder) {
        if self.kind.is_token() {
            let text = self.text.as_deref().unwrap_or_default();
            match &self.ty {
                Some(ty) => b.typed_token(self.kind, text, ty.clone()),
                None => b.token(self.kind, text),
            };
            return;
        }
        b.start_node(self.kind);
        if let Some(ty) = &self.ty {
            b.set_type(ty.clone());
        }
        for child in &self.children {
            child.build_into(b);
        }
        b.finish_node();
    }
}

impl SyntaxTree {
    pub fn from_green(root: &GreenElement) -> Result<SyntaxTree, TreeError> {
        let mut b = TreeBuilder::new();
        root.build_into(&mut b);
        b.finish()
    }

    pub fn to_green(&self) -> GreenElement {
        green_of(self.root())
    }
}

fn green_of(node: SyntaxNode<'_>) -> GreenElement {
    if node.is_token() {
        let token = GreenElement::token(node.kind(), node.token_text().unwrap_or_default());
        return match node.type_info() {
            Some(ty) => token.with_type(ty.clone()),
            None => token,
        };
    }
    GreenElement {
        kind: node.kind(),
        text: None,
        ty: node.type_info().cloned(),
        children: node.children().map(green_of).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::make;
    use pretty_assertions::assert_eq;

    #[test]
    fn green_json_shape_is_stable() {
        let g = GreenElement::node(
            SyntaxKind::File,
            vec![make::ident("x").with_type(TypeInfo::new("Int"))],
        );
        let json = serde_json::to_value(&g).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "file",
                "children": [
                    { "kind": "identifier", "text": "x", "type": { "name": "Int", "nullable": false, "primitive": false } }
                ]
            })
        );
    }

    #[test]
    fn token_types_survive_rebuild() {
        let green = GreenElement::node(
            SyntaxKind::File,
            vec![GreenElement::node(
                SyntaxKind::NameReference,
                vec![make::ident("x").with_type(TypeInfo::new("Int").primitive())],
            )],
        );
        let tree = SyntaxTree::from_green(&green).unwrap();
        let ident = tree.find_token(SyntaxKind::Identifier, "x").unwrap();
        assert_eq!(ident.type_info(), Some(&TypeInfo::new("Int").primitive()));
        assert_eq!(tree.to_green(), green);
    }

    #[test]
    fn token_root_is_rejected() {
        let err = SyntaxTree::from_green(&make::ident("x")).unwrap_err();
        assert_eq!(err, TreeError::TokenOutsideNode { text: "x".into() });
    }

    #[test]
    fn to_green_reproduces_source() {
        let green = make::file(vec![make::property(
            &["private"],
            "var",
            "name",
            Some("String?"),
            None,
        )]);
        let tree = SyntaxTree::from_green(&green).unwrap();
        let again = SyntaxTree::from_green(&tree.to_green()).unwrap();
        assert_eq!(tree.source(), again.source());
        assert_eq!(tree.source(), "private var name: String?");
    }
}
