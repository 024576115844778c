use quickfix_syntax::ast::AstNode;
use quickfix_syntax::{NodeId, SyntaxNode, SyntaxTree};
use quickfix_types::DiagnosticPayload;

/// Read-only view handed to a factory for one diagnostic.
#[derive(Debug)]
pub struct FixContext<'t, D> {
    tree: &'t SyntaxTree,
    diagnostic: &'t D,
}

impl<D> Clone for FixContext<'_, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for FixContext<'_, D> {}

impl<'t, D: DiagnosticPayload> FixContext<'t, D> {
    pub fn new(tree: &'t SyntaxTree, diagnostic: &'t D) -> Self {
        Self { tree, diagnostic }
    }

    pub fn tree(&self) -> &'t SyntaxTree {
        self.tree
    }

    pub fn diagnostic(&self) -> &'t D {
        self.diagnostic
    }

    /// The anchor node; `None` when the id is outside this snapshot.
    pub fn anchor(&self) -> Option<SyntaxNode<'t>> {
        self.tree.node(self.diagnostic.anchor())
    }

    /// The anchor narrowed to a typed view.
    pub fn anchor_as<T: AstNode<'t>>(&self) -> Option<T> {
        self.anchor().and_then(T::cast)
    }

    pub fn node(&self, id: NodeId) -> Option<SyntaxNode<'t>> {
        self.tree.node(id)
    }
}
