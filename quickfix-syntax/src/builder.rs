use crate::kind::SyntaxKind;
use crate::tree::{NodeData, NodeId, SyntaxTree, TextRange, TypeInfo};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("tree has no root node")]
    Empty,

    #[error("a second root node `{kind:?}` was started")]
    MultipleRoots { kind: SyntaxKind },

    #[error("`{kind:?}` is a token kind and cannot be started as a node")]
    TokenAsNode { kind: SyntaxKind },

    #[error("`{kind:?}` is a node kind and cannot be pushed as a token")]
    NodeAsToken { kind: SyntaxKind },

    #[error("token `{text}` pushed outside of any node")]
    TokenOutsideNode { text: String },

    #[error("finish_node called with no open node")]
    UnbalancedFinish,

    #[error("{open} node(s) left open")]
    UnclosedNodes { open: usize },

    #[error("set_type called with no open node")]
    TypeOutsideNode,

    #[error("source exceeds 4 GiB")]
    SourceTooLarge,
}

/// Incremental builder for [`SyntaxTree`].
///
/// Source text and node ranges are derived from the pushed tokens, so a built
/// tree's ranges always agree with its text. The first error is kept and
/// reported by [`TreeBuilder::finish`].
#[derive(Debug, Default)]
pub struct TreeBuilder {
    source: String,
    nodes: Vec<NodeData>,
    types: BTreeMap<NodeId, TypeInfo>,
    stack: Vec<NodeId>,
    error: Option<TreeError>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn fail(&mut self, err: TreeError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    fn offset(&mut self) -> u32 {
        match u32::try_from(self.source.len()) {
            Ok(o) => o,
            Err(_) => {
                self.fail(TreeError::SourceTooLarge);
                u32::MAX
            }
        }
    }

    fn push(&mut self, kind: SyntaxKind, text: Option<&str>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let start = self.offset();
        let parent = self.stack.last().copied();
        if let Some(text) = text {
            self.source.push_str(text);
        }
        let end = self.offset();
        self.nodes.push(NodeData {
            kind,
            range: TextRange::new(start, end),
            text: text.map(Into::into),
            parent,
            children: Vec::new(),
        });
        if let Some(p) = parent {
            self.nodes[p.index()].children.push(id);
        }
        id
    }

    pub fn start_node(&mut self, kind: SyntaxKind) -> &mut Self {
        if kind.is_token() {
            self.fail(TreeError::TokenAsNode { kind });
            return self;
        }
        if self.stack.is_empty() && !self.nodes.is_empty() {
            self.fail(TreeError::MultipleRoots { kind });
            return self;
        }
        let id = self.push(kind, None);
        self.stack.push(id);
        self
    }

    fn push_token(&mut self, kind: SyntaxKind, text: &str) -> Option<NodeId> {
        if !kind.is_token() {
            self.fail(TreeError::NodeAsToken { kind });
            return None;
        }
        if self.stack.is_empty() {
            self.fail(TreeError::TokenOutsideNode {
                text: text.to_string(),
            });
            return None;
        }
        Some(self.push(kind, Some(text)))
    }

    pub fn token(&mut self, kind: SyntaxKind, text: &str) -> &mut Self {
        self.push_token(kind, text);
        self
    }

    /// Pushes a token together with the type analysis recorded for it.
    pub fn typed_token(&mut self, kind: SyntaxKind, text: &str, info: TypeInfo) -> &mut Self {
        if let Some(id) = self.push_token(kind, text) {
            self.types.insert(id, info);
        }
        self
    }

    /// Records the analyzed type of the currently open node.
    pub fn set_type(&mut self, info: TypeInfo) -> &mut Self {
        match self.stack.last().copied() {
            Some(id) => {
                self.types.insert(id, info);
            }
            None => self.fail(TreeError::TypeOutsideNode),
        }
        self
    }

    pub fn finish_node(&mut self) -> &mut Self {
        let Some(id) = self.stack.pop() else {
            self.fail(TreeError::UnbalancedFinish);
            return self;
        };
        let end = self.offset();
        self.nodes[id.index()].range.end = end;
        self
    }

    pub fn finish(self) -> Result<SyntaxTree, TreeError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if !self.stack.is_empty() {
            return Err(TreeError::UnclosedNodes {
                open: self.stack.len(),
            });
        }
        if self.nodes.is_empty() {
            return Err(TreeError::Empty);
        }
        Ok(SyntaxTree {
            source: self.source,
            nodes: self.nodes,
            types: self.types,
        })
    }
}
