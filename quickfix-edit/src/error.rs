//! Error types for quickfix-edit.
//!
//! Every variant means the fix no longer fits the tree it is applied to.
//! Callers treat these as "fix not applicable", never as a crash.

use quickfix_syntax::{Modifier, NodeId, TextRange};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The node id does not exist in this snapshot.
    #[error("node {node} is not part of this tree")]
    StaleNode { node: NodeId },

    /// The node exists but has a different shape than the action needs.
    #[error("node {node} is not {expected}")]
    UnexpectedNode { node: NodeId, expected: &'static str },

    #[error("`{modifier}` is not present on {declaration}")]
    MissingModifier {
        declaration: NodeId,
        modifier: Modifier,
    },

    #[error("edits {first} and {second} overlap")]
    OverlappingEdits { first: TextRange, second: TextRange },

    #[error("edit {range} is outside the {len}-byte source")]
    OutOfBounds { range: TextRange, len: usize },
}

impl EditError {
    /// The node the error is about, when there is one.
    pub fn node(&self) -> Option<NodeId> {
        match self {
            EditError::StaleNode { node } | EditError::UnexpectedNode { node, .. } => Some(*node),
            EditError::MissingModifier { declaration, .. } => Some(*declaration),
            EditError::OverlappingEdits { .. } | EditError::OutOfBounds { .. } => None,
        }
    }
}

pub type EditResult<T> = Result<T, EditError>;
