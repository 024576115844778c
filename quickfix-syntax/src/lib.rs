//! Immutable syntax trees for already-analyzed source units.
//!
//! Trees are built once (by [`TreeBuilder`] or from a serialized
//! [`GreenElement`]) and then only read. Typed views live in [`ast`], generic
//! navigation in [`walk`], and fragment constructors in [`make`].

mod builder;
mod green;
mod kind;
mod tree;

pub mod ast;
pub mod make;
pub mod walk;

pub use builder::{TreeBuilder, TreeError};
pub use green::GreenElement;
pub use kind::{Modifier, SyntaxKind, UnknownModifier, Visibility};
pub use tree::{NodeId, SyntaxNode, SyntaxTree, TextRange, TypeInfo};
