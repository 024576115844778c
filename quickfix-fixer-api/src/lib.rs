//! Contract between the resolver and individual fix factories.
//!
//! A factory is bound to one payload type `D`; it receives a [`FixContext`]
//! that can only hold diagnostics of `D::KIND`. Factories read the tree and
//! build [`FixCommand`]s. They never fail: an inapplicable context produces an
//! empty list.

mod context;
pub mod predicate;

pub use context::FixContext;

use quickfix_types::{DiagnosticPayload, FixCommand};

pub trait FixFactory<D: DiagnosticPayload>: Send + Sync {
    /// Stable key of the fixes this factory produces, e.g. `modifier.add_lateinit`.
    fn key(&self) -> &'static str;

    fn create_fixes(&self, ctx: &FixContext<'_, D>) -> Vec<FixCommand>;
}
