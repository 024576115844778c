use quickfix_fixer_api::{FixContext, FixFactory};
use quickfix_syntax::SyntaxTree;
use quickfix_types::{Diagnostic, DiagnosticKind, DiagnosticPayload, FixCommand};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use thiserror::Error;

/// Problems with the registration table, reported once at start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("factory `{key}` registered twice for `{kind}`")]
    DuplicateFactory {
        kind: DiagnosticKind,
        key: &'static str,
    },

    #[error("factory registered for `{kind}` has an empty key")]
    EmptyKey { kind: DiagnosticKind },
}

type Invoke = dyn Fn(&SyntaxTree, &Diagnostic) -> Vec<FixCommand> + Send + Sync;

/// A factory bound to one diagnostic kind, with its payload type erased.
pub struct RegisteredFactory {
    kind: DiagnosticKind,
    key: &'static str,
    invoke: Box<Invoke>,
}

impl RegisteredFactory {
    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Runs the factory. A diagnostic of another kind yields no fixes.
    pub fn invoke(&self, tree: &SyntaxTree, diagnostic: &Diagnostic) -> Vec<FixCommand> {
        (self.invoke)(tree, diagnostic)
    }
}

impl fmt::Debug for RegisteredFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredFactory")
            .field("kind", &self.kind)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// Collects `(kind, factory)` bindings in registration order.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: Vec<RegisteredFactory>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `factory` to `D::KIND`.
    ///
    /// The factory can only ever see payloads of type `D`, so a factory written
    /// for one kind cannot be registered under another.
    pub fn register<D, F>(&mut self, factory: F) -> &mut Self
    where
        D: DiagnosticPayload,
        F: FixFactory<D> + 'static,
    {
        let key = factory.key();
        let invoke = move |tree: &SyntaxTree, diagnostic: &Diagnostic| match D::from_diagnostic(
            diagnostic,
        ) {
            Some(payload) => factory.create_fixes(&FixContext::new(tree, payload)),
            None => Vec::new(),
        };
        self.entries.push(RegisteredFactory {
            kind: D::KIND,
            key,
            invoke: Box::new(invoke),
        });
        self
    }

    pub fn build(self) -> Result<FixRegistry, RegistryError> {
        let mut seen = BTreeSet::new();
        let mut by_kind: BTreeMap<DiagnosticKind, Vec<RegisteredFactory>> = BTreeMap::new();
        for entry in self.entries {
            if entry.key.trim().is_empty() {
                return Err(RegistryError::EmptyKey { kind: entry.kind });
            }
            if !seen.insert((entry.kind, entry.key)) {
                return Err(RegistryError::DuplicateFactory {
                    kind: entry.kind,
                    key: entry.key,
                });
            }
            by_kind.entry(entry.kind).or_default().push(entry);
        }
        Ok(FixRegistry { by_kind })
    }
}

/// Immutable mapping from diagnostic kind to its ordered factories.
#[derive(Debug, Default)]
pub struct FixRegistry {
    by_kind: BTreeMap<DiagnosticKind, Vec<RegisteredFactory>>,
}

impl FixRegistry {
    /// Factories for `kind` in registration order; empty when none are registered.
    pub fn lookup(&self, kind: DiagnosticKind) -> &[RegisteredFactory] {
        self.by_kind.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_factories_for(&self, kind: DiagnosticKind) -> bool {
        !self.lookup(kind).is_empty()
    }

    /// Number of distinct factory keys.
    pub fn factory_count(&self) -> usize {
        self.bindings()
            .map(|(_, key)| key)
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Number of `(kind, factory)` bindings.
    pub fn mapping_count(&self) -> usize {
        self.by_kind.values().map(Vec::len).sum()
    }

    pub fn kinds(&self) -> impl Iterator<Item = DiagnosticKind> + '_ {
        self.by_kind.keys().copied()
    }

    /// All `(kind, factory key)` bindings, grouped by kind.
    pub fn bindings(&self) -> impl Iterator<Item = (DiagnosticKind, &'static str)> + '_ {
        self.by_kind
            .iter()
            .flat_map(|(kind, factories)| factories.iter().map(move |f| (*kind, f.key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickfix_syntax::{NodeId, make};
    use quickfix_types::diagnostic::{UnusedVariable, UselessCast};
    use quickfix_types::FixAction;

    struct Fixed(&'static str);

    impl<D: DiagnosticPayload> FixFactory<D> for Fixed {
        fn key(&self) -> &'static str {
            self.0
        }

        fn create_fixes(&self, ctx: &FixContext<'_, D>) -> Vec<FixCommand> {
            vec![FixCommand::new(
                self.0,
                self.0,
                FixAction::RemoveNode {
                    node: ctx.diagnostic().anchor(),
                },
            )]
        }
    }

    fn tree() -> SyntaxTree {
        SyntaxTree::from_green(&make::file(vec![make::name_ref("x")])).unwrap()
    }

    #[test]
    fn lookup_of_unregistered_kind_is_empty() {
        let registry = RegistryBuilder::new().build().unwrap();
        assert!(registry.lookup(DiagnosticKind::UselessCast).is_empty());
        assert!(!registry.has_factories_for(DiagnosticKind::UselessCast));
    }

    #[test]
    fn lookup_preserves_registration_order() {
        let mut b = RegistryBuilder::new();
        b.register::<UselessCast, _>(Fixed("b"))
            .register::<UselessCast, _>(Fixed("a"))
            .register::<UnusedVariable, _>(Fixed("a"));
        let registry = b.build().unwrap();
        let keys: Vec<_> = registry
            .lookup(DiagnosticKind::UselessCast)
            .iter()
            .map(RegisteredFactory::key)
            .collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(registry.mapping_count(), 3);
        assert_eq!(registry.factory_count(), 2);
    }

    #[test]
    fn duplicate_binding_fails_at_build() {
        let mut b = RegistryBuilder::new();
        b.register::<UselessCast, _>(Fixed("a"))
            .register::<UselessCast, _>(Fixed("a"));
        assert_eq!(
            b.build().unwrap_err(),
            RegistryError::DuplicateFactory {
                kind: DiagnosticKind::UselessCast,
                key: "a"
            }
        );
    }

    #[test]
    fn empty_key_fails_at_build() {
        let mut b = RegistryBuilder::new();
        b.register::<UselessCast, _>(Fixed(" "));
        assert!(matches!(b.build(), Err(RegistryError::EmptyKey { .. })));
    }

    #[test]
    fn erased_factory_ignores_other_kinds() {
        let mut b = RegistryBuilder::new();
        b.register::<UselessCast, _>(Fixed("a"));
        let registry = b.build().unwrap();
        let factory = &registry.lookup(DiagnosticKind::UselessCast)[0];
        let tree = tree();
        let other: Diagnostic = UnusedVariable { anchor: NodeId(1) }.into();
        assert!(factory.invoke(&tree, &other).is_empty());
        let own: Diagnostic = UselessCast { anchor: NodeId(1) }.into();
        assert_eq!(factory.invoke(&tree, &own).len(), 1);
    }
}
