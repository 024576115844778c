//! The built-in registry and the fixer catalog describe the same factories.

use quickfix_domain::builtin_registry;
use quickfix_fixer_catalog::{FIXER_CATALOG, lookup_fixer};
use quickfix_types::DiagnosticKind;
use std::collections::{BTreeMap, BTreeSet};

fn registered_triggers() -> BTreeMap<&'static str, BTreeSet<DiagnosticKind>> {
    let registry = builtin_registry().expect("builtin table is valid");
    let mut out: BTreeMap<&'static str, BTreeSet<DiagnosticKind>> = BTreeMap::new();
    for (kind, key) in registry.bindings() {
        out.entry(key).or_default().insert(kind);
    }
    out
}

#[test]
fn every_registered_factory_has_a_catalog_entry() {
    for (key, kinds) in registered_triggers() {
        let entry = lookup_fixer(key).unwrap_or_else(|| panic!("no catalog entry for {key}"));
        let catalog: BTreeSet<_> = entry.triggers.iter().copied().collect();
        assert_eq!(catalog, kinds, "triggers disagree for {key}");
    }
}

#[test]
fn every_catalog_entry_is_registered() {
    let registered = registered_triggers();
    for entry in FIXER_CATALOG {
        assert!(
            registered.contains_key(entry.fix_id),
            "catalog entry {} has no registered factory",
            entry.fix_id
        );
    }
    assert_eq!(registered.len(), FIXER_CATALOG.len());
}

#[test]
fn counts_are_consistent() {
    let registry = builtin_registry().unwrap();
    assert_eq!(registry.factory_count(), FIXER_CATALOG.len());
    let bindings: usize = FIXER_CATALOG.iter().map(|e| e.triggers.len()).sum();
    assert_eq!(registry.mapping_count(), bindings);
    assert!(registry.kinds().all(|k| registry.has_factories_for(k)));
}
