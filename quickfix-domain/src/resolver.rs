use crate::factories::builtin_registry;
use crate::registry::{FixRegistry, RegistryError};
use quickfix_syntax::{NodeId, SyntaxTree};
use quickfix_types::{Diagnostic, DiagnosticKind, FixCommand};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};
use uuid::Uuid;

/// How a pass's diagnostics are spread over threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchMode {
    #[default]
    Sequential,
    Parallel,
}

impl BatchMode {
    pub fn as_str(self) -> &'static str {
        match self {
            BatchMode::Sequential => "sequential",
            BatchMode::Parallel => "parallel",
        }
    }
}

impl fmt::Display for BatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixes resolved for one diagnostic of a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDiagnostic {
    /// Position of the diagnostic in the input slice.
    pub index: usize,
    pub kind: DiagnosticKind,
    pub anchor: NodeId,
    pub fixes: Vec<FixCommand>,
}

/// Stateless dispatch from diagnostics to fixes over an immutable registry.
#[derive(Debug)]
pub struct Resolver {
    registry: FixRegistry,
}

impl Resolver {
    /// Resolver over the built-in registration table.
    pub fn new() -> Result<Self, RegistryError> {
        Ok(Self {
            registry: builtin_registry()?,
        })
    }

    pub fn with_registry(registry: FixRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &FixRegistry {
        &self.registry
    }

    /// All fixes for one diagnostic, in factory registration order.
    ///
    /// Never fails: inapplicable factories contribute nothing, and a factory
    /// that panics is logged and skipped without affecting the others.
    pub fn resolve_fixes(&self, tree: &SyntaxTree, diagnostic: &Diagnostic) -> Vec<FixCommand> {
        let kind = diagnostic.kind();
        let mut fixes = Vec::new();
        for factory in self.registry.lookup(kind) {
            match panic::catch_unwind(AssertUnwindSafe(|| factory.invoke(tree, diagnostic))) {
                Ok(mut produced) => fixes.append(&mut produced),
                Err(payload) => warn!(
                    kind = %kind,
                    factory = factory.key(),
                    anchor = %diagnostic.anchor(),
                    reason = panic_message(&*payload),
                    "fix factory faulted; skipping its fixes"
                ),
            }
        }

        for fix in &mut fixes {
            if fix.id.trim().is_empty() {
                fix.id = deterministic_fix_id(kind, diagnostic.anchor(), fix).to_string();
            }
        }

        debug!(
            kind = %kind,
            anchor = %diagnostic.anchor(),
            fixes = fixes.len(),
            "resolved diagnostic"
        );
        fixes
    }

    /// Resolves every diagnostic of one pass.
    ///
    /// Output order follows `diagnostics` in both modes, and each entry is the
    /// same as a standalone [`Resolver::resolve_fixes`] call.
    pub fn resolve_pass(
        &self,
        tree: &SyntaxTree,
        diagnostics: &[Diagnostic],
        mode: BatchMode,
    ) -> Vec<ResolvedDiagnostic> {
        let resolve = |(index, diagnostic): (usize, &Diagnostic)| ResolvedDiagnostic {
            index,
            kind: diagnostic.kind(),
            anchor: diagnostic.anchor(),
            fixes: self.resolve_fixes(tree, diagnostic),
        };
        match mode {
            BatchMode::Sequential => diagnostics.iter().enumerate().map(resolve).collect(),
            BatchMode::Parallel => diagnostics.par_iter().enumerate().map(resolve).collect(),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}

fn deterministic_fix_id(kind: DiagnosticKind, anchor: NodeId, fix: &FixCommand) -> Uuid {
    // Deterministic ID: v5(namespace, stable_key_bytes)
    const NAMESPACE: Uuid = Uuid::from_bytes([
        0x9a, 0x1f, 0x63, 0x2e, 0x57, 0xc4, 0x4d, 0x0b, 0xa3, 0x18, 0x6e, 0x02, 0xd9, 0x7b, 0x41,
        0x85,
    ]);

    let stable_key = format!(
        "{}|{}|{}|{}",
        fix.fix_id,
        kind.as_str(),
        anchor.0,
        action_fingerprint(fix)
    );
    Uuid::new_v5(&NAMESPACE, stable_key.as_bytes())
}

fn action_fingerprint(fix: &FixCommand) -> String {
    let canonical = serde_json::to_value(&fix.action)
        .map(|v| canonicalize_json(&v))
        .and_then(|v| serde_json::to_string(&v))
        .unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}

fn canonicalize_json(value: &serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => {
            let mut keys: Vec<_> = map.keys().cloned().collect();
            keys.sort();
            let mut out = serde_json::Map::new();
            for k in keys {
                if let Some(v) = map.get(&k) {
                    out.insert(k, canonicalize_json(v));
                }
            }
            serde_json::Value::Object(out)
        }
        serde_json::Value::Array(items) => {
            serde_json::Value::Array(items.iter().map(canonicalize_json).collect())
        }
        other => other.clone(),
    }
}
