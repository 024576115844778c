use crate::diagnostic::Diagnostic;
use quickfix_syntax::GreenElement;
use serde::{Deserialize, Serialize};

/// One analysis pass: an analyzed source unit and the diagnostics raised on it.
///
/// Reading is tolerant: unknown fields are ignored and `diagnostics` may be
/// absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassFile {
    pub schema: String,

    /// Logical name of the source unit, e.g. `src/Main.kt`.
    pub source_name: String,

    pub tree: GreenElement,

    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

impl PassFile {
    pub fn new(source_name: impl Into<String>, tree: GreenElement) -> Self {
        Self {
            schema: crate::schema::QUICKFIX_PASS_V1.to_string(),
            source_name: source_name.into(),
            tree,
            diagnostics: vec![],
        }
    }
}
