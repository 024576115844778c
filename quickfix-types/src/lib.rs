//! Shared DTOs (schemas-as-code) for the quickfix workspace.
//!
//! # Design constraints
//! - Diagnostics are produced by analysis and only read here.
//! - Pass files and reports are serialized to disk; prefer adding optional
//!   fields over changing semantics.

pub mod apply;
pub mod diagnostic;
pub mod fix;
pub mod pass;
pub mod report;

pub use diagnostic::{Diagnostic, DiagnosticKind, DiagnosticPayload, UnknownDiagnosticKind};
pub use fix::{FixAction, FixCommand, FixSafety, InsertPosition};

/// Schema identifiers.
pub mod schema {
    pub const QUICKFIX_PASS_V1: &str = "quickfix.pass.v1";
    pub const QUICKFIX_REPORT_V1: &str = "quickfix.report.v1";
    pub const QUICKFIX_APPLY_V1: &str = "quickfix.apply.v1";

    /// Version tag of the closed diagnostic kind set.
    pub const DIAGNOSTICS_V1: &str = "quickfix.diagnostics.v1";
}

/// Tool identity stamped into written artifacts.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

impl ToolInfo {
    pub fn quickfix(version: &str) -> Self {
        Self {
            name: "quickfix".to_string(),
            version: version.to_string(),
        }
    }
}
