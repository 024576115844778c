use crate::diagnostic::DiagnosticKind;
use crate::fix::FixAction;
use crate::ToolInfo;
use quickfix_syntax::NodeId;
use serde::{Deserialize, Serialize};

/// Result of resolving every diagnostic of every loaded pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveReport {
    pub schema: String,
    pub tool: ToolInfo,
    pub run: ReportRunInfo,

    #[serde(default)]
    pub policy: ReportPolicy,

    #[serde(default)]
    pub passes: Vec<PassReport>,

    /// Pass files that could not be read or built, by path.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedPass>,

    pub summary: ReportSummary,
}

impl ResolveReport {
    pub fn new(tool: ToolInfo, run: ReportRunInfo, policy: ReportPolicy) -> Self {
        Self {
            schema: crate::schema::QUICKFIX_REPORT_V1.to_string(),
            tool,
            run,
            policy,
            passes: vec![],
            skipped: vec![],
            summary: ReportSummary::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRunInfo {
    pub started_at: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,

    /// `sequential` or `parallel`.
    pub batch_mode: String,
}

/// Caller policy applied to resolved fixes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPolicy {
    #[serde(default)]
    pub allow: Vec<String>,

    #[serde(default)]
    pub deny: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassReport {
    pub path: String,
    pub source_name: String,

    /// sha256 of the source text the fixes were resolved against.
    pub source_sha256: String,

    #[serde(default)]
    pub diagnostics: Vec<DiagnosticReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticReport {
    /// Position of the diagnostic inside its pass file.
    pub index: usize,
    pub kind: DiagnosticKind,
    pub anchor: NodeId,

    #[serde(default)]
    pub fixes: Vec<ReportedFix>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixStatus {
    Offered,
    /// Excluded by the allow/deny policy.
    Filtered,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportedFix {
    pub id: String,
    pub fix_id: String,
    pub title: String,
    pub status: FixStatus,
    pub action: FixAction,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,

    /// Set when a preview was requested but the fix could not be lowered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedPass {
    pub path: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub passes: u64,
    pub diagnostics: u64,
    pub diagnostics_with_fixes: u64,
    pub fixes_offered: u64,
    pub fixes_filtered: u64,
}
