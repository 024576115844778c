use crate::ToolInfo;
use serde::{Deserialize, Serialize};

/// Outcome of applying one fix to one pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyReceipt {
    pub schema: String,
    pub tool: ToolInfo,
    pub pass_path: String,
    pub source_name: String,
    pub fix: AppliedFixRef,
    pub status: ApplyStatus,
    pub sha256_before: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256_after: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApplyReceipt {
    pub fn new(
        tool: ToolInfo,
        pass_path: impl Into<String>,
        source_name: impl Into<String>,
        fix: AppliedFixRef,
        sha256_before: impl Into<String>,
    ) -> Self {
        Self {
            schema: crate::schema::QUICKFIX_APPLY_V1.to_string(),
            tool,
            pass_path: pass_path.into(),
            source_name: source_name.into(),
            fix,
            status: ApplyStatus::DryRun,
            sha256_before: sha256_before.into(),
            sha256_after: None,
            message: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedFixRef {
    pub id: String,
    pub fix_id: String,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyStatus {
    Applied,
    DryRun,
    /// A precondition failed; see the receipt's `message`.
    Blocked,
}
