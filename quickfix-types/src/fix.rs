use quickfix_syntax::{Modifier, NodeId, Visibility};
use serde::{Deserialize, Serialize};

/// Safety class of a fix.
///
/// - safe: preserves program behavior (drops redundant syntax)
/// - guarded: changes behavior or declarations; applying requires explicit allow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixSafety {
    Safe,
    Guarded,
}

impl FixSafety {
    pub fn is_safe(self) -> bool {
        matches!(self, FixSafety::Safe)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FixSafety::Safe => "safe",
            FixSafety::Guarded => "guarded",
        }
    }
}

/// Where [`FixAction::InsertText`] places its text relative to the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertPosition {
    Before,
    After,
}

/// Structural edit captured by a fix.
///
/// Node ids refer to the tree snapshot the fix was resolved against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FixAction {
    AddModifier {
        declaration: NodeId,
        modifier: Modifier,
    },
    RemoveModifier {
        declaration: NodeId,
        modifier: Modifier,
    },
    /// Replace the explicit visibility, or add one when absent.
    SetVisibility {
        declaration: NodeId,
        visibility: Visibility,
    },
    RemoveNode {
        node: NodeId,
    },
    /// Remove sibling nodes `first..=last` plus the whitespace before `first`.
    RemoveRange {
        first: NodeId,
        last: NodeId,
    },
    /// Remove an argument together with its separating comma.
    RemoveValueArgument {
        argument: NodeId,
    },
    /// Replace `node` with the text of one of its descendants.
    ReplaceWithChild {
        node: NodeId,
        child: NodeId,
    },
    ReplaceToken {
        token: NodeId,
        text: String,
    },
    InsertText {
        anchor: NodeId,
        position: InsertPosition,
        text: String,
    },
    RemoveFunctionBody {
        function: NodeId,
    },
    MoveWhenElseToEnd {
        when: NodeId,
    },
    /// `x` becomes `[x]`.
    WrapInArrayLiteral {
        expression: NodeId,
    },
}

impl FixAction {
    /// Stable snake_case name of the action type.
    pub fn name(&self) -> &'static str {
        match self {
            FixAction::AddModifier { .. } => "add_modifier",
            FixAction::RemoveModifier { .. } => "remove_modifier",
            FixAction::SetVisibility { .. } => "set_visibility",
            FixAction::RemoveNode { .. } => "remove_node",
            FixAction::RemoveRange { .. } => "remove_range",
            FixAction::RemoveValueArgument { .. } => "remove_value_argument",
            FixAction::ReplaceWithChild { .. } => "replace_with_child",
            FixAction::ReplaceToken { .. } => "replace_token",
            FixAction::InsertText { .. } => "insert_text",
            FixAction::RemoveFunctionBody { .. } => "remove_function_body",
            FixAction::MoveWhenElseToEnd { .. } => "move_when_else_to_end",
            FixAction::WrapInArrayLiteral { .. } => "wrap_in_array_literal",
        }
    }
}

/// A candidate repair for one diagnostic.
///
/// Owned by the caller once returned; resolution never inspects it again.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixCommand {
    /// Deterministic id, assigned during resolution. Empty until then.
    #[serde(default)]
    pub id: String,

    /// Key of the factory that produced the fix, e.g. `modifier.add_lateinit`.
    pub fix_id: String,

    pub title: String,

    pub action: FixAction,
}

impl FixCommand {
    pub fn new(fix_id: impl Into<String>, title: impl Into<String>, action: FixAction) -> Self {
        Self {
            id: String::new(),
            fix_id: fix_id.into(),
            title: title.into(),
            action,
        }
    }

    pub fn description(&self) -> &str {
        &self.title
    }
}
