//! Closed set of diagnostic kinds and their payloads.
//!
//! Each kind has exactly one payload struct. The binding between the two is
//! expressed by the sealed [`DiagnosticPayload`] trait, so code that is generic
//! over a payload type can only ever see diagnostics of the matching kind.

use quickfix_syntax::{NodeId, Visibility};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

mod sealed {
    pub trait Sealed {}
}

/// A diagnostic payload type, bound to exactly one [`DiagnosticKind`].
///
/// Sealed: only the payload structs declared in this module implement it.
pub trait DiagnosticPayload:
    sealed::Sealed + fmt::Debug + Clone + Send + Sync + 'static
{
    const KIND: DiagnosticKind;

    /// Borrows the payload when `diagnostic` has kind [`Self::KIND`].
    fn from_diagnostic(diagnostic: &Diagnostic) -> Option<&Self>;

    fn anchor(&self) -> NodeId;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown diagnostic kind `{0}`")]
pub struct UnknownDiagnosticKind(pub String);

macro_rules! diagnostics {
    (
        $(
            $(#[$meta:meta])*
            $kind:ident = $tag:literal {
                $(
                    $(#[$fmeta:meta])*
                    $field:ident : $ty:ty
                ),* $(,)?
            }
        )*
    ) => {
        /// Tag of a diagnostic, drawn from [`crate::schema::DIAGNOSTICS_V1`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum DiagnosticKind {
            $($kind,)*
        }

        impl DiagnosticKind {
            pub const ALL: &'static [DiagnosticKind] = &[$(DiagnosticKind::$kind,)*];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(DiagnosticKind::$kind => $tag,)*
                }
            }
        }

        $(
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
            pub struct $kind {
                pub anchor: NodeId,
                $(
                    $(#[$fmeta])*
                    pub $field: $ty,
                )*
            }

            impl sealed::Sealed for $kind {}

            impl DiagnosticPayload for $kind {
                const KIND: DiagnosticKind = DiagnosticKind::$kind;

                fn from_diagnostic(diagnostic: &Diagnostic) -> Option<&Self> {
                    match diagnostic {
                        Diagnostic::$kind(payload) => Some(payload),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }

                fn anchor(&self) -> NodeId {
                    self.anchor
                }
            }

            impl From<$kind> for Diagnostic {
                fn from(payload: $kind) -> Self {
                    Diagnostic::$kind(payload)
                }
            }
        )*

        /// One diagnostic instance as emitted by analysis.
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(tag = "kind", rename_all = "snake_case")]
        pub enum Diagnostic {
            $($kind($kind),)*
        }

        impl Diagnostic {
            pub fn kind(&self) -> DiagnosticKind {
                match self {
                    $(Diagnostic::$kind(_) => DiagnosticKind::$kind,)*
                }
            }

            /// The node the diagnostic is attached to.
            pub fn anchor(&self) -> NodeId {
                match self {
                    $(Diagnostic::$kind(p) => p.anchor,)*
                }
            }
        }
    };
}

diagnostics! {
    /// Property without initializer in a context that requires one.
    MustBeInitialized = "must_be_initialized" {}

    MustBeInitializedOrBeAbstract = "must_be_initialized_or_be_abstract" {}

    AbstractPropertyWithInitializer = "abstract_property_with_initializer" {}

    AbstractFunctionWithBody = "abstract_function_with_body" {}

    NonAbstractFunctionWithNoBody = "non_abstract_function_with_no_body" {}

    NonMemberFunctionNoBody = "non_member_function_no_body" {}

    /// Anchored to the extra argument's expression.
    TooManyArguments = "too_many_arguments" {}

    /// Anchored to the `*` token of a spread argument.
    NonVarargSpread = "non_vararg_spread" {}

    /// Anchored to the positional argument following a named one.
    MixingNamedAndPositionedArguments = "mixing_named_and_positioned_arguments" {
        /// Parameter the argument binds to, when analysis resolved it.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parameter_name: Option<String>,
    }

    CannotWeakenAccessPrivilege = "cannot_weaken_access_privilege" {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        inherited_visibility: Option<Visibility>,
    }

    CannotChangeAccessPrivilege = "cannot_change_access_privilege" {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        inherited_visibility: Option<Visibility>,
    }

    NothingToOverride = "nothing_to_override" {}

    VirtualMemberHidden = "virtual_member_hidden" {}

    UselessCast = "useless_cast" {}

    /// Anchored to the `?.` token.
    UnnecessarySafeCall = "unnecessary_safe_call" {}

    /// Anchored to the `!!` token.
    UnnecessaryNotNullAssertion = "unnecessary_not_null_assertion" {}

    UnnecessaryLateinit = "unnecessary_lateinit" {}

    /// Anchored to the `lateinit` modifier token.
    InapplicableLateinitModifier = "inapplicable_lateinit_modifier" {}

    /// Anchored to the redundant modifier token.
    RedundantModifier = "redundant_modifier" {}

    NonFinalMemberInFinalClass = "non_final_member_in_final_class" {}

    /// Anchored to the `when` expression.
    NoElseInWhen = "no_else_in_when" {
        /// Branch conditions not covered by existing entries.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        missing_cases: Vec<String>,
    }

    /// Anchored to the misplaced `else` entry.
    ElseMisplacedInWhen = "else_misplaced_in_when" {}

    /// Anchored to the reassigned expression.
    ValReassignment = "val_reassignment" {
        /// The reassigned `val` declaration.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        declaration: Option<NodeId>,
    }

    /// Anchored to the nullable type reference.
    RedundantNullable = "redundant_nullable" {}

    /// Anchored to the annotated expression.
    AnnotationsOnBlockLevelExpressionOnTheSameLine = "annotations_on_block_level_expression_on_the_same_line" {}

    /// Anchored to the single value passed to a vararg annotation member.
    AssigningSingleElementToVarargInNamedFormAnnotation = "assigning_single_element_to_vararg_in_named_form_annotation" {
        /// Element type of the vararg parameter.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        element_type: Option<String>,
    }

    /// Anchored to the local variable declaration.
    UnusedVariable = "unused_variable" {}
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiagnosticKind {
    type Err = UnknownDiagnosticKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DiagnosticKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownDiagnosticKind(s.to_string()))
    }
}
