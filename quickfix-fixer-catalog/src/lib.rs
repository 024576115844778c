//! Metadata for every built-in fix factory.
//!
//! The table is the user-facing half of the registry: `list-fixes`, `explain`,
//! and the apply-time safety gate read it. The domain crate checks in tests
//! that each registered factory key has exactly one entry here and that the
//! trigger kinds agree.

use quickfix_types::{DiagnosticKind, FixSafety};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct FixerCatalogEntry {
    /// Short user-facing key, e.g. `add-lateinit`.
    pub key: &'static str,
    /// Factory key stamped on produced fixes, e.g. `modifier.add_lateinit`.
    pub fix_id: &'static str,
    pub title: &'static str,
    pub safety: FixSafety,
    pub description: &'static str,
    /// Diagnostic kinds the factory is registered for.
    pub triggers: &'static [DiagnosticKind],
}

use DiagnosticKind as K;

pub static FIXER_CATALOG: &[FixerCatalogEntry] = &[
    // Modifiers
    FixerCatalogEntry {
        key: "add-abstract",
        fix_id: "modifier.add_abstract",
        title: "Make member abstract",
        safety: FixSafety::Guarded,
        description: r#"Adds `abstract` to a property or function declared inside an abstract
class or an interface.

Offered when the member has no initializer or no body and its owner can hold
abstract members. Members of concrete classes and top-level declarations are
left alone."#,
        triggers: &[K::MustBeInitializedOrBeAbstract, K::NonAbstractFunctionWithNoBody],
    },
    FixerCatalogEntry {
        key: "add-open-to-class",
        fix_id: "modifier.add_open_to_class",
        title: "Make containing class open",
        safety: FixSafety::Guarded,
        description: r#"Adds `open` to the class that declares an `open` member.

Interfaces and objects are skipped, as are classes that are already open or
abstract."#,
        triggers: &[K::NonFinalMemberInFinalClass],
    },
    FixerCatalogEntry {
        key: "add-override",
        fix_id: "modifier.add_override",
        title: "Add 'override' modifier",
        safety: FixSafety::Guarded,
        description: r#"Marks a member that hides a supertype member as `override`."#,
        triggers: &[K::VirtualMemberHidden],
    },
    FixerCatalogEntry {
        key: "remove-abstract",
        fix_id: "modifier.remove_abstract",
        title: "Remove 'abstract' modifier",
        safety: FixSafety::Guarded,
        description: r#"Removes `abstract` from a member that has an initializer or a body."#,
        triggers: &[K::AbstractPropertyWithInitializer, K::AbstractFunctionWithBody],
    },
    FixerCatalogEntry {
        key: "remove-override",
        fix_id: "modifier.remove_override",
        title: "Remove 'override' modifier",
        safety: FixSafety::Guarded,
        description: r#"Removes `override` from a member that overrides nothing."#,
        triggers: &[K::NothingToOverride],
    },
    FixerCatalogEntry {
        key: "remove-lateinit",
        fix_id: "modifier.remove_lateinit",
        title: "Remove 'lateinit' modifier",
        safety: FixSafety::Guarded,
        description: r#"Removes `lateinit` when it is unnecessary or not allowed on the
property."#,
        triggers: &[K::UnnecessaryLateinit, K::InapplicableLateinitModifier],
    },
    FixerCatalogEntry {
        key: "remove-open",
        fix_id: "modifier.remove_open",
        title: "Remove 'open' modifier",
        safety: FixSafety::Safe,
        description: r#"Removes `open` from a member of a final class, where it has no effect."#,
        triggers: &[K::NonFinalMemberInFinalClass],
    },
    FixerCatalogEntry {
        key: "remove-redundant-modifier",
        fix_id: "modifier.remove_redundant",
        title: "Remove redundant modifier",
        safety: FixSafety::Safe,
        description: r#"Removes the modifier keyword the diagnostic points at.

The modifier is read from the anchor token itself, so one factory covers every
redundant keyword."#,
        triggers: &[K::RedundantModifier],
    },
    // Properties
    FixerCatalogEntry {
        key: "add-lateinit",
        fix_id: "modifier.add_lateinit",
        title: "Add 'lateinit' modifier",
        safety: FixSafety::Guarded,
        description: r#"Defers initialization of a property by adding `lateinit`.

Only offered for a `var` that has no initializer and no delegate, is not
abstract, and whose type is known to be neither nullable nor primitive."#,
        triggers: &[K::MustBeInitializedOrBeAbstract],
    },
    FixerCatalogEntry {
        key: "initialize-property",
        fix_id: "property.initialize",
        title: "Initialize property",
        safety: FixSafety::Guarded,
        description: r#"Appends an initializer with a default value for the property type.

Numbers start at zero, `Boolean` at `false`, `String` at `""`, and nullable
types at `null`. Other types get `TODO()`."#,
        triggers: &[K::MustBeInitialized, K::MustBeInitializedOrBeAbstract],
    },
    FixerCatalogEntry {
        key: "remove-initializer",
        fix_id: "property.remove_initializer",
        title: "Remove initializer",
        safety: FixSafety::Guarded,
        description: r#"Removes `= value` from a property that cannot have one."#,
        triggers: &[K::AbstractPropertyWithInitializer, K::InapplicableLateinitModifier],
    },
    FixerCatalogEntry {
        key: "change-val-to-var",
        fix_id: "property.change_val_to_var",
        title: "Change 'val' to 'var'",
        safety: FixSafety::Guarded,
        description: r#"Makes a read-only property mutable."#,
        triggers: &[K::ValReassignment, K::InapplicableLateinitModifier],
    },
    // Functions
    FixerCatalogEntry {
        key: "add-function-body",
        fix_id: "function.add_body",
        title: "Add function body",
        safety: FixSafety::Guarded,
        description: r#"Appends an empty block body to a function declared without one."#,
        triggers: &[K::NonAbstractFunctionWithNoBody, K::NonMemberFunctionNoBody],
    },
    FixerCatalogEntry {
        key: "remove-function-body",
        fix_id: "function.remove_body",
        title: "Remove function body",
        safety: FixSafety::Guarded,
        description: r#"Removes the body of an abstract function.

Block bodies are only removed when their closing brace is present."#,
        triggers: &[K::AbstractFunctionWithBody],
    },
    // Arguments
    FixerCatalogEntry {
        key: "remove-argument",
        fix_id: "argument.remove",
        title: "Remove argument",
        safety: FixSafety::Guarded,
        description: r#"Removes an excess argument together with its separating comma."#,
        triggers: &[K::TooManyArguments],
    },
    FixerCatalogEntry {
        key: "remove-spread",
        fix_id: "argument.remove_spread",
        title: "Remove '*'",
        safety: FixSafety::Guarded,
        description: r#"Removes the spread operator from an argument that is not a vararg."#,
        triggers: &[K::NonVarargSpread],
    },
    FixerCatalogEntry {
        key: "add-argument-name",
        fix_id: "argument.add_name",
        title: "Add name to argument",
        safety: FixSafety::Safe,
        description: r#"Names a positional argument that follows a named one.

Needs the parameter name resolved by analysis; without it no fix is offered."#,
        triggers: &[K::MixingNamedAndPositionedArguments],
    },
    // Visibility
    FixerCatalogEntry {
        key: "use-inherited-visibility",
        fix_id: "visibility.use_inherited",
        title: "Use inherited visibility",
        safety: FixSafety::Guarded,
        description: r#"Changes an overriding member's visibility back to the visibility it
inherits.

Shared by both access-privilege diagnostics. Needs the inherited visibility
resolved by analysis."#,
        triggers: &[K::CannotWeakenAccessPrivilege, K::CannotChangeAccessPrivilege],
    },
    // Expressions
    FixerCatalogEntry {
        key: "remove-useless-cast",
        fix_id: "expression.remove_useless_cast",
        title: "Remove useless cast",
        safety: FixSafety::Safe,
        description: r#"Replaces `x as T` with `x` when the cast cannot fail."#,
        triggers: &[K::UselessCast],
    },
    FixerCatalogEntry {
        key: "replace-with-dot-call",
        fix_id: "expression.replace_with_dot_call",
        title: "Replace with dot call",
        safety: FixSafety::Safe,
        description: r#"Replaces `?.` with `.` on a receiver that is never null."#,
        triggers: &[K::UnnecessarySafeCall],
    },
    FixerCatalogEntry {
        key: "remove-not-null-assertion",
        fix_id: "expression.remove_not_null_assertion",
        title: "Remove '!!'",
        safety: FixSafety::Safe,
        description: r#"Drops a not-null assertion on an expression that is never null."#,
        triggers: &[K::UnnecessaryNotNullAssertion],
    },
    // When
    FixerCatalogEntry {
        key: "add-when-else",
        fix_id: "when.add_else_branch",
        title: "Add else branch",
        safety: FixSafety::Guarded,
        description: r#"Adds `else -> {}` as the last branch of a non-exhaustive `when`."#,
        triggers: &[K::NoElseInWhen],
    },
    FixerCatalogEntry {
        key: "add-remaining-branches",
        fix_id: "when.add_remaining_branches",
        title: "Add remaining branches",
        safety: FixSafety::Guarded,
        description: r#"Adds one `case -> TODO()` branch per case reported as missing."#,
        triggers: &[K::NoElseInWhen],
    },
    FixerCatalogEntry {
        key: "move-when-else",
        fix_id: "when.move_else_branch",
        title: "Move else branch to the end",
        safety: FixSafety::Guarded,
        description: r#"Moves a misplaced `else` entry behind the other branches."#,
        triggers: &[K::ElseMisplacedInWhen],
    },
    // Types and annotations
    FixerCatalogEntry {
        key: "remove-nullable",
        fix_id: "type.remove_nullable",
        title: "Remove '?'",
        safety: FixSafety::Guarded,
        description: r#"Makes a type reference non-nullable."#,
        triggers: &[K::RedundantNullable, K::InapplicableLateinitModifier],
    },
    FixerCatalogEntry {
        key: "add-newline-after-annotations",
        fix_id: "annotation.add_newline",
        title: "Add new line after annotations",
        safety: FixSafety::Safe,
        description: r#"Moves the annotated expression to its own line so the annotations
apply to it."#,
        triggers: &[K::AnnotationsOnBlockLevelExpressionOnTheSameLine],
    },
    FixerCatalogEntry {
        key: "replace-with-array-literal",
        fix_id: "annotation.wrap_in_array_literal",
        title: "Replace with array literal",
        safety: FixSafety::Safe,
        description: r#"Wraps a single value passed to a vararg annotation member in `[...]`."#,
        triggers: &[K::AssigningSingleElementToVarargInNamedFormAnnotation],
    },
    // Variables
    FixerCatalogEntry {
        key: "remove-unused-variable",
        fix_id: "variable.remove_unused",
        title: "Remove variable",
        safety: FixSafety::Guarded,
        description: r#"Removes an unused local variable.

A call in the initializer is kept as a plain statement."#,
        triggers: &[K::UnusedVariable],
    },
    FixerCatalogEntry {
        key: "rename-to-underscore",
        fix_id: "variable.rename_to_underscore",
        title: "Rename to _",
        safety: FixSafety::Safe,
        description: r#"Renames an unused local variable to `_`.

The initializer still runs; only the name goes away."#,
        triggers: &[K::UnusedVariable],
    },
];

/// Look up an entry by key or fix id.
///
/// Matching is case-insensitive and accepts `_` for `-` in keys.
pub fn lookup_fixer(query: &str) -> Option<&'static FixerCatalogEntry> {
    let lower = query.to_lowercase();
    let normalized = lower.replace('_', "-");
    FIXER_CATALOG.iter().find(|e| {
        e.key == normalized
            || e.fix_id == lower
            || e.fix_id.ends_with(&format!(".{lower}"))
            || e.fix_id.replace('_', "-") == normalized
    })
}

/// Safety class of the factory that produced `fix_id`.
pub fn safety_of(fix_id: &str) -> Option<FixSafety> {
    FIXER_CATALOG
        .iter()
        .find(|e| e.fix_id == fix_id)
        .map(|e| e.safety)
}

/// Entries registered for `kind`, in catalog order.
pub fn fixers_for(kind: DiagnosticKind) -> impl Iterator<Item = &'static FixerCatalogEntry> {
    FIXER_CATALOG
        .iter()
        .filter(move |e| e.triggers.contains(&kind))
}

pub fn list_fix_keys() -> Vec<&'static str> {
    FIXER_CATALOG.iter().map(|e| e.key).collect()
}
