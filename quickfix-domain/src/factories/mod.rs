//! Built-in fix factories and the static registration table.

mod annotations;
mod arguments;
mod expressions;
mod functions;
mod modifiers;
mod properties;
mod variables;
mod visibility;
mod when;

use crate::registry::{FixRegistry, RegistryBuilder, RegistryError};
use quickfix_types::diagnostic::*;

pub use annotations::{AddNewlineAfterAnnotationsFix, ReplaceWithArrayLiteralFix};
pub use arguments::{AddNameToArgumentFix, RemoveArgumentFix, RemoveSpreadFix};
pub use expressions::{
    RemoveNotNullAssertionFix, RemoveNullableFix, RemoveUselessCastFix, ReplaceWithDotCallFix,
};
pub use functions::{AddFunctionBodyFix, RemoveFunctionBodyFix};
pub use modifiers::{AddModifierFix, AddOpenToClassFix, RemoveModifierFix, RemoveRedundantModifierFix};
pub use properties::{AddLateinitFix, ChangeValToVarFix, InitializePropertyFix, RemoveInitializerFix};
pub use variables::{RemoveUnusedVariableFix, RenameToUnderscoreFix};
pub use visibility::{InheritedVisibility, UseInheritedVisibilityFix};
pub use when::{AddRemainingBranchesFix, AddWhenElseFix, MoveWhenElseFix};

/// Registers every built-in binding, in suggestion order per kind.
pub fn register_builtins(b: &mut RegistryBuilder) {
    // Initialization and abstractness
    b.register::<AbstractPropertyWithInitializer, _>(RemoveModifierFix::ABSTRACT)
        .register::<AbstractPropertyWithInitializer, _>(RemoveInitializerFix);
    b.register::<MustBeInitializedOrBeAbstract, _>(AddModifierFix::ABSTRACT)
        .register::<MustBeInitializedOrBeAbstract, _>(InitializePropertyFix)
        .register::<MustBeInitializedOrBeAbstract, _>(AddLateinitFix);
    b.register::<MustBeInitialized, _>(InitializePropertyFix);

    // Function bodies
    b.register::<AbstractFunctionWithBody, _>(RemoveModifierFix::ABSTRACT)
        .register::<AbstractFunctionWithBody, _>(RemoveFunctionBodyFix);
    b.register::<NonAbstractFunctionWithNoBody, _>(AddModifierFix::ABSTRACT)
        .register::<NonAbstractFunctionWithNoBody, _>(AddFunctionBodyFix);
    b.register::<NonMemberFunctionNoBody, _>(AddFunctionBodyFix);

    // Arguments
    b.register::<NonVarargSpread, _>(RemoveSpreadFix);
    b.register::<MixingNamedAndPositionedArguments, _>(AddNameToArgumentFix);
    b.register::<TooManyArguments, _>(RemoveArgumentFix);

    // Overrides and modifiers
    b.register::<NothingToOverride, _>(RemoveModifierFix::OVERRIDE);
    b.register::<VirtualMemberHidden, _>(AddModifierFix::OVERRIDE);
    b.register::<RedundantModifier, _>(RemoveRedundantModifierFix);
    b.register::<UnnecessaryLateinit, _>(RemoveModifierFix::LATEINIT);
    b.register::<NonFinalMemberInFinalClass, _>(AddOpenToClassFix)
        .register::<NonFinalMemberInFinalClass, _>(RemoveModifierFix::OPEN);

    // Visibility
    b.register::<CannotChangeAccessPrivilege, _>(UseInheritedVisibilityFix);
    b.register::<CannotWeakenAccessPrivilege, _>(UseInheritedVisibilityFix);

    // Expressions and types
    b.register::<UselessCast, _>(RemoveUselessCastFix);
    b.register::<RedundantNullable, _>(RemoveNullableFix);
    b.register::<UnnecessarySafeCall, _>(ReplaceWithDotCallFix);
    b.register::<UnnecessaryNotNullAssertion, _>(RemoveNotNullAssertionFix);

    // Mutability and variables
    b.register::<ValReassignment, _>(ChangeValToVarFix);
    b.register::<UnusedVariable, _>(RemoveUnusedVariableFix);
    b.register::<UnusedVariable, _>(RenameToUnderscoreFix);

    // When
    b.register::<ElseMisplacedInWhen, _>(MoveWhenElseFix);
    b.register::<NoElseInWhen, _>(AddWhenElseFix)
        .register::<NoElseInWhen, _>(AddRemainingBranchesFix);

    // Annotations
    b.register::<AnnotationsOnBlockLevelExpressionOnTheSameLine, _>(AddNewlineAfterAnnotationsFix);
    b.register::<AssigningSingleElementToVarargInNamedFormAnnotation, _>(ReplaceWithArrayLiteralFix);

    // lateinit on something that cannot be lateinit
    b.register::<InapplicableLateinitModifier, _>(ChangeValToVarFix)
        .register::<InapplicableLateinitModifier, _>(RemoveNullableFix)
        .register::<InapplicableLateinitModifier, _>(RemoveInitializerFix)
        .register::<InapplicableLateinitModifier, _>(RemoveModifierFix::LATEINIT);
}

/// The registry used by [`crate::Resolver::new`].
pub fn builtin_registry() -> Result<FixRegistry, RegistryError> {
    let mut b = RegistryBuilder::new();
    register_builtins(&mut b);
    b.build()
}
