use quickfix_fixer_api::predicate::{
    declaration_owner, fixes_from, has_modifier, has_non_nullable_reference_type,
    is_mutable_property,
};
use quickfix_fixer_api::{FixContext, FixFactory};
use quickfix_syntax::ast::{AstNode, BinaryExpression, Property};
use quickfix_syntax::walk::{ancestor_of_kind, descendants_of_type};
use quickfix_syntax::{Modifier, SyntaxKind, SyntaxNode, TypeInfo};
use quickfix_types::diagnostic::{
    InapplicableLateinitModifier, MustBeInitializedOrBeAbstract, ValReassignment,
};
use quickfix_types::{DiagnosticPayload, FixAction, FixCommand, InsertPosition};

/// The property a diagnostic is about, whether anchored on the property, one
/// of its modifiers, or something inside it.
fn owning_property(anchor: SyntaxNode<'_>) -> Option<Property<'_>> {
    Property::cast(declaration_owner(anchor)?.syntax())
}

const SCOPES: &[SyntaxKind] = &[SyntaxKind::Block, SyntaxKind::ClassBody, SyntaxKind::File];

/// The property written by the assignment whose target contains `anchor`,
/// looked up by name from the innermost enclosing scope outwards. Locals
/// only count when declared before the assignment.
fn assigned_property(anchor: SyntaxNode<'_>) -> Option<Property<'_>> {
    let assignment = ancestor_of_kind(anchor, &[SyntaxKind::BinaryExpression], false)
        .and_then(BinaryExpression::cast)
        .filter(|b| b.is_assignment())?;
    let target = assignment.left()?;
    if target.kind() != SyntaxKind::NameReference
        || !anchor.ancestors().any(|a| a.id() == target.id())
    {
        return None;
    }
    let name = target
        .first_child_of_kind(SyntaxKind::Identifier)?
        .token_text()?;
    let at = assignment.syntax().range().start;
    let mut scopes = std::iter::successors(ancestor_of_kind(assignment.syntax(), SCOPES, true), |s| {
        ancestor_of_kind(*s, SCOPES, true)
    });
    scopes.find_map(|scope| {
        descendants_of_type::<Property<'_>>(scope)
            .filter(|p| p.syntax().parent().is_some_and(|parent| parent.id() == scope.id()))
            .filter(|p| p.name() == Some(name))
            .filter(|p| scope.kind() != SyntaxKind::Block || p.syntax().range().end <= at)
            .last()
    })
}

/// Marks a `var` as `lateinit` when nothing else rules it out.
#[derive(Debug, Clone, Copy)]
pub struct AddLateinitFix;

impl AddLateinitFix {
    fn applicable(property: &Property<'_>) -> bool {
        is_mutable_property(property)
            && !has_modifier(property, Modifier::Lateinit)
            && !has_modifier(property, Modifier::Abstract)
            && property.initializer().is_none()
            && property.delegate().is_none()
            && has_non_nullable_reference_type(property)
    }
}

impl FixFactory<MustBeInitializedOrBeAbstract> for AddLateinitFix {
    fn key(&self) -> &'static str {
        "modifier.add_lateinit"
    }

    fn create_fixes(&self, ctx: &FixContext<'_, MustBeInitializedOrBeAbstract>) -> Vec<FixCommand> {
        fixes_from((|| {
            let property = owning_property(ctx.anchor()?)?;
            if !Self::applicable(&property) {
                return None;
            }
            Some(vec![FixCommand::new(
                self.key(),
                format!("Make '{}' lateinit", property.name()?),
                FixAction::AddModifier {
                    declaration: property.syntax().id(),
                    modifier: Modifier::Lateinit,
                },
            )])
        })())
    }
}

/// Appends an initializer with a default value for the property's type.
#[derive(Debug, Clone, Copy)]
pub struct InitializePropertyFix;

impl InitializePropertyFix {
    /// Source text of a default value for `ty`.
    pub fn default_value(ty: Option<&TypeInfo>) -> &'static str {
        let Some(ty) = ty else {
            return "TODO()";
        };
        if ty.nullable {
            return "null";
        }
        match ty.name.as_str() {
            "Int" | "Long" | "Short" | "Byte" => "0",
            "Double" => "0.0",
            "Float" => "0.0f",
            "Boolean" => "false",
            "Char" => "'\\u0000'",
            "String" => "\"\"",
            _ => "TODO()",
        }
    }
}

impl<D: DiagnosticPayload> FixFactory<D> for InitializePropertyFix {
    fn key(&self) -> &'static str {
        "property.initialize"
    }

    fn create_fixes(&self, ctx: &FixContext<'_, D>) -> Vec<FixCommand> {
        fixes_from((|| {
            let property = owning_property(ctx.anchor()?)?;
            if property.initializer().is_some()
                || property.delegate().is_some()
                || has_modifier(&property, Modifier::Lateinit)
                || has_modifier(&property, Modifier::Abstract)
            {
                return None;
            }
            let last = property.syntax().last_significant_child()?;
            let value = Self::default_value(property.resolved_type().as_ref());
            Some(vec![FixCommand::new(
                <Self as FixFactory<D>>::key(self),
                format!("Initialize '{}' with {value}", property.name()?),
                FixAction::InsertText {
                    anchor: last.id(),
                    position: InsertPosition::After,
                    text: format!(" = {value}"),
                },
            )])
        })())
    }
}

/// Drops `= initializer` from a property.
#[derive(Debug, Clone, Copy)]
pub struct RemoveInitializerFix;

impl<D: DiagnosticPayload> FixFactory<D> for RemoveInitializerFix {
    fn key(&self) -> &'static str {
        "property.remove_initializer"
    }

    fn create_fixes(&self, ctx: &FixContext<'_, D>) -> Vec<FixCommand> {
        fixes_from((|| {
            let property = owning_property(ctx.anchor()?)?;
            let eq = property.eq_token()?;
            let init = property.initializer()?;
            Some(vec![FixCommand::new(
                <Self as FixFactory<D>>::key(self),
                "Remove initializer",
                FixAction::RemoveRange {
                    first: eq.id(),
                    last: init.id(),
                },
            )])
        })())
    }
}

/// Turns a `val` into a `var`.
///
/// Reassignments usually carry the declaration in the payload; without it the
/// assigned name is resolved from the enclosing scopes. Lateinit diagnostics
/// sit on the property's own modifier.
#[derive(Debug, Clone, Copy)]
pub struct ChangeValToVarFix;

impl ChangeValToVarFix {
    const KEY: &'static str = "property.change_val_to_var";

    fn fix_for(property: Property<'_>) -> Option<Vec<FixCommand>> {
        if !property.is_val() {
            return None;
        }
        let keyword = property.keyword_token()?;
        Some(vec![FixCommand::new(
            Self::KEY,
            format!("Change '{}' to var", property.name()?),
            FixAction::ReplaceToken {
                token: keyword.id(),
                text: "var".to_string(),
            },
        )])
    }
}

impl FixFactory<ValReassignment> for ChangeValToVarFix {
    fn key(&self) -> &'static str {
        Self::KEY
    }

    fn create_fixes(&self, ctx: &FixContext<'_, ValReassignment>) -> Vec<FixCommand> {
        fixes_from((|| {
            let property = match ctx.diagnostic().declaration {
                Some(id) => Property::cast(ctx.node(id)?)?,
                None => assigned_property(ctx.anchor()?)?,
            };
            Self::fix_for(property)
        })())
    }
}

impl FixFactory<InapplicableLateinitModifier> for ChangeValToVarFix {
    fn key(&self) -> &'static str {
        Self::KEY
    }

    fn create_fixes(&self, ctx: &FixContext<'_, InapplicableLateinitModifier>) -> Vec<FixCommand> {
        fixes_from((|| Self::fix_for(owning_property(ctx.anchor()?)?))())
    }
}
