use quickfix_fixer_api::predicate::{
    declaration_owner, fixes_from, has_modifier, is_class_member, owner_is_abstract_or_interface,
};
use quickfix_fixer_api::{FixContext, FixFactory};
use quickfix_syntax::ast::{AstNode, ClassLike, Declaration};
use quickfix_syntax::{Modifier, SyntaxKind};
use quickfix_types::{DiagnosticPayload, FixAction, FixCommand};

fn display_name(decl: &Declaration<'_>) -> String {
    match decl.name() {
        Some(name) => format!("'{name}'"),
        None => "declaration".to_string(),
    }
}

/// Adds a fixed modifier to the declaration owning the anchor.
#[derive(Debug, Clone, Copy)]
pub struct AddModifierFix {
    key: &'static str,
    modifier: Modifier,
}

impl AddModifierFix {
    pub const ABSTRACT: Self = Self {
        key: "modifier.add_abstract",
        modifier: Modifier::Abstract,
    };
    pub const OVERRIDE: Self = Self {
        key: "modifier.add_override",
        modifier: Modifier::Override,
    };

    fn applicable(&self, decl: &Declaration<'_>) -> bool {
        if has_modifier(decl, self.modifier) || !is_class_member(decl) {
            return false;
        }
        match self.modifier {
            Modifier::Abstract => owner_is_abstract_or_interface(decl),
            _ => true,
        }
    }
}

impl<D: DiagnosticPayload> FixFactory<D> for AddModifierFix {
    fn key(&self) -> &'static str {
        self.key
    }

    fn create_fixes(&self, ctx: &FixContext<'_, D>) -> Vec<FixCommand> {
        fixes_from((|| {
            let decl = declaration_owner(ctx.anchor()?)?;
            if !self.applicable(&decl) {
                return None;
            }
            Some(vec![FixCommand::new(
                self.key,
                format!("Make {} {}", display_name(&decl), self.modifier),
                FixAction::AddModifier {
                    declaration: decl.syntax().id(),
                    modifier: self.modifier,
                },
            )])
        })())
    }
}

/// Makes the class that owns an `open` member open itself.
#[derive(Debug, Clone, Copy)]
pub struct AddOpenToClassFix;

impl<D: DiagnosticPayload> FixFactory<D> for AddOpenToClassFix {
    fn key(&self) -> &'static str {
        "modifier.add_open_to_class"
    }

    fn create_fixes(&self, ctx: &FixContext<'_, D>) -> Vec<FixCommand> {
        fixes_from((|| {
            let member = declaration_owner(ctx.anchor()?)?;
            let class: ClassLike<'_> = member.containing_class()?;
            if class.is_interface() || class.is_object() || class.is_inheritable() {
                return None;
            }
            let name = class.name()?;
            Some(vec![FixCommand::new(
                <Self as FixFactory<D>>::key(self),
                format!("Make '{name}' open"),
                FixAction::AddModifier {
                    declaration: class.syntax().id(),
                    modifier: Modifier::Open,
                },
            )])
        })())
    }
}

/// Removes a fixed modifier from the declaration owning the anchor.
#[derive(Debug, Clone, Copy)]
pub struct RemoveModifierFix {
    key: &'static str,
    modifier: Modifier,
}

impl RemoveModifierFix {
    pub const ABSTRACT: Self = Self {
        key: "modifier.remove_abstract",
        modifier: Modifier::Abstract,
    };
    pub const OVERRIDE: Self = Self {
        key: "modifier.remove_override",
        modifier: Modifier::Override,
    };
    pub const LATEINIT: Self = Self {
        key: "modifier.remove_lateinit",
        modifier: Modifier::Lateinit,
    };
    pub const OPEN: Self = Self {
        key: "modifier.remove_open",
        modifier: Modifier::Open,
    };
}

impl<D: DiagnosticPayload> FixFactory<D> for RemoveModifierFix {
    fn key(&self) -> &'static str {
        self.key
    }

    fn create_fixes(&self, ctx: &FixContext<'_, D>) -> Vec<FixCommand> {
        fixes_from((|| {
            let decl = declaration_owner(ctx.anchor()?)?;
            if !has_modifier(&decl, self.modifier) {
                return None;
            }
            Some(vec![remove_modifier(self.key, &decl, self.modifier)])
        })())
    }
}

/// Removes whichever modifier keyword the diagnostic is anchored to.
#[derive(Debug, Clone, Copy)]
pub struct RemoveRedundantModifierFix;

impl<D: DiagnosticPayload> FixFactory<D> for RemoveRedundantModifierFix {
    fn key(&self) -> &'static str {
        "modifier.remove_redundant"
    }

    fn create_fixes(&self, ctx: &FixContext<'_, D>) -> Vec<FixCommand> {
        fixes_from((|| {
            let token = ctx.anchor()?;
            if token.kind() != SyntaxKind::ModifierKeyword {
                return None;
            }
            let modifier: Modifier = token.token_text()?.parse().ok()?;
            let decl = declaration_owner(token)?;
            Some(vec![remove_modifier(
                <Self as FixFactory<D>>::key(self),
                &decl,
                modifier,
            )])
        })())
    }
}

fn remove_modifier(key: &'static str, decl: &Declaration<'_>, modifier: Modifier) -> FixCommand {
    FixCommand::new(
        key,
        format!("Remove '{modifier}' modifier"),
        FixAction::RemoveModifier {
            declaration: decl.syntax().id(),
            modifier,
        },
    )
}
