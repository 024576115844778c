use quickfix_fixer_api::predicate::{declaration_owner, fixes_from};
use quickfix_fixer_api::{FixContext, FixFactory};
use quickfix_syntax::Visibility;
use quickfix_syntax::ast::{AstNode, HasModifiers};
use quickfix_types::diagnostic::{CannotChangeAccessPrivilege, CannotWeakenAccessPrivilege};
use quickfix_types::{DiagnosticPayload, FixAction, FixCommand};

/// Payloads that report the visibility of the overridden member.
pub trait InheritedVisibility: DiagnosticPayload {
    fn inherited_visibility(&self) -> Option<Visibility>;
}

impl InheritedVisibility for CannotChangeAccessPrivilege {
    fn inherited_visibility(&self) -> Option<Visibility> {
        self.inherited_visibility
    }
}

impl InheritedVisibility for CannotWeakenAccessPrivilege {
    fn inherited_visibility(&self) -> Option<Visibility> {
        self.inherited_visibility
    }
}

/// Sets an override's visibility to that of the member it overrides.
#[derive(Debug, Clone, Copy)]
pub struct UseInheritedVisibilityFix;

impl<D: InheritedVisibility> FixFactory<D> for UseInheritedVisibilityFix {
    fn key(&self) -> &'static str {
        "visibility.use_inherited"
    }

    fn create_fixes(&self, ctx: &FixContext<'_, D>) -> Vec<FixCommand> {
        fixes_from((|| {
            let inherited = ctx.diagnostic().inherited_visibility()?;
            let decl = declaration_owner(ctx.anchor()?)?;
            // No explicit modifier means public.
            if decl.visibility().unwrap_or(Visibility::Public) == inherited {
                return None;
            }
            Some(vec![FixCommand::new(
                <Self as FixFactory<D>>::key(self),
                format!("Make {inherited}"),
                FixAction::SetVisibility {
                    declaration: decl.syntax().id(),
                    visibility: inherited,
                },
            )])
        })())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quickfix_syntax::{SyntaxKind, SyntaxTree, make};

    fn member_tree(modifiers: &[&str]) -> SyntaxTree {
        SyntaxTree::from_green(&make::file(vec![make::class(
            &["open"],
            "class",
            "Impl",
            vec![make::function(modifiers, "f", vec![], make::block_body(vec![]))],
        )]))
        .unwrap()
    }

    #[test]
    fn weakened_override_is_widened() {
        let tree = member_tree(&["private", "override"]);
        let token = tree.find_token(SyntaxKind::ModifierKeyword, "private").unwrap();
        let function = tree.nodes_of_kind(SyntaxKind::Function).next().unwrap();
        let d = CannotWeakenAccessPrivilege {
            anchor: token.id(),
            inherited_visibility: Some(Visibility::Protected),
        };
        let fixes = UseInheritedVisibilityFix.create_fixes(&FixContext::new(&tree, &d));
        assert_eq!(fixes[0].title, "Make protected");
        assert_eq!(
            fixes[0].action,
            FixAction::SetVisibility {
                declaration: function.id(),
                visibility: Visibility::Protected
            }
        );
    }

    #[test]
    fn matching_or_unknown_visibility_yields_nothing() {
        let tree = member_tree(&["override"]);
        let function = tree.nodes_of_kind(SyntaxKind::Function).next().unwrap();
        let public = CannotChangeAccessPrivilege {
            anchor: function.id(),
            inherited_visibility: Some(Visibility::Public),
        };
        assert!(UseInheritedVisibilityFix
            .create_fixes(&FixContext::new(&tree, &public))
            .is_empty());

        let unknown = CannotChangeAccessPrivilege {
            anchor: function.id(),
            inherited_visibility: None,
        };
        assert!(UseInheritedVisibilityFix
            .create_fixes(&FixContext::new(&tree, &unknown))
            .is_empty());
    }
}
