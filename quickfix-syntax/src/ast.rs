//! Typed views over [`SyntaxNode`].
//!
//! Every view is a checked wrapper: [`AstNode::cast`] returns `None` when the
//! node has a different kind, and every accessor returns `None` when the
//! expected child is missing. Malformed trees therefore narrow to nothing
//! instead of failing.

use crate::kind::{Modifier, SyntaxKind, Visibility};
use crate::tree::{SyntaxNode, TypeInfo};

pub trait AstNode<'t>: Copy + Sized {
    fn can_cast(kind: SyntaxKind) -> bool;

    fn cast_unchecked(node: SyntaxNode<'t>) -> Self;

    fn syntax(&self) -> SyntaxNode<'t>;

    fn cast(node: SyntaxNode<'t>) -> Option<Self> {
        Self::can_cast(node.kind()).then(|| Self::cast_unchecked(node))
    }
}

macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident, $($kind:ident)|+) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name<'t>(SyntaxNode<'t>);

        impl<'t> AstNode<'t> for $name<'t> {
            fn can_cast(kind: SyntaxKind) -> bool {
                matches!(kind, $(SyntaxKind::$kind)|+)
            }

            fn cast_unchecked(node: SyntaxNode<'t>) -> Self {
                Self(node)
            }

            fn syntax(&self) -> SyntaxNode<'t> {
                self.0
            }
        }
    };
}

ast_node!(Property, Property);
ast_node!(Function, Function);
ast_node!(
    /// A class, interface, or object declaration.
    ClassLike,
    Class | Interface | Object
);
ast_node!(Parameter, Parameter);
ast_node!(ModifierList, ModifierList);
ast_node!(TypeReference, TypeReference);
ast_node!(Block, Block);
ast_node!(ValueArgumentList, ValueArgumentList);
ast_node!(ValueArgument, ValueArgument);
ast_node!(CallExpression, CallExpression);
ast_node!(
    /// `expr as Type` / `expr as? Type`
    CastExpression,
    CastExpression
);
ast_node!(SafeQualifiedExpression, SafeQualifiedExpression);
ast_node!(PostfixExpression, PostfixExpression);
ast_node!(WhenExpression, WhenExpression);
ast_node!(WhenEntry, WhenEntry);
ast_node!(BinaryExpression, BinaryExpression);
ast_node!(AnnotatedExpression, AnnotatedExpression);
ast_node!(AnnotationEntry, AnnotationEntry);
ast_node!(
    /// Any declaration that can carry a modifier list.
    Declaration,
    Class | Interface | Object | Property | Function | Parameter
);

fn first_expression<'t>(node: SyntaxNode<'t>) -> Option<SyntaxNode<'t>> {
    node.child_nodes().find(|c| c.kind().is_expression())
}

fn last_expression<'t>(node: SyntaxNode<'t>) -> Option<SyntaxNode<'t>> {
    node.child_nodes().rev().find(|c| c.kind().is_expression())
}

/// The first expression child after the given token.
fn expression_after<'t>(token: SyntaxNode<'t>) -> Option<SyntaxNode<'t>> {
    std::iter::successors(token.next_sibling(), |n| n.next_sibling())
        .find(|n| n.kind().is_expression())
}

fn name_of<'t>(node: SyntaxNode<'t>) -> Option<&'t str> {
    node.first_child_of_kind(SyntaxKind::Identifier)?
        .token_text()
}

/// Declarations with an optional leading modifier list.
pub trait HasModifiers<'t>: AstNode<'t> {
    fn modifier_list(&self) -> Option<ModifierList<'t>> {
        self.syntax()
            .first_child_of_kind(SyntaxKind::ModifierList)
            .and_then(ModifierList::cast)
    }

    fn modifier_token(&self, modifier: Modifier) -> Option<SyntaxNode<'t>> {
        self.modifier_list()?.token(modifier)
    }

    fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifier_token(modifier).is_some()
    }

    /// Explicit visibility keyword, if any.
    fn visibility(&self) -> Option<Visibility> {
        self.modifier_list()?
            .modifiers()
            .find_map(|(m, _)| m.visibility())
    }
}

impl<'t> HasModifiers<'t> for Property<'t> {}
impl<'t> HasModifiers<'t> for Function<'t> {}
impl<'t> HasModifiers<'t> for ClassLike<'t> {}
impl<'t> HasModifiers<'t> for Parameter<'t> {}
impl<'t> HasModifiers<'t> for Declaration<'t> {}

impl<'t> ModifierList<'t> {
    /// Recognized modifier keywords with their tokens, in source order.
    pub fn modifiers(&self) -> impl Iterator<Item = (Modifier, SyntaxNode<'t>)> + use<'t> {
        self.0
            .children()
            .filter(|c| c.kind() == SyntaxKind::ModifierKeyword)
            .filter_map(|c| Some((c.token_text()?.parse::<Modifier>().ok()?, c)))
    }

    pub fn token(&self, modifier: Modifier) -> Option<SyntaxNode<'t>> {
        self.modifiers()
            .find(|(m, _)| *m == modifier)
            .map(|(_, token)| token)
    }

    pub fn annotations(&self) -> impl Iterator<Item = AnnotationEntry<'t>> + use<'t> {
        self.0.children().filter_map(AnnotationEntry::cast)
    }
}

impl<'t> Declaration<'t> {
    pub fn name(&self) -> Option<&'t str> {
        name_of(self.0)
    }

    /// The class-like declaration whose body directly contains this one.
    pub fn containing_class(&self) -> Option<ClassLike<'t>> {
        let body = self.0.parent()?;
        if body.kind() != SyntaxKind::ClassBody {
            return None;
        }
        ClassLike::cast(body.parent()?)
    }
}

impl<'t> Property<'t> {
    pub fn name(&self) -> Option<&'t str> {
        name_of(self.0)
    }

    pub fn name_token(&self) -> Option<SyntaxNode<'t>> {
        self.0.first_child_of_kind(SyntaxKind::Identifier)
    }

    /// The `val` / `var` keyword.
    pub fn keyword_token(&self) -> Option<SyntaxNode<'t>> {
        self.0.children().find(|c| {
            c.is_token_with(SyntaxKind::Keyword, "val") || c.is_token_with(SyntaxKind::Keyword, "var")
        })
    }

    pub fn is_var(&self) -> bool {
        self.keyword_token()
            .is_some_and(|k| k.token_text() == Some("var"))
    }

    pub fn is_val(&self) -> bool {
        self.keyword_token()
            .is_some_and(|k| k.token_text() == Some("val"))
    }

    pub fn type_reference(&self) -> Option<TypeReference<'t>> {
        self.0
            .first_child_of_kind(SyntaxKind::TypeReference)
            .and_then(TypeReference::cast)
    }

    pub fn eq_token(&self) -> Option<SyntaxNode<'t>> {
        self.0.child_token(SyntaxKind::Operator, "=")
    }

    pub fn initializer(&self) -> Option<SyntaxNode<'t>> {
        expression_after(self.eq_token()?)
    }

    pub fn delegate(&self) -> Option<SyntaxNode<'t>> {
        expression_after(self.0.child_token(SyntaxKind::Keyword, "by")?)
    }

    /// Declared type if written, otherwise the type recorded by analysis.
    pub fn resolved_type(&self) -> Option<TypeInfo> {
        if let Some(info) = self.0.type_info() {
            return Some(info.clone());
        }
        self.type_reference().map(|t| t.to_type_info())
    }

    /// Declared directly in a statement block.
    pub fn is_local(&self) -> bool {
        self.0
            .parent()
            .is_some_and(|p| p.kind() == SyntaxKind::Block)
    }

    pub fn as_declaration(&self) -> Declaration<'t> {
        Declaration(self.0)
    }
}

/// Body of a function: either a `{}` block or `= expression`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionBody<'t> {
    Block(Block<'t>),
    Expression {
        eq_token: SyntaxNode<'t>,
        expr: SyntaxNode<'t>,
    },
}

impl<'t> FunctionBody<'t> {
    /// First node belonging to the body (`{` block or `=` token).
    pub fn first(&self) -> SyntaxNode<'t> {
        match self {
            FunctionBody::Block(b) => b.syntax(),
            FunctionBody::Expression { eq_token, .. } => *eq_token,
        }
    }

    /// Last node belonging to the body.
    pub fn last(&self) -> SyntaxNode<'t> {
        match self {
            FunctionBody::Block(b) => b.syntax(),
            FunctionBody::Expression { expr, .. } => *expr,
        }
    }
}

impl<'t> Function<'t> {
    pub fn name(&self) -> Option<&'t str> {
        name_of(self.0)
    }

    pub fn parameter_list(&self) -> Option<SyntaxNode<'t>> {
        self.0.first_child_of_kind(SyntaxKind::ParameterList)
    }

    pub fn parameters(&self) -> impl Iterator<Item = Parameter<'t>> + use<'t> {
        self.parameter_list()
            .into_iter()
            .flat_map(|l| l.children().filter_map(Parameter::cast))
    }

    pub fn body(&self) -> Option<FunctionBody<'t>> {
        if let Some(block) = self.0.first_child_of_kind(SyntaxKind::Block) {
            return Block::cast(block).map(FunctionBody::Block);
        }
        let eq_token = self.0.child_token(SyntaxKind::Operator, "=")?;
        let expr = expression_after(eq_token)?;
        Some(FunctionBody::Expression { eq_token, expr })
    }

    pub fn has_body(&self) -> bool {
        self.body().is_some()
    }

    /// Declared return type (`fun f(): T`).
    pub fn return_type(&self) -> Option<TypeReference<'t>> {
        self.0
            .first_child_of_kind(SyntaxKind::TypeReference)
            .and_then(TypeReference::cast)
    }

    pub fn as_declaration(&self) -> Declaration<'t> {
        Declaration(self.0)
    }
}

impl<'t> ClassLike<'t> {
    pub fn name(&self) -> Option<&'t str> {
        name_of(self.0)
    }

    pub fn is_interface(&self) -> bool {
        self.0.kind() == SyntaxKind::Interface
    }

    pub fn is_object(&self) -> bool {
        self.0.kind() == SyntaxKind::Object
    }

    pub fn body(&self) -> Option<SyntaxNode<'t>> {
        self.0.first_child_of_kind(SyntaxKind::ClassBody)
    }

    /// Open for extension: interfaces, abstract classes, and open classes.
    pub fn is_inheritable(&self) -> bool {
        self.is_interface() || self.has_modifier(Modifier::Abstract) || self.has_modifier(Modifier::Open)
    }
}

impl<'t> Parameter<'t> {
    pub fn name(&self) -> Option<&'t str> {
        name_of(self.0)
    }

    pub fn type_reference(&self) -> Option<TypeReference<'t>> {
        self.0
            .first_child_of_kind(SyntaxKind::TypeReference)
            .and_then(TypeReference::cast)
    }
}

impl<'t> TypeReference<'t> {
    /// The trailing `?` token, if the written type is nullable.
    pub fn question_token(&self) -> Option<SyntaxNode<'t>> {
        self.0
            .last_significant_child()
            .filter(|c| c.is_token_with(SyntaxKind::Operator, "?"))
    }

    pub fn is_nullable(&self) -> bool {
        self.question_token().is_some()
    }

    /// Type text without the nullability marker.
    pub fn base_name(&self) -> &'t str {
        let text = self.0.text().trim_end();
        text.strip_suffix('?').unwrap_or(text).trim_end()
    }

    pub fn to_type_info(&self) -> TypeInfo {
        let mut info = TypeInfo::new(self.base_name());
        info.nullable = self.is_nullable();
        info.primitive = is_primitive_name(info.name.as_str());
        info
    }
}

/// Built-in value types that cannot be `lateinit`.
pub fn is_primitive_name(name: &str) -> bool {
    matches!(
        name,
        "Int" | "Long" | "Short" | "Byte" | "Double" | "Float" | "Boolean" | "Char"
            | "UInt" | "ULong" | "UShort" | "UByte"
    )
}

impl<'t> Block<'t> {
    pub fn lbrace(&self) -> Option<SyntaxNode<'t>> {
        self.0
            .first_significant_child()
            .filter(|c| c.is_token_with(SyntaxKind::Punct, "{"))
    }

    /// The closing `}`; absent in blocks cut off mid-edit.
    pub fn rbrace(&self) -> Option<SyntaxNode<'t>> {
        self.0
            .last_significant_child()
            .filter(|c| c.is_token_with(SyntaxKind::Punct, "}"))
    }

    pub fn statements(&self) -> impl Iterator<Item = SyntaxNode<'t>> + use<'t> {
        self.0.child_nodes()
    }
}

impl<'t> ValueArgumentList<'t> {
    pub fn arguments(&self) -> impl Iterator<Item = ValueArgument<'t>> + use<'t> {
        self.0.children().filter_map(ValueArgument::cast)
    }
}

impl<'t> ValueArgument<'t> {
    /// `name` of a `name = value` argument.
    pub fn name(&self) -> Option<&'t str> {
        let ident = self.0.first_significant_child()?;
        if ident.kind() != SyntaxKind::Identifier {
            return None;
        }
        ident
            .next_significant_sibling()
            .filter(|n| n.is_token_with(SyntaxKind::Operator, "="))?;
        ident.token_text()
    }

    pub fn is_named(&self) -> bool {
        self.name().is_some()
    }

    /// The `*` spread operator.
    pub fn spread_token(&self) -> Option<SyntaxNode<'t>> {
        self.0
            .first_significant_child()
            .filter(|c| c.is_token_with(SyntaxKind::Operator, "*"))
    }

    pub fn expression(&self) -> Option<SyntaxNode<'t>> {
        last_expression(self.0)
    }

    pub fn argument_list(&self) -> Option<ValueArgumentList<'t>> {
        self.0.parent().and_then(ValueArgumentList::cast)
    }
}

impl<'t> CallExpression<'t> {
    pub fn callee(&self) -> Option<SyntaxNode<'t>> {
        first_expression(self.0)
    }

    pub fn argument_list(&self) -> Option<ValueArgumentList<'t>> {
        self.0
            .first_child_of_kind(SyntaxKind::ValueArgumentList)
            .and_then(ValueArgumentList::cast)
    }
}

impl<'t> CastExpression<'t> {
    pub fn left(&self) -> Option<SyntaxNode<'t>> {
        first_expression(self.0)
    }

    pub fn operation_token(&self) -> Option<SyntaxNode<'t>> {
        self.0
            .children()
            .find(|c| c.is_token_with(SyntaxKind::Keyword, "as") || c.is_token_with(SyntaxKind::Keyword, "as?"))
    }

    pub fn is_safe(&self) -> bool {
        self.operation_token()
            .is_some_and(|t| t.token_text() == Some("as?"))
    }

    pub fn type_reference(&self) -> Option<TypeReference<'t>> {
        self.0
            .first_child_of_kind(SyntaxKind::TypeReference)
            .and_then(TypeReference::cast)
    }
}

impl<'t> SafeQualifiedExpression<'t> {
    pub fn receiver(&self) -> Option<SyntaxNode<'t>> {
        first_expression(self.0)
    }

    pub fn operation_token(&self) -> Option<SyntaxNode<'t>> {
        self.0.child_token(SyntaxKind::Operator, "?.")
    }

    pub fn selector(&self) -> Option<SyntaxNode<'t>> {
        expression_after(self.operation_token()?)
    }
}

impl<'t> PostfixExpression<'t> {
    pub fn base(&self) -> Option<SyntaxNode<'t>> {
        first_expression(self.0)
    }

    pub fn operation_token(&self) -> Option<SyntaxNode<'t>> {
        self.0
            .last_significant_child()
            .filter(|c| c.kind() == SyntaxKind::Operator)
    }

    pub fn is_not_null_assertion(&self) -> bool {
        self.operation_token()
            .is_some_and(|t| t.token_text() == Some("!!"))
    }
}

impl<'t> WhenExpression<'t> {
    pub fn entries(&self) -> impl Iterator<Item = WhenEntry<'t>> + use<'t> {
        self.0.children().filter_map(WhenEntry::cast)
    }

    pub fn else_entry(&self) -> Option<WhenEntry<'t>> {
        self.entries().find(|e| e.is_else())
    }

    pub fn subject(&self) -> Option<SyntaxNode<'t>> {
        let lparen = self.0.child_token(SyntaxKind::Punct, "(")?;
        expression_after(lparen)
    }

    pub fn lbrace(&self) -> Option<SyntaxNode<'t>> {
        self.0.child_token(SyntaxKind::Punct, "{")
    }

    pub fn rbrace(&self) -> Option<SyntaxNode<'t>> {
        self.0
            .last_significant_child()
            .filter(|c| c.is_token_with(SyntaxKind::Punct, "}"))
    }
}

impl<'t> WhenEntry<'t> {
    pub fn is_else(&self) -> bool {
        self.0
            .first_significant_child()
            .is_some_and(|c| c.is_token_with(SyntaxKind::Keyword, "else"))
    }

    pub fn arrow_token(&self) -> Option<SyntaxNode<'t>> {
        self.0.child_token(SyntaxKind::Operator, "->")
    }

    pub fn result(&self) -> Option<SyntaxNode<'t>> {
        expression_after(self.arrow_token()?)
    }
}

impl<'t> BinaryExpression<'t> {
    pub fn left(&self) -> Option<SyntaxNode<'t>> {
        first_expression(self.0)
    }

    pub fn operation_token(&self) -> Option<SyntaxNode<'t>> {
        self.0
            .children()
            .find(|c| c.kind() == SyntaxKind::Operator)
    }

    pub fn right(&self) -> Option<SyntaxNode<'t>> {
        expression_after(self.operation_token()?)
    }

    pub fn is_assignment(&self) -> bool {
        self.operation_token()
            .is_some_and(|t| t.token_text() == Some("="))
    }
}

impl<'t> AnnotatedExpression<'t> {
    pub fn annotation_entries(&self) -> impl Iterator<Item = AnnotationEntry<'t>> + use<'t> {
        self.0.children().filter_map(AnnotationEntry::cast)
    }

    /// The annotated expression itself; `None` for a dangling annotation.
    pub fn base_expression(&self) -> Option<SyntaxNode<'t>> {
        self.0
            .child_nodes()
            .find(|c| c.kind() != SyntaxKind::AnnotationEntry && c.kind().is_expression())
    }
}

impl<'t> AnnotationEntry<'t> {
    pub fn name(&self) -> Option<&'t str> {
        name_of(self.0)
    }
}
