use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Node and token kinds of an analyzed source unit.
///
/// Tokens carry text; nodes carry children. The split is fixed per kind, see
/// [`SyntaxKind::is_token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyntaxKind {
    // Declarations
    File,
    Class,
    Object,
    Interface,
    ClassBody,
    Property,
    Function,
    Parameter,
    ParameterList,
    ModifierList,
    TypeReference,
    Block,

    // Expressions
    ValueArgumentList,
    ValueArgument,
    CallExpression,
    DotQualifiedExpression,
    SafeQualifiedExpression,
    BinaryExpression,
    CastExpression,
    PostfixExpression,
    WhenExpression,
    WhenEntry,
    AnnotatedExpression,
    AnnotationEntry,
    NameReference,
    Literal,
    CollectionLiteral,

    // Tokens
    Keyword,
    ModifierKeyword,
    Identifier,
    LiteralValue,
    Operator,
    Punct,
    Whitespace,
    Comment,

    /// Unparseable region; may hold tokens and nodes.
    Error,
}

impl SyntaxKind {
    pub fn is_token(self) -> bool {
        matches!(
            self,
            SyntaxKind::Keyword
                | SyntaxKind::ModifierKeyword
                | SyntaxKind::Identifier
                | SyntaxKind::LiteralValue
                | SyntaxKind::Operator
                | SyntaxKind::Punct
                | SyntaxKind::Whitespace
                | SyntaxKind::Comment
        )
    }

    pub fn is_trivia(self) -> bool {
        matches!(self, SyntaxKind::Whitespace | SyntaxKind::Comment)
    }

    pub fn is_expression(self) -> bool {
        matches!(
            self,
            SyntaxKind::CallExpression
                | SyntaxKind::DotQualifiedExpression
                | SyntaxKind::SafeQualifiedExpression
                | SyntaxKind::BinaryExpression
                | SyntaxKind::CastExpression
                | SyntaxKind::PostfixExpression
                | SyntaxKind::WhenExpression
                | SyntaxKind::AnnotatedExpression
                | SyntaxKind::NameReference
                | SyntaxKind::Literal
                | SyntaxKind::CollectionLiteral
        )
    }

    pub fn is_declaration(self) -> bool {
        matches!(
            self,
            SyntaxKind::Class
                | SyntaxKind::Object
                | SyntaxKind::Interface
                | SyntaxKind::Property
                | SyntaxKind::Function
                | SyntaxKind::Parameter
        )
    }
}

/// Declaration modifiers that fixes add, remove, or inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Public,
    Protected,
    Internal,
    Private,
    Abstract,
    Open,
    Final,
    Override,
    Lateinit,
    Inline,
    Suspend,
    Data,
    Const,
    Vararg,
}

impl Modifier {
    pub const ALL: &'static [Modifier] = &[
        Modifier::Public,
        Modifier::Protected,
        Modifier::Internal,
        Modifier::Private,
        Modifier::Abstract,
        Modifier::Open,
        Modifier::Final,
        Modifier::Override,
        Modifier::Lateinit,
        Modifier::Inline,
        Modifier::Suspend,
        Modifier::Data,
        Modifier::Const,
        Modifier::Vararg,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Internal => "internal",
            Modifier::Private => "private",
            Modifier::Abstract => "abstract",
            Modifier::Open => "open",
            Modifier::Final => "final",
            Modifier::Override => "override",
            Modifier::Lateinit => "lateinit",
            Modifier::Inline => "inline",
            Modifier::Suspend => "suspend",
            Modifier::Data => "data",
            Modifier::Const => "const",
            Modifier::Vararg => "vararg",
        }
    }

    pub fn visibility(self) -> Option<Visibility> {
        match self {
            Modifier::Public => Some(Visibility::Public),
            Modifier::Protected => Some(Visibility::Protected),
            Modifier::Internal => Some(Visibility::Internal),
            Modifier::Private => Some(Visibility::Private),
            _ => None,
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown modifier keyword `{0}`")]
pub struct UnknownModifier(pub String);

impl FromStr for Modifier {
    type Err = UnknownModifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Modifier::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownModifier(s.to_string()))
    }
}

/// Declaration visibility. Ordered from widest to narrowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Protected,
    Internal,
    Private,
}

impl Visibility {
    pub fn modifier(self) -> Modifier {
        match self {
            Visibility::Public => Modifier::Public,
            Visibility::Protected => Modifier::Protected,
            Visibility::Internal => Modifier::Internal,
            Visibility::Private => Modifier::Private,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.modifier().as_str()
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
