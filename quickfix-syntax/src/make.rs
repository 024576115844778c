//! Constructors for common tree fragments.
//!
//! Fragments are [`GreenElement`]s with whitespace already interleaved, so the
//! rebuilt source reads like hand-written code.

use crate::green::GreenElement;
use crate::kind::SyntaxKind;

pub fn ws(text: &str) -> GreenElement {
    GreenElement::token(SyntaxKind::Whitespace, text)
}

pub fn space() -> GreenElement {
    ws(" ")
}

pub fn nl() -> GreenElement {
    ws("\n")
}

pub fn kw(text: &str) -> GreenElement {
    GreenElement::token(SyntaxKind::Keyword, text)
}

pub fn ident(text: &str) -> GreenElement {
    GreenElement::token(SyntaxKind::Identifier, text)
}

pub fn op(text: &str) -> GreenElement {
    GreenElement::token(SyntaxKind::Operator, text)
}

pub fn punct(text: &str) -> GreenElement {
    GreenElement::token(SyntaxKind::Punct, text)
}

pub fn modifier(text: &str) -> GreenElement {
    GreenElement::token(SyntaxKind::ModifierKeyword, text)
}

pub fn name_ref(name: &str) -> GreenElement {
    GreenElement::node(SyntaxKind::NameReference, vec![ident(name)])
}

pub fn literal(text: &str) -> GreenElement {
    GreenElement::node(
        SyntaxKind::Literal,
        vec![GreenElement::token(SyntaxKind::LiteralValue, text)],
    )
}

fn separated(items: Vec<GreenElement>, sep: &[GreenElement]) -> Vec<GreenElement> {
    let mut out = Vec::new();
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.extend(sep.iter().cloned());
        }
        out.push(item);
    }
    out
}

/// `a b c` as a modifier list, or `None` when empty.
pub fn modifier_list(modifiers: &[&str]) -> Option<GreenElement> {
    if modifiers.is_empty() {
        return None;
    }
    let items = modifiers.iter().map(|m| modifier(m)).collect();
    Some(GreenElement::node(
        SyntaxKind::ModifierList,
        separated(items, &[space()]),
    ))
}

fn with_modifiers(modifiers: &[&str]) -> Vec<GreenElement> {
    match modifier_list(modifiers) {
        Some(list) => vec![list, space()],
        None => vec![],
    }
}

/// A type reference; a trailing `?` becomes a separate nullability token.
pub fn type_ref(text: &str) -> GreenElement {
    let mut children = Vec::new();
    match text.strip_suffix('?') {
        Some(base) => {
            children.push(ident(base));
            children.push(op("?"));
        }
        None => children.push(ident(text)),
    }
    GreenElement::node(SyntaxKind::TypeReference, children)
}

/// `[modifiers] val|var name[: Type][ = initializer]`
pub fn property(
    modifiers: &[&str],
    keyword: &str,
    name: &str,
    ty: Option<&str>,
    initializer: Option<GreenElement>,
) -> GreenElement {
    let mut children = with_modifiers(modifiers);
    children.extend([kw(keyword), space(), ident(name)]);
    if let Some(ty) = ty {
        children.extend([punct(":"), space(), type_ref(ty)]);
    }
    if let Some(init) = initializer {
        children.extend([space(), op("="), space(), init]);
    }
    GreenElement::node(SyntaxKind::Property, children)
}

/// `[modifiers] name: Type`
pub fn parameter(modifiers: &[&str], name: &str, ty: &str) -> GreenElement {
    let mut children = with_modifiers(modifiers);
    children.extend([ident(name), punct(":"), space(), type_ref(ty)]);
    GreenElement::node(SyntaxKind::Parameter, children)
}

/// `{` statements, one per line `}`
pub fn block(statements: Vec<GreenElement>) -> GreenElement {
    let mut children = vec![punct("{"), nl()];
    for stmt in statements {
        children.push(stmt);
        children.push(nl());
    }
    children.push(punct("}"));
    GreenElement::node(SyntaxKind::Block, children)
}

/// Elements to append after a parameter list for a block body.
pub fn block_body(statements: Vec<GreenElement>) -> Vec<GreenElement> {
    vec![space(), block(statements)]
}

/// Elements to append after a parameter list for an expression body.
pub fn expr_body(expr: GreenElement) -> Vec<GreenElement> {
    vec![space(), op("="), space(), expr]
}

/// `[modifiers] fun name(params)` followed by `body` verbatim.
pub fn function(
    modifiers: &[&str],
    name: &str,
    params: Vec<GreenElement>,
    body: Vec<GreenElement>,
) -> GreenElement {
    let mut children = with_modifiers(modifiers);
    children.extend([kw("fun"), space(), ident(name)]);
    let mut list = vec![punct("(")];
    list.extend(separated(params, &[punct(","), space()]));
    list.push(punct(")"));
    children.push(GreenElement::node(SyntaxKind::ParameterList, list));
    children.extend(body);
    GreenElement::node(SyntaxKind::Function, children)
}

/// `[modifiers] class|interface|object Name {` members `}`
pub fn class(
    modifiers: &[&str],
    keyword: &str,
    name: &str,
    members: Vec<GreenElement>,
) -> GreenElement {
    let kind = match keyword {
        "interface" => SyntaxKind::Interface,
        "object" => SyntaxKind::Object,
        _ => SyntaxKind::Class,
    };
    let mut children = with_modifiers(modifiers);
    children.extend([kw(keyword), space(), ident(name), space()]);
    let mut body = vec![punct("{"), nl()];
    for member in members {
        body.push(member);
        body.push(nl());
    }
    body.push(punct("}"));
    children.push(GreenElement::node(SyntaxKind::ClassBody, body));
    GreenElement::node(kind, children)
}

pub fn arg(expr: GreenElement) -> GreenElement {
    GreenElement::node(SyntaxKind::ValueArgument, vec![expr])
}

pub fn named_arg(name: &str, expr: GreenElement) -> GreenElement {
    GreenElement::node(
        SyntaxKind::ValueArgument,
        vec![ident(name), space(), op("="), space(), expr],
    )
}

pub fn spread_arg(expr: GreenElement) -> GreenElement {
    GreenElement::node(SyntaxKind::ValueArgument, vec![op("*"), expr])
}

pub fn call(callee: &str, args: Vec<GreenElement>) -> GreenElement {
    let mut list = vec![punct("(")];
    list.extend(separated(args, &[punct(","), space()]));
    list.push(punct(")"));
    GreenElement::node(
        SyntaxKind::CallExpression,
        vec![
            name_ref(callee),
            GreenElement::node(SyntaxKind::ValueArgumentList, list),
        ],
    )
}

/// `expr as Type`
pub fn cast(expr: GreenElement, ty: &str) -> GreenElement {
    GreenElement::node(
        SyntaxKind::CastExpression,
        vec![expr, space(), kw("as"), space(), type_ref(ty)],
    )
}

/// `receiver?.selector`
pub fn safe_call(receiver: GreenElement, selector: GreenElement) -> GreenElement {
    GreenElement::node(
        SyntaxKind::SafeQualifiedExpression,
        vec![receiver, op("?."), selector],
    )
}

/// `receiver.selector`
pub fn dot_call(receiver: GreenElement, selector: GreenElement) -> GreenElement {
    GreenElement::node(
        SyntaxKind::DotQualifiedExpression,
        vec![receiver, op("."), selector],
    )
}

/// `expr!!`
pub fn not_null(expr: GreenElement) -> GreenElement {
    GreenElement::node(SyntaxKind::PostfixExpression, vec![expr, op("!!")])
}

pub fn binary(left: GreenElement, operator: &str, right: GreenElement) -> GreenElement {
    GreenElement::node(
        SyntaxKind::BinaryExpression,
        vec![left, space(), op(operator), space(), right],
    )
}

/// `condition -> result`
pub fn when_entry(condition: GreenElement, result: GreenElement) -> GreenElement {
    GreenElement::node(
        SyntaxKind::WhenEntry,
        vec![condition, space(), op("->"), space(), result],
    )
}

/// `else -> result`
pub fn else_entry(result: GreenElement) -> GreenElement {
    GreenElement::node(
        SyntaxKind::WhenEntry,
        vec![kw("else"), space(), op("->"), space(), result],
    )
}

/// `when [(subject)] {` entries, one per line `}`
pub fn when_expr(subject: Option<GreenElement>, entries: Vec<GreenElement>) -> GreenElement {
    let mut children = vec![kw("when")];
    if let Some(subject) = subject {
        children.extend([space(), punct("("), subject, punct(")")]);
    }
    children.extend([space(), punct("{"), nl()]);
    for entry in entries {
        children.push(entry);
        children.push(nl());
    }
    children.push(punct("}"));
    GreenElement::node(SyntaxKind::WhenExpression, children)
}

/// `@Name`
pub fn annotation(name: &str) -> GreenElement {
    GreenElement::node(SyntaxKind::AnnotationEntry, vec![punct("@"), ident(name)])
}

/// `@Name(args)`
pub fn annotation_with_args(name: &str, args: Vec<GreenElement>) -> GreenElement {
    let mut list = vec![punct("(")];
    list.extend(separated(args, &[punct(","), space()]));
    list.push(punct(")"));
    GreenElement::node(
        SyntaxKind::AnnotationEntry,
        vec![
            punct("@"),
            ident(name),
            GreenElement::node(SyntaxKind::ValueArgumentList, list),
        ],
    )
}

/// `@A @B base` with `separator` between the last annotation and the base.
pub fn annotated(names: &[&str], separator: &str, base: Option<GreenElement>) -> GreenElement {
    annotated_with(names.iter().map(|n| annotation(n)).collect(), separator, base)
}

/// Like [`annotated`], over prebuilt annotation entries.
pub fn annotated_with(
    entries: Vec<GreenElement>,
    separator: &str,
    base: Option<GreenElement>,
) -> GreenElement {
    let mut children = separated(entries, &[space()]);
    if let Some(base) = base {
        children.push(ws(separator));
        children.push(base);
    }
    GreenElement::node(SyntaxKind::AnnotatedExpression, children)
}

pub fn collection_literal(items: Vec<GreenElement>) -> GreenElement {
    let mut children = vec![punct("[")];
    children.extend(separated(items, &[punct(","), space()]));
    children.push(punct("]"));
    GreenElement::node(SyntaxKind::CollectionLiteral, children)
}

/// Top-level declarations separated by newlines.
pub fn file(decls: Vec<GreenElement>) -> GreenElement {
    GreenElement::node(SyntaxKind::File, separated(decls, &[nl()]))
}
