//! Lowering of structural fix actions to byte-range text edits.

use crate::error::{EditError, EditResult};
use quickfix_syntax::ast::{
    AstNode, Declaration, Function, HasModifiers, ValueArgument, WhenExpression,
};
use quickfix_syntax::{Modifier, NodeId, SyntaxKind, SyntaxNode, SyntaxTree, TextRange, Visibility};
use quickfix_types::{FixAction, InsertPosition};

/// Replace `range` of the source with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: TextRange,
    pub replacement: String,
}

impl TextEdit {
    pub fn replace(range: TextRange, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    pub fn delete(range: TextRange) -> Self {
        Self::replace(range, "")
    }

    pub fn insert(offset: u32, text: impl Into<String>) -> Self {
        Self::replace(TextRange::empty(offset), text)
    }
}

fn node(tree: &SyntaxTree, id: NodeId) -> EditResult<SyntaxNode<'_>> {
    tree.node(id).ok_or(EditError::StaleNode { node: id })
}

fn view<'t, T: AstNode<'t>>(
    tree: &'t SyntaxTree,
    id: NodeId,
    expected: &'static str,
) -> EditResult<T> {
    T::cast(node(tree, id)?).ok_or(EditError::UnexpectedNode { node: id, expected })
}

fn is_whitespace(node: &SyntaxNode<'_>) -> bool {
    node.kind() == SyntaxKind::Whitespace
}

/// End of `node`, extended over one directly following whitespace token.
fn end_with_trailing_ws(node: SyntaxNode<'_>) -> u32 {
    match node.next_sibling() {
        Some(ws) if is_whitespace(&ws) => ws.range().end,
        _ => node.range().end,
    }
}

/// Where a new leading modifier goes: before the first non-trivia child.
fn declaration_start(decl: &Declaration<'_>) -> u32 {
    decl.syntax()
        .first_significant_child()
        .unwrap_or(decl.syntax())
        .range()
        .start
}

fn add_modifier(decl: Declaration<'_>, modifier: Modifier) -> Vec<TextEdit> {
    if decl.has_modifier(modifier) {
        return vec![];
    }
    match decl.modifier_list() {
        Some(list) => vec![TextEdit::insert(
            list.syntax().range().end,
            format!(" {modifier}"),
        )],
        None => vec![TextEdit::insert(
            declaration_start(&decl),
            format!("{modifier} "),
        )],
    }
}

fn remove_modifier(decl: Declaration<'_>, modifier: Modifier) -> EditResult<Vec<TextEdit>> {
    let missing = EditError::MissingModifier {
        declaration: decl.syntax().id(),
        modifier,
    };
    let list = decl.modifier_list().ok_or(missing.clone())?;
    let token = list.token(modifier).ok_or(missing)?;

    // Sole modifier: the list goes, with the space before the keyword.
    if list.syntax().significant_children().count() == 1 {
        let start = list.syntax().range().start;
        let end = end_with_trailing_ws(list.syntax());
        return Ok(vec![TextEdit::delete(TextRange::new(start, end))]);
    }

    let range = match (token.next_sibling(), token.prev_sibling()) {
        (Some(next), _) if is_whitespace(&next) => {
            TextRange::new(token.range().start, next.range().end)
        }
        (_, Some(prev)) if is_whitespace(&prev) => {
            TextRange::new(prev.range().start, token.range().end)
        }
        _ => token.range(),
    };
    Ok(vec![TextEdit::delete(range)])
}

fn set_visibility(decl: Declaration<'_>, visibility: Visibility) -> Vec<TextEdit> {
    let current = decl
        .modifier_list()
        .and_then(|list| list.modifiers().find(|(m, _)| m.visibility().is_some()));
    match current {
        Some((m, _)) if m == visibility.modifier() => vec![],
        Some((_, token)) => vec![TextEdit::replace(token.range(), visibility.as_str())],
        None => vec![TextEdit::insert(
            declaration_start(&decl),
            format!("{visibility} "),
        )],
    }
}

fn remove_node(node: SyntaxNode<'_>) -> TextEdit {
    if node.is_token() {
        return TextEdit::delete(node.range());
    }
    TextEdit::delete(TextRange::new(node.range().start, end_with_trailing_ws(node)))
}

fn remove_range(first: SyntaxNode<'_>, last: SyntaxNode<'_>) -> EditResult<TextEdit> {
    if first.parent() != last.parent() || first.range().start > last.range().end {
        return Err(EditError::UnexpectedNode {
            node: last.id(),
            expected: "a later sibling of the first node",
        });
    }
    let start = match first.prev_sibling() {
        Some(ws) if is_whitespace(&ws) => ws.range().start,
        _ => first.range().start,
    };
    Ok(TextEdit::delete(TextRange::new(start, last.range().end)))
}

fn remove_value_argument(argument: ValueArgument<'_>) -> EditResult<TextEdit> {
    let node = argument.syntax();
    if argument.argument_list().is_none() {
        return Err(EditError::UnexpectedNode {
            node: node.id(),
            expected: "an argument inside an argument list",
        });
    }
    let is_comma = |n: &SyntaxNode<'_>| n.is_token_with(SyntaxKind::Punct, ",");

    let range = if let Some(comma) = node.next_significant_sibling().filter(is_comma) {
        let end = comma
            .next_significant_sibling()
            .map_or(comma.range().end, |n| n.range().start);
        TextRange::new(node.range().start, end)
    } else if let Some(comma) = node.prev_significant_sibling().filter(is_comma) {
        TextRange::new(comma.range().start, node.range().end)
    } else {
        node.range()
    };
    Ok(TextEdit::delete(range))
}

fn replace_with_child(node: SyntaxNode<'_>, child: SyntaxNode<'_>) -> EditResult<TextEdit> {
    if child == node || !child.ancestors().any(|a| a == node) {
        return Err(EditError::UnexpectedNode {
            node: child.id(),
            expected: "a descendant of the replaced node",
        });
    }
    Ok(TextEdit::replace(node.range(), child.text()))
}

fn remove_function_body(function: Function<'_>) -> EditResult<TextEdit> {
    let id = function.syntax().id();
    let body = function.body().ok_or(EditError::UnexpectedNode {
        node: id,
        expected: "a function with a body",
    })?;
    let first = body.first();
    let start = first
        .prev_significant_sibling()
        .map_or(first.range().start, |n| n.range().end);
    Ok(TextEdit::delete(TextRange::new(start, body.last().range().end)))
}

fn move_when_else(when: WhenExpression<'_>) -> EditResult<Vec<TextEdit>> {
    let else_entry = when.else_entry().ok_or(EditError::UnexpectedNode {
        node: when.syntax().id(),
        expected: "a when expression with an else branch",
    })?;
    let Some(last) = when.entries().last() else {
        return Ok(vec![]);
    };
    if last == else_entry {
        return Ok(vec![]);
    }
    let entry = else_entry.syntax();
    Ok(vec![
        remove_node(entry),
        TextEdit::insert(last.syntax().range().end, format!("\n{}", entry.text())),
    ])
}

/// Text edits realizing `action` on `tree`'s source.
///
/// An action that is already satisfied (modifier present, else already last)
/// lowers to no edits.
pub fn lower(tree: &SyntaxTree, action: &FixAction) -> EditResult<Vec<TextEdit>> {
    let edits = match action {
        FixAction::AddModifier {
            declaration,
            modifier,
        } => add_modifier(view(tree, *declaration, "a declaration")?, *modifier),
        FixAction::RemoveModifier {
            declaration,
            modifier,
        } => remove_modifier(view(tree, *declaration, "a declaration")?, *modifier)?,
        FixAction::SetVisibility {
            declaration,
            visibility,
        } => set_visibility(view(tree, *declaration, "a declaration")?, *visibility),
        FixAction::RemoveNode { node: id } => vec![remove_node(node(tree, *id)?)],
        FixAction::RemoveRange { first, last } => {
            vec![remove_range(node(tree, *first)?, node(tree, *last)?)?]
        }
        FixAction::RemoveValueArgument { argument } => {
            vec![remove_value_argument(view(tree, *argument, "a value argument")?)?]
        }
        FixAction::ReplaceWithChild { node: id, child } => {
            vec![replace_with_child(node(tree, *id)?, node(tree, *child)?)?]
        }
        FixAction::ReplaceToken { token, text } => {
            let token_node = node(tree, *token)?;
            if !token_node.is_token() {
                return Err(EditError::UnexpectedNode {
                    node: *token,
                    expected: "a token",
                });
            }
            vec![TextEdit::replace(token_node.range(), text.clone())]
        }
        FixAction::InsertText {
            anchor,
            position,
            text,
        } => {
            let range = node(tree, *anchor)?.range();
            let offset = match position {
                InsertPosition::Before => range.start,
                InsertPosition::After => range.end,
            };
            vec![TextEdit::insert(offset, text.clone())]
        }
        FixAction::RemoveFunctionBody { function } => {
            vec![remove_function_body(view(tree, *function, "a function")?)?]
        }
        FixAction::MoveWhenElseToEnd { when } => {
            move_when_else(view(tree, *when, "a when expression")?)?
        }
        FixAction::WrapInArrayLiteral { expression } => {
            let expr = node(tree, *expression)?;
            if !expr.kind().is_expression() {
                return Err(EditError::UnexpectedNode {
                    node: *expression,
                    expected: "an expression",
                });
            }
            vec![TextEdit::replace(expr.range(), format!("[{}]", expr.text()))]
        }
    };
    Ok(edits)
}
