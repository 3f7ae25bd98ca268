//! Removes one modifier token of a member declaration.
//!
//! Only the token itself (plus the blank it leaves behind) is touched; other
//! modifiers, attributes, comments and line breaks stay as they are.

use super::{Edit, FixError};
use crate::syntax::{SyntaxKind, SyntaxNode, SyntaxToken, SyntaxTree};

fn modifier_token(node: &SyntaxNode, kind: SyntaxKind) -> Option<&SyntaxToken> {
    node.child_node(SyntaxKind::ModifierList)?.child_token(kind)
}

fn keyword(kind: SyntaxKind) -> &'static str {
    kind.keyword_text().unwrap_or("modifier")
}

/// Edit deleting the `kind` modifier of `node`, or `None` if it has none.
#[must_use]
pub fn remove_modifier_edit(tree: &SyntaxTree, node: &SyntaxNode, kind: SyntaxKind) -> Option<Edit> {
    let token = modifier_token(node, kind)?;
    let source = tree.source();
    let start = usize::from(token.text_range().start());
    let end = usize::from(token.text_range().end());

    let trailing = source[end..]
        .bytes()
        .take_while(|b| matches!(b, b' ' | b'\t'))
        .count();
    if trailing > 0 {
        return Some(Edit::delete(start, end + trailing));
    }

    // Last thing on its line: take the blank in front instead.
    let before = &source[..start];
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let leading = before[line_start..]
        .bytes()
        .rev()
        .take_while(|b| matches!(b, b' ' | b'\t'))
        .count();
    if leading > 0 && leading < start - line_start {
        return Some(Edit::delete(start - leading, end));
    }
    Some(Edit::delete(start, end))
}

/// Removes the `kind` modifier from the declaration `node` of `tree`.
///
/// # Errors
/// Fails if the declaration has no such modifier or the edit cannot be applied.
pub fn remove_modifier(
    tree: &SyntaxTree,
    node: &SyntaxNode,
    kind: SyntaxKind,
) -> Result<SyntaxTree, FixError> {
    let edit = remove_modifier_edit(tree, node, kind).ok_or(FixError::ModifierMissing {
        modifier: keyword(kind),
    })?;
    Ok(tree.with_edits([edit])?)
}
