//! Finds the delegate storage an event chains its handlers onto.
//!
//! For an accessor-like event this is the left operand of the first
//! `X += value` statement of the `add` accessor. A field-like event is its own
//! storage.

use crate::event::{Accessor, EventDeclaration, EventShape, Statement};
use crate::syntax::{SyntaxKind, SyntaxNode};
use compact_str::CompactString;
use thiserror::Error;

/// Why no backing identifier could be found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// The event has no `add` accessor.
    #[error("event '{event}' has no add accessor")]
    MissingAddAccessor {
        /// Event name.
        event: CompactString,
    },
    /// No statement of the `add` accessor has the `X += value` shape.
    #[error("no `+= value` assignment in the add accessor of '{event}'")]
    NoBackingAssignment {
        /// Event name.
        event: CompactString,
    },
}

/// Returns the identifier that stores the handlers of `event`.
///
/// # Errors
/// Fails for accessor-like events without an `add` accessor or without an
/// `X += value` statement in it.
pub fn resolve_backing_identifier(
    event: &EventDeclaration<'_>,
) -> Result<CompactString, ResolutionError> {
    match &event.shape {
        EventShape::FieldLike { .. } => Ok(event.name.clone()),
        EventShape::AccessorLike { add, .. } => {
            let add = add.as_ref().ok_or_else(|| ResolutionError::MissingAddAccessor {
                event: event.name.clone(),
            })?;
            backing_from_add(add).ok_or_else(|| ResolutionError::NoBackingAssignment {
                event: event.name.clone(),
            })
        }
    }
}

fn backing_from_add(add: &Accessor<'_>) -> Option<CompactString> {
    add.statements().into_iter().find_map(|statement| match statement {
        Statement::Assignment {
            left,
            operator: SyntaxKind::PlusEq,
            right,
        } if is_value(right) => assigned_identifier(left),
        _ => None,
    })
}

fn is_value(node: &SyntaxNode) -> bool {
    node.kind() == SyntaxKind::IdentifierName && node.text() == "value"
}

/// `x` or `this.x`
fn assigned_identifier(node: &SyntaxNode) -> Option<CompactString> {
    let tokens = node.tokens();
    match (node.kind(), tokens.as_slice()) {
        (SyntaxKind::IdentifierName, [name]) => Some(name.text().into()),
        (SyntaxKind::MemberAccessExpression, [receiver, _dot, name])
            if receiver.kind() == SyntaxKind::ThisKw =>
        {
            Some(name.text().into())
        }
        _ => None,
    }
}
