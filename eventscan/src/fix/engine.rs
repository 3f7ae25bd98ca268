//! Code actions for virtual event diagnostics.
//!
//! Two independent actions are offered per diagnostic: removing `virtual`, and
//! removing `virtual` plus extracting a `protected virtual Raise<Name>` method.
//! An action that cannot be computed for a declaration is left out of
//! [`list_fixes`]; [`code_action`] reports why.

use super::modifier::remove_modifier;
use super::resolver::{resolve_backing_identifier, ResolutionError};
use super::synth::{build_raise_method, RaiseMethod};
use super::{Edit, RewriteError};
use crate::event::{match_event, EventDeclaration};
use crate::messages::MessageTable;
use crate::rules::{Diagnostic, DiagnosticKind};
use crate::syntax::{SyntaxKind, SyntaxNode, SyntaxTree};
use compact_str::CompactString;
use serde::Serialize;
use text_size::TextSize;
use thiserror::Error;

/// Why a fix could not be computed or applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixError {
    /// No event declaration of the expected shape at the diagnostic position.
    #[error("no event declaration found at byte {offset}")]
    DeclarationNotFound {
        /// Byte offset that was searched.
        offset: u32,
    },
    /// The declaration does not carry the modifier to remove.
    #[error("declaration has no `{modifier}` modifier")]
    ModifierMissing {
        /// Modifier keyword.
        modifier: &'static str,
    },
    /// The backing storage of an accessor-like event is unknown.
    #[error(transparent)]
    Unresolved(#[from] ResolutionError),
    /// The element type has no single type argument to raise the event with.
    #[error("event '{event}' has element type `{element_type}`, expected a generic with one type argument")]
    UnsupportedElementType {
        /// Event name.
        event: CompactString,
        /// Element type as written.
        element_type: CompactString,
    },
    /// A field-like statement declares several events.
    #[error("'{event}' is declared together with {} other event(s)", .count - 1)]
    MultipleDeclarators {
        /// First declared name.
        event: CompactString,
        /// Number of declarators in the statement.
        count: usize,
    },
    /// The computed edit could not be applied.
    #[error(transparent)]
    Rewrite(#[from] RewriteError),
}

/// The rewrites offered for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FixKind {
    /// Remove the `virtual` modifier.
    RemoveModifier,
    /// Remove `virtual` and add a raise method after the declaration.
    ExtractRaiseMethod,
}

impl FixKind {
    /// Both kinds, in the order they are offered.
    pub const ALL: [Self; 2] = [Self::RemoveModifier, Self::ExtractRaiseMethod];
}

/// Declaration a fix applies to, identified by position so it survives re-parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclarationTarget {
    /// Start of the declaration node.
    pub start: TextSize,
    /// `EventFieldDeclaration` or `EventDeclaration`.
    pub node_kind: SyntaxKind,
}

impl DeclarationTarget {
    fn locate<'t>(&self, tree: &'t SyntaxTree) -> Result<&'t SyntaxNode, FixError> {
        tree.find_ancestor(self.start, |node| {
            node.kind() == self.node_kind && node.text_range().start() == self.start
        })
        .ok_or(FixError::DeclarationNotFound {
            offset: self.start.into(),
        })
    }
}

/// A computed rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fix {
    /// Delete the `virtual` token.
    RemoveModifier {
        /// Declaration to edit.
        target: DeclarationTarget,
    },
    /// Insert `method` after the declaration, then delete the `virtual` token.
    ExtractRaiseMethod {
        /// Declaration to edit.
        target: DeclarationTarget,
        /// Method to insert.
        method: RaiseMethod,
    },
}

/// A titled fix, ready to be applied to the tree it was computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeAction {
    /// Title shown to the user.
    pub title: String,
    /// The rewrite.
    pub fix: Fix,
}

impl CodeAction {
    /// Which rewrite this action performs.
    #[must_use]
    pub fn kind(&self) -> FixKind {
        match self.fix {
            Fix::RemoveModifier { .. } => FixKind::RemoveModifier,
            Fix::ExtractRaiseMethod { .. } => FixKind::ExtractRaiseMethod,
        }
    }

    /// Applies the action, producing a new tree. `tree` is left untouched.
    ///
    /// # Errors
    /// Fails if the declaration is no longer found or an edit cannot be applied.
    pub fn apply(&self, tree: &SyntaxTree) -> Result<SyntaxTree, FixError> {
        match &self.fix {
            Fix::RemoveModifier { target } => {
                let node = target.locate(tree)?;
                remove_modifier(tree, node, SyntaxKind::VirtualKw)
            }
            Fix::ExtractRaiseMethod { target, method } => {
                let node = target.locate(tree)?;
                let insertion = insertion_point(tree, node);
                let newline = tree.newline();
                let text = format!(
                    "{newline}{newline}{}",
                    method.render(tree.line_indent(target.start), newline)
                );
                let intermediate = tree.with_edits([Edit::insert(insertion, text)])?;

                // Node handles from `tree` are stale now.
                let node = target.locate(&intermediate)?;
                remove_modifier(&intermediate, node, SyntaxKind::VirtualKw)
            }
        }
    }
}

/// End of the declaration, or end of its line when only a `//` comment follows.
fn insertion_point(tree: &SyntaxTree, node: &SyntaxNode) -> usize {
    let end = usize::from(node.text_range().end());
    let source = tree.source();
    let line_end = source[end..].find('\n').map_or(source.len(), |i| end + i);
    let rest = &source[end..line_end];
    if rest.trim_start().starts_with("//") {
        line_end - usize::from(rest.ends_with('\r'))
    } else {
        end
    }
}

fn locate_event<'t>(
    diagnostic: &Diagnostic,
    tree: &'t SyntaxTree,
) -> Result<(DeclarationTarget, EventDeclaration<'t>), FixError> {
    let node_kind = match diagnostic.kind {
        DiagnosticKind::FieldEventOverridable => SyntaxKind::EventFieldDeclaration,
        DiagnosticKind::PropertyEventOverridable => SyntaxKind::EventDeclaration,
    };
    let offset = diagnostic.span.start();
    let not_found = FixError::DeclarationNotFound {
        offset: offset.into(),
    };
    let node = tree
        .find_ancestor(offset, |node| node.kind() == node_kind)
        .ok_or_else(|| not_found.clone())?;
    let event = match_event(node).ok_or(not_found)?;
    if !event.is_virtual() {
        return Err(FixError::ModifierMissing {
            modifier: "virtual",
        });
    }
    let target = DeclarationTarget {
        start: node.text_range().start(),
        node_kind,
    };
    Ok((target, event))
}

fn plan_raise_method(event: &EventDeclaration<'_>) -> Result<RaiseMethod, FixError> {
    let count = event.declarator_count();
    if count > 1 {
        return Err(FixError::MultipleDeclarators {
            event: event.name.clone(),
            count,
        });
    }
    let backing = resolve_backing_identifier(event)?;
    build_raise_method(&event.name, &backing, &event.element_type)
}

/// Computes one action for `diagnostic`.
///
/// # Errors
/// Fails if the diagnostic no longer points at a virtual event or the
/// requested rewrite is not computable for it.
pub fn code_action(
    diagnostic: &Diagnostic,
    tree: &SyntaxTree,
    kind: FixKind,
    messages: &MessageTable,
) -> Result<CodeAction, FixError> {
    let (target, event) = locate_event(diagnostic, tree)?;
    let action = match kind {
        FixKind::RemoveModifier => CodeAction {
            title: messages.remove_modifier_title.clone(),
            fix: Fix::RemoveModifier { target },
        },
        FixKind::ExtractRaiseMethod => CodeAction {
            title: messages.extract_raise_method_title.clone(),
            fix: Fix::ExtractRaiseMethod {
                target,
                method: plan_raise_method(&event)?,
            },
        },
    };
    Ok(action)
}

/// All actions available for `diagnostic`. Unavailable actions are omitted.
#[must_use]
pub fn list_fixes(
    diagnostic: &Diagnostic,
    tree: &SyntaxTree,
    messages: &MessageTable,
) -> Vec<CodeAction> {
    FixKind::ALL
        .into_iter()
        .filter_map(|kind| match code_action(diagnostic, tree, kind, messages) {
            Ok(action) => Some(action),
            Err(e) => {
                tracing::trace!(event = %diagnostic.event_name, ?kind, "fix withheld: {e}");
                None
            }
        })
        .collect()
}
