use crate::messages::MessageTable;
use crate::syntax::SyntaxNode;
use crate::utils::LineIndex;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use text_size::TextRange;

#[derive(Debug, Clone, Copy)]
/// Context passed to rules during analysis.
pub struct Context<'a> {
    /// Path of the file being analyzed.
    pub filename: &'a Path,
    /// Line index of the file, for line/column mapping.
    pub line_index: &'a LineIndex,
    /// Message table used to format diagnostics.
    pub messages: &'a MessageTable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
/// The two diagnostics reported for virtual events.
pub enum DiagnosticKind {
    /// A virtual field-like event. Reported at the declarator name.
    FieldEventOverridable,
    /// A virtual accessor-like event. Reported at the event identifier.
    PropertyEventOverridable,
}

impl DiagnosticKind {
    /// Rule id of this kind.
    #[must_use]
    pub const fn rule_id(self) -> &'static str {
        match self {
            Self::FieldEventOverridable => ids::RULE_ID_VIRTUAL_FIELD_EVENT,
            Self::PropertyEventOverridable => ids::RULE_ID_VIRTUAL_PROPERTY_EVENT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
/// Severity of a diagnostic.
pub enum Severity {
    /// Reported, never blocks on its own.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
/// A single issue found by a rule.
pub struct Diagnostic {
    /// Id of the rule that triggered the diagnostic.
    pub rule_id: String,
    /// Which diagnostic this is.
    pub kind: DiagnosticKind,
    /// Category of the rule.
    pub category: String,
    /// Severity level.
    pub severity: Severity,
    /// Formatted message, mentions the event name.
    pub message: String,
    /// Name of the flagged event.
    pub event_name: String,
    /// File where the issue was found.
    pub file: PathBuf,
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub col: usize,
    /// Byte range of the reported name.
    #[serde(skip)]
    pub span: TextRange,
}

#[derive(Debug, Clone, Copy, Serialize)]
/// Metadata of one diagnostic a rule can report.
pub struct RuleMetadata {
    /// Unique id of the diagnostic.
    pub id: &'static str,
    /// Category of the rule.
    pub category: &'static str,
    /// Diagnostic kind reported under this id.
    pub kind: DiagnosticKind,
}

/// Trait defining a rule.
///
/// Rules hold no mutable state. The host dispatches every event member node to
/// [`Rule::check_member`], possibly from several threads at once.
pub trait Rule: Send + Sync {
    /// Returns the descriptive name of the rule.
    fn name(&self) -> &'static str;
    /// Returns every diagnostic this rule may report.
    fn supported_diagnostics(&self) -> &'static [RuleMetadata];
    /// Called for every event member node.
    fn check_member(&self, node: &SyntaxNode, context: &Context<'_>) -> Option<Vec<Diagnostic>>;
}

/// Returns all rules shipped with the crate.
#[must_use]
pub fn get_rules() -> Vec<Box<dyn Rule>> {
    vec![Box::new(virtual_event::VirtualEventRule)]
}

/// Module containing rule id constants.
pub mod ids;
/// Module containing the virtual event rule.
pub mod virtual_event;
