//! Flags events declared `virtual`.

use super::ids::{
    CATEGORY_DESIGN_PRACTICES, RULE_ID_VIRTUAL_FIELD_EVENT, RULE_ID_VIRTUAL_PROPERTY_EVENT,
};
use super::{Context, Diagnostic, DiagnosticKind, Rule, RuleMetadata, Severity};
use crate::event::{match_event, EventDeclaration, EventShape};
use crate::syntax::SyntaxNode;

const METADATA: &[RuleMetadata] = &[
    RuleMetadata {
        id: RULE_ID_VIRTUAL_FIELD_EVENT,
        category: CATEGORY_DESIGN_PRACTICES,
        kind: DiagnosticKind::FieldEventOverridable,
    },
    RuleMetadata {
        id: RULE_ID_VIRTUAL_PROPERTY_EVENT,
        category: CATEGORY_DESIGN_PRACTICES,
        kind: DiagnosticKind::PropertyEventOverridable,
    },
];

/// Reports one diagnostic per event member carrying `virtual`.
pub struct VirtualEventRule;

impl Rule for VirtualEventRule {
    fn name(&self) -> &'static str {
        "VirtualEventRule"
    }

    fn supported_diagnostics(&self) -> &'static [RuleMetadata] {
        METADATA
    }

    fn check_member(&self, node: &SyntaxNode, context: &Context<'_>) -> Option<Vec<Diagnostic>> {
        let event = match_event(node)?;
        if !event.is_virtual() {
            return None;
        }
        let kind = match event.shape {
            EventShape::FieldLike { .. } => DiagnosticKind::FieldEventOverridable,
            EventShape::AccessorLike { .. } => DiagnosticKind::PropertyEventOverridable,
        };
        Some(vec![create_diagnostic(&event, kind, context)])
    }
}

fn create_diagnostic(
    event: &EventDeclaration<'_>,
    kind: DiagnosticKind,
    context: &Context<'_>,
) -> Diagnostic {
    let start = event.name_range.start();
    let diagnostic = Diagnostic {
        rule_id: kind.rule_id().to_owned(),
        kind,
        category: CATEGORY_DESIGN_PRACTICES.to_owned(),
        severity: Severity::Warning,
        message: context.messages.format_message(&event.name),
        event_name: event.name.to_string(),
        file: context.filename.to_path_buf(),
        line: context.line_index.line_index(start),
        col: context.line_index.column_index(start),
        span: event.name_range,
    };
    tracing::debug!(
        rule_id = %diagnostic.rule_id,
        event = %event.name,
        line = diagnostic.line,
        "virtual event"
    );
    diagnostic
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::MessageTable;
    use crate::syntax::{SyntaxKind, SyntaxTree};
    use std::path::Path;

    fn check(source: &str) -> Vec<Diagnostic> {
        let tree = SyntaxTree::parse(source);
        let messages = MessageTable::default();
        let context = Context {
            filename: Path::new("Test0.cs"),
            line_index: tree.line_index(),
            messages: &messages,
        };
        tree.root()
            .descendants()
            .into_iter()
            .filter(|n| {
                matches!(
                    n.kind(),
                    SyntaxKind::EventFieldDeclaration | SyntaxKind::EventDeclaration
                )
            })
            .filter_map(|n| VirtualEventRule.check_member(n, &context))
            .flatten()
            .collect()
    }

    #[test]
    fn test_supported_diagnostics_have_distinct_ids() {
        let ids: Vec<_> = VirtualEventRule
            .supported_diagnostics()
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec!["EVS-V001", "EVS-V002"]);
    }

    #[test]
    fn test_field_like_location() {
        let found = check(
            "namespace VirtualEventTestCode\n{\n    public class Driver\n    {\n        public virtual event EventHandler<EventArgs> OnVirtualEvent;\n    }\n}",
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, DiagnosticKind::FieldEventOverridable);
        assert_eq!(found[0].rule_id, "EVS-V001");
        assert_eq!((found[0].line, found[0].col), (5, 54));
        assert_eq!(found[0].message, "Event 'OnVirtualEvent' should not be virtual");
        assert_eq!(found[0].severity, Severity::Warning);
    }

    #[test]
    fn test_non_virtual_events_are_clean() {
        let found = check(
            "class C {\n  public event Action A;\n  protected override event Action B;\n  public event Action C { add { c += value; } remove { c -= value; } }\n}",
        );
        assert!(found.is_empty());
    }

    #[test]
    fn test_modifier_order_does_not_matter() {
        let found = check("class C { virtual public event Action A; }");
        assert_eq!(found.len(), 1);
    }
}
