//! End-to-end tests for the virtual event diagnostics and their code actions.
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use eventscan::analyzer::EventScan;
use eventscan::fix::{code_action, list_fixes, FixKind};
use eventscan::messages::MessageTable;
use eventscan::rules::{Diagnostic, DiagnosticKind, Severity};
use eventscan::syntax::SyntaxTree;
use std::path::Path;

const FIELD_LIKE: &str = r"namespace VirtualEventTestCode
{
    public class Driver
    {
        public virtual event EventHandler<EventArgs> OnVirtualEvent;
    }
}";

const ACCESSOR_LIKE: &str = r"namespace VirtualEventTestCode
{
    public class Driver
    {
        protected event EventHandler<EventArgs> eventField;

        public virtual event EventHandler<EventArgs> OnVirtualEvent
        {
            add { eventField += value; }
            remove { eventField -= value; }
        }
    }
}";

fn diagnose(source: &str) -> Vec<Diagnostic> {
    EventScan::default().analyze_code(source, Path::new("Test0.cs"))
}

fn fix(source: &str, kind: FixKind) -> String {
    let tree = SyntaxTree::parse(source);
    let diagnostics = diagnose(source);
    assert_eq!(diagnostics.len(), 1, "expected exactly one diagnostic");
    let action = code_action(&diagnostics[0], &tree, kind, &MessageTable::default())
        .expect("fix should be available");
    action.apply(&tree).unwrap().source().to_owned()
}

// =============================================================================
// Diagnostics
// =============================================================================

#[test]
fn test_empty_source_has_no_diagnostics() {
    assert!(diagnose("").is_empty());
}

#[test]
fn test_field_like_diagnostic() {
    let found = diagnose(FIELD_LIKE);
    assert_eq!(found.len(), 1);
    let d = &found[0];
    assert_eq!(d.kind, DiagnosticKind::FieldEventOverridable);
    assert_eq!(d.rule_id, "EVS-V001");
    assert_eq!(d.message, "Event 'OnVirtualEvent' should not be virtual");
    assert_eq!(d.severity, Severity::Warning);
    assert_eq!((d.line, d.col), (5, 54));
}

#[test]
fn test_accessor_like_diagnostic() {
    let found = diagnose(ACCESSOR_LIKE);
    assert_eq!(found.len(), 1);
    let d = &found[0];
    assert_eq!(d.kind, DiagnosticKind::PropertyEventOverridable);
    assert_eq!(d.rule_id, "EVS-V002");
    assert_eq!(d.message, "Event 'OnVirtualEvent' should not be virtual");
    assert_eq!((d.line, d.col), (7, 54));
}

#[test]
fn test_non_virtual_events_have_no_diagnostics_or_fixes() {
    let source = FIELD_LIKE.replace("virtual ", "");
    assert!(diagnose(&source).is_empty());
    let source = ACCESSOR_LIKE.replace("virtual ", "");
    assert!(diagnose(&source).is_empty());
}

// =============================================================================
// Code actions
// =============================================================================

#[test]
fn test_field_like_remove_modifier() {
    assert_eq!(
        fix(FIELD_LIKE, FixKind::RemoveModifier),
        r"namespace VirtualEventTestCode
{
    public class Driver
    {
        public event EventHandler<EventArgs> OnVirtualEvent;
    }
}"
    );
}

#[test]
fn test_field_like_extract_raise_method() {
    assert_eq!(
        fix(FIELD_LIKE, FixKind::ExtractRaiseMethod),
        r"namespace VirtualEventTestCode
{
    public class Driver
    {
        public event EventHandler<EventArgs> OnVirtualEvent;

        protected virtual EventArgs RaiseVirtualEvent(EventArgs args)
        {
            OnVirtualEvent?.Invoke(this, args);
            return args;
        }
    }
}"
    );
}

#[test]
fn test_accessor_like_remove_modifier() {
    assert_eq!(
        fix(ACCESSOR_LIKE, FixKind::RemoveModifier),
        r"namespace VirtualEventTestCode
{
    public class Driver
    {
        protected event EventHandler<EventArgs> eventField;

        public event EventHandler<EventArgs> OnVirtualEvent
        {
            add { eventField += value; }
            remove { eventField -= value; }
        }
    }
}"
    );
}

#[test]
fn test_accessor_like_extract_raise_method() {
    assert_eq!(
        fix(ACCESSOR_LIKE, FixKind::ExtractRaiseMethod),
        r"namespace VirtualEventTestCode
{
    public class Driver
    {
        protected event EventHandler<EventArgs> eventField;

        public event EventHandler<EventArgs> OnVirtualEvent
        {
            add { eventField += value; }
            remove { eventField -= value; }
        }

        protected virtual EventArgs RaiseVirtualEvent(EventArgs args)
        {
            eventField?.Invoke(this, args);
            return args;
        }
    }
}"
    );
}

#[test]
fn test_fixed_output_is_clean() {
    for source in [FIELD_LIKE, ACCESSOR_LIKE] {
        for kind in FixKind::ALL {
            assert!(diagnose(&fix(source, kind)).is_empty(), "{kind:?} left a diagnostic");
        }
    }
}

#[test]
fn test_list_fixes_in_offer_order() {
    let tree = SyntaxTree::parse(ACCESSOR_LIKE);
    let found = diagnose(ACCESSOR_LIKE);
    let kinds: Vec<FixKind> = list_fixes(&found[0], &tree, &MessageTable::default())
        .iter()
        .map(eventscan::fix::CodeAction::kind)
        .collect();
    assert_eq!(kinds, FixKind::ALL.to_vec());
}

#[test]
fn test_name_without_on_prefix_is_kept() {
    let source = FIELD_LIKE.replace("OnVirtualEvent", "Changed");
    let fixed = fix(&source, FixKind::ExtractRaiseMethod);
    assert!(fixed.contains("protected virtual EventArgs RaiseChanged(EventArgs args)"));
    assert!(fixed.contains("Changed?.Invoke(this, args);"));
}

#[test]
fn test_argument_type_follows_generic_argument() {
    let source = FIELD_LIKE.replace("EventHandler<EventArgs>", "System.EventHandler<ProgressEventArgs>");
    let fixed = fix(&source, FixKind::ExtractRaiseMethod);
    assert!(fixed.contains(
        "protected virtual ProgressEventArgs RaiseVirtualEvent(ProgressEventArgs args)"
    ));
}

#[test]
fn test_expression_bodied_accessor_with_this() {
    let source = r"class Driver
{
    private EventHandler<EventArgs> handlers;
    public virtual event EventHandler<EventArgs> OnTick
    {
        add => this.handlers += value;
        remove => this.handlers -= value;
    }
}";
    let fixed = fix(source, FixKind::ExtractRaiseMethod);
    assert!(fixed.contains("        handlers?.Invoke(this, args);"));
    assert!(fixed.contains("    public event EventHandler<EventArgs> OnTick\n"));
}

#[test]
fn test_crlf_and_tabs_are_preserved() {
    let source = "class Driver\r\n{\r\n\tpublic virtual event EventHandler<EventArgs> OnA;\r\n}\r\n";
    assert_eq!(
        fix(source, FixKind::ExtractRaiseMethod),
        "class Driver\r\n{\r\n\tpublic event EventHandler<EventArgs> OnA;\r\n\r\n\tprotected virtual EventArgs RaiseA(EventArgs args)\r\n\t{\r\n\t\tOnA?.Invoke(this, args);\r\n\t\treturn args;\r\n\t}\r\n}\r\n"
    );
}

#[test]
fn test_surrounding_members_are_untouched() {
    let source = r#"using System;

namespace App;

/// <summary>Driver.</summary>
[Serializable]
public sealed partial class Driver : IDisposable
{
    private readonly string name = $"{nameof(Driver)} {{ }}";

    // Raised on open.
    [field: NonSerialized]
    protected virtual event EventHandler<EventArgs> OnOpened;

    public void Dispose() { if (name != null) { OnOpened?.Invoke(this, EventArgs.Empty); } }
}
"#;
    let fixed = fix(source, FixKind::RemoveModifier);
    assert_eq!(fixed, source.replace("protected virtual event", "protected event"));
}
