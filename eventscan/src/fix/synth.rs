//! Builds the `Raise<Name>` method that replaces overriding a virtual event.

use super::FixError;
use crate::constants::INDENT_UNIT;
use crate::event::ElementType;
use compact_str::{format_compact, CompactString};

/// A synthesized raise method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaiseMethod {
    /// Method name, `Raise` + event name without a leading `On`.
    pub name: CompactString,
    /// Storage invoked by the method body.
    pub backing: CompactString,
    /// Parameter and return type.
    pub argument_type: CompactString,
}

/// `Raise` + `event_name`, with one literal leading `On` removed.
#[must_use]
pub fn raise_method_name(event_name: &str) -> CompactString {
    let base = event_name.strip_prefix("On").unwrap_or(event_name);
    format_compact!("Raise{base}")
}

/// Builds the raise method for an event.
///
/// # Errors
/// Fails with [`FixError::UnsupportedElementType`] unless the element type is a
/// generic with exactly one type argument.
pub fn build_raise_method(
    event_name: &str,
    backing: &str,
    element_type: &ElementType,
) -> Result<RaiseMethod, FixError> {
    let argument = element_type
        .generic_argument()
        .ok_or_else(|| FixError::UnsupportedElementType {
            event: event_name.into(),
            element_type: match element_type {
                ElementType::Generic { name, .. } => name.clone(),
                ElementType::Other { text } => text.clone(),
            },
        })?;
    Ok(RaiseMethod {
        name: raise_method_name(event_name),
        backing: backing.into(),
        argument_type: argument.into(),
    })
}

impl RaiseMethod {
    /// Renders the method, every line prefixed with `indent`.
    ///
    /// Body statements get one more level: a tab if `indent` uses tabs,
    /// four spaces otherwise.
    #[must_use]
    pub fn render(&self, indent: &str, newline: &str) -> String {
        let unit = if indent.starts_with('\t') { "\t" } else { INDENT_UNIT };
        let Self {
            name,
            backing,
            argument_type,
        } = self;
        [
            format!("{indent}protected virtual {argument_type} {name}({argument_type} args)"),
            format!("{indent}{{"),
            format!("{indent}{unit}{backing}?.Invoke(this, args);"),
            format!("{indent}{unit}return args;"),
            format!("{indent}}}"),
        ]
        .join(newline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generic(argument: &str) -> ElementType {
        ElementType::Generic {
            name: "EventHandler".into(),
            argument: argument.into(),
        }
    }

    #[test]
    fn test_on_prefix_is_stripped_once() {
        assert_eq!(raise_method_name("OnVirtualEvent"), "RaiseVirtualEvent");
        assert_eq!(raise_method_name("OnOnClick"), "RaiseOnClick");
        assert_eq!(raise_method_name("Changed"), "RaiseChanged");
        assert_eq!(raise_method_name("ButtonOnClick"), "RaiseButtonOnClick");
        assert_eq!(raise_method_name("Onset"), "Raiseset");
    }

    #[test]
    fn test_render_with_spaces() {
        let method = build_raise_method("OnVirtualEvent", "OnVirtualEvent", &generic("EventArgs"))
            .unwrap();
        assert_eq!(
            method.render("        ", "\n"),
            "        protected virtual EventArgs RaiseVirtualEvent(EventArgs args)\n        {\n            OnVirtualEvent?.Invoke(this, args);\n            return args;\n        }"
        );
    }

    #[test]
    fn test_render_with_tabs_and_crlf() {
        let method = build_raise_method("Changed", "changed", &generic("ChangedArgs")).unwrap();
        assert_eq!(
            method.render("\t", "\r\n"),
            "\tprotected virtual ChangedArgs RaiseChanged(ChangedArgs args)\r\n\t{\r\n\t\tchanged?.Invoke(this, args);\r\n\t\treturn args;\r\n\t}"
        );
    }

    #[test]
    fn test_non_generic_element_type() {
        let err = build_raise_method(
            "Changed",
            "Changed",
            &ElementType::Other {
                text: "Action".into(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, FixError::UnsupportedElementType { .. }));
    }
}
