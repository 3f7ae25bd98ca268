//! Localizable message table.
//!
//! Every user-facing string of the rule and its fixes lives here. The defaults
//! are English; `[eventscan.messages]` in the config file overrides any subset.

use serde::{Deserialize, Serialize};

/// Resource strings keyed by fixed field names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MessageTable {
    /// Short rule title.
    pub title: String,
    /// Diagnostic message. `{0}` is replaced by the event name.
    pub message_format: String,
    /// Longer rule description.
    pub description: String,
    /// Title of the modifier-only fix.
    pub remove_modifier_title: String,
    /// Title of the fix that also extracts a raise method.
    pub extract_raise_method_title: String,
}

impl Default for MessageTable {
    fn default() -> Self {
        Self {
            title: "Declare only non-virtual events".to_owned(),
            message_format: "Event '{0}' should not be virtual".to_owned(),
            description: "Virtual events invite derived classes to replace the \
                          subscription logic of the base class. Raise the event \
                          through a protected virtual method instead."
                .to_owned(),
            remove_modifier_title: "Remove virtual keyword".to_owned(),
            extract_raise_method_title: "Implement Virtual Method to Raise Event".to_owned(),
        }
    }
}

impl MessageTable {
    /// Formats the diagnostic message for `event_name`.
    #[must_use]
    pub fn format_message(&self, event_name: &str) -> String {
        self.message_format.replace("{0}", event_name)
    }
}
