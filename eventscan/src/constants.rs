//! Shared constants and lazily compiled regular expressions.

use regex::Regex;
use rustc_hash::FxHashSet;
use std::sync::OnceLock;

/// Name of the project configuration file.
pub const CONFIG_FILENAME: &str = ".eventscan.toml";

/// Extension of the files the analyzer looks at.
pub const SOURCE_EXTENSION: &str = "cs";

/// Indentation unit used inside a synthesized method when the file indents with spaces.
pub const INDENT_UNIT: &str = "    ";

/// Regex for suppression comments.
///
/// Matches `// eventscan-ignore`, `// noqa` and both forms followed by
/// `: ID, ID`. The optional group captures the rule ids.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_suppression_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"(?i)//\s*(?:eventscan-ignore|noqa)\b(?::\s*([A-Za-z0-9_\-,\s]+))?")
            .expect("Invalid suppression regex pattern")
    })
}

/// Set of folders to exclude by default.
pub fn get_default_exclude_folders() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        let mut s = FxHashSet::default();
        s.insert("bin");
        s.insert("obj");
        s.insert(".git");
        s.insert(".vs");
        s.insert("packages");
        s.insert("node_modules");
        s
    })
}

pub use get_default_exclude_folders as DEFAULT_EXCLUDE_FOLDERS;
pub use get_suppression_re as SUPPRESSION_RE;
