//! Helpers shared by the analyzer and the CLI.

mod paths;

pub use paths::{collect_csharp_files, is_excluded, normalize_display_path};

use crate::constants::DEFAULT_EXCLUDE_FOLDERS;
use rustc_hash::{FxHashMap, FxHashSet};
use text_size::TextSize;

/// Converts byte offsets to 1-based line and column numbers.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset of the start of each line.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Scans `source` for line breaks.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// 1-based line containing `offset`.
    #[must_use]
    pub fn line_index(&self, offset: TextSize) -> usize {
        let offset = usize::from(offset);
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(line) => line,
        }
    }

    /// 1-based byte column of `offset` within its line.
    #[must_use]
    pub fn column_index(&self, offset: TextSize) -> usize {
        let line = self.line_index(offset);
        usize::from(offset) - self.line_starts[line - 1] + 1
    }

    /// Number of lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

/// Suppression specification of one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suppression {
    /// Suppress all findings.
    All,
    /// Suppress findings for specific rule ids.
    Specific(FxHashSet<String>),
}

/// Detects a suppression comment on a line.
///
/// - `// eventscan-ignore` or `// noqa` suppress everything
/// - `// noqa: EVS-V001, EVS-V002` suppress the listed ids
#[must_use]
pub fn get_line_suppression(line: &str) -> Option<Suppression> {
    let caps = crate::constants::SUPPRESSION_RE().captures(line)?;
    let Some(codes) = caps.get(1) else {
        return Some(Suppression::All);
    };
    let mut specific = FxHashSet::default();
    for code in codes.as_str().split(',').map(str::trim) {
        let code = code.to_uppercase();
        if code == "EVS" {
            return Some(Suppression::All);
        }
        if !code.is_empty() {
            specific.insert(code);
        }
    }
    if specific.is_empty() {
        Some(Suppression::All)
    } else {
        Some(Suppression::Specific(specific))
    }
}

/// Maps 1-based line numbers to their suppression spec.
#[must_use]
pub fn get_ignored_lines(source: &str) -> FxHashMap<usize, Suppression> {
    source
        .lines()
        .enumerate()
        .filter_map(|(i, line)| get_line_suppression(line).map(|s| (i + 1, s)))
        .collect()
}

/// Returns true if findings of `rule_id` on `line` should be dropped.
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn is_line_suppressed(
    ignored_lines: &FxHashMap<usize, Suppression>,
    line: usize,
    rule_id: &str,
) -> bool {
    match ignored_lines.get(&line) {
        Some(Suppression::All) => true,
        Some(Suppression::Specific(rules)) => rules.contains(rule_id),
        None => false,
    }
}

/// Combines the default excluded folders with user excludes, minus force-included folders.
#[must_use]
pub fn parse_exclude_folders(
    user_exclude_folders: &[String],
    use_defaults: bool,
    include_folders: &[String],
) -> Vec<String> {
    let mut folders: Vec<String> = Vec::new();
    if use_defaults {
        let mut defaults: Vec<&str> = DEFAULT_EXCLUDE_FOLDERS().iter().copied().collect();
        defaults.sort_unstable();
        folders.extend(defaults.into_iter().map(str::to_owned));
    }
    for folder in user_exclude_folders {
        if !folders.contains(folder) {
            folders.push(folder.clone());
        }
    }
    folders.retain(|folder| !include_folders.contains(folder));
    folders
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_and_column() {
        let index = LineIndex::new("ab\ncd\n\nef");
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.line_index(TextSize::from(0)), 1);
        assert_eq!(index.line_index(TextSize::from(3)), 2);
        assert_eq!(index.column_index(TextSize::from(4)), 2);
        assert_eq!(index.line_index(TextSize::from(7)), 4);
        assert_eq!(index.column_index(TextSize::from(7)), 1);
    }

    #[test]
    fn test_suppression_forms() {
        assert_eq!(
            get_line_suppression("public virtual event Action E; // eventscan-ignore"),
            Some(Suppression::All)
        );
        assert_eq!(get_line_suppression("x; // NOQA"), Some(Suppression::All));
        let Some(Suppression::Specific(ids)) =
            get_line_suppression("x; // noqa: evs-v001, EVS-V002")
        else {
            panic!("expected specific suppression");
        };
        assert!(ids.contains("EVS-V001"));
        assert!(ids.contains("EVS-V002"));
        assert_eq!(get_line_suppression("x; // noqa: EVS"), Some(Suppression::All));
        assert_eq!(get_line_suppression("var noqa = 1;"), None);
    }

    #[test]
    fn test_is_line_suppressed() {
        let lines = get_ignored_lines("a\nb // noqa: EVS-V002\nc // eventscan-ignore\n");
        assert!(!is_line_suppressed(&lines, 1, "EVS-V001"));
        assert!(is_line_suppressed(&lines, 2, "EVS-V002"));
        assert!(!is_line_suppressed(&lines, 2, "EVS-V001"));
        assert!(is_line_suppressed(&lines, 3, "EVS-V001"));
    }

    #[test]
    fn test_parse_exclude_folders() {
        let folders = parse_exclude_folders(&["generated".to_owned()], true, &["bin".to_owned()]);
        assert!(folders.contains(&"obj".to_owned()));
        assert!(folders.contains(&"generated".to_owned()));
        assert!(!folders.contains(&"bin".to_owned()));
        assert_eq!(
            parse_exclude_folders(&["a".to_owned()], false, &[]),
            vec!["a".to_owned()]
        );
    }
}
