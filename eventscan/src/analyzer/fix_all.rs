//! Fix-all mode: applies one kind of code action to every diagnostic of a file.
//!
//! Diagnostics are processed from the last position to the first, so the spans
//! of the ones still pending are unaffected by the edits already made. Each
//! application maps one tree to the next.

use super::{AppliedFix, EventScan, FixOutcome, FixReport, SkippedFix};
use crate::analyzer::FileError;
use crate::fix::{code_action, FixKind};
use crate::syntax::SyntaxTree;
use std::fs;
use std::path::{Path, PathBuf};

impl EventScan {
    /// Applies `kind` to every diagnostic found in `code`.
    #[must_use]
    pub fn fix_code(&self, code: &str, file_path: &Path, kind: FixKind) -> FixOutcome {
        let mut tree = SyntaxTree::parse(code);
        let mut diagnostics = self.analyze_tree(&tree, file_path);
        diagnostics.reverse();

        let messages = &self.config.eventscan.messages;
        let mut applied = Vec::new();
        let mut skipped = Vec::new();
        for diagnostic in diagnostics {
            let result = code_action(&diagnostic, &tree, kind, messages)
                .and_then(|action| action.apply(&tree).map(|next| (action, next)));
            match result {
                Ok((action, next)) => {
                    tracing::debug!(
                        event = %diagnostic.event_name,
                        line = diagnostic.line,
                        "applied `{}`",
                        action.title
                    );
                    tree = next;
                    applied.push(AppliedFix {
                        file: file_path.to_path_buf(),
                        line: diagnostic.line,
                        event_name: diagnostic.event_name,
                        title: action.title,
                    });
                }
                Err(e) => skipped.push(SkippedFix {
                    file: file_path.to_path_buf(),
                    line: diagnostic.line,
                    event_name: diagnostic.event_name,
                    reason: e.to_string(),
                }),
            }
        }

        FixOutcome {
            source: tree.source().to_owned(),
            applied,
            skipped,
        }
    }

    /// Applies `kind` across all files below `paths`.
    ///
    /// Changed files are written back unless `dry_run` is set. Files are handled
    /// one after another.
    pub fn fix_paths(&mut self, paths: &[PathBuf], kind: FixKind, dry_run: bool) -> FixReport {
        let files = self.collect_files(paths);
        self.total_files_analyzed = files.len();

        let mut report = FixReport {
            dry_run,
            ..FixReport::default()
        };
        for file in files {
            let source = match fs::read_to_string(&file) {
                Ok(source) => source,
                Err(e) => {
                    tracing::warn!("skipping {}: {e}", file.display());
                    report.file_errors.push(FileError {
                        file,
                        error: format!("Failed to read file: {e}"),
                    });
                    continue;
                }
            };

            let mut outcome = self.fix_code(&source, &file, kind);
            report.skipped.append(&mut outcome.skipped);
            if outcome.applied.is_empty() {
                continue;
            }
            if !dry_run {
                if let Err(e) = fs::write(&file, &outcome.source) {
                    tracing::warn!("cannot write {}: {e}", file.display());
                    report.file_errors.push(FileError {
                        file,
                        error: format!("Failed to write file: {e}"),
                    });
                    continue;
                }
            }
            report.applied.append(&mut outcome.applied);
            report.files_changed.push(file);
        }
        report
    }
}
