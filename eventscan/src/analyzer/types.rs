//! Type definitions for analysis and fix results.

use crate::rules::{Diagnostic, DiagnosticKind};
use serde::Serialize;
use std::path::PathBuf;

/// A file that could not be read, parsed or written.
#[derive(Debug, Serialize, Clone)]
pub struct FileError {
    /// The file where the error occurred.
    pub file: PathBuf,
    /// The error message.
    pub error: String,
}

/// Holds the results of the analysis.
/// This struct is serialized to JSON if requested.
#[derive(Debug, Serialize)]
pub struct AnalysisResult {
    /// Virtual events found, ordered by file then position.
    pub diagnostics: Vec<Diagnostic>,
    /// Files that could not be analyzed.
    pub file_errors: Vec<FileError>,
    /// Summary statistics of the analysis.
    pub analysis_summary: AnalysisSummary,
}

impl AnalysisResult {
    /// Builds the summary from the collected diagnostics.
    #[must_use]
    pub fn new(
        diagnostics: Vec<Diagnostic>,
        file_errors: Vec<FileError>,
        total_files: usize,
        total_lines_analyzed: usize,
    ) -> Self {
        let field_events = diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::FieldEventOverridable)
            .count();
        let analysis_summary = AnalysisSummary {
            total_files,
            total_lines_analyzed,
            findings_count: diagnostics.len(),
            field_events_count: field_events,
            property_events_count: diagnostics.len() - field_events,
            file_errors_count: file_errors.len(),
        };
        Self {
            diagnostics,
            file_errors,
            analysis_summary,
        }
    }
}

/// Summary statistics for the analysis result.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisSummary {
    /// Total number of files scanned.
    pub total_files: usize,
    /// Total number of lines analyzed.
    pub total_lines_analyzed: usize,
    /// Total number of diagnostics.
    pub findings_count: usize,
    /// Diagnostics on field-like events.
    pub field_events_count: usize,
    /// Diagnostics on accessor-like events.
    pub property_events_count: usize,
    /// Files that could not be analyzed.
    pub file_errors_count: usize,
}

/// One fix that was applied.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct AppliedFix {
    /// File that was rewritten.
    pub file: PathBuf,
    /// Line of the diagnostic before rewriting.
    pub line: usize,
    /// Event the fix applied to.
    pub event_name: String,
    /// Title of the applied action.
    pub title: String,
}

/// A diagnostic whose requested fix could not be computed.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct SkippedFix {
    /// File of the diagnostic.
    pub file: PathBuf,
    /// Line of the diagnostic.
    pub line: usize,
    /// Event the fix was requested for.
    pub event_name: String,
    /// Why the fix was not applied.
    pub reason: String,
}

/// Result of fixing one source text.
#[derive(Debug, Clone)]
pub struct FixOutcome {
    /// Rewritten source. Equal to the input when nothing was applied.
    pub source: String,
    /// Fixes applied, last position first.
    pub applied: Vec<AppliedFix>,
    /// Diagnostics left as they were.
    pub skipped: Vec<SkippedFix>,
}

/// Result of a fix-all run over several files.
#[derive(Debug, Serialize, Default)]
pub struct FixReport {
    /// Fixes applied across all files.
    pub applied: Vec<AppliedFix>,
    /// Diagnostics whose fix was not available.
    pub skipped: Vec<SkippedFix>,
    /// Files whose content changed.
    pub files_changed: Vec<PathBuf>,
    /// Files that could not be read or written.
    pub file_errors: Vec<FileError>,
    /// Whether files were left untouched on disk.
    pub dry_run: bool,
}
