//! File discovery, parallel analysis and suppression filtering.

use super::{AnalysisResult, EventScan, FileError};
use crate::linter::LinterVisitor;
use crate::rules::{Context, Diagnostic};
use crate::syntax::SyntaxTree;
use crate::utils::{collect_csharp_files, get_ignored_lines, is_line_suppressed};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Number of files to process per chunk in parallel processing.
const CHUNK_SIZE: usize = 500;

impl EventScan {
    /// Collects the `.cs` files below `paths`, the current directory when empty.
    ///
    /// Files named explicitly are kept even inside excluded folders. The result
    /// is sorted and free of duplicates.
    #[must_use]
    pub fn collect_files(&self, paths: &[PathBuf]) -> Vec<PathBuf> {
        let default_root = [PathBuf::from(".")];
        let roots = if paths.is_empty() {
            &default_root[..]
        } else {
            paths
        };

        let mut files: Vec<PathBuf> = roots
            .iter()
            .flat_map(|root| {
                collect_csharp_files(root, &self.exclude_folders, &self.include_folders).0
            })
            .collect();
        files.sort();
        files.dedup();
        files
    }

    /// Runs the analysis on multiple paths (files or directories).
    pub fn analyze_paths(&mut self, paths: &[PathBuf]) -> AnalysisResult {
        let files = self.collect_files(paths);
        self.total_files_analyzed = files.len();
        if let Some(pb) = &self.progress_bar {
            pb.set_length(files.len() as u64);
        }

        let mut diagnostics = Vec::new();
        let mut file_errors = Vec::new();
        let mut total_lines = 0;
        for chunk in files.chunks(CHUNK_SIZE) {
            let chunk_results: Vec<Result<(Vec<Diagnostic>, usize), FileError>> = chunk
                .par_iter()
                .map(|file| self.process_single_file(file))
                .collect();
            for result in chunk_results {
                match result {
                    Ok((mut found, lines)) => {
                        diagnostics.append(&mut found);
                        total_lines += lines;
                    }
                    Err(e) => file_errors.push(e),
                }
            }
        }

        AnalysisResult::new(diagnostics, file_errors, files.len(), total_lines)
    }

    /// Reads and analyzes one file. Returns its diagnostics and line count.
    fn process_single_file(&self, file_path: &Path) -> Result<(Vec<Diagnostic>, usize), FileError> {
        let result = match fs::read_to_string(file_path) {
            Ok(source) => {
                let tree = SyntaxTree::parse(source);
                let lines = tree.line_index().line_count();
                Ok((self.analyze_tree(&tree, file_path), lines))
            }
            Err(e) => {
                tracing::warn!("skipping {}: {e}", file_path.display());
                Err(FileError {
                    file: file_path.to_path_buf(),
                    error: format!("Failed to read file: {e}"),
                })
            }
        };
        if let Some(pb) = &self.progress_bar {
            pb.inc(1);
        }
        result
    }

    /// Analyzes a single string of code.
    #[must_use]
    pub fn analyze_code(&self, code: &str, file_path: &Path) -> Vec<Diagnostic> {
        self.analyze_tree(&SyntaxTree::parse(code), file_path)
    }

    /// Runs every rule over `tree` and drops suppressed or ignored diagnostics.
    ///
    /// Diagnostics come back in source order.
    #[must_use]
    pub fn analyze_tree(&self, tree: &SyntaxTree, file_path: &Path) -> Vec<Diagnostic> {
        let settings = &self.config.eventscan;
        let context = Context {
            filename: file_path,
            line_index: tree.line_index(),
            messages: &settings.messages,
        };
        let mut visitor = LinterVisitor::new(&self.rules, context);
        visitor.visit_node(tree.root());

        let ignored_lines = get_ignored_lines(tree.source());
        let mut diagnostics: Vec<Diagnostic> = visitor
            .diagnostics
            .into_iter()
            .filter(|d| !is_line_suppressed(&ignored_lines, d.line, &d.rule_id))
            .filter(|d| !settings.is_ignored(&d.rule_id))
            .collect();
        diagnostics.sort_by_key(|d| d.span.start());
        diagnostics
    }
}
