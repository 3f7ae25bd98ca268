//! Analyzer module.
//!
//! This module contains the analysis host, broken down into:
//! - `types`: Result types (`AnalysisResult`, `FixReport`, `FileError`)
//! - `processing`: File discovery, parallel analysis and suppression filtering
//! - `fix_all`: Sequential per-file application of code actions
//! - Core `EventScan` struct and its builder methods

mod fix_all;
mod processing;
/// Result types and analysis summaries.
pub mod types;

pub use types::{
    AnalysisResult, AnalysisSummary, AppliedFix, FileError, FixOutcome, FixReport, SkippedFix,
};

use crate::config::Config;
use crate::rules::{get_rules, Rule};
use std::sync::Arc;

/// The main analyzer struct.
/// Configuration options for the analysis are stored here.
pub struct EventScan {
    /// Folders to exclude from analysis.
    pub exclude_folders: Vec<String>,
    /// Folders to force-include in analysis (overrides default exclusions).
    pub include_folders: Vec<String>,
    /// Total number of files analyzed by the last run.
    pub total_files_analyzed: usize,
    /// Configuration object.
    pub config: Config,
    /// Progress bar ticked once per file (thread-safe).
    pub progress_bar: Option<Arc<indicatif::ProgressBar>>,
    rules: Vec<Box<dyn Rule>>,
}

impl Default for EventScan {
    fn default() -> Self {
        Self {
            exclude_folders: Vec::new(),
            include_folders: Vec::new(),
            total_files_analyzed: 0,
            config: Config::default(),
            progress_bar: None,
            rules: get_rules(),
        }
    }
}

impl EventScan {
    /// Creates an analyzer with the given configuration and all shipped rules.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::default().with_config(config)
    }

    /// Builder-style method to set excluded folders.
    #[must_use]
    pub fn with_excludes(mut self, folders: Vec<String>) -> Self {
        self.exclude_folders = folders;
        self
    }

    /// Builder-style method to set included folders.
    #[must_use]
    pub fn with_includes(mut self, folders: Vec<String>) -> Self {
        self.include_folders = folders;
        self
    }

    /// Builder-style method to set config.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Builder-style method to attach a progress bar.
    #[must_use]
    pub fn with_progress_bar(mut self, progress_bar: Arc<indicatif::ProgressBar>) -> Self {
        self.progress_bar = Some(progress_bar);
        self
    }

    /// Rules run by this analyzer.
    #[must_use]
    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }
}
