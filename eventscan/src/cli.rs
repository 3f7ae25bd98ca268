use crate::fix::FixKind;
use clap::{Args, Parser, ValueEnum};
use std::path::PathBuf;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.eventscan.toml):
  Create this file in your project root to set defaults.

  [eventscan]
  exclude_folders = [\"generated\", \"third_party\"]
  include_folders = [\"obj\"]      # Force-include these
  ignore = [\"EVS-V002\"]          # Rule ids to drop
  fail_on_findings = true        # Exit 1 if any finding remains

  [eventscan.messages]
  message_format = \"Event '{0}' should not be virtual\"

SUPPRESSION:
  // eventscan-ignore            on the flagged line drops every finding
  // noqa: EVS-V001              drops the listed rule ids only
";

/// Rewrite applied by `--fix`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixMode {
    /// Remove the `virtual` keyword.
    RemoveModifier,
    /// Remove `virtual` and add a `protected virtual Raise<Name>` method.
    ExtractRaiseMethod,
}

impl From<FixMode> for FixKind {
    fn from(mode: FixMode) -> Self {
        match mode {
            FixMode::RemoveModifier => FixKind::RemoveModifier,
            FixMode::ExtractRaiseMethod => FixKind::ExtractRaiseMethod,
        }
    }
}

/// Options for output formatting and verbosity.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are legitimately booleans
pub struct OutputOptions {
    /// Output raw JSON.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output for debugging (shows files being analyzed).
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode: show only the summary (no detailed tables).
    #[arg(short, long)]
    pub quiet: bool,

    /// Exit with code 1 if any finding remains.
    #[arg(long)]
    pub fail_on_findings: bool,
}

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "eventscan - Finds virtual events in C# code and rewrites them",
    long_about = None,
    after_help = CONFIG_HELP
)]
pub struct Cli {
    /// Paths to analyze (files or directories).
    /// When no paths are provided, defaults to the current directory.
    pub paths: Vec<PathBuf>,

    /// Output formatting options.
    #[command(flatten)]
    pub output: OutputOptions,

    /// Rewrite every finding with the given fix.
    #[arg(long, value_enum)]
    pub fix: Option<FixMode>,

    /// Show what --fix would change without writing files.
    #[arg(long, requires = "fix")]
    pub dry_run: bool,

    /// Folders to exclude from analysis.
    #[arg(long, alias = "exclude-folder")]
    pub exclude_folders: Vec<String>,

    /// Folders to force-include in analysis (overrides default exclusions).
    #[arg(long, alias = "include-folder")]
    pub include_folders: Vec<String>,

    /// Print the rules and their diagnostic ids, then exit.
    #[arg(long)]
    pub list_rules: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fix_mode() {
        let cli = Cli::try_parse_from(["eventscan", "--fix", "extract-raise-method", "src"]).unwrap();
        assert_eq!(cli.fix, Some(FixMode::ExtractRaiseMethod));
        assert_eq!(cli.paths, vec![PathBuf::from("src")]);
        assert_eq!(FixKind::from(FixMode::RemoveModifier), FixKind::RemoveModifier);
    }

    #[test]
    fn test_dry_run_requires_fix() {
        assert!(Cli::try_parse_from(["eventscan", "--dry-run"]).is_err());
    }

    #[test]
    fn test_exclude_folder_alias() {
        let cli = Cli::try_parse_from(["eventscan", "--exclude-folder", "gen", "--exclude-folders", "out"])
            .unwrap();
        assert_eq!(cli.exclude_folders, vec!["gen", "out"]);
    }
}
