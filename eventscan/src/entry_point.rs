use crate::analyzer::EventScan;
use crate::cli::Cli;
use crate::config::Config;
use crate::fix::FixKind;
use crate::rules::RuleMetadata;
use crate::utils::parse_exclude_folders;
use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Exit code when findings remain and failing on findings is enabled.
const EXIT_FINDINGS: i32 = 1;
/// Exit code for invalid arguments.
const EXIT_USAGE: i32 = 2;

/// Installs the stderr `tracing` subscriber. `RUST_LOG` applies unless `verbose` is set.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("eventscan=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // A second call in the same process keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Run eventscan with the given arguments, writing output to stdout.
///
/// # Errors
///
/// Returns an error if writing the output fails.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Run eventscan with the given arguments, writing output to the specified writer.
///
/// This is the testable version of `run_with_args` that allows output capture.
///
/// # Errors
///
/// Returns an error if writing the output fails.
pub fn run_with_args_to<W: std::io::Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["eventscan".to_owned()];
    program_args.extend(args);
    let cli_var = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                write!(writer, "{e}")?;
                writer.flush()?;
                return Ok(0);
            }
            _ => {
                eprint!("{e}");
                return Ok(EXIT_USAGE);
            }
        },
    };
    init_tracing(cli_var.output.verbose);

    if let Some(missing) = cli_var.paths.iter().find(|p| !p.exists()) {
        eprintln!(
            "Error: The file or directory '{}' does not exist.",
            missing.display()
        );
        return Ok(EXIT_USAGE);
    }

    // Load config from the first path or current directory
    let config_path = cli_var.paths.first().map_or(Path::new("."), PathBuf::as_path);
    let config = Config::load_from_path(config_path);
    let json = cli_var.output.json;

    let mut exclude_folders = config.eventscan.exclude_folders.clone().unwrap_or_default();
    exclude_folders.extend(cli_var.exclude_folders);
    let mut include_folders = config.eventscan.include_folders.clone().unwrap_or_default();
    include_folders.extend(cli_var.include_folders);
    let fail_on_findings =
        cli_var.output.fail_on_findings || config.eventscan.fail_on_findings.unwrap_or(false);

    if cli_var.output.verbose && !json {
        eprintln!("[VERBOSE] eventscan v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("[VERBOSE] Using {} threads", rayon::current_num_threads());
        if let Some(path) = &config.config_file_path {
            eprintln!("[VERBOSE] Config: {}", path.display());
        }
        eprintln!("[VERBOSE] Paths: {:?}", cli_var.paths);
        eprintln!(
            "[VERBOSE] Excluded folders: {:?}",
            parse_exclude_folders(&exclude_folders, true, &include_folders)
        );
        eprintln!();
    }

    let mut analyzer = EventScan::new(config)
        .with_excludes(exclude_folders)
        .with_includes(include_folders);

    if cli_var.list_rules {
        if json {
            let rules: Vec<&RuleMetadata> = analyzer
                .rules()
                .iter()
                .flat_map(|rule| rule.supported_diagnostics())
                .collect();
            writeln!(writer, "{}", serde_json::to_string_pretty(&rules)?)?;
        } else {
            let title = analyzer.config.eventscan.messages.title.clone();
            crate::output::print_rules(writer, analyzer.rules(), &title)?;
        }
        return Ok(0);
    }

    if let Some(mode) = cli_var.fix {
        let report = analyzer.fix_paths(&cli_var.paths, FixKind::from(mode), cli_var.dry_run);
        if json {
            writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
        } else {
            crate::output::print_fix_report(writer, &report)?;
        }
        let remaining = report.skipped.len() + if report.dry_run { report.applied.len() } else { 0 };
        return Ok(if fail_on_findings && remaining > 0 {
            EXIT_FINDINGS
        } else {
            0
        });
    }

    if !json && !cli_var.output.quiet {
        crate::output::print_exclusion_list(writer, &analyzer.exclude_folders).ok();
    }
    let progress = if json || cli_var.output.quiet {
        None
    } else {
        let pb = Arc::new(crate::output::create_progress_bar(0));
        analyzer = analyzer.with_progress_bar(Arc::clone(&pb));
        Some(pb)
    };

    let start_time = std::time::Instant::now();
    let result = analyzer.analyze_paths(&cli_var.paths);
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    if cli_var.output.verbose && !json {
        eprintln!(
            "[VERBOSE] Analysis completed in {:.2}s",
            start_time.elapsed().as_secs_f64()
        );
    }

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&result)?)?;
    } else if cli_var.output.quiet {
        crate::output::print_report_quiet(writer, &result)?;
    } else {
        crate::output::print_report(writer, &result)?;
        writeln!(writer)?;
        crate::output::print_summary_pills(writer, &result)?;
    }

    if fail_on_findings && !result.diagnostics.is_empty() {
        if !json {
            eprintln!(
                "[GATE] {} virtual events found - FAILED",
                result.diagnostics.len()
            );
        }
        return Ok(EXIT_FINDINGS);
    }
    Ok(0)
}
