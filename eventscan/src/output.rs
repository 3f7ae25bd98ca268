use crate::analyzer::{AnalysisResult, FileError, FixReport};
use crate::rules::{Diagnostic, Rule};
use crate::utils::normalize_display_path;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::Write;
use std::time::Duration;

/// Print the exclusion list in styled format.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_exclusion_list(writer: &mut impl Write, folders: &[String]) -> std::io::Result<()> {
    if folders.is_empty() {
        let defaults = crate::constants::DEFAULT_EXCLUDE_FOLDERS();
        let mut sorted_defaults: Vec<&str> = defaults.iter().copied().collect();
        sorted_defaults.sort_unstable();
        writeln!(
            writer,
            "{} {}",
            "[OK] Using default exclusions only:".green(),
            sorted_defaults.join(", ").dimmed()
        )?;
    } else {
        writeln!(writer, "{} {}", "Excluding:".yellow().bold(), folders.join(", "))?;
    }
    Ok(())
}

/// Create a progress bar for a run over `total_files` files.
///
/// In test mode, returns a hidden progress bar to avoid polluting test output.
#[must_use]
pub fn create_progress_bar(total_files: u64) -> ProgressBar {
    if cfg!(test) {
        return ProgressBar::hidden();
    }

    let pb =
        ProgressBar::with_draw_target(Some(total_files), ProgressDrawTarget::stderr_with_hz(20));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );
    pb.set_message("scanning events...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print the main header with box-drawing characters.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_header(writer: &mut impl Write) -> std::io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", "╔════════════════════════════════════════╗".cyan())?;
    writeln!(writer, "{}", "║  Virtual Event Analysis Results        ║".cyan().bold())?;
    writeln!(writer, "{}", "╚════════════════════════════════════════╝".cyan())?;
    writeln!(writer)?;
    Ok(())
}

/// Print summary with colored "pills".
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_summary_pills(writer: &mut impl Write, result: &AnalysisResult) -> std::io::Result<()> {
    fn pill(label: &str, count: usize) -> String {
        if count == 0 {
            format!("{}: {}", label, count.to_string().green())
        } else {
            format!("{}: {}", label, count.to_string().red().bold())
        }
    }

    let summary = &result.analysis_summary;
    writeln!(
        writer,
        "{}  {}  {}",
        pill("Virtual field events", summary.field_events_count),
        pill("Virtual accessor events", summary.property_events_count),
        pill("Unreadable files", summary.file_errors_count),
    )?;
    writeln!(
        writer,
        "{}",
        format!(
            "Analyzed {} files ({} lines)",
            summary.total_files, summary.total_lines_analyzed
        )
        .dimmed()
    )?;
    Ok(())
}

/// Helper to create a styled table
fn create_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);
    table
}

/// Print the diagnostics as a table.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_diagnostics(
    writer: &mut impl Write,
    title: &str,
    diagnostics: &[Diagnostic],
) -> std::io::Result<()> {
    if diagnostics.is_empty() {
        return Ok(());
    }

    writeln!(writer, "\n{}", title.bold().underline())?;

    let mut table = create_table(vec!["Rule ID", "Message", "Location", "Severity"]);
    for d in diagnostics {
        let location = format!("{}:{}:{}", normalize_display_path(&d.file), d.line, d.col);
        table.add_row(vec![
            Cell::new(&d.rule_id).add_attribute(Attribute::Dim),
            Cell::new(&d.message).add_attribute(Attribute::Bold),
            Cell::new(location),
            Cell::new(d.severity).fg(Color::Yellow),
        ]);
    }

    writeln!(writer, "{table}")?;
    Ok(())
}

/// Print files that could not be processed.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_file_errors(writer: &mut impl Write, errors: &[FileError]) -> std::io::Result<()> {
    if errors.is_empty() {
        return Ok(());
    }

    writeln!(writer, "\n{}", "File Errors".bold().underline().red())?;

    let mut table = create_table(vec!["File", "Error"]);
    for e in errors {
        table.add_row(vec![
            Cell::new(normalize_display_path(&e.file)).add_attribute(Attribute::Bold),
            Cell::new(&e.error).fg(Color::Red),
        ]);
    }

    writeln!(writer, "{table}")?;
    Ok(())
}

/// Print the full report: header, diagnostics and file errors.
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
pub fn print_report(writer: &mut impl Write, result: &AnalysisResult) -> std::io::Result<()> {
    print_header(writer)?;

    if result.diagnostics.is_empty() && result.file_errors.is_empty() {
        writeln!(writer, "{}", "✓ All clean! No virtual events found.".green())?;
        return Ok(());
    }

    print_diagnostics(writer, "Virtual Events", &result.diagnostics)?;
    print_file_errors(writer, &result.file_errors)?;
    Ok(())
}

/// Print a quiet report (no detailed tables) for CI/CD mode.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_report_quiet(writer: &mut impl Write, result: &AnalysisResult) -> std::io::Result<()> {
    let summary = &result.analysis_summary;
    writeln!(
        writer,
        "[SUMMARY] {} virtual events in {} files, {} unreadable files",
        summary.findings_count, summary.total_files, summary.file_errors_count
    )?;
    Ok(())
}

/// Print what a fix-all run changed or would change.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_fix_report(writer: &mut impl Write, report: &FixReport) -> std::io::Result<()> {
    let verb = if report.dry_run { "Would fix" } else { "Fixed" };
    for fix in &report.applied {
        writeln!(
            writer,
            "{} {}:{} {} ({})",
            verb.green().bold(),
            normalize_display_path(&fix.file),
            fix.line,
            fix.event_name.bold(),
            fix.title.dimmed()
        )?;
    }
    for skip in &report.skipped {
        writeln!(
            writer,
            "{} {}:{} {}: {}",
            "Skipped".yellow().bold(),
            normalize_display_path(&skip.file),
            skip.line,
            skip.event_name.bold(),
            skip.reason
        )?;
    }
    print_file_errors(writer, &report.file_errors)?;
    writeln!(
        writer,
        "\n[SUMMARY] {} fixes in {} files, {} skipped{}",
        report.applied.len(),
        report.files_changed.len(),
        report.skipped.len(),
        if report.dry_run { " (dry run)" } else { "" }
    )?;
    Ok(())
}

/// Print the rules and the diagnostics each one reports.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_rules(
    writer: &mut impl Write,
    rules: &[Box<dyn Rule>],
    title: &str,
) -> std::io::Result<()> {
    let mut table = create_table(vec!["Rule ID", "Category", "Rule", "Title"]);
    for rule in rules {
        for meta in rule.supported_diagnostics() {
            table.add_row(vec![
                Cell::new(meta.id).add_attribute(Attribute::Bold),
                Cell::new(meta.category),
                Cell::new(rule.name()),
                Cell::new(title),
            ]);
        }
    }
    writeln!(writer, "{table}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::EventScan;
    use std::path::Path;

    fn report_for(source: &str) -> AnalysisResult {
        let diagnostics = EventScan::default().analyze_code(source, Path::new("src/Driver.cs"));
        AnalysisResult::new(diagnostics, Vec::new(), 1, source.lines().count())
    }

    #[test]
    fn test_print_report_lists_location() {
        colored::control::set_override(false);
        let result = report_for("class D\n{\n    public virtual event Action OnA;\n}\n");
        let mut buffer = Vec::new();
        print_report(&mut buffer, &result).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("src/Driver.cs:3:33"));
        assert!(text.contains("EVS-V001"));
        assert!(text.contains("Event 'OnA' should not be virtual"));
    }

    #[test]
    fn test_print_report_clean() {
        colored::control::set_override(false);
        let result = report_for("class D { public event Action OnA; }");
        let mut buffer = Vec::new();
        print_report(&mut buffer, &result).unwrap();
        assert!(String::from_utf8(buffer).unwrap().contains("All clean"));
    }

    #[test]
    fn test_print_rules_lists_both_ids() {
        let mut buffer = Vec::new();
        print_rules(&mut buffer, EventScan::default().rules(), "Declare only non-virtual events")
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("EVS-V001") && text.contains("EVS-V002"));
    }
}
