//! Path normalization and C# file discovery.

use crate::constants::{DEFAULT_EXCLUDE_FOLDERS, SOURCE_EXTENSION};
use std::path::{Path, PathBuf};

/// Normalizes a path for display: forward slashes, no leading `./`.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use eventscan::utils::normalize_display_path;
///
/// assert_eq!(normalize_display_path(Path::new(".\\src\\Driver.cs")), "src/Driver.cs");
/// assert_eq!(normalize_display_path(Path::new("./src/Driver.cs")), "src/Driver.cs");
/// ```
#[must_use]
pub fn normalize_display_path(path: &Path) -> String {
    let s = path.to_string_lossy();
    let clean = s.trim_start_matches(r"\\?\");
    let normalized = clean.replace('\\', "/");
    normalized
        .strip_prefix("./")
        .unwrap_or(&normalized)
        .to_owned()
}

/// Checks if a name matches any exclusion pattern.
/// Supports exact names and `*.suffix` wildcards.
#[must_use]
pub fn is_excluded(name: &str, excludes: &[String]) -> bool {
    excludes.iter().any(|exclude| match exclude.strip_prefix('*') {
        Some(suffix) if suffix.starts_with('.') => name.ends_with(suffix),
        _ => name == exclude,
    })
}

/// Collects `.cs` files below `root`, honoring `.gitignore` and the default excludes.
///
/// `include` force-includes folders that would otherwise be excluded. A `root`
/// that is itself a `.cs` file is returned as is.
///
/// Returns the files (sorted) and the number of directories visited.
#[must_use]
pub fn collect_csharp_files(
    root: &Path,
    exclude: &[String],
    include: &[String],
) -> (Vec<PathBuf>, usize) {
    use ignore::WalkBuilder;

    if root.is_file() {
        let files = if has_source_extension(root) {
            vec![root.to_path_buf()]
        } else {
            Vec::new()
        };
        return (files, 0);
    }

    let mut all_excludes: Vec<String> = exclude
        .iter()
        .cloned()
        .chain(DEFAULT_EXCLUDE_FOLDERS().iter().map(|&s| s.to_owned()))
        .collect();
    all_excludes.retain(|ex| !include.contains(ex));

    let root_for_filter = root.to_path_buf();
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .filter_entry(move |entry| {
            if entry.path() == root_for_filter {
                return true;
            }
            if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                return true;
            }
            entry
                .file_name()
                .to_str()
                .is_none_or(|name| !is_excluded(name, &all_excludes))
        })
        .build();

    let mut files = Vec::new();
    let mut dir_count = 0;
    for result in walker {
        match result {
            Ok(entry) => {
                let path = entry.path();
                if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                    if path != root {
                        dir_count += 1;
                    }
                    continue;
                }
                if has_source_extension(path) {
                    files.push(path.to_path_buf());
                }
            }
            Err(e) => tracing::warn!("walk error: {e}"),
        }
    }
    files.sort();
    (files, dir_count)
}

fn has_source_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
}
