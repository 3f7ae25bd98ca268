use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::CONFIG_FILENAME;
use crate::messages::MessageTable;

#[derive(Debug, Deserialize, Default, Clone)]
/// Top-level configuration struct.
pub struct Config {
    #[serde(default)]
    /// The `[eventscan]` section.
    pub eventscan: EventScanConfig,
    /// File this configuration was loaded from, `None` for defaults.
    #[serde(skip)]
    pub config_file_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone)]
/// Options of the `[eventscan]` section.
pub struct EventScanConfig {
    /// Folders to exclude in addition to the defaults.
    pub exclude_folders: Option<Vec<String>>,
    /// Folders to scan even if excluded by default.
    pub include_folders: Option<Vec<String>>,
    /// Rule ids to drop from the report.
    pub ignore: Option<Vec<String>>,
    /// Exit with status 1 when findings remain.
    pub fail_on_findings: Option<bool>,
    /// Message overrides (`[eventscan.messages]`).
    #[serde(default)]
    pub messages: MessageTable,
}

impl EventScanConfig {
    /// Whether findings of `rule_id` are ignored by configuration.
    #[must_use]
    pub fn is_ignored(&self, rule_id: &str) -> bool {
        self.ignore
            .as_ref()
            .is_some_and(|ids| ids.iter().any(|id| id.eq_ignore_ascii_case(rule_id)))
    }
}

impl Config {
    /// Loads configuration from the current directory upwards.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from_path(Path::new("."))
    }

    /// Loads `.eventscan.toml` from `path` or its closest ancestor that has one.
    ///
    /// A file that cannot be read or parsed is skipped with a warning and the
    /// search continues upwards.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let mut current = path.to_path_buf();
        if current.is_file() {
            current.pop();
        }

        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                match fs::read_to_string(&candidate)
                    .map_err(|e| e.to_string())
                    .and_then(|content| {
                        toml::from_str::<Config>(&content).map_err(|e| e.to_string())
                    }) {
                    Ok(mut config) => {
                        tracing::debug!("loaded configuration from {}", candidate.display());
                        config.config_file_path = Some(candidate);
                        return config;
                    }
                    Err(e) => tracing::warn!("ignoring {}: {e}", candidate.display()),
                }
            }

            if !current.pop() {
                break;
            }
        }

        Config::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_path_no_config() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from_path(dir.path());
        assert!(config.eventscan.ignore.is_none());
        assert!(config.config_file_path.is_none());
        assert_eq!(config.eventscan.messages, MessageTable::default());
    }

    #[test]
    fn test_load_from_path_eventscan_toml() {
        let dir = TempDir::new().unwrap();
        let mut file = std::fs::File::create(dir.path().join(".eventscan.toml")).unwrap();
        writeln!(
            file,
            r#"[eventscan]
exclude_folders = ["Generated"]
ignore = ["evs-v002"]
fail_on_findings = true

[eventscan.messages]
remove_modifier_title = "Drop virtual"
"#
        )
        .unwrap();

        let config = Config::load_from_path(dir.path());
        assert_eq!(
            config.eventscan.exclude_folders,
            Some(vec!["Generated".to_owned()])
        );
        assert!(config.eventscan.is_ignored("EVS-V002"));
        assert!(!config.eventscan.is_ignored("EVS-V001"));
        assert_eq!(config.eventscan.fail_on_findings, Some(true));
        assert_eq!(config.eventscan.messages.remove_modifier_title, "Drop virtual");
        assert_eq!(
            config.eventscan.messages.message_format,
            MessageTable::default().message_format
        );
    }

    #[test]
    fn test_load_from_path_traverses_up() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("src").join("Models");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            dir.path().join(".eventscan.toml"),
            "[eventscan]\nfail_on_findings = true\n",
        )
        .unwrap();

        let config = Config::load_from_path(&nested);
        assert_eq!(config.eventscan.fail_on_findings, Some(true));
    }

    #[test]
    fn test_load_from_file_path() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(".eventscan.toml"),
            "[eventscan]\ninclude_folders = [\"bin\"]\n",
        )
        .unwrap();
        let source = dir.path().join("Driver.cs");
        std::fs::write(&source, "class Driver {}").unwrap();

        let config = Config::load_from_path(&source);
        assert_eq!(config.eventscan.include_folders, Some(vec!["bin".to_owned()]));
    }

    #[test]
    fn test_invalid_config_falls_back_to_parent() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("app");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(".eventscan.toml"), "[eventscan]\nignore = [\"EVS-V001\"]\n")
            .unwrap();
        std::fs::write(nested.join(".eventscan.toml"), "[eventscan\nbroken").unwrap();

        let config = Config::load_from_path(&nested);
        assert!(config.eventscan.is_ignored("EVS-V001"));
    }
}
