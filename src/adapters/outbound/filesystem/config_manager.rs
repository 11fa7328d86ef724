use crate::ports::outbound::{ConfigResolver, ProgressReporter};
use crate::scan_pipeline::domain::{IgnoreEntry, ScanConfig};
use crate::shared::paths::normalize;
use crate::shared::security::read_bounded_to_string;
use crate::shared::Result;
use anyhow::Context;
use chrono::NaiveDate;
use dashmap::DashMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Name of the per-directory suppression file
pub const CONFIG_FILENAME: &str = "osv-scanner.toml";

#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(rename = "IgnoredVulns", default)]
    ignored_vulns: Vec<IgnoredVulnFile>,
}

#[derive(Debug, Deserialize)]
struct IgnoredVulnFile {
    id: String,
    #[serde(default)]
    reason: String,
    #[serde(rename = "ignoreUntil")]
    ignore_until: Option<toml::value::Datetime>,
}

/// Reads and validates one suppression file
pub fn load_scan_config(path: &Path) -> Result<ScanConfig> {
    let content = read_bounded_to_string(path, "config file")?;
    let file: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let entries = file
        .ignored_vulns
        .into_iter()
        .map(|entry| {
            let mut ignore = IgnoreEntry::new(entry.id, entry.reason);
            if let Some(until) = entry.ignore_until {
                let date = date_of(&until).with_context(|| {
                    format!("Invalid ignoreUntil for {} in {}", ignore.id, path.display())
                })?;
                ignore = ignore.until(date);
            }
            Ok(ignore)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ScanConfig::new(entries, Some(path.to_path_buf())))
}

fn date_of(value: &toml::value::Datetime) -> Result<NaiveDate> {
    let date = value
        .date
        .ok_or_else(|| anyhow::anyhow!("'{}' has no date part", value))?;
    NaiveDate::from_ymd_opt(date.year.into(), date.month.into(), date.day.into())
        .ok_or_else(|| anyhow::anyhow!("'{}' is not a calendar date", value))
}

/// ConfigManager adapter - resolves `osv-scanner.toml` per source path
///
/// The nearest file found walking up from the source's directory applies.
/// Resolutions are memoised per directory, and each file is read once.
pub struct ConfigManager {
    default_config: Arc<ScanConfig>,
    override_config: RwLock<Option<Arc<ScanConfig>>>,
    by_directory: DashMap<PathBuf, Arc<ScanConfig>>,
    by_file: DashMap<PathBuf, Arc<ScanConfig>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            default_config: Arc::new(ScanConfig::default()),
            override_config: RwLock::new(None),
            by_directory: DashMap::new(),
            by_file: DashMap::new(),
        }
    }

    fn current_override(&self) -> Option<Arc<ScanConfig>> {
        match self.override_config.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn config_from_file(&self, file: &Path, reporter: &dyn ProgressReporter) -> Arc<ScanConfig> {
        if let Some(config) = self.by_file.get(file) {
            return config.clone();
        }

        let config = match load_scan_config(file) {
            Ok(config) => {
                tracing::debug!(
                    path = %file.display(),
                    entries = config.ignored_vulns().len(),
                    "loaded suppression config"
                );
                reporter.report(&format!("Loaded filter from: {}", file.display()));
                Arc::new(config)
            }
            Err(e) => {
                reporter.report_error(&format!(
                    "Ignored invalid config file at: {}\nDetails: {:#}",
                    file.display(),
                    e
                ));
                self.default_config.clone()
            }
        };
        self.by_file.insert(file.to_path_buf(), config.clone());
        config
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigResolver for ConfigManager {
    fn use_override(&self, path: &Path) -> Result<()> {
        let config = Arc::new(load_scan_config(path)?);
        tracing::debug!(path = %path.display(), "using override config");
        match self.override_config.write() {
            Ok(mut guard) => *guard = Some(config),
            Err(poisoned) => *poisoned.into_inner() = Some(config),
        }
        Ok(())
    }

    fn resolve_for_path(
        &self,
        source_path: &str,
        reporter: &dyn ProgressReporter,
    ) -> Arc<ScanConfig> {
        if let Some(config) = self.current_override() {
            return config;
        }

        // Ancestors are walked lexically, so `..` must be gone first.
        // Image names and explicit commit markers are not paths on disk.
        let path = normalize(Path::new(source_path));
        let directory = if path.is_dir() {
            path.as_path()
        } else if path.is_file() {
            match path.parent() {
                Some(parent) => parent,
                None => return self.default_config.clone(),
            }
        } else {
            return self.default_config.clone();
        };

        if let Some(config) = self.by_directory.get(directory) {
            return config.clone();
        }

        let config = directory
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.is_file())
            .map(|file| self.config_from_file(&file, reporter))
            .unwrap_or_else(|| self.default_config.clone());

        tracing::trace!(
            directory = %directory.display(),
            config = ?config.load_path(),
            "resolved suppression config"
        );
        self.by_directory
            .insert(directory.to_path_buf(), config.clone());
        config
    }
}
