use chrono::{NaiveDate, Utc};
use std::path::{Path, PathBuf};

/// A suppression rule for one vulnerability identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreEntry {
    pub id: String,
    pub reason: String,
    /// Suppression stops applying on this date
    pub ignore_until: Option<NaiveDate>,
}

impl IgnoreEntry {
    pub fn new(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            reason: reason.into(),
            ignore_until: None,
        }
    }

    pub fn until(mut self, date: NaiveDate) -> Self {
        self.ignore_until = Some(date);
        self
    }

    pub fn is_active_on(&self, today: NaiveDate) -> bool {
        self.ignore_until.is_none_or(|until| today < until)
    }
}

/// Suppression configuration that applies to one scope of the tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanConfig {
    ignored_vulns: Vec<IgnoreEntry>,
    load_path: Option<PathBuf>,
}

impl ScanConfig {
    pub fn new(ignored_vulns: Vec<IgnoreEntry>, load_path: Option<PathBuf>) -> Self {
        Self {
            ignored_vulns,
            load_path,
        }
    }

    /// File this configuration was read from, `None` for the built-in default
    pub fn load_path(&self) -> Option<&Path> {
        self.load_path.as_deref()
    }

    pub fn ignored_vulns(&self) -> &[IgnoreEntry] {
        &self.ignored_vulns
    }

    /// Returns the rule suppressing `vuln_id` today, if any
    pub fn should_ignore(&self, vuln_id: &str) -> Option<&IgnoreEntry> {
        self.should_ignore_on(vuln_id, Utc::now().date_naive())
    }

    pub fn should_ignore_on(&self, vuln_id: &str, today: NaiveDate) -> Option<&IgnoreEntry> {
        self.ignored_vulns
            .iter()
            .find(|entry| entry.id == vuln_id && entry.is_active_on(today))
    }
}
