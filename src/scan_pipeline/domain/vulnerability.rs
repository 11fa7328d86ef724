use chrono::{DateTime, Utc};
use serde::Serialize;

/// Vulnerability reference as returned by a batch query: the identifier only
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MinimalVulnerability {
    pub id: String,
}

impl MinimalVulnerability {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Batch answer for one query, aligned by position with the query batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResult {
    pub vulns: Vec<MinimalVulnerability>,
}

impl RawResult {
    pub fn new(vulns: Vec<MinimalVulnerability>) -> Self {
        Self { vulns }
    }
}

/// Severity entry exactly as published (e.g. a CVSS vector); never interpreted here
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeverityScore {
    #[serde(rename = "type")]
    pub score_type: String,
    pub score: String,
}

/// Fully described vulnerability
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vulnerability {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub severity: Vec<SeverityScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
}

impl Vulnerability {
    /// Vulnerability with an identifier and nothing else
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            summary: None,
            details: None,
            aliases: Vec::new(),
            severity: Vec::new(),
            published: None,
            modified: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }
}

/// Hydrated answer for one query, aligned by position with the query batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HydratedResult {
    pub vulns: Vec<Vulnerability>,
}

impl HydratedResult {
    pub fn new(vulns: Vec<Vulnerability>) -> Self {
        Self { vulns }
    }
}
