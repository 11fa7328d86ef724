use super::query::{QueryTarget, Source};
use super::vulnerability::Vulnerability;
use serde::Serialize;

/// Vulnerabilities found for one query target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageVulnerabilities {
    pub target: QueryTarget,
    pub vulnerabilities: Vec<Vulnerability>,
}

/// All findings attributed to one source location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceResults {
    pub source: Source,
    pub packages: Vec<PackageVulnerabilities>,
}

impl SourceResults {
    /// Every vulnerability of every query sharing this source, in query order
    pub fn vulnerabilities(&self) -> Vec<&Vulnerability> {
        self.packages
            .iter()
            .flat_map(|pkg| pkg.vulnerabilities.iter())
            .collect()
    }

    pub fn vulnerability_count(&self) -> usize {
        self.packages.iter().map(|p| p.vulnerabilities.len()).sum()
    }
}

/// Final, per-source report of a scan
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VulnerabilityResults {
    pub results: Vec<SourceResults>,
}

impl VulnerabilityResults {
    pub fn new(results: Vec<SourceResults>) -> Self {
        Self { results }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn vulnerability_count(&self) -> usize {
        self.results.iter().map(SourceResults::vulnerability_count).sum()
    }
}
