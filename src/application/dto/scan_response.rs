use crate::scan_pipeline::domain::VulnerabilityResults;

/// Terminal outcome of a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    /// No target produced a single query
    NoPackagesFound,
    /// Every query came back clean after suppression
    Clean,
    /// At least one vulnerability remains after suppression
    VulnerabilitiesFound,
}

/// ScanResponse - Internal response DTO from the scan use case
///
/// `VulnerabilitiesFound` is a successful outcome: the caller decides what
/// it means (typically a non-zero exit status) and still gets the results.
#[derive(Debug, Clone)]
pub struct ScanResponse {
    pub status: ScanStatus,
    /// Per-source findings, empty unless `status` is `VulnerabilitiesFound`
    pub results: VulnerabilityResults,
    /// Distinct vulnerability ids hidden by suppression rules
    pub filtered_count: usize,
    /// Number of queries submitted to the database
    pub query_count: usize,
}

impl ScanResponse {
    pub fn new(results: VulnerabilityResults, filtered_count: usize, query_count: usize) -> Self {
        let status = if results.is_empty() {
            ScanStatus::Clean
        } else {
            ScanStatus::VulnerabilitiesFound
        };
        Self {
            status,
            results,
            filtered_count,
            query_count,
        }
    }

    pub fn no_packages_found() -> Self {
        Self {
            status: ScanStatus::NoPackagesFound,
            results: VulnerabilityResults::default(),
            filtered_count: 0,
            query_count: 0,
        }
    }

    pub fn has_vulnerabilities(&self) -> bool {
        self.status == ScanStatus::VulnerabilitiesFound
    }
}
