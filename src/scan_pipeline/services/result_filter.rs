use crate::scan_pipeline::domain::{QueryBatch, RawResult, ScanConfig};
use crate::shared::error::ScanError;
use crate::shared::Result;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Vulnerabilities removed by suppression rules, across all sources
///
/// Keyed by vulnerability id so an id suppressed in several sources is
/// reported (and counted) once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuppressionSummary {
    hidden: BTreeMap<String, String>,
}

impl SuppressionSummary {
    /// Number of distinct suppressed identifiers
    pub fn len(&self) -> usize {
        self.hidden.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hidden.is_empty()
    }

    /// (id, reason) pairs in id order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.hidden.iter().map(|(id, reason)| (id.as_str(), reason.as_str()))
    }

    fn record(&mut self, vuln_id: &str, reason: &str) {
        self.hidden.insert(vuln_id.to_string(), reason.to_string());
    }
}

/// ResultFilter - removes suppressed vulnerabilities from raw batch results
pub struct ResultFilter;

impl ResultFilter {
    /// Partitions every `results[i]` against the configuration scoped to
    /// `queries[i]`'s source path, dropping suppressed entries in place.
    ///
    /// # Arguments
    /// * `queries` - The submitted batch
    /// * `results` - Raw results, positionally aligned with `queries`
    /// * `config_for` - Resolves the suppression configuration for a source path
    ///
    /// # Errors
    /// Returns an error if `results` is not aligned with `queries`
    pub fn apply<F>(
        queries: &QueryBatch,
        results: &mut [RawResult],
        mut config_for: F,
    ) -> Result<SuppressionSummary>
    where
        F: FnMut(&str) -> Arc<ScanConfig>,
    {
        if queries.len() != results.len() {
            return Err(ScanError::MisalignedResults {
                stage: "filtering",
                expected: queries.len(),
                actual: results.len(),
            }
            .into());
        }

        let mut summary = SuppressionSummary::default();

        for (query, result) in queries.iter().zip(results.iter_mut()) {
            if result.vulns.is_empty() {
                continue;
            }
            let config = config_for(&query.source().path);
            result.vulns.retain(|vuln| match config.should_ignore(&vuln.id) {
                Some(entry) => {
                    summary.record(&vuln.id, &entry.reason);
                    false
                }
                None => true,
            });
        }

        Ok(summary)
    }
}
