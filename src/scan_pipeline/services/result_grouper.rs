use crate::scan_pipeline::domain::{
    HydratedResult, PackageVulnerabilities, QueryBatch, Source, SourceResults,
    VulnerabilityResults,
};
use crate::shared::error::ScanError;
use crate::shared::Result;
use std::collections::HashMap;

/// ResultGrouper - reshapes flat per-query results into per-source groups
pub struct ResultGrouper;

impl ResultGrouper {
    /// Builds one group per distinct source, in first-seen order.
    ///
    /// Queries without vulnerabilities contribute nothing, and a source whose
    /// queries are all clean is left out entirely.
    ///
    /// # Errors
    /// Returns an error if `results` is not aligned with `queries`
    pub fn group(queries: &QueryBatch, results: Vec<HydratedResult>) -> Result<VulnerabilityResults> {
        if queries.len() != results.len() {
            return Err(ScanError::MisalignedResults {
                stage: "grouping",
                expected: queries.len(),
                actual: results.len(),
            }
            .into());
        }

        let mut groups: Vec<SourceResults> = Vec::new();
        let mut index_by_source: HashMap<&Source, usize> = HashMap::new();

        for (query, result) in queries.iter().zip(results) {
            let index = *index_by_source.entry(query.source()).or_insert_with(|| {
                groups.push(SourceResults {
                    source: query.source().clone(),
                    packages: Vec::new(),
                });
                groups.len() - 1
            });

            if result.vulns.is_empty() {
                continue;
            }

            groups[index].packages.push(PackageVulnerabilities {
                target: query.target().clone(),
                vulnerabilities: result.vulns,
            });
        }

        groups.retain(|group| !group.packages.is_empty());

        Ok(VulnerabilityResults::new(groups))
    }
}
