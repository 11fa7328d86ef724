use async_trait::async_trait;
use osv_scan::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock VulnerabilityDatabase keyed by the display form of a query target
///
/// e.g. `"jinja2@3.1.2 (PyPI)"`, `"commit abc"` or a purl.
#[derive(Default)]
pub struct MockVulnerabilityDatabase {
    findings: HashMap<String, Vec<String>>,
    fail_submission: bool,
    submitted: AtomicUsize,
}

impl MockVulnerabilityDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_finding(mut self, target: &str, ids: &[&str]) -> Self {
        self.findings.insert(
            target.to_string(),
            ids.iter().map(|id| id.to_string()).collect(),
        );
        self
    }

    pub fn failing() -> Self {
        Self {
            fail_submission: true,
            ..Self::default()
        }
    }

    /// Number of queries received so far
    pub fn submitted(&self) -> usize {
        self.submitted.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VulnerabilityDatabase for MockVulnerabilityDatabase {
    async fn submit_batch(&self, queries: &QueryBatch) -> Result<Vec<RawResult>> {
        if self.fail_submission {
            anyhow::bail!("connection refused");
        }
        self.submitted.fetch_add(queries.len(), Ordering::SeqCst);

        Ok(queries
            .iter()
            .map(|query| {
                let ids = self
                    .findings
                    .get(&query.target().to_string())
                    .cloned()
                    .unwrap_or_default();
                RawResult::new(ids.into_iter().map(MinimalVulnerability::new).collect())
            })
            .collect())
    }

    async fn hydrate(&self, results: Vec<RawResult>) -> Result<Vec<HydratedResult>> {
        Ok(results
            .into_iter()
            .map(|result| {
                HydratedResult::new(
                    result
                        .vulns
                        .into_iter()
                        .map(|v| {
                            let summary = format!("Details of {}", v.id);
                            Vulnerability::with_id(v.id).with_summary(summary)
                        })
                        .collect(),
                )
            })
            .collect())
    }
}

/// Lets a test keep the database to inspect it after handing it to the use case
#[async_trait]
impl<'a> VulnerabilityDatabase for &'a MockVulnerabilityDatabase {
    async fn submit_batch(&self, queries: &QueryBatch) -> Result<Vec<RawResult>> {
        (**self).submit_batch(queries).await
    }

    async fn hydrate(&self, results: Vec<RawResult>) -> Result<Vec<HydratedResult>> {
        (**self).hydrate(results).await
    }
}
