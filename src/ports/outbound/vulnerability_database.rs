use crate::scan_pipeline::domain::{HydratedResult, QueryBatch, RawResult};
use crate::shared::Result;
use async_trait::async_trait;

/// VulnerabilityDatabase port - batched lookups against a vulnerability database
///
/// Both operations preserve positional alignment: result `i` always answers
/// query `i`.
#[async_trait]
pub trait VulnerabilityDatabase: Send + Sync {
    /// Submits every query and returns one raw result per query
    ///
    /// # Errors
    /// Returns an error on transport failure or an unexpected response
    async fn submit_batch(&self, queries: &QueryBatch) -> Result<Vec<RawResult>>;

    /// Replaces minimal vulnerability references with full descriptions
    ///
    /// # Errors
    /// Returns an error if any referenced vulnerability cannot be fetched
    async fn hydrate(&self, results: Vec<RawResult>) -> Result<Vec<HydratedResult>>;
}
