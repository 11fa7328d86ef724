use crate::ports::outbound::VulnerabilityDatabase;
use crate::scan_pipeline::domain::{
    HydratedResult, MinimalVulnerability, Query, QueryBatch, QueryTarget, RawResult,
    SeverityScore, Vulnerability,
};
use crate::shared::error::ScanError;
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt, TryStreamExt};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// OSV API client
///
/// Queries are sent to `/v1/querybatch` in chunks of at most
/// [`OsvClient::MAX_BATCH_SIZE`]; chunk answers are concatenated in order so
/// result `i` still answers query `i`. Hydration fetches each distinct
/// vulnerability once from `/v1/vulns/{id}`.
///
/// # Security
/// - Implements timeout (30 seconds)
/// - Bounds concurrent detail requests
/// - Does not retry failed requests
pub struct OsvClient {
    client: Client,
    api_base: String,
}

impl OsvClient {
    const API_BASE: &'static str = "https://api.osv.dev";
    const TIMEOUT_SECONDS: u64 = 30;
    const MAX_BATCH_SIZE: usize = 1000; // OSV API limit
    const MAX_CONCURRENT_REQUESTS: usize = 10;

    /// Creates a new OSV API client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_api_base(Self::API_BASE)
    }

    /// Creates a client for an OSV-compatible API at `api_base`
    pub fn with_api_base(api_base: impl Into<String>) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("osv-scan/{}", version);
        let client = Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_batch(&self, queries: &[Query]) -> Result<Vec<RawResult>> {
        let url = format!("{}/v1/querybatch", self.api_base);
        let response = self
            .client
            .post(&url)
            .json(&batch_request(queries))
            .send()
            .await
            .with_context(|| format!("Failed to send batch query to {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!("OSV API returned status code {}", response.status());
        }

        let batch: OsvBatchResponse = response
            .json()
            .await
            .context("Failed to decode OSV batch response")?;
        if batch.results.len() != queries.len() {
            return Err(ScanError::MisalignedResults {
                stage: "submission",
                expected: queries.len(),
                actual: batch.results.len(),
            }
            .into());
        }

        Ok(batch.results.into_iter().map(RawResult::from).collect())
    }

    /// Fetches detailed vulnerability information by ID
    async fn fetch_vulnerability(&self, vuln_id: String) -> Result<Vulnerability> {
        let url = format!("{}/v1/vulns/{}", self.api_base, urlencoding::encode(&vuln_id));
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch details for {}", vuln_id))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "OSV API returned status code {} for vulnerability {}",
                response.status(),
                vuln_id
            );
        }

        let vuln: OsvVulnerability = response
            .json()
            .await
            .with_context(|| format!("Failed to decode details for {}", vuln_id))?;
        Ok(vuln.into())
    }
}

#[async_trait]
impl VulnerabilityDatabase for OsvClient {
    async fn submit_batch(&self, queries: &QueryBatch) -> Result<Vec<RawResult>> {
        let mut results = Vec::with_capacity(queries.len());

        for (index, chunk) in queries.queries().chunks(Self::MAX_BATCH_SIZE).enumerate() {
            tracing::debug!(chunk = index, size = chunk.len(), "submitting query batch");
            results.extend(self.fetch_batch(chunk).await?);
        }

        Ok(results)
    }

    async fn hydrate(&self, results: Vec<RawResult>) -> Result<Vec<HydratedResult>> {
        let ids = unique_ids(&results);
        tracing::debug!(count = ids.len(), "hydrating vulnerabilities");

        let details: Vec<Vulnerability> =
            stream::iter(ids.into_iter().map(|id| self.fetch_vulnerability(id)))
                .buffered(Self::MAX_CONCURRENT_REQUESTS)
                .try_collect()
                .await?;

        Ok(realign(results, details))
    }
}

/// Distinct vulnerability ids across all results, in first-seen order
fn unique_ids(results: &[RawResult]) -> Vec<String> {
    let mut seen = HashSet::new();
    results
        .iter()
        .flat_map(|result| result.vulns.iter())
        .filter(|vuln| seen.insert(vuln.id.as_str()))
        .map(|vuln| vuln.id.clone())
        .collect()
}

/// Rebuilds hydrated results in the shape of `results`
fn realign(results: Vec<RawResult>, details: Vec<Vulnerability>) -> Vec<HydratedResult> {
    let by_id: HashMap<String, Vulnerability> = details
        .into_iter()
        .map(|vuln| (vuln.id.clone(), vuln))
        .collect();

    results
        .into_iter()
        .map(|result| {
            HydratedResult::new(
                result
                    .vulns
                    .into_iter()
                    .map(|vuln| {
                        by_id
                            .get(&vuln.id)
                            .cloned()
                            .unwrap_or_else(|| Vulnerability::with_id(vuln.id))
                    })
                    .collect(),
            )
        })
        .collect()
}

fn batch_request(queries: &[Query]) -> OsvBatchQuery {
    OsvBatchQuery {
        queries: queries.iter().map(|query| OsvQuery::from(query.target())).collect(),
    }
}

// OSV API request/response structures

#[derive(Debug, Serialize)]
struct OsvBatchQuery {
    queries: Vec<OsvQuery>,
}

#[derive(Debug, Default, Serialize)]
struct OsvQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    commit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    package: Option<OsvPackage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
}

#[derive(Debug, Default, Serialize)]
struct OsvPackage {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ecosystem: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    purl: Option<String>,
}

impl From<&QueryTarget> for OsvQuery {
    fn from(target: &QueryTarget) -> Self {
        match target {
            QueryTarget::Commit { commit } => OsvQuery {
                commit: Some(commit.clone()),
                ..Default::default()
            },
            QueryTarget::Purl { purl } => OsvQuery {
                package: Some(OsvPackage {
                    purl: Some(purl.clone()),
                    ..Default::default()
                }),
                ..Default::default()
            },
            QueryTarget::Package(details) => OsvQuery {
                package: Some(OsvPackage {
                    name: Some(details.name.clone()),
                    ecosystem: Some(details.ecosystem.as_str().to_string()),
                    purl: None,
                }),
                version: Some(details.version.clone()),
                commit: None,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct OsvBatchResponse {
    results: Vec<OsvResult>,
}

#[derive(Debug, Deserialize)]
struct OsvResult {
    #[serde(default)]
    vulns: Vec<OsvVulnerabilityRef>,
}

#[derive(Debug, Deserialize)]
struct OsvVulnerabilityRef {
    id: String,
}

impl From<OsvResult> for RawResult {
    fn from(result: OsvResult) -> Self {
        RawResult::new(
            result
                .vulns
                .into_iter()
                .map(|vuln| MinimalVulnerability::new(vuln.id))
                .collect(),
        )
    }
}

#[derive(Debug, Deserialize)]
struct OsvVulnerability {
    id: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default)]
    severity: Vec<OsvSeverity>,
    #[serde(default)]
    published: Option<DateTime<Utc>>,
    #[serde(default)]
    modified: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct OsvSeverity {
    #[serde(rename = "type")]
    severity_type: String, // "CVSS_V3"
    score: String, // e.g., "CVSS:3.1/AV:N/AC:L/..."
}

impl From<OsvVulnerability> for Vulnerability {
    fn from(vuln: OsvVulnerability) -> Self {
        Vulnerability {
            id: vuln.id,
            summary: vuln.summary,
            details: vuln.details,
            aliases: vuln.aliases,
            severity: vuln
                .severity
                .into_iter()
                .map(|s| SeverityScore {
                    score_type: s.severity_type,
                    score: s.score,
                })
                .collect(),
            published: vuln.published,
            modified: vuln.modified,
        }
    }
}
