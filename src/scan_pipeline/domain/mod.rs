/// Domain model of a scan: queries, raw and hydrated results, suppression config
pub mod query;
pub mod query_batch;
pub mod results;
pub mod scan_config;
pub mod vulnerability;

pub use query::{Ecosystem, PackageDetails, Query, QueryTarget, Source, SourceKind};
pub use query_batch::QueryBatch;
pub use results::{PackageVulnerabilities, SourceResults, VulnerabilityResults};
pub use scan_config::{IgnoreEntry, ScanConfig};
pub use vulnerability::{
    HydratedResult, MinimalVulnerability, RawResult, SeverityScore, Vulnerability,
};
