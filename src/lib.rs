//! osv-scan - vulnerability scanning against the OSV database
//!
//! This library discovers packages in lockfiles, SBOM documents, git checkouts
//! and container images, submits them to a vulnerability database in one
//! batch, drops suppressed findings and groups what remains per source. It
//! follows hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`scan_pipeline`): Query and result models, filtering and grouping
//! - **Application Layer** (`application`): Target discovery, the scan use case, DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use osv_scan::prelude::*;
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! // Create use case with injected adapters
//! let use_case = ScanUseCase::new(
//!     LockfileParsers::new(),
//!     default_providers(),
//!     GitDirReader::new(),
//!     DockerCli::new(),
//!     OsvClient::new()?,
//!     ConfigManager::new(),
//!     SilentReporter,
//! );
//!
//! // Execute
//! let request = ScanRequest {
//!     directory_paths: vec![PathBuf::from(".")],
//!     recursive: true,
//!     ..ScanRequest::default()
//! };
//! let response = use_case.execute(request).await?;
//!
//! // Format output
//! let output = JsonFormatter::new().format(&response.results)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod logging;
pub mod ports;
pub mod scan_pipeline;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::{SilentReporter, StderrProgressReporter};
    pub use crate::adapters::outbound::container::DockerCli;
    pub use crate::adapters::outbound::filesystem::{
        ConfigManager, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, TableFormatter};
    pub use crate::adapters::outbound::git::GitDirReader;
    pub use crate::adapters::outbound::lockfile::LockfileParsers;
    pub use crate::adapters::outbound::network::OsvClient;
    pub use crate::adapters::outbound::sbom::{default_providers, CycloneDxProvider, SpdxProvider};
    pub use crate::application::dto::{OutputFormat, ScanRequest, ScanResponse, ScanStatus};
    pub use crate::application::use_cases::ScanUseCase;
    pub use crate::ports::outbound::{
        CommitReader, ConfigResolver, ContainerPackageLister, LockfileParserRegistry,
        OutputPresenter, ProgressReporter, ResultFormatter, SbomIdentifier, SbomProvider,
        VulnerabilityDatabase,
    };
    pub use crate::scan_pipeline::domain::{
        Ecosystem, HydratedResult, IgnoreEntry, MinimalVulnerability, PackageDetails, Query,
        QueryBatch, QueryTarget, RawResult, ScanConfig, Source, SourceKind, SourceResults,
        Vulnerability, VulnerabilityResults,
    };
    pub use crate::scan_pipeline::services::{ResultFilter, ResultGrouper, SuppressionSummary};
    pub use crate::shared::error::{ExitCode, ScanError, SbomExtractError};
    pub use crate::shared::Result;
}
