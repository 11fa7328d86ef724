use crate::application::discovery::{
    parse_lockfile_arg, resolve_explicit_path, scan_debian_container, scan_explicit_commit,
    FormatClassifier, TargetWalker, WalkOptions,
};
use crate::application::dto::{ScanRequest, ScanResponse};
use crate::ports::outbound::{
    CommitReader, ConfigResolver, ContainerPackageLister, LockfileParserRegistry,
    ProgressReporter, SbomProvider, VulnerabilityDatabase,
};
use crate::scan_pipeline::domain::QueryBatch;
use crate::scan_pipeline::services::{ResultFilter, ResultGrouper, SuppressionSummary};
use crate::shared::error::ScanError;
use crate::shared::Result;
use anyhow::Context;
use std::collections::HashSet;

/// ScanUseCase - Core use case for vulnerability scanning
///
/// This use case orchestrates discovery, batched lookup, suppression,
/// hydration and grouping using generic dependency injection for all
/// infrastructure dependencies.
///
/// # Type Parameters
/// * `LP` - LockfileParserRegistry implementation
/// * `CR` - CommitReader implementation
/// * `CL` - ContainerPackageLister implementation
/// * `DB` - VulnerabilityDatabase implementation
/// * `CFG` - ConfigResolver implementation
/// * `PR` - ProgressReporter implementation
pub struct ScanUseCase<LP, CR, CL, DB, CFG, PR> {
    lockfile_parsers: LP,
    sbom_providers: Vec<Box<dyn SbomProvider>>,
    commit_reader: CR,
    container_lister: CL,
    vulnerability_database: DB,
    config_resolver: CFG,
    progress_reporter: PR,
}

impl<LP, CR, CL, DB, CFG, PR> ScanUseCase<LP, CR, CL, DB, CFG, PR>
where
    LP: LockfileParserRegistry,
    CR: CommitReader,
    CL: ContainerPackageLister,
    DB: VulnerabilityDatabase,
    CFG: ConfigResolver,
    PR: ProgressReporter,
{
    /// Creates a new ScanUseCase with injected dependencies
    ///
    /// `sbom_providers` are tried in the order given.
    pub fn new(
        lockfile_parsers: LP,
        sbom_providers: Vec<Box<dyn SbomProvider>>,
        commit_reader: CR,
        container_lister: CL,
        vulnerability_database: DB,
        config_resolver: CFG,
        progress_reporter: PR,
    ) -> Self {
        Self {
            lockfile_parsers,
            sbom_providers,
            commit_reader,
            container_lister,
            vulnerability_database,
            config_resolver,
            progress_reporter,
        }
    }

    /// Executes the scan
    ///
    /// # Arguments
    /// * `request` - Targets and walk options
    ///
    /// # Returns
    /// ScanResponse whose status tells "nothing to scan", "clean" and
    /// "vulnerabilities found" apart
    ///
    /// # Errors
    /// Returns an error on any fatal condition: override config failure,
    /// unresolvable or unparsable explicit input, container listing failure,
    /// directory enumeration failure, database failure, or results that no
    /// longer line up with the submitted queries
    pub async fn execute(&self, request: ScanRequest) -> Result<ScanResponse> {
        // Step 1: Pin the suppression config if one was given
        if let Some(path) = &request.config_override {
            self.config_resolver
                .use_override(path)
                .map_err(|e| ScanError::ConfigOverride {
                    path: path.clone(),
                    details: format!("{:#}", e),
                })?;
        }

        // Step 2: Discover every query
        let batch = self.discover(&request)?;
        if batch.is_empty() {
            self.progress_reporter
                .report_error("No package sources found, --help for usage information.");
            return Ok(ScanResponse::no_packages_found());
        }
        tracing::debug!(queries = batch.len(), "submitting query batch");

        // Step 3: One batched lookup for everything
        let mut raw_results = self
            .vulnerability_database
            .submit_batch(&batch)
            .await
            .context("scan failed")?;
        ensure_aligned("submission", batch.len(), raw_results.len())?;

        // Step 4: Drop suppressed findings
        let summary = ResultFilter::apply(&batch, &mut raw_results, |path| {
            self.config_resolver
                .resolve_for_path(path, &self.progress_reporter)
        })?;
        self.report_suppressions(&summary);

        // Step 5: Fetch full descriptions
        let distinct_count = raw_results
            .iter()
            .flat_map(|result| result.vulns.iter().map(|vuln| vuln.id.as_str()))
            .collect::<HashSet<_>>()
            .len();
        if distinct_count > 0 {
            self.progress_reporter.start_spinner(&format!(
                "Fetching details for {} vulnerabilities",
                distinct_count
            ));
        }
        let hydrated = self
            .vulnerability_database
            .hydrate(raw_results)
            .await
            .context("failed to hydrate vulnerability details");
        self.progress_reporter.finish_progress();
        let hydrated = hydrated?;
        ensure_aligned("hydration", batch.len(), hydrated.len())?;

        // Step 6: Group per source
        let results = ResultGrouper::group(&batch, hydrated)?;
        let response = ScanResponse::new(results, summary.len(), batch.len());

        if response.has_vulnerabilities() {
            self.progress_reporter.report_completion(&format!(
                "⚠️  Found {} vulnerabilit(ies) in {} source(s)",
                response.results.vulnerability_count(),
                response.results.results.len()
            ));
        } else {
            self.progress_reporter
                .report_completion("✅ No vulnerabilities found");
        }

        Ok(response)
    }

    /// Runs every discovery category in a fixed order into one batch
    fn discover(&self, request: &ScanRequest) -> Result<QueryBatch> {
        let mut batch = QueryBatch::new();
        let classifier = FormatClassifier::new(&self.lockfile_parsers, &self.sbom_providers);

        for image in &request.docker_images {
            scan_debian_container(
                image,
                &self.container_lister,
                &mut batch,
                &self.progress_reporter,
            )?;
        }

        for arg in &request.lockfile_paths {
            let (parse_as, path) = parse_lockfile_arg(arg);
            let path = resolve_explicit_path(path)?;
            classifier.scan_lockfile(&path, parse_as, &mut batch, &self.progress_reporter)?;
        }

        for sbom in &request.sbom_paths {
            let path = resolve_explicit_path(sbom)?;
            if classifier
                .scan_sbom(&path, &mut batch, &self.progress_reporter)?
                .is_none()
            {
                self.progress_reporter.report_error(&format!(
                    "{} was not recognised as a supported SBOM document",
                    path.display()
                ));
            }
        }

        for commit in &request.git_commits {
            scan_explicit_commit(commit, &mut batch);
        }

        let walker = TargetWalker::new(&classifier, &self.commit_reader, &self.progress_reporter);
        let options = WalkOptions {
            recursive: request.recursive,
            skip_git: request.skip_git,
            use_gitignore: !request.no_ignore,
        };
        for dir in &request.directory_paths {
            self.progress_reporter
                .report(&format!("Scanning dir {}", dir.display()));
            walker.scan_dir(dir, options, &mut batch)?;
        }

        Ok(batch)
    }

    fn report_suppressions(&self, summary: &SuppressionSummary) {
        for (id, reason) in summary.iter() {
            self.progress_reporter
                .report(&format!("{} has been filtered out because: {}", id, reason));
        }
        if !summary.is_empty() {
            self.progress_reporter.report(&format!(
                "Filtered {} vulnerabilities from output",
                summary.len()
            ));
        }
    }
}

fn ensure_aligned(stage: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(ScanError::MisalignedResults {
            stage,
            expected,
            actual,
        }
        .into());
    }
    Ok(())
}
