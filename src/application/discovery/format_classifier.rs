use crate::ports::outbound::{
    LockfileParserRegistry, ProgressReporter, SbomIdentifier, SbomProvider,
};
use crate::scan_pipeline::domain::{Query, QueryBatch, Source, SourceKind};
use crate::shared::error::{SbomExtractError, ScanError};
use crate::shared::security::read_bounded;
use crate::shared::Result;
use anyhow::Context;
use std::path::Path;

/// FormatClassifier - turns a single file into queries
///
/// A file is checked as a dependency manifest and, independently, as an
/// SBOM document. Either check may produce queries; neither producing any
/// is the normal case for most files.
pub struct FormatClassifier<'a> {
    lockfile_parsers: &'a dyn LockfileParserRegistry,
    sbom_providers: &'a [Box<dyn SbomProvider>],
}

impl<'a> FormatClassifier<'a> {
    pub fn new(
        lockfile_parsers: &'a dyn LockfileParserRegistry,
        sbom_providers: &'a [Box<dyn SbomProvider>],
    ) -> Self {
        Self {
            lockfile_parsers,
            sbom_providers,
        }
    }

    /// Parser kind responsible for `path`, if it looks like a manifest
    pub fn identify_manifest(&self, path: &Path) -> Option<&'static str> {
        self.lockfile_parsers.identify(path)
    }

    /// Parses a manifest and appends one package query per entry
    ///
    /// An empty `parse_as` selects the parser by file name.
    ///
    /// # Errors
    /// Returns an error if no parser can be chosen, `parse_as` names an
    /// unknown parser, or parsing fails. Nothing is appended on error.
    pub fn scan_lockfile(
        &self,
        path: &Path,
        parse_as: &str,
        batch: &mut QueryBatch,
        reporter: &dyn ProgressReporter,
    ) -> Result<()> {
        let kind = if parse_as.is_empty() {
            self.identify_manifest(path)
                .ok_or_else(|| ScanError::NoParserFound {
                    path: path.to_path_buf(),
                })?
        } else if self.lockfile_parsers.is_known_kind(parse_as) {
            parse_as
        } else {
            return Err(ScanError::UnknownParserKind {
                kind: parse_as.to_string(),
                path: path.to_path_buf(),
            }
            .into());
        };

        let packages = self
            .lockfile_parsers
            .parse(path, kind)
            .with_context(|| format!("Failed to parse {} as {}", path.display(), kind))?;

        let parsed_as = if parse_as.is_empty() {
            String::new()
        } else {
            format!("as a {} ", parse_as)
        };
        reporter.report(&format!(
            "Scanned {} file {}and found {} packages",
            path.display(),
            parsed_as,
            packages.len()
        ));

        let source = Source::new(path.display().to_string(), SourceKind::Lockfile);
        batch.extend(
            packages
                .into_iter()
                .map(|package| Query::package(package, source.clone())),
        );
        Ok(())
    }

    /// Tries every SBOM provider in order and appends one purl query per component
    ///
    /// Returns the name of the provider that understood the document, or
    /// `None` when no provider did (not an error). Providers whose file-name
    /// convention `path` does not meet are skipped without reading.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, or a provider recognised
    /// the document but failed to extract it. Providers after a failing one
    /// are not tried, and nothing is appended.
    pub fn scan_sbom(
        &self,
        path: &Path,
        batch: &mut QueryBatch,
        reporter: &dyn ProgressReporter,
    ) -> Result<Option<&'static str>> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let candidates: Vec<&dyn SbomProvider> = self
            .sbom_providers
            .iter()
            .map(|provider| provider.as_ref())
            .filter(|provider| provider.accepts_file_name(&file_name))
            .collect();
        if candidates.is_empty() {
            return Ok(None);
        }

        let content = read_bounded(path, "SBOM file")?;
        let source = Source::new(path.display().to_string(), SourceKind::Sbom);

        for provider in candidates {
            let mut found = Vec::new();
            let outcome = provider.extract(&mut content.as_slice(), &mut |identifier: SbomIdentifier| {
                found.push(Query::purl(identifier.purl, source.clone()));
                Ok(())
            });

            match outcome {
                Ok(()) => {
                    reporter.report(&format!(
                        "Scanned {} SBOM and found {} packages",
                        provider.name(),
                        found.len()
                    ));
                    batch.extend(found);
                    return Ok(Some(provider.name()));
                }
                Err(SbomExtractError::InvalidFormat) => {
                    tracing::trace!(
                        provider = provider.name(),
                        path = %path.display(),
                        "not in provider format"
                    );
                }
                Err(SbomExtractError::Failed(e)) => {
                    return Err(e.context(format!(
                        "Failed to read {} as a {} SBOM",
                        path.display(),
                        provider.name()
                    )));
                }
            }
        }

        Ok(None)
    }
}
