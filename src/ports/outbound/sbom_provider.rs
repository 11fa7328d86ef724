use crate::shared::error::SbomExtractError;
use crate::shared::Result;
use std::io::Read;

/// A component reference extracted from an SBOM document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SbomIdentifier {
    pub purl: String,
}

/// SbomProvider port - one supported SBOM document format
///
/// Providers are tried in a fixed order; see `FormatClassifier`.
pub trait SbomProvider: Send + Sync {
    /// Human-readable format name (e.g. "CycloneDX")
    fn name(&self) -> &'static str;

    /// Returns false when the file name rules this format out before reading
    ///
    /// Formats that mandate a naming convention use this to avoid false
    /// positives on unrelated documents.
    fn accepts_file_name(&self, _file_name: &str) -> bool {
        true
    }

    /// Reads the document and calls `visit` once per identified component
    ///
    /// # Errors
    /// * `SbomExtractError::InvalidFormat` - the document is not in this format
    /// * `SbomExtractError::Failed` - the document is in this format but unreadable,
    ///   or `visit` failed
    fn extract(
        &self,
        reader: &mut dyn Read,
        visit: &mut dyn FnMut(SbomIdentifier) -> Result<()>,
    ) -> std::result::Result<(), SbomExtractError>;
}
