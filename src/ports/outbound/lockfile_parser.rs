use crate::scan_pipeline::domain::PackageDetails;
use crate::shared::Result;
use std::path::Path;

/// LockfileParserRegistry port - identifies and parses dependency manifests
///
/// Ecosystem grammars live behind this port; the scan pipeline only asks
/// "which parser?" and "which packages?".
pub trait LockfileParserRegistry {
    /// Returns the parser kind responsible for `path`, judged by its file name
    ///
    /// `None` means "not a manifest", which is not an error. Kinds that are
    /// too generic to recognise by name are never returned here.
    fn identify(&self, path: &Path) -> Option<&'static str>;

    /// Parses `path` with the parser named `kind`
    ///
    /// # Errors
    /// Returns an error if:
    /// - `kind` names no known parser
    /// - The file cannot be read
    /// - The content does not follow the parser's grammar
    fn parse(&self, path: &Path, kind: &str) -> Result<Vec<PackageDetails>>;

    /// Returns true if `kind` names a parser, including non-detectable ones
    fn is_known_kind(&self, kind: &str) -> bool;
}
