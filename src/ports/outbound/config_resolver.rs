use super::ProgressReporter;
use crate::scan_pipeline::domain::ScanConfig;
use crate::shared::Result;
use std::path::Path;
use std::sync::Arc;

/// ConfigResolver port - path-scoped suppression configuration
pub trait ConfigResolver {
    /// Forces every later lookup to return the configuration at `path`
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    fn use_override(&self, path: &Path) -> Result<()>;

    /// Returns the configuration governing `source_path`
    ///
    /// Never fails: a missing or broken configuration resolves to the
    /// default (which suppresses nothing).
    fn resolve_for_path(&self, source_path: &str, reporter: &dyn ProgressReporter)
        -> Arc<ScanConfig>;
}
