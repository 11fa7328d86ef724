use crate::scan_pipeline::domain::VulnerabilityResults;
use crate::shared::Result;

/// ResultFormatter port for rendering scan results
///
/// This port abstracts the rendering of grouped results into a
/// human- or machine-readable document (Markdown table, JSON, etc.).
pub trait ResultFormatter {
    /// Renders the grouped results
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, results: &VulnerabilityResults) -> Result<String>;
}
