/// ProgressReporter port for reporting progress during a scan
///
/// This is the sink for every informational and warning message the
/// pipeline emits. Recoverable, per-item failures end up here instead of
/// aborting the scan.
pub trait ProgressReporter {
    /// Reports an informational message
    ///
    /// # Arguments
    /// * `message` - The progress message to report
    fn report(&self, message: &str);

    /// Shows an activity indicator for work of unknown duration
    ///
    /// # Arguments
    /// * `message` - What is being waited on
    fn start_spinner(&self, _message: &str) {}

    /// Clears any indicator started by `start_spinner`
    fn finish_progress(&self) {}

    /// Reports an error or warning message
    ///
    /// # Arguments
    /// * `message` - The error/warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    ///
    /// # Arguments
    /// * `message` - Completion message
    fn report_completion(&self, message: &str);
}
