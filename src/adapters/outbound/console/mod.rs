/// Console adapters for progress and diagnostics
mod progress_reporter;

pub use progress_reporter::{SilentReporter, StderrProgressReporter};
