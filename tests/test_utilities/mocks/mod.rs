/// Mock implementations for testing
mod mock_commit_reader;
mod mock_container_lister;
mod mock_progress_reporter;
mod mock_vulnerability_database;

pub use mock_commit_reader::MockCommitReader;
pub use mock_container_lister::MockContainerLister;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_vulnerability_database::MockVulnerabilityDatabase;
