/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, network, console, etc.).
pub mod commit_reader;
pub mod config_resolver;
pub mod container_lister;
pub mod formatter;
pub mod lockfile_parser;
pub mod output_presenter;
pub mod progress_reporter;
pub mod sbom_provider;
pub mod vulnerability_database;

pub use commit_reader::CommitReader;
pub use config_resolver::ConfigResolver;
pub use container_lister::ContainerPackageLister;
pub use formatter::ResultFormatter;
pub use lockfile_parser::LockfileParserRegistry;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use sbom_provider::{SbomIdentifier, SbomProvider};
pub use vulnerability_database::VulnerabilityDatabase;
