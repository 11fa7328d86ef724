/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound ports (driven ports) describe every collaborator the scan
/// pipeline consumes: parsers, SBOM providers, version control, container
/// runtimes, the vulnerability database, configuration and reporting.
pub mod outbound;
