/// Scan pipeline core - domain model and pure services
///
/// Nothing in this module touches the file system or the network; the
/// application layer feeds it through ports.
pub mod domain;
pub mod services;
