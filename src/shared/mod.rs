/// Shared kernel - error types, result alias, path and file-safety helpers
///
/// Everything in here is used across layers and has no dependency on
/// ports or adapters.
pub mod error;
pub mod paths;
pub mod result;
pub mod security;

pub use result::Result;
