/// SBOM provider adapters, listed in the order they are tried
mod cyclonedx;
mod spdx;

pub use cyclonedx::CycloneDxProvider;
pub use spdx::SpdxProvider;

use crate::ports::outbound::SbomProvider;

/// The built-in providers in classification order
pub fn default_providers() -> Vec<Box<dyn SbomProvider>> {
    vec![Box::new(CycloneDxProvider::new()), Box::new(SpdxProvider::new())]
}
