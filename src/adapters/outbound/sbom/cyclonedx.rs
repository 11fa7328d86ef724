use crate::ports::outbound::{SbomIdentifier, SbomProvider};
use crate::shared::error::SbomExtractError;
use crate::shared::Result;
use serde::Deserialize;
use std::io::Read;

const BOM_FORMAT: &str = "CycloneDX";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Bom {
    bom_format: Option<String>,
    #[serde(default)]
    components: Vec<Component>,
}

#[derive(Debug, Deserialize)]
struct Component {
    purl: Option<String>,
    #[serde(default)]
    components: Vec<Component>,
}

/// CycloneDX JSON documents
///
/// No file-name convention applies (`bom.json`, `sbom.cdx` and
/// `app.cdx.json` are all common); the document must declare
/// `"bomFormat": "CycloneDX"` to be accepted.
pub struct CycloneDxProvider;

impl CycloneDxProvider {
    pub fn new() -> Self {
        Self
    }

    fn visit_components(
        components: Vec<Component>,
        visit: &mut dyn FnMut(SbomIdentifier) -> Result<()>,
    ) -> Result<()> {
        for component in components {
            if let Some(purl) = component.purl.filter(|purl| !purl.is_empty()) {
                visit(SbomIdentifier { purl })?;
            }
            Self::visit_components(component.components, visit)?;
        }
        Ok(())
    }
}

impl Default for CycloneDxProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomProvider for CycloneDxProvider {
    fn name(&self) -> &'static str {
        "CycloneDX"
    }

    fn extract(
        &self,
        reader: &mut dyn Read,
        visit: &mut dyn FnMut(SbomIdentifier) -> Result<()>,
    ) -> std::result::Result<(), SbomExtractError> {
        let bom: Bom = serde_json::from_reader(reader).map_err(|_| SbomExtractError::InvalidFormat)?;
        if bom.bom_format.as_deref() != Some(BOM_FORMAT) {
            return Err(SbomExtractError::InvalidFormat);
        }

        Self::visit_components(bom.components, visit)?;
        Ok(())
    }
}
