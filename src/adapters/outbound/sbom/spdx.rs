use crate::ports::outbound::{SbomIdentifier, SbomProvider};
use crate::shared::error::SbomExtractError;
use crate::shared::Result;
use anyhow::Context;
use serde::Deserialize;
use std::io::Read;

const PURL_REFERENCE_TYPE: &str = "purl";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxDocument {
    spdx_version: Option<String>,
    #[serde(default)]
    packages: Vec<SpdxPackage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxPackage {
    #[serde(default)]
    external_refs: Vec<ExternalRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExternalRef {
    reference_type: String,
    reference_locator: String,
}

/// SPDX documents, JSON or tag-value
///
/// Only files whose name contains `.spdx` are considered.
pub struct SpdxProvider;

impl SpdxProvider {
    pub fn new() -> Self {
        Self
    }

    fn extract_json(
        content: &str,
        visit: &mut dyn FnMut(SbomIdentifier) -> Result<()>,
    ) -> std::result::Result<(), SbomExtractError> {
        // The name already claims SPDX, so broken JSON is a failure, not a mismatch
        let document: SpdxDocument =
            serde_json::from_str(content).context("Invalid SPDX JSON document")?;
        if document.spdx_version.is_none() {
            return Err(SbomExtractError::InvalidFormat);
        }

        for reference in document
            .packages
            .into_iter()
            .flat_map(|package| package.external_refs)
            .filter(|reference| reference.reference_type == PURL_REFERENCE_TYPE)
        {
            visit(SbomIdentifier {
                purl: reference.reference_locator,
            })?;
        }
        Ok(())
    }

    /// `ExternalRef: <category> purl <locator>` lines
    fn extract_tag_value(
        content: &str,
        visit: &mut dyn FnMut(SbomIdentifier) -> Result<()>,
    ) -> std::result::Result<(), SbomExtractError> {
        if !content
            .lines()
            .any(|line| line.trim_start().starts_with("SPDXVersion:"))
        {
            return Err(SbomExtractError::InvalidFormat);
        }

        for line in content.lines() {
            let Some(value) = line.trim().strip_prefix("ExternalRef:") else {
                continue;
            };
            let fields: Vec<&str> = value.split_whitespace().collect();
            if let [_category, PURL_REFERENCE_TYPE, locator] = fields.as_slice() {
                visit(SbomIdentifier {
                    purl: (*locator).to_string(),
                })?;
            }
        }
        Ok(())
    }
}

impl Default for SpdxProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomProvider for SpdxProvider {
    fn name(&self) -> &'static str {
        "SPDX"
    }

    fn accepts_file_name(&self, file_name: &str) -> bool {
        file_name.contains(".spdx")
    }

    fn extract(
        &self,
        reader: &mut dyn Read,
        visit: &mut dyn FnMut(SbomIdentifier) -> Result<()>,
    ) -> std::result::Result<(), SbomExtractError> {
        let mut content = String::new();
        if reader.read_to_string(&mut content).is_err() {
            return Err(SbomExtractError::InvalidFormat);
        }

        if content.trim_start().starts_with('{') {
            Self::extract_json(&content, visit)
        } else {
            Self::extract_tag_value(&content, visit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(document: &str) -> std::result::Result<Vec<String>, SbomExtractError> {
        let mut purls = Vec::new();
        SpdxProvider::new().extract(&mut document.as_bytes(), &mut |id: SbomIdentifier| {
            purls.push(id.purl);
            Ok(())
        })?;
        Ok(purls)
    }

    #[test]
    fn test_json_document() {
        let document = r#"{
  "spdxVersion": "SPDX-2.3",
  "packages": [
    { "name": "flask", "externalRefs": [
      { "referenceCategory": "SECURITY", "referenceType": "cpe23Type", "referenceLocator": "cpe:2.3:a:flask" },
      { "referenceCategory": "PACKAGE-MANAGER", "referenceType": "purl", "referenceLocator": "pkg:pypi/flask@2.0.1" }
    ]},
    { "name": "bare" }
  ]
}"#;
        assert_eq!(extract(document).unwrap(), vec!["pkg:pypi/flask@2.0.1"]);
    }

    #[test]
    fn test_tag_value_document() {
        let document = "\
SPDXVersion: SPDX-2.3
DataLicense: CC0-1.0
PackageName: lodash
ExternalRef: PACKAGE-MANAGER purl pkg:npm/lodash@4.17.20
ExternalRef: SECURITY cpe23Type cpe:2.3:a:lodash
";
        assert_eq!(extract(document).unwrap(), vec!["pkg:npm/lodash@4.17.20"]);
    }

    #[test]
    fn test_broken_json_is_a_failure() {
        assert!(matches!(
            extract(r#"{"spdxVersion": "SPDX-2.3", "packages": ["#),
            Err(SbomExtractError::Failed(_))
        ));
    }

    #[test]
    fn test_non_spdx_content_is_invalid_format() {
        assert!(matches!(
            extract(r#"{"bomFormat": "CycloneDX"}"#),
            Err(SbomExtractError::InvalidFormat)
        ));
        assert!(matches!(
            extract("just some text\n"),
            Err(SbomExtractError::InvalidFormat)
        ));
    }

    #[test]
    fn test_file_name_convention() {
        let provider = SpdxProvider::new();
        assert!(provider.accepts_file_name("app.spdx.json"));
        assert!(provider.accepts_file_name("app.spdx"));
        assert!(!provider.accepts_file_name("bom.json"));
    }
}
