use crate::ports::outbound::ResultFormatter;
use crate::scan_pipeline::domain::VulnerabilityResults;
use crate::shared::Result;
use anyhow::Context;

/// JsonFormatter adapter - serialises grouped results with serde_json
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultFormatter for JsonFormatter {
    fn format(&self, results: &VulnerabilityResults) -> Result<String> {
        serde_json::to_string_pretty(results).context("Failed to serialize results to JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan_pipeline::domain::{
        PackageVulnerabilities, QueryTarget, Source, SourceKind, SourceResults, Vulnerability,
    };

    #[test]
    fn test_empty_results_serialize_to_empty_list() {
        let output = JsonFormatter::new()
            .format(&VulnerabilityResults::default())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value, serde_json::json!({ "results": [] }));
    }

    #[test]
    fn test_grouped_results_shape() {
        let results = VulnerabilityResults::new(vec![SourceResults {
            source: Source::new("/repo/", SourceKind::Git),
            packages: vec![PackageVulnerabilities {
                target: QueryTarget::Commit {
                    commit: "9a3b".to_string(),
                },
                vulnerabilities: vec![Vulnerability::with_id("OSV-2024-1")],
            }],
        }]);

        let output = JsonFormatter::new().format(&results).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        let group = &value["results"][0];
        assert_eq!(group["source"]["path"], "/repo/");
        assert_eq!(group["source"]["kind"], "git");
        assert_eq!(group["packages"][0]["target"]["type"], "commit");
        assert_eq!(group["packages"][0]["target"]["commit"], "9a3b");
        assert_eq!(group["packages"][0]["vulnerabilities"][0]["id"], "OSV-2024-1");
    }
}
