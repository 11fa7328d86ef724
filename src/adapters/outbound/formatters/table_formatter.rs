use crate::ports::outbound::ResultFormatter;
use crate::scan_pipeline::domain::{SourceResults, Vulnerability, VulnerabilityResults};
use crate::shared::Result;

/// Markdown table header for findings
const TABLE_HEADER: &str = "| Source | Package | Vulnerability | Aliases | Summary |\n";

/// Markdown table separator line
const TABLE_SEPARATOR: &str = "|--------|---------|---------------|---------|---------|\n";

/// Link target for a vulnerability identifier
const OSV_VULN_URL: &str = "https://osv.dev/vulnerability/";

/// TableFormatter adapter - renders grouped results as a Markdown table
pub struct TableFormatter;

impl TableFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn vulnerability_link(vuln: &Vulnerability) -> String {
        format!(
            "[{}]({}{})",
            Self::escape_markdown_table_cell(&vuln.id),
            OSV_VULN_URL,
            urlencoding::encode(&vuln.id)
        )
    }

    fn render_group(&self, output: &mut String, group: &SourceResults) {
        let source = Self::escape_markdown_table_cell(&group.source.to_string());
        for package in &group.packages {
            let target = Self::escape_markdown_table_cell(&package.target.to_string());
            for vuln in &package.vulnerabilities {
                output.push_str(&format!(
                    "| {} | {} | {} | {} | {} |\n",
                    source,
                    target,
                    Self::vulnerability_link(vuln),
                    Self::escape_markdown_table_cell(&vuln.aliases.join(", ")),
                    Self::escape_markdown_table_cell(vuln.summary.as_deref().unwrap_or(""))
                ));
            }
        }
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultFormatter for TableFormatter {
    fn format(&self, results: &VulnerabilityResults) -> Result<String> {
        let mut output = String::from("# Vulnerability Report\n\n");

        if results.is_empty() {
            output.push_str("No vulnerabilities found.\n");
            return Ok(output);
        }

        output.push_str(&format!(
            "Found {} vulnerabilit{} across {} source(s).\n\n",
            results.vulnerability_count(),
            if results.vulnerability_count() == 1 { "y" } else { "ies" },
            results.results.len()
        ));
        output.push_str(TABLE_HEADER);
        output.push_str(TABLE_SEPARATOR);
        for group in &results.results {
            self.render_group(&mut output, group);
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan_pipeline::domain::{
        Ecosystem, PackageDetails, PackageVulnerabilities, QueryTarget, Source, SourceKind,
    };

    fn results() -> VulnerabilityResults {
        let mut vuln = Vulnerability::with_id("GHSA-1234").with_summary("Pipe | in summary");
        vuln.aliases = vec!["CVE-2024-1".to_string(), "PYSEC-2024-9".to_string()];

        VulnerabilityResults::new(vec![SourceResults {
            source: Source::new("/repo/uv.lock", SourceKind::Lockfile),
            packages: vec![PackageVulnerabilities {
                target: QueryTarget::Package(PackageDetails::new(
                    "jinja2",
                    "3.1.2",
                    Ecosystem::PyPi,
                )),
                vulnerabilities: vec![vuln, Vulnerability::with_id("GHSA-5678")],
            }],
        }])
    }

    #[test]
    fn test_empty_results() {
        let output = TableFormatter::new()
            .format(&VulnerabilityResults::default())
            .unwrap();
        assert!(output.contains("No vulnerabilities found."));
        assert!(!output.contains(TABLE_HEADER));
    }

    #[test]
    fn test_one_row_per_vulnerability() {
        let output = TableFormatter::new().format(&results()).unwrap();

        assert!(output.contains("Found 2 vulnerabilities across 1 source(s)."));
        assert!(output.contains(TABLE_HEADER));
        assert!(output.contains(
            "| lockfile:/repo/uv.lock | jinja2@3.1.2 (PyPI) | [GHSA-1234](https://osv.dev/vulnerability/GHSA-1234) | CVE-2024-1, PYSEC-2024-9 | Pipe \\| in summary |"
        ));
        assert!(output.contains("[GHSA-5678](https://osv.dev/vulnerability/GHSA-5678) |  |  |"));
    }

    #[test]
    fn test_escape_markdown_table_cell() {
        assert_eq!(
            TableFormatter::escape_markdown_table_cell("a|b\nc"),
            "a\\|b c"
        );
    }
}
