//! Alpine's installed-package database (`/lib/apk/db/installed`).

use crate::scan_pipeline::domain::{Ecosystem, PackageDetails};
use crate::shared::Result;
use anyhow::bail;

pub fn parse(content: &str) -> Result<Vec<PackageDetails>> {
    let mut packages = Vec::new();
    let mut name: Option<&str> = None;
    let mut version: Option<&str> = None;

    // A blank line ends each package record; the last one may be unterminated
    for line in content.lines().chain(std::iter::once("")) {
        if line.trim().is_empty() {
            match (name.take(), version.take()) {
                (Some(n), Some(v)) => packages.push(PackageDetails::new(n, v, Ecosystem::Alpine)),
                (None, None) => {}
                (Some(n), None) => bail!("Package {} has no version (V:) line", n),
                (None, Some(v)) => bail!("Package record with version {} has no name (P:) line", v),
            }
            continue;
        }
        if let Some(value) = line.strip_prefix("P:") {
            name = Some(value.trim());
        } else if let Some(value) = line.strip_prefix("V:") {
            version = Some(value.trim());
        }
    }

    Ok(packages)
}
