//! npm `package-lock.json`, lockfile versions 1 to 3.

use crate::scan_pipeline::domain::{Ecosystem, PackageDetails};
use crate::shared::Result;
use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
struct PackageLock {
    /// v2 and v3: flat map keyed by install path
    #[serde(default)]
    packages: BTreeMap<String, PackageEntry>,
    /// v1 (and v2 for backwards compatibility): nested by name
    #[serde(default)]
    dependencies: BTreeMap<String, DependencyEntry>,
}

#[derive(Debug, Deserialize)]
struct PackageEntry {
    version: Option<String>,
    /// Set when the installed package name differs from its install path
    name: Option<String>,
    #[serde(default)]
    link: bool,
}

#[derive(Debug, Deserialize)]
struct DependencyEntry {
    version: Option<String>,
    #[serde(default)]
    dependencies: BTreeMap<String, DependencyEntry>,
}

const NODE_MODULES: &str = "node_modules/";

pub fn parse(content: &str) -> Result<Vec<PackageDetails>> {
    let lock: PackageLock =
        serde_json::from_str(content).context("Failed to parse package-lock.json file")?;

    let mut packages = Vec::new();
    if !lock.packages.is_empty() {
        for (install_path, entry) in lock.packages {
            // "" is the root project itself
            if install_path.is_empty() || entry.link {
                continue;
            }
            let name = match entry.name {
                Some(name) => name,
                None => match install_path.rfind(NODE_MODULES) {
                    Some(idx) => install_path[idx + NODE_MODULES.len()..].to_string(),
                    None => continue,
                },
            };
            if let Some(version) = entry.version {
                packages.push(PackageDetails::new(name, version, Ecosystem::Npm));
            }
        }
    } else {
        collect_v1(lock.dependencies, &mut packages);
    }

    Ok(packages)
}

fn collect_v1(dependencies: BTreeMap<String, DependencyEntry>, out: &mut Vec<PackageDetails>) {
    for (name, entry) in dependencies {
        if let Some(version) = entry.version {
            // file:, git+ and similar specifiers are not registry versions
            if !version.contains(':') {
                out.push(PackageDetails::new(name, version, Ecosystem::Npm));
            }
        }
        collect_v1(entry.dependencies, out);
    }
}
