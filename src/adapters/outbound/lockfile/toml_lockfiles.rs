//! `[[package]]` lockfiles: uv, Poetry and Cargo share the same outline.

use crate::scan_pipeline::domain::{Ecosystem, PackageDetails};
use crate::shared::Result;
use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct TomlLockfile {
    #[serde(default)]
    package: Vec<TomlPackage>,
}

#[derive(Debug, Deserialize)]
struct TomlPackage {
    name: String,
    /// Absent for dynamic-version workspace members
    version: Option<String>,
}

fn parse_packages(content: &str, what: &str, ecosystem: Ecosystem) -> Result<Vec<PackageDetails>> {
    let lockfile: TomlLockfile =
        toml::from_str(content).with_context(|| format!("Failed to parse {} file", what))?;

    Ok(lockfile
        .package
        .into_iter()
        .filter_map(|pkg| {
            pkg.version
                .map(|version| PackageDetails::new(pkg.name, version, ecosystem))
        })
        .collect())
}

pub fn parse_uv_lock(content: &str) -> Result<Vec<PackageDetails>> {
    parse_packages(content, "uv.lock", Ecosystem::PyPi)
}

pub fn parse_poetry_lock(content: &str) -> Result<Vec<PackageDetails>> {
    parse_packages(content, "poetry.lock", Ecosystem::PyPi)
}

pub fn parse_cargo_lock(content: &str) -> Result<Vec<PackageDetails>> {
    parse_packages(content, "Cargo.lock", Ecosystem::CratesIo)
}
