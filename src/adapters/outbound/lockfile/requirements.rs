//! `requirements.txt`: only exact `==` pins name a version that can be queried.

use crate::scan_pipeline::domain::{Ecosystem, PackageDetails};
use crate::shared::Result;

pub fn parse(content: &str) -> Result<Vec<PackageDetails>> {
    Ok(content.lines().filter_map(parse_line).collect())
}

fn parse_line(line: &str) -> Option<PackageDetails> {
    let line = match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    };
    // Environment markers and per-requirement options follow the pin
    let line = line.split(';').next()?.split(" --").next()?.trim();
    if line.is_empty() || line.starts_with('-') {
        return None;
    }

    let (name, version) = line.split_once("==")?;
    let name = match name.find('[') {
        Some(idx) => &name[..idx],
        None => name,
    }
    .trim();
    let version = version.trim();
    if name.is_empty() || version.is_empty() || version.starts_with('=') {
        return None;
    }

    Some(PackageDetails::new(name, version, Ecosystem::PyPi))
}
