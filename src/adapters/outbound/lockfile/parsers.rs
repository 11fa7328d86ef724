use super::{apk_installed, package_lock, requirements, toml_lockfiles};
use crate::ports::outbound::LockfileParserRegistry;
use crate::scan_pipeline::domain::PackageDetails;
use crate::shared::security::read_bounded_to_string;
use crate::shared::Result;
use std::collections::HashSet;
use std::path::Path;

/// Parser kind for Alpine's installed database; never chosen by file name
pub const APK_INSTALLED: &str = "apk-installed";

type ParseFn = fn(&str) -> Result<Vec<PackageDetails>>;

/// (kind, detectable by file name, grammar)
const PARSERS: &[(&str, bool, ParseFn)] = &[
    ("uv.lock", true, toml_lockfiles::parse_uv_lock),
    ("poetry.lock", true, toml_lockfiles::parse_poetry_lock),
    ("Cargo.lock", true, toml_lockfiles::parse_cargo_lock),
    ("package-lock.json", true, package_lock::parse),
    ("requirements.txt", true, requirements::parse),
    (APK_INSTALLED, false, apk_installed::parse),
];

/// LockfileParsers adapter - the built-in parser registry
///
/// A file is identified by its exact name, which doubles as the parser kind.
/// Packages repeated within one file are reported once.
pub struct LockfileParsers;

impl LockfileParsers {
    pub fn new() -> Self {
        Self
    }

    fn lookup(kind: &str) -> Option<ParseFn> {
        PARSERS
            .iter()
            .find(|(name, _, _)| *name == kind)
            .map(|(_, _, parse)| *parse)
    }
}

impl Default for LockfileParsers {
    fn default() -> Self {
        Self::new()
    }
}

impl LockfileParserRegistry for LockfileParsers {
    fn identify(&self, path: &Path) -> Option<&'static str> {
        let file_name = path.file_name()?.to_str()?;
        PARSERS
            .iter()
            .find(|(name, detectable, _)| *detectable && *name == file_name)
            .map(|(name, _, _)| *name)
    }

    fn parse(&self, path: &Path, kind: &str) -> Result<Vec<PackageDetails>> {
        let parse =
            Self::lookup(kind).ok_or_else(|| anyhow::anyhow!("No parser named '{}'", kind))?;
        let content = read_bounded_to_string(path, "lockfile")?;

        let mut seen = HashSet::new();
        let mut packages = parse(&content)?;
        packages.retain(|pkg| seen.insert(pkg.clone()));

        tracing::debug!(path = %path.display(), kind, count = packages.len(), "parsed lockfile");
        Ok(packages)
    }

    fn is_known_kind(&self, kind: &str) -> bool {
        Self::lookup(kind).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan_pipeline::domain::Ecosystem;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_identify_by_file_name() {
        let parsers = LockfileParsers::new();
        assert_eq!(parsers.identify(Path::new("/p/uv.lock")), Some("uv.lock"));
        assert_eq!(parsers.identify(Path::new("Cargo.lock")), Some("Cargo.lock"));
        assert_eq!(
            parsers.identify(Path::new("/web/package-lock.json")),
            Some("package-lock.json")
        );
        assert_eq!(parsers.identify(Path::new("/p/README.md")), None);
        assert_eq!(parsers.identify(Path::new("/p/cargo.lock")), None);
    }

    #[test]
    fn test_apk_installed_is_never_identified() {
        let parsers = LockfileParsers::new();
        assert_eq!(parsers.identify(Path::new("/lib/apk/db/installed")), None);
        assert_eq!(parsers.identify(Path::new(APK_INSTALLED)), None);
        assert!(parsers.is_known_kind(APK_INSTALLED));
        assert!(!parsers.is_known_kind("Gemfile.lock"));
    }

    #[test]
    fn test_parse_reads_file_and_deduplicates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deps.txt");
        fs::write(&path, "flask==2.0.1\nflask==2.0.1\nrequests==2.31.0\n").unwrap();

        let packages = LockfileParsers::new().parse(&path, "requirements.txt").unwrap();

        assert_eq!(
            packages,
            vec![
                PackageDetails::new("flask", "2.0.1", Ecosystem::PyPi),
                PackageDetails::new("requests", "2.31.0", Ecosystem::PyPi),
            ]
        );
    }

    #[test]
    fn test_parse_unknown_kind() {
        let err = LockfileParsers::new()
            .parse(Path::new("/nonexistent"), "Gemfile.lock")
            .unwrap_err();
        assert!(err.to_string().contains("No parser named 'Gemfile.lock'"));
    }

    #[test]
    fn test_parse_missing_file() {
        let err = LockfileParsers::new()
            .parse(Path::new("/nonexistent/uv.lock"), "uv.lock")
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read lockfile metadata"));
    }
}
