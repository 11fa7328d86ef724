use serde::Serialize;
use std::fmt;

/// Package ecosystems understood by the OSV database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Ecosystem {
    #[serde(rename = "PyPI")]
    PyPi,
    #[serde(rename = "crates.io")]
    CratesIo,
    #[serde(rename = "npm")]
    Npm,
    Debian,
    Alpine,
}

impl Ecosystem {
    /// The ecosystem name exactly as OSV spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            Ecosystem::PyPi => "PyPI",
            Ecosystem::CratesIo => "crates.io",
            Ecosystem::Npm => "npm",
            Ecosystem::Debian => "Debian",
            Ecosystem::Alpine => "Alpine",
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pinned package as read from a lockfile or a container listing
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PackageDetails {
    pub name: String,
    pub version: String,
    pub ecosystem: Ecosystem,
}

impl PackageDetails {
    pub fn new(name: impl Into<String>, version: impl Into<String>, ecosystem: Ecosystem) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            ecosystem,
        }
    }
}

/// Where a query was discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Lockfile,
    Sbom,
    Git,
    Docker,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Lockfile => "lockfile",
            SourceKind::Sbom => "sbom",
            SourceKind::Git => "git",
            SourceKind::Docker => "docker",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Origin of a query: a path (or image name, or synthetic marker) plus its kind
///
/// Results are attributed and grouped by `Source`, so two queries from the
/// same file compare equal here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Source {
    pub path: String,
    pub kind: SourceKind,
}

impl Source {
    pub fn new(path: impl Into<String>, kind: SourceKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.path)
    }
}

/// What a query asks the database about
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QueryTarget {
    Package(PackageDetails),
    Purl { purl: String },
    Commit { commit: String },
}

impl fmt::Display for QueryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryTarget::Package(pkg) => {
                write!(f, "{}@{} ({})", pkg.name, pkg.version, pkg.ecosystem)
            }
            QueryTarget::Purl { purl } => f.write_str(purl),
            QueryTarget::Commit { commit } => write!(f, "commit {}", commit),
        }
    }
}

/// A single "check this for known vulnerabilities" request
///
/// Immutable once built; the batch that owns it defines its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    target: QueryTarget,
    source: Source,
}

impl Query {
    pub fn package(details: PackageDetails, source: Source) -> Self {
        Self {
            target: QueryTarget::Package(details),
            source,
        }
    }

    pub fn purl(purl: impl Into<String>, source: Source) -> Self {
        Self {
            target: QueryTarget::Purl { purl: purl.into() },
            source,
        }
    }

    pub fn commit(commit: impl Into<String>, source: Source) -> Self {
        Self {
            target: QueryTarget::Commit {
                commit: commit.into(),
            },
            source,
        }
    }

    pub fn target(&self) -> &QueryTarget {
        &self.target
    }

    pub fn source(&self) -> &Source {
        &self.source
    }
}
