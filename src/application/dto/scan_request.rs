use std::path::PathBuf;

/// ScanRequest - Internal request DTO for the scan use case
///
/// Every list is processed in the order given. Empty lists are allowed;
/// a request with nothing in any list ends as "no packages found".
#[derive(Debug, Clone, Default)]
pub struct ScanRequest {
    /// Explicit manifests, optionally prefixed with a parser kind (`kind:path`)
    pub lockfile_paths: Vec<String>,
    /// Explicit SBOM documents
    pub sbom_paths: Vec<String>,
    /// Directories to walk
    pub directory_paths: Vec<PathBuf>,
    /// Commit hashes to query directly
    pub git_commits: Vec<String>,
    /// Debian-based container images to list
    pub docker_images: Vec<String>,
    /// Walk directories recursively
    pub recursive: bool,
    /// Do not turn `.git` directories into commit queries
    pub skip_git: bool,
    /// Disregard `.gitignore` rules while walking
    pub no_ignore: bool,
    /// Suppression config that replaces per-directory resolution
    pub config_override: Option<PathBuf>,
}
