use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - scan completed and no vulnerabilities remain after filtering
    Success = 0,
    /// Vulnerabilities were found in at least one scanned source
    VulnerabilitiesDetected = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (network error, file I/O error, malformed input, etc.)
    ApplicationError = 3,
    /// None of the requested targets produced anything to scan
    NoPackagesFound = 128,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::VulnerabilitiesDetected => write!(f, "Vulnerabilities Detected (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
            ExitCode::NoPackagesFound => write!(f, "No Packages Found (128)"),
        }
    }
}

/// Fatal scan errors.
///
/// Every variant aborts the whole scan. Recoverable, per-item problems are
/// reported through the progress reporter instead and never become a `ScanError`.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Failed to walk directory: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory is readable")]
    DirectoryWalk { path: PathBuf, details: String },

    #[error("Failed to resolve path: {path}\nDetails: {details}")]
    PathResolution { path: PathBuf, details: String },

    #[error("Failed to read config file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and contains valid TOML")]
    ConfigOverride { path: PathBuf, details: String },

    #[error("Could not determine a parser for lockfile: {path}\n\n💡 Hint: Use '<kind>:<path>' to choose a parser explicitly (e.g. 'requirements.txt:deps.txt')")]
    NoParserFound { path: PathBuf },

    #[error("Unknown lockfile parser kind '{kind}' for: {path}")]
    UnknownParserKind { kind: String, path: PathBuf },

    #[error("Unexpected output from Debian container {image}:\n\n{line}")]
    MalformedContainerOutput { image: String, line: String },

    #[error("Failed to list packages in container {image}\nDetails: {details}\n\n💡 Hint: Please verify that docker is installed and the image exists")]
    ContainerCommand { image: String, details: String },

    #[error("Failed to write output file: {path}\nDetails: {details}\n\n💡 Hint: Please check write permissions for the output location")]
    FileWrite { path: PathBuf, details: String },

    #[error("Vulnerability database returned {actual} result(s) for {expected} quer(ies) during {stage}")]
    MisalignedResults {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Outcome of a failed SBOM extraction attempt.
///
/// `InvalidFormat` means "this provider does not understand the document,
/// try the next one". `Failed` means the document was recognised but could
/// not be read; classification of that file stops there.
#[derive(Debug, Error)]
pub enum SbomExtractError {
    #[error("document is not in the expected format")]
    InvalidFormat,

    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}
