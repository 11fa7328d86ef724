use clap::Parser;
use osv_scan::application::dto::OutputFormat;
use std::path::PathBuf;

/// Scan dependency manifests, SBOMs, git checkouts and container images for known vulnerabilities
#[derive(Parser, Debug, Default)]
#[command(name = "osv-scan")]
#[command(version)]
#[command(
    about = "Scan lockfiles, SBOMs, git checkouts and container images against the OSV database",
    long_about = None
)]
pub struct Args {
    /// Directories to walk for lockfiles, SBOMs and git checkouts
    #[arg(value_name = "DIR")]
    pub directories: Vec<PathBuf>,

    /// Scan a lockfile; prefix with a parser kind to skip detection (e.g. "apk-installed:/lib/apk/db/installed")
    #[arg(short = 'L', long = "lockfile", value_name = "[KIND:]PATH")]
    pub lockfiles: Vec<String>,

    /// Scan an SBOM document (CycloneDX JSON or SPDX)
    #[arg(short = 'S', long = "sbom", value_name = "PATH")]
    pub sboms: Vec<String>,

    /// Scan the Debian packages installed in a docker image
    #[arg(short = 'D', long = "docker", value_name = "IMAGE")]
    pub docker_images: Vec<String>,

    /// Query a git commit hash directly
    #[arg(long = "commit", value_name = "HASH")]
    pub commits: Vec<String>,

    /// Walk directories recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Do not query the checked-out commit of git repositories found while walking
    #[arg(long)]
    pub skip_git: bool,

    /// Scan files even if they are matched by .gitignore rules
    #[arg(long)]
    pub no_ignore: bool,

    /// osv-scanner.toml applied to every source instead of per-directory files
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format: table or json
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Run settings file (defaults to ./osv-scan.config.yml when present)
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Only print the report and errors
    #[arg(short, long)]
    pub quiet: bool,
}
