mod cli;

use clap::Parser;
use cli::Args;
use osv_scan::adapters::outbound::console::{SilentReporter, StderrProgressReporter};
use osv_scan::adapters::outbound::container::DockerCli;
use osv_scan::adapters::outbound::filesystem::ConfigManager;
use osv_scan::adapters::outbound::git::GitDirReader;
use osv_scan::adapters::outbound::lockfile::LockfileParsers;
use osv_scan::adapters::outbound::network::OsvClient;
use osv_scan::adapters::outbound::sbom::default_providers;
use osv_scan::application::dto::{OutputFormat, ScanRequest, ScanStatus};
use osv_scan::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use osv_scan::application::use_cases::ScanUseCase;
use osv_scan::config::{self, ConfigFile};
use osv_scan::logging::init_logging;
use osv_scan::ports::outbound::ProgressReporter;
use osv_scan::shared::error::ExitCode;
use osv_scan::shared::Result;
use std::path::PathBuf;
use std::process;
use std::str::FromStr;

#[tokio::main]
async fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version are reported through clap as "errors"
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    init_logging();

    match run(args).await {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

/// Effective options after merging the settings file under the CLI flags
#[derive(Debug)]
struct RunOptions {
    request: ScanRequest,
    format: OutputFormat,
    output: Option<PathBuf>,
    quiet: bool,
}

fn load_settings(args: &Args) -> Result<ConfigFile> {
    match &args.settings {
        Some(path) => config::load_config_from_path(path),
        None => Ok(config::discover_config(&std::env::current_dir()?)?.unwrap_or_default()),
    }
}

fn merge_options(args: Args, settings: ConfigFile) -> Result<RunOptions> {
    let format = match (args.format, settings.format.as_deref()) {
        (Some(format), _) => format,
        (None, Some(value)) => OutputFormat::from_str(value).map_err(anyhow::Error::msg)?,
        (None, None) => OutputFormat::default(),
    };

    let request = ScanRequest {
        lockfile_paths: args.lockfiles,
        sbom_paths: args.sboms,
        directory_paths: args.directories,
        git_commits: args.commits,
        docker_images: args.docker_images,
        recursive: args.recursive || settings.recursive.unwrap_or(false),
        skip_git: args.skip_git || settings.skip_git.unwrap_or(false),
        no_ignore: args.no_ignore || settings.no_ignore.unwrap_or(false),
        config_override: args.config.or(settings.config),
    };

    Ok(RunOptions {
        request,
        format,
        output: args.output.or(settings.output),
        quiet: args.quiet,
    })
}

async fn run(args: Args) -> Result<ExitCode> {
    let settings = load_settings(&args)?;
    let options = merge_options(args, settings)?;

    if options.quiet {
        scan(options, SilentReporter).await
    } else {
        scan(options, StderrProgressReporter::new()).await
    }
}

async fn scan<PR: ProgressReporter>(options: RunOptions, progress_reporter: PR) -> Result<ExitCode> {
    let RunOptions {
        request,
        format,
        output,
        quiet,
    } = options;

    // Create adapters (Dependency Injection)
    let use_case = ScanUseCase::new(
        LockfileParsers::new(),
        default_providers(),
        GitDirReader::new(),
        DockerCli::new(),
        OsvClient::new()?,
        ConfigManager::new(),
        progress_reporter,
    );

    let response = use_case.execute(request).await?;
    if response.status == ScanStatus::NoPackagesFound {
        return Ok(ExitCode::NoPackagesFound);
    }

    if !quiet {
        eprintln!("{}", FormatterFactory::progress_message(format));
    }
    let formatted_output = FormatterFactory::create(format).format(&response.results)?;
    PresenterFactory::create(PresenterType::from_output(output)).present(&formatted_output)?;

    Ok(if response.has_vulnerabilities() {
        ExitCode::VulnerabilitiesDetected
    } else {
        ExitCode::Success
    })
}
