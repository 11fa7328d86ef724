/// Container image adapters
mod docker_cli;

pub use docker_cli::DockerCli;
