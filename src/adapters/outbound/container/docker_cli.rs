use crate::ports::outbound::ContainerPackageLister;
use crate::shared::error::ScanError;
use crate::shared::Result;
use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};

const DPKG_QUERY: &str = "/usr/bin/dpkg-query";
/// One `name###version` line per installed package
const DPKG_FORMAT: &str = "${Package}###${Version}\\n";

/// DockerCli adapter - lists Debian packages by running dpkg-query in the image
///
/// Invokes `docker run --rm --entrypoint /usr/bin/dpkg-query <image> -f ... -W`
/// and streams its standard output line by line.
pub struct DockerCli {
    program: String,
}

impl DockerCli {
    pub fn new() -> Self {
        Self::with_program("docker")
    }

    /// Uses a different docker-compatible executable (e.g. `podman`)
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command_error(image: &str, details: impl Into<String>) -> anyhow::Error {
        ScanError::ContainerCommand {
            image: image.to_string(),
            details: details.into(),
        }
        .into()
    }
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerPackageLister for DockerCli {
    fn stream_packages(
        &self,
        image: &str,
        visit: &mut dyn FnMut(&str) -> Result<()>,
    ) -> Result<()> {
        tracing::debug!(program = %self.program, image, "listing container packages");

        let mut child = Command::new(&self.program)
            .args(["run", "--rm", "--entrypoint", DPKG_QUERY, image, "-f", DPKG_FORMAT, "-W"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Self::command_error(image, format!("failed to start {}: {}", self.program, e)))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Self::command_error(image, "standard output was not captured"))?;

        for line in BufReader::new(stdout).lines() {
            let outcome = line
                .map_err(|e| Self::command_error(image, format!("failed to read output: {}", e)))
                .and_then(|line| visit(&line));
            if let Err(e) = outcome {
                // Best effort; the listing is abandoned either way
                let _ = child.kill();
                let _ = child.wait();
                return Err(e);
            }
        }

        let status = child
            .wait()
            .map_err(|e| Self::command_error(image, e.to_string()))?;
        if !status.success() {
            return Err(Self::command_error(
                image,
                format!("{} exited with {}", self.program, status),
            ));
        }
        Ok(())
    }
}
