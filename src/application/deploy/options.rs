//! Deploy Options

use std::path::PathBuf;

use crate::config::DeployConfig;

/// Options for the deploy use case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOptions {
    /// Local compose file; lands remotely under its base name
    pub compose_file: PathBuf,
    /// Value written to `DOCKER_TAG` in the remote `.env`
    pub docker_tag: String,
}

impl DeployOptions {
    pub fn new(compose_file: impl Into<PathBuf>, docker_tag: impl Into<String>) -> Self {
        Self {
            compose_file: compose_file.into(),
            docker_tag: docker_tag.into(),
        }
    }

    pub fn from_config(config: &DeployConfig) -> Self {
        Self::new(config.compose_file.clone(), config.docker_tag.clone())
    }

    /// Contents of the generated `.env` file
    pub fn env_file_contents(&self) -> String {
        format!("DOCKER_TAG={}\n", self.docker_tag)
    }
}
