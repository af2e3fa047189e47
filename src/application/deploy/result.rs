//! Deploy Result
//!
//! Result types for deploy operations.

use std::fmt;

use crate::domain::ports::DeployStep;
use crate::error::Error;

/// Result of a successful deploy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployResult {
    /// Name the compose file was given on the remote side
    pub compose_name: String,
    /// Combined output of `docker compose pull`
    pub pull_output: String,
    /// Combined output of `docker compose up -d`
    pub up_output: String,
}

/// The step that stopped the pipeline and why
#[derive(Debug)]
pub struct DeployFailure {
    pub step: DeployStep,
    pub source: Error,
}

impl DeployFailure {
    pub fn new(step: DeployStep, source: Error) -> Self {
        Self { step, source }
    }

    fn prefix(&self) -> &'static str {
        match self.step {
            DeployStep::Connect => "Failed to create SSH client",
            DeployStep::CreateEnvFile => "Failed to create .env file",
            DeployStep::TransferEnvFile => "Failed to transfer .env file",
            DeployStep::TransferComposeFile => "Failed to transfer docker-compose file",
            DeployStep::ValidateFiles => "File validation failed",
            DeployStep::ComposePull => "Failed to run docker compose pull",
            DeployStep::ComposeUp => "Failed to run docker compose up",
        }
    }
}

impl fmt::Display for DeployFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Error::Exec {
                command,
                status,
                output,
            } => write!(
                f,
                "{}: command `{}` failed ({})\nOutput: {}",
                self.prefix(),
                command,
                status,
                output.trim_end()
            ),
            other => write!(f, "{}: {}", self.prefix(), other),
        }
    }
}

impl std::error::Error for DeployFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
