//! Deploy Use Case
//!
//! Runs the deployment pipeline against one remote session:
//! 1. Write a temporary `.env` holding `DOCKER_TAG`
//! 2. Transfer it as `.env`
//! 3. Transfer the compose file under its base name
//! 4. Confirm both files are present remotely
//! 5. `docker compose pull`
//! 6. `docker compose up -d`
//!
//! Any failing step stops the run; later steps never execute.

use std::io::{self, Write};

use tempfile::NamedTempFile;

use crate::config::DeployConfig;
use crate::domain::ports::{
    base_name, DeployEvent, DeployEventSink, DeployStep, NoopEventSink, RemoteSession,
};
use crate::error::Error;
use crate::infrastructure::SshSession;
use crate::shell;

use super::options::DeployOptions;
use super::result::{DeployFailure, DeployResult};

/// Remote name of the generated environment file
pub const ENV_FILE_NAME: &str = ".env";

/// Open the SSH session a deploy runs over.
///
/// Commands on the returned session run inside `remote_dir` when one is set.
pub fn connect(
    config: &DeployConfig,
    events: &dyn DeployEventSink,
) -> Result<SshSession, DeployFailure> {
    let mut session = SshSession::new(config.ssh.clone());
    if let Some(dir) = &config.remote_dir {
        session = session.with_working_dir(dir.clone());
    }
    session
        .connect()
        .map_err(|e| DeployFailure::new(DeployStep::Connect, e))?;
    events.on_event(DeployEvent::StepCompleted {
        step: DeployStep::Connect,
        detail: config.ssh.target.to_string(),
    });
    Ok(session)
}

/// Deploy use case - owns the session for the length of one run
pub struct DeployUseCase<R: RemoteSession> {
    remote: R,
}

impl<R: RemoteSession> DeployUseCase<R> {
    pub fn new(remote: R) -> Self {
        Self { remote }
    }

    /// Hand the session back, e.g. to close it
    pub fn into_remote(self) -> R {
        self.remote
    }

    pub fn execute(&self, options: &DeployOptions) -> Result<DeployResult, DeployFailure> {
        self.execute_with_events(options, &NoopEventSink)
    }

    /// Execute the pipeline, reporting each step to `events`
    pub fn execute_with_events(
        &self,
        options: &DeployOptions,
        events: &dyn DeployEventSink,
    ) -> Result<DeployResult, DeployFailure> {
        let env_file = create_env_file(&options.env_file_contents())
            .map_err(|e| DeployFailure::new(DeployStep::CreateEnvFile, e.into()))?;
        completed(events, DeployStep::CreateEnvFile, env_file.path().display().to_string());

        self.remote
            .transfer(env_file.path(), ENV_FILE_NAME)
            .map_err(|e| DeployFailure::new(DeployStep::TransferEnvFile, e))?;
        drop(env_file);
        completed(events, DeployStep::TransferEnvFile, ENV_FILE_NAME.to_string());

        let compose_name = self
            .remote
            .transfer_file(&options.compose_file)
            .map_err(|e| DeployFailure::new(DeployStep::TransferComposeFile, e))?;
        completed(events, DeployStep::TransferComposeFile, compose_name.clone());

        let expected = [ENV_FILE_NAME, compose_name.as_str()];
        self.verify_present(&expected)
            .map_err(|e| DeployFailure::new(DeployStep::ValidateFiles, e))?;
        completed(events, DeployStep::ValidateFiles, expected.join(", "));

        let pull_output = self.compose(events, DeployStep::ComposePull, &compose_name, "pull")?;
        let up_output = self.compose(events, DeployStep::ComposeUp, &compose_name, "up -d")?;

        Ok(DeployResult {
            compose_name,
            pull_output,
            up_output,
        })
    }

    /// Every name must exist; the error lists all that do not.
    fn verify_present(&self, names: &[&str]) -> Result<(), Error> {
        let mut missing = Vec::new();
        for name in names {
            if !self.remote.exists(name)? {
                missing.push(*name);
            }
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(format!(
                "file(s) {} not found in remote directory",
                missing.join(", ")
            )))
        }
    }

    fn compose(
        &self,
        events: &dyn DeployEventSink,
        step: DeployStep,
        compose_name: &str,
        subcommand: &str,
    ) -> Result<String, DeployFailure> {
        events.on_event(DeployEvent::StepStarted { step });
        let command = format!("docker compose -f {} {}", shell::quote(compose_name), subcommand);
        tracing::debug!(%step, %command, "running compose command");
        let output = self
            .remote
            .run_command(&command)
            .map_err(|e| DeployFailure::new(step, e))?;
        completed(events, step, output.trim_end().to_string());
        Ok(output)
    }
}

fn completed(events: &dyn DeployEventSink, step: DeployStep, detail: String) {
    tracing::debug!(%step, "step completed");
    events.on_event(DeployEvent::StepCompleted { step, detail });
}

/// Temporary `.env`, world-readable, removed when dropped
fn create_env_file(contents: &str) -> io::Result<NamedTempFile> {
    let mut file = tempfile::Builder::new().prefix(".env-").tempfile()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(file.path(), std::fs::Permissions::from_mode(0o644))?;
    }
    Ok(file)
}
