//! docker-deploy - ship a compose project to one host and start it
//!
//! Usage: docker-deploy [OPTIONS]
//!
//! Every option falls back to its environment variable (SSH_USER, SSH_KEY,
//! SSH_HOST, SSH_PORT, COMPOSE_FILE, DOCKER_TAG, ...), which is how the
//! workflow step normally supplies them.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use compose_deploy::application::deploy::{connect, DeployOptions, DeployUseCase};
use compose_deploy::config::DeployInputs;
use compose_deploy::domain::ports::RemoteSession;
use compose_deploy::infrastructure::AnnotationEventSink;
use compose_deploy::ui::ci::CiLog;

/// Deploy a docker-compose project over SSH
#[derive(Parser, Debug)]
#[command(name = "docker-deploy")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    inputs: DeployInputs,

    /// Debug diagnostics on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    compose_deploy::logging::init(cli.verbose);

    match run(cli.inputs) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            CiLog::stdout().error(&err.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(inputs: DeployInputs) -> Result<()> {
    let config = inputs.validate()?;
    let events = AnnotationEventSink::stdout();

    let session = connect(&config, &events)?;
    let use_case = DeployUseCase::new(session);
    let outcome = use_case.execute_with_events(&DeployOptions::from_config(&config), &events);

    let mut session = use_case.into_remote();
    session.close();

    let result = outcome?;
    tracing::debug!(compose = %result.compose_name, "deployment finished");
    CiLog::stdout().notice("Deployment completed successfully");
    Ok(())
}
