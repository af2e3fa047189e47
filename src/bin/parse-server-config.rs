//! parse-server-config - select a host from the YAML inventory
//!
//! Reads CONFIG_FILE (relative to GITHUB_WORKSPACE), looks up HOST_NAME and
//! appends the host's details to the GITHUB_OUTPUT file.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use compose_deploy::application::ParseConfigUseCase;
use compose_deploy::config::ParserInputs;
use compose_deploy::infrastructure::GithubOutputFile;
use compose_deploy::ui::ci::CiLog;

/// Parse the server inventory and emit step outputs
#[derive(Parser, Debug)]
#[command(name = "parse-server-config")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    inputs: ParserInputs,

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
            CiLog::stdout().error(&format!("Failed to parse config: {}", err));
            ExitCode::FAILURE
        }
    }
}

fn run(inputs: ParserInputs) -> Result<()> {
    let config = inputs.validate()?;
    let outputs = GithubOutputFile::new(config.output_file.clone());
    let mut log = CiLog::stdout();

    let result = ParseConfigUseCase::new(outputs).execute(&config, &mut log)?;
    tracing::debug!(host = %result.host.name, hash = %result.hash, "outputs written");
    Ok(())
}
