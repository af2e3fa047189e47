//! Parse Config Use Case
//!
//! Loads the host inventory, validates it, selects one host and hands its
//! connection details to later workflow steps:
//! 1. Resolve `CONFIG_FILE` inside the workspace and read it
//! 2. Decode, fingerprint and collect warnings
//! 3. Validate every entry, then look up `HOST_NAME`
//! 4. Require a compose path on the selected host
//! 5. Emit step outputs and a JSON summary

use std::io::Write;

use crate::config::ParserConfig;
use crate::domain::entities::HostRecord;
use crate::domain::ports::{StepOutputSink, StepOutputs};
use crate::domain::value_objects::ContentHash;
use crate::error::{Error, Result};
use crate::infrastructure::load_inventory;
use crate::ui::ci::CiLog;

/// What a successful run selected and emitted
#[derive(Debug, Clone)]
pub struct ParseConfigResult {
    pub host: HostRecord,
    pub hash: ContentHash,
    pub outputs: StepOutputs,
}

/// Parse config use case, parameterized by its output port
pub struct ParseConfigUseCase<S: StepOutputSink> {
    outputs: S,
}

impl<S: StepOutputSink> ParseConfigUseCase<S> {
    pub fn new(outputs: S) -> Self {
        Self { outputs }
    }

    pub fn execute<W: Write>(
        &self,
        config: &ParserConfig,
        log: &mut CiLog<W>,
    ) -> Result<ParseConfigResult> {
        let path = config.config_path()?;
        tracing::debug!(path = %path.display(), "reading inventory");
        let raw = std::fs::read(&path).map_err(|e| {
            Error::Config(format!(
                "failed to read config file {}: {}",
                config.config_file.display(),
                e
            ))
        })?;

        let loaded = load_inventory(&raw)?;
        let file = config.config_file.display().to_string();
        for warning in &loaded.warnings {
            log.warning_at(&warning.to_string(), &file, warning.line());
        }

        loaded.inventory.validate()?;

        let host = match loaded.inventory.find_host(&config.host_name) {
            Ok(host) => host,
            Err(err) => {
                if err.is_not_found() {
                    // A run that cannot report the miss fails on the output error.
                    self.outputs.write(&StepOutputs::new().set("host-found", "false"))?;
                }
                return Err(err);
            }
        };
        host.validate_for_deploy()?;

        let outputs = host_outputs(host, &loaded.hash);
        self.outputs.write(&outputs)?;

        log.plain("Found host configuration:");
        log.plain(&serde_json::to_string_pretty(&host_summary(host))?);
        if config.validate_only {
            log.notice("Validation only mode: configuration is valid");
        }

        Ok(ParseConfigResult {
            host: host.clone(),
            hash: loaded.hash,
            outputs,
        })
    }
}

/// Step outputs for a selected, valid host
pub fn host_outputs(host: &HostRecord, hash: &ContentHash) -> StepOutputs {
    StepOutputs::new()
        .set("host-found", "true")
        .set("is-valid", "true")
        .set("config-hash", hash.hex())
        .set("ip", host.ip())
        .set("port", host.port())
        .set("user", host.user.as_str())
        .set("compose-path", host.compose_path())
}

fn host_summary(host: &HostRecord) -> serde_json::Value {
    serde_json::json!({
        "name": host.name,
        "address": host.address.as_ref().map(|a| a.as_str()),
        "ip": host.ip(),
        "port": host.port(),
        "user": host.user,
        "docker_compose": {
            "path": host.compose_path(),
        },
    })
}
