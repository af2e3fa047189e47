//! Error types for compose-deploy
//!
//! One `thiserror` enum covers both programs. Every variant maps to exit
//! code 1 at the binary edge; nothing is retried or recovered locally.

use std::process::ExitStatus;
use thiserror::Error;

/// Result type alias for compose-deploy operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid input parameters
    #[error("configuration error: {0}")]
    Config(String),

    /// Private key could not be parsed or used
    #[error("authentication error: {0}")]
    Auth(String),

    /// Transport to the remote host could not be established
    #[error("failed to connect to {target}: {message}")]
    Connect { target: String, message: String },

    /// Operation attempted outside the connected state
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// Remote command could not be started or exited unsuccessfully
    #[error("command `{command}` failed ({status}): {output}")]
    Exec {
        command: String,
        status: String,
        output: String,
    },

    /// File copy to the remote host failed
    #[error("transfer of {path} failed: {message}")]
    Transfer { path: String, message: String },

    /// Inventory structure or field problem
    #[error("{0}")]
    Validation(String),

    /// Host lookup miss
    #[error("host not found: {0}")]
    NotFound(String),

    /// Step outputs could not be written
    #[error("unable to write step outputs: {0}")]
    Output(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML decoding error
    #[error("parsing yaml: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Session state violations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("not connected")]
    NotConnected,
}

impl Error {
    /// Build an `Exec` error from a finished process status
    pub fn exec(command: &str, status: ExitStatus, output: impl Into<String>) -> Self {
        let status = match status.code() {
            Some(code) => format!("exit code {}", code),
            None => "terminated by signal".to_string(),
        };
        Error::Exec {
            command: command.to_string(),
            status,
            output: output.into(),
        }
    }

    /// Build an `Exec` error for a command that could not be started at all
    pub fn exec_spawn(command: &str, err: impl std::fmt::Display) -> Self {
        Error::Exec {
            command: command.to_string(),
            status: "not started".to_string(),
            output: err.to_string(),
        }
    }

    pub fn transfer(path: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Error::Transfer {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Whether this is a host lookup miss rather than any other failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Captured output of a failed remote command, if any
    pub fn command_output(&self) -> Option<&str> {
        match self {
            Error::Exec { output, .. } => Some(output),
            _ => None,
        }
    }
}
