//! compose-deploy - GitHub Actions helpers for Docker Compose hosts
//!
//! Two programs share this library:
//! - `docker-deploy` ships a compose file and a `.env` to one host over SSH
//!   and runs `docker compose pull` / `up -d` there.
//! - `parse-server-config` reads a YAML host inventory, selects one host and
//!   writes its connection details as step outputs.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod shell;
pub mod ui;

// Re-exports for convenience
pub use application::{DeployUseCase, ParseConfigUseCase};
pub use config::{DeployConfig, DeployInputs, ParserConfig, ParserInputs};
pub use error::{Error, Result, SessionError};
