//! Configuration module
//!
//! Both programs take their inputs from flags that fall back to the
//! environment variables GitHub Actions sets for the step:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (`SSH_*`, `CONFIG_FILE`, `GITHUB_*`, ...)
//! 3. Built-in defaults for optional settings

mod env_validator;
#[cfg(test)]
mod tests;
mod types;

pub use env_validator::{levenshtein, suggest, EnvVarValidator};
pub use types::{
    DeployConfig, DeployInputs, HostKeyPolicy, ParserConfig, ParserInputs, PrivateKey, SshConfig,
    SshTarget,
};
