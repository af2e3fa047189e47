//! Configuration types
//!
//! Raw inputs arrive as optional strings (flag or environment variable).
//! One validation pass turns them into typed configs; nothing downstream
//! reads the environment again.

use std::fmt;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use clap::Args;

use super::env_validator::EnvVarValidator;
use crate::error::{Error, Result};

/// How the SSH client treats the server's host key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostKeyPolicy {
    /// Only accept keys already present in known hosts
    Strict,
    /// Trust on first use; the fingerprint is recorded in the session's
    /// known-hosts file and enforced for the rest of the run
    #[default]
    AcceptNew,
    /// Accept any key and record nothing
    Insecure,
}

impl HostKeyPolicy {
    pub const VALID_VALUES: &'static [&'static str] = &["strict", "accept-new", "insecure"];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "strict" => Some(HostKeyPolicy::Strict),
            "accept-new" | "tofu" => Some(HostKeyPolicy::AcceptNew),
            "insecure" => Some(HostKeyPolicy::Insecure),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HostKeyPolicy::Strict => "strict",
            HostKeyPolicy::AcceptNew => "accept-new",
            HostKeyPolicy::Insecure => "insecure",
        }
    }
}

impl fmt::Display for HostKeyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// PEM private key text; never printed
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey(String);

impl PrivateKey {
    pub fn new(pem: impl Into<String>) -> Self {
        Self(pem.into())
    }

    /// Key text with the trailing newline OpenSSH requires
    pub fn to_file_contents(&self) -> String {
        let trimmed = self.0.trim_end_matches(['\r', '\n']);
        format!("{}\n", trimmed)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// Who and where to connect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshTarget {
    pub user: String,
    pub host: String,
    pub port: u16,
}

impl SshTarget {
    /// `user@host`, as the ssh client expects it
    pub fn destination(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }
}

impl fmt::Display for SshTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.user, self.host, self.port)
    }
}

/// Everything the SSH session needs to authenticate
#[derive(Debug, Clone)]
pub struct SshConfig {
    pub target: SshTarget,
    pub private_key: PrivateKey,
    pub host_key_policy: HostKeyPolicy,
    /// Known-hosts content seeded into the session
    pub known_hosts: Option<String>,
}

/// Raw deploy inputs
#[derive(Args, Debug, Clone, Default)]
pub struct DeployInputs {
    /// SSH login user
    #[arg(long, env = "SSH_USER")]
    pub ssh_user: Option<String>,

    /// PEM-encoded private key
    #[arg(long, env = "SSH_KEY", hide_env_values = true)]
    pub ssh_key: Option<String>,

    /// Remote host name or IP
    #[arg(long, env = "SSH_HOST")]
    pub ssh_host: Option<String>,

    /// Remote SSH port
    #[arg(long, env = "SSH_PORT")]
    pub ssh_port: Option<String>,

    /// Local docker-compose file to ship
    #[arg(long, env = "COMPOSE_FILE")]
    pub compose_file: Option<String>,

    /// Image tag written to the remote .env as DOCKER_TAG
    #[arg(long, env = "DOCKER_TAG")]
    pub docker_tag: Option<String>,

    /// Host key policy: strict, accept-new or insecure
    #[arg(long, env = "SSH_HOST_KEY_POLICY")]
    pub host_key_policy: Option<String>,

    /// Known-hosts lines to trust
    #[arg(long, env = "SSH_KNOWN_HOSTS", hide_env_values = true)]
    pub known_hosts: Option<String>,

    /// Remote working directory (defaults to the login directory)
    #[arg(long, env = "REMOTE_DIR")]
    pub remote_dir: Option<String>,
}

/// Validated deploy configuration
#[derive(Debug, Clone)]
pub struct DeployConfig {
    pub ssh: SshConfig,
    pub compose_file: PathBuf,
    pub docker_tag: String,
    pub remote_dir: Option<String>,
}

impl DeployInputs {
    /// Validate all inputs in one pass, warning to stdout
    pub fn validate(self) -> Result<DeployConfig> {
        self.validate_with_writer(&mut std::io::stdout())
    }

    /// Validate with a custom warning writer (for testing)
    pub fn validate_with_writer<W: Write>(self, writer: &mut W) -> Result<DeployConfig> {
        let required = [
            ("SSH_USER", &self.ssh_user),
            ("SSH_KEY", &self.ssh_key),
            ("SSH_HOST", &self.ssh_host),
            ("SSH_PORT", &self.ssh_port),
            ("COMPOSE_FILE", &self.compose_file),
            ("DOCKER_TAG", &self.docker_tag),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| non_empty(value).is_none())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(Error::Config(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        let port_raw = required_value(&self.ssh_port)?;
        let port = parse_port(&port_raw)?;

        let host_key_policy = match non_empty(&self.host_key_policy) {
            Some(raw) => EnvVarValidator::new("SSH_HOST_KEY_POLICY", HostKeyPolicy::VALID_VALUES)
                .parse_with_writer(&raw, HostKeyPolicy::parse, HostKeyPolicy::default(), writer),
            None => HostKeyPolicy::default(),
        };

        Ok(DeployConfig {
            ssh: SshConfig {
                target: SshTarget {
                    user: required_value(&self.ssh_user)?,
                    host: required_value(&self.ssh_host)?,
                    port,
                },
                private_key: PrivateKey::new(required_value(&self.ssh_key)?),
                host_key_policy,
                known_hosts: non_empty(&self.known_hosts),
            },
            compose_file: PathBuf::from(required_value(&self.compose_file)?),
            docker_tag: required_value(&self.docker_tag)?,
            remote_dir: non_empty(&self.remote_dir),
        })
    }
}

/// Raw inventory parser inputs
#[derive(Args, Debug, Clone, Default)]
pub struct ParserInputs {
    /// Inventory YAML, relative to the workspace
    #[arg(long, env = "CONFIG_FILE")]
    pub config_file: Option<String>,

    /// Host to select from the inventory
    #[arg(long, env = "HOST_NAME")]
    pub host_name: Option<String>,

    /// Only validate; downstream steps branch on this
    #[arg(long, env = "VALIDATE_ONLY")]
    pub validate_only: Option<String>,

    /// Workspace root the config path is resolved against
    #[arg(long, env = "GITHUB_WORKSPACE")]
    pub workspace: Option<String>,

    /// File that receives key=value step outputs
    #[arg(long, env = "GITHUB_OUTPUT")]
    pub output_file: Option<String>,
}

/// Validated inventory parser configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    pub config_file: PathBuf,
    pub host_name: String,
    pub validate_only: bool,
    pub workspace: PathBuf,
    /// Resolved lazily; a missing destination only fails at emission time
    pub output_file: Option<PathBuf>,
}

impl ParserInputs {
    pub fn validate(self) -> Result<ParserConfig> {
        self.validate_with_writer(&mut std::io::stdout())
    }

    pub fn validate_with_writer<W: Write>(self, writer: &mut W) -> Result<ParserConfig> {
        let required = [
            ("CONFIG_FILE", &self.config_file),
            ("HOST_NAME", &self.host_name),
            ("GITHUB_WORKSPACE", &self.workspace),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| non_empty(value).is_none())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(Error::Config(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        let validate_only = match non_empty(&self.validate_only) {
            Some(raw) => EnvVarValidator::new("VALIDATE_ONLY", &["true", "false"])
                .parse_with_writer(&raw, parse_bool, false, writer),
            None => false,
        };

        Ok(ParserConfig {
            config_file: PathBuf::from(required_value(&self.config_file)?),
            host_name: required_value(&self.host_name)?,
            validate_only,
            workspace: PathBuf::from(required_value(&self.workspace)?),
            output_file: non_empty(&self.output_file).map(PathBuf::from),
        })
    }
}

impl ParserConfig {
    /// Config path joined onto the workspace after lexical normalisation.
    ///
    /// Absolute paths are treated as workspace-relative; `..` may not climb
    /// above the workspace root.
    pub fn config_path(&self) -> Result<PathBuf> {
        let relative = normalize_relative(&self.config_file).ok_or_else(|| {
            Error::Validation(format!(
                "config file '{}' escapes the workspace",
                self.config_file.display()
            ))
        })?;
        Ok(self.workspace.join(relative))
    }
}

fn normalize_relative(path: &Path) -> Option<PathBuf> {
    let mut parts: Vec<&std::ffi::OsStr> = Vec::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
            Component::ParentDir => {
                parts.pop()?;
            }
            Component::Normal(part) => parts.push(part),
        }
    }
    Some(parts.iter().collect())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn parse_port(raw: &str) -> Result<u16> {
    match raw.trim().parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(Error::Config(format!(
            "invalid SSH_PORT value '{}': expected an integer between 1 and 65535",
            raw
        ))),
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

fn required_value(value: &Option<String>) -> Result<String> {
    non_empty(value).ok_or_else(|| Error::Config("missing required value".to_string()))
}
