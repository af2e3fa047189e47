//! RemoteSession port - one authenticated connection to a single host
//!
//! The deploy use case talks to the remote host only through this trait,
//! so it can run against the OpenSSH adapter or an in-memory mock.

use std::path::Path;

use crate::error::{Error, Result};

/// Remote command execution and single-file transfer
///
/// Implementations:
/// - `SshSession` - OpenSSH client with a multiplexed master connection
/// - test mocks - in-memory file set and command log
///
/// Every operation outside the connected state fails with
/// `SessionError::NotConnected` before touching the filesystem or network.
pub trait RemoteSession {
    /// Run a command on a fresh channel and return its combined output.
    ///
    /// A non-zero exit is an `Exec` error carrying the output.
    fn run_command(&self, command: &str) -> Result<String>;

    /// Copy one local file to `remote_path`, relative to the session's
    /// working directory.
    fn transfer(&self, local_path: &Path, remote_path: &str) -> Result<()>;

    /// Whether `remote_path` exists on the remote host
    fn exists(&self, remote_path: &str) -> Result<bool>;

    /// Release the connection. Idempotent and infallible.
    fn close(&mut self);

    /// Copy a local file under its own base name
    fn transfer_file(&self, local_path: &Path) -> Result<String> {
        let name = base_name(local_path)?;
        self.transfer(local_path, &name)?;
        Ok(name)
    }
}

/// Final path component as UTF-8, the name a file gets on the remote side
pub fn base_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| Error::transfer(path.display().to_string(), "path has no file name"))
}
