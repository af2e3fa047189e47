//! OpenSSH-backed remote session
//!
//! `open` authenticates once and leaves a multiplexing master running on a
//! private control socket. Every command, existence check and transfer then
//! opens its own channel over that master, so one TCP connection carries the
//! whole deploy.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::thread;

use tempfile::TempDir;

use super::scp;
use crate::config::{HostKeyPolicy, SshConfig};
use crate::domain::ports::RemoteSession;
use crate::error::{Error, Result, SessionError};
use crate::shell;

/// Files backing one connection; removed when the session closes
struct Connection {
    dir: TempDir,
}

impl Connection {
    fn key_path(&self) -> PathBuf {
        self.dir.path().join("id_deploy")
    }

    fn known_hosts_path(&self) -> PathBuf {
        self.dir.path().join("known_hosts")
    }

    fn control_path(&self) -> PathBuf {
        self.dir.path().join("ctl")
    }

    fn log_path(&self) -> PathBuf {
        self.dir.path().join("master.log")
    }
}

enum SessionState {
    Unconnected,
    Connected(Connection),
    Closed,
}

/// Remote session driven through the system `ssh` client
pub struct SshSession {
    config: SshConfig,
    working_dir: Option<String>,
    state: SessionState,
}

impl SshSession {
    /// Create an unconnected session
    pub fn new(config: SshConfig) -> Self {
        Self {
            config,
            working_dir: None,
            state: SessionState::Unconnected,
        }
    }

    /// Create and connect in one step
    pub fn open(config: SshConfig) -> Result<Self> {
        let mut session = Self::new(config);
        session.connect()?;
        Ok(session)
    }

    /// Run commands and receive files relative to `dir` instead of the
    /// login directory
    pub fn with_working_dir(mut self, dir: impl Into<String>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.state, SessionState::Connected(_))
    }

    /// Authenticate and start the master connection.
    ///
    /// On failure the session stays unconnected and all key material is
    /// removed.
    pub fn connect(&mut self) -> Result<()> {
        match self.state {
            SessionState::Connected(_) => return Ok(()),
            SessionState::Closed => return Err(SessionError::NotConnected.into()),
            SessionState::Unconnected => {}
        }

        let target = self.config.target.to_string();
        let connect_err = |message: String| Error::Connect {
            target: target.clone(),
            message,
        };

        let dir = tempfile::Builder::new()
            .prefix("compose-deploy-")
            .tempdir()
            .map_err(|e| connect_err(format!("failed to create session directory: {}", e)))?;
        let conn = Connection { dir };

        write_private(&conn.key_path(), &self.config.private_key.to_file_contents())
            .map_err(|e| Error::Auth(format!("failed to store private key: {}", e)))?;
        let seed = self.config.known_hosts.as_deref().unwrap_or("");
        fs::write(conn.known_hosts_path(), seed)
            .map_err(|e| connect_err(format!("failed to write known hosts: {}", e)))?;

        verify_private_key(&conn.key_path())?;

        tracing::debug!(
            remote = %self.config.target,
            policy = %self.config.host_key_policy,
            "starting ssh master connection"
        );
        let status = self
            .ssh_command(&conn)
            .args(["-o", "ControlMaster=yes", "-f", "-N", "-E"])
            .arg(conn.log_path())
            .arg(self.config.target.destination())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| connect_err(format!("failed to start ssh: {}", e)))?;

        if !status.success() {
            let log = fs::read_to_string(conn.log_path()).unwrap_or_default();
            let log = log.trim();
            let message = if log.is_empty() {
                format!("ssh exited with {}", status)
            } else {
                log.to_string()
            };
            return Err(connect_err(message));
        }

        tracing::info!(remote = %self.config.target, "ssh session established");
        self.state = SessionState::Connected(conn);
        Ok(())
    }

    fn connection(&self) -> Result<&Connection> {
        match &self.state {
            SessionState::Connected(conn) => Ok(conn),
            _ => Err(SessionError::NotConnected.into()),
        }
    }

    /// `ssh` with the options every invocation shares
    fn ssh_command(&self, conn: &Connection) -> Command {
        let mut cmd = Command::new("ssh");
        cmd.args(ssh_options(
            &self.config,
            &conn.key_path(),
            &conn.known_hosts_path(),
            &conn.control_path(),
        ));
        cmd
    }

    /// Command for a new channel over the master
    fn channel_command(&self, conn: &Connection, remote_command: &str) -> Command {
        let mut cmd = self.ssh_command(conn);
        cmd.args(["-o", "ControlMaster=no", "-T"])
            .arg(self.config.target.destination())
            .arg("--")
            .arg(self.in_working_dir(remote_command));
        cmd
    }

    fn in_working_dir(&self, remote_command: &str) -> String {
        match &self.working_dir {
            Some(dir) => format!("cd {} && {}", shell::quote_path(dir), remote_command),
            None => remote_command.to_string(),
        }
    }

    fn exec(&self, remote_command: &str) -> Result<Output> {
        let conn = self.connection()?;
        tracing::debug!(command = remote_command, "opening ssh channel");
        self.channel_command(conn, remote_command)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| Error::exec_spawn(remote_command, e))
    }
}

impl RemoteSession for SshSession {
    fn run_command(&self, command: &str) -> Result<String> {
        let output = self.exec(command)?;
        let combined = combined_output(&output);
        if !output.status.success() {
            return Err(Error::exec(command, output.status, combined));
        }
        Ok(combined)
    }

    fn transfer(&self, local_path: &Path, remote_path: &str) -> Result<()> {
        let conn = self.connection()?;
        let local = local_path.display().to_string();

        let (dir, name) = scp::split_remote_path(remote_path);
        scp::validate_name(&name).map_err(|e| Error::transfer(&local, e))?;

        let file = File::open(local_path)
            .map_err(|e| Error::transfer(&local, format!("failed to open local file: {}", e)))?;
        let metadata = file
            .metadata()
            .map_err(|e| Error::transfer(&local, format!("failed to stat file: {}", e)))?;
        if !metadata.is_file() {
            return Err(Error::transfer(&local, "not a regular file"));
        }
        let size = metadata.len();

        let sink = scp::sink_command(&dir);
        tracing::debug!(local = %local, remote = remote_path, size, "starting scp sink");
        let mut child = self
            .channel_command(conn, &sink)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::transfer(&local, format!("failed to start scp receiver: {}", e)))?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::transfer(&local, "scp receiver has no input stream"))?;

        let (written, output) = thread::scope(|s| {
            let writer = s.spawn(|| scp::write_sink_stream(stdin, file, size, &name));
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("scp writer panicked")));
            (written, output)
        });

        let output = output.map_err(|e| {
            Error::transfer(&local, format!("failed to wait for scp receiver: {}", e))
        })?;

        if !output.status.success() {
            let message = match scp::check_acks(&output.stdout) {
                Err(ack) => ack,
                Ok(()) => {
                    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                    if stderr.is_empty() {
                        format!("scp receiver exited with {}", output.status)
                    } else {
                        stderr
                    }
                }
            };
            return Err(Error::transfer(&local, message));
        }
        let sent =
            written.map_err(|e| Error::transfer(&local, format!("failed to send file: {}", e)))?;
        scp::check_acks(&output.stdout).map_err(|e| Error::transfer(&local, e))?;

        tracing::debug!(local = %local, remote = remote_path, bytes = sent, "transfer complete");
        Ok(())
    }

    fn exists(&self, remote_path: &str) -> Result<bool> {
        let command = format!("test -e {}", shell::quote_path(remote_path));
        let output = self.exec(&command)?;
        match output.status.code() {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            _ => Err(Error::exec(&command, output.status, combined_output(&output))),
        }
    }

    fn close(&mut self) {
        let state = std::mem::replace(&mut self.state, SessionState::Closed);
        if let SessionState::Connected(conn) = state {
            let result = self
                .ssh_command(&conn)
                .args(["-O", "exit"])
                .arg(self.config.target.destination())
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status();
            if let Err(e) = result {
                tracing::debug!(error = %e, "failed to stop ssh master");
            }
            tracing::debug!(remote = %self.config.target, "ssh session closed");
        }
    }
}

impl Drop for SshSession {
    fn drop(&mut self) {
        self.close();
    }
}

/// Options shared by the master, every channel and the exit request
fn ssh_options(
    config: &SshConfig,
    key_path: &Path,
    known_hosts_path: &Path,
    control_path: &Path,
) -> Vec<String> {
    let mut args = vec![
        "-p".to_string(),
        config.target.port.to_string(),
        "-i".to_string(),
        key_path.display().to_string(),
        "-o".to_string(),
        "IdentitiesOnly=yes".to_string(),
        "-o".to_string(),
        "BatchMode=yes".to_string(),
        "-o".to_string(),
        format!("ControlPath={}", control_path.display()),
    ];
    for option in host_key_options(config.host_key_policy, known_hosts_path) {
        args.push("-o".to_string());
        args.push(option);
    }
    args
}

fn host_key_options(policy: HostKeyPolicy, known_hosts_path: &Path) -> Vec<String> {
    match policy {
        HostKeyPolicy::Strict => vec![
            "StrictHostKeyChecking=yes".to_string(),
            format!(
                "UserKnownHostsFile={} ~/.ssh/known_hosts",
                known_hosts_path.display()
            ),
        ],
        HostKeyPolicy::AcceptNew => vec![
            "StrictHostKeyChecking=accept-new".to_string(),
            format!("UserKnownHostsFile={}", known_hosts_path.display()),
        ],
        HostKeyPolicy::Insecure => vec![
            "StrictHostKeyChecking=no".to_string(),
            "UserKnownHostsFile=/dev/null".to_string(),
            "LogLevel=ERROR".to_string(),
        ],
    }
}

/// Derive the public key; an unparseable key fails here, before any dial
fn verify_private_key(key_path: &Path) -> Result<()> {
    let output = Command::new("ssh-keygen")
        .args(["-y", "-P", "", "-f"])
        .arg(key_path)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| Error::Auth(format!("failed to run ssh-keygen: {}", e)))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(Error::Auth(format!("failed to parse private key: {}", stderr)));
    }
    Ok(())
}

fn write_private(path: &Path, contents: &str) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    io::Write::write_all(&mut file, contents.as_bytes())
}

fn combined_output(output: &Output) -> String {
    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    combined
}
