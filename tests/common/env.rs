//! Isolated process environment for running the binaries.
//!
//! Each `TestEnv` owns a temp workspace and launches binaries with a scrubbed
//! environment, so inputs come only from what the test sets.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Result of running a binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// The `::error::` annotation lines on stdout
    pub fn errors(&self) -> Vec<&str> {
        self.stdout
            .lines()
            .filter(|l| l.starts_with("::error::"))
            .collect()
    }
}

pub struct TestEnv {
    pub workspace: TempDir,
    vars: Vec<(String, String)>,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            workspace: TempDir::new().expect("Failed to create workspace"),
            vars: Vec::new(),
        }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.workspace.path().join(relative)
    }

    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    pub fn read_file(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    pub fn set(mut self, key: &str, value: impl AsRef<str>) -> Self {
        self.vars.push((key.to_string(), value.as_ref().to_string()));
        self
    }

    pub fn run(&self, bin: &str) -> TestResult {
        self.run_in(bin, self.workspace.path())
    }

    pub fn run_with_args(&self, bin: &str, args: &[&str]) -> TestResult {
        self.command(bin, self.workspace.path(), args)
    }

    pub fn run_in(&self, bin: &str, cwd: &Path) -> TestResult {
        self.command(bin, cwd, &[])
    }

    fn command(&self, bin: &str, cwd: &Path, args: &[&str]) -> TestResult {
        let mut cmd = Command::new(bin);
        cmd.current_dir(cwd).args(args).env_clear();
        if let Some(path) = std::env::var_os("PATH") {
            cmd.env("PATH", path);
        }
        for (key, value) in &self.vars {
            cmd.env(key, value);
        }
        TestResult::from_output(cmd.output().expect("Failed to execute binary"))
    }
}
