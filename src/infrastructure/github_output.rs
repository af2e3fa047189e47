//! GitHub Actions step-output file writer
//!
//! Appends `key=value` lines to the file named by `GITHUB_OUTPUT`. Values
//! spanning several lines use the `key<<DELIMITER` form.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::domain::ports::{StepOutputSink, StepOutputs};
use crate::domain::value_objects::ContentHash;
use crate::error::{Error, Result};

pub struct GithubOutputFile {
    path: Option<PathBuf>,
}

impl GithubOutputFile {
    /// `path` is `None` when the runner did not declare an output file
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl StepOutputSink for GithubOutputFile {
    fn write(&self, outputs: &StepOutputs) -> Result<()> {
        let path = self.path.as_ref().ok_or_else(|| {
            Error::Output("GITHUB_OUTPUT environment variable not set".to_string())
        })?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| Error::Output(format!("failed to open {}: {}", path.display(), e)))?;
        file.write_all(render(outputs).as_bytes())
            .map_err(|e| Error::Output(format!("failed to write {}: {}", path.display(), e)))?;

        tracing::debug!(
            path = %path.display(),
            count = outputs.entries().len(),
            "step outputs written"
        );
        Ok(())
    }
}

/// Render outputs in the runner's file-command syntax
pub fn render(outputs: &StepOutputs) -> String {
    let mut rendered = String::new();
    for (key, value) in outputs.entries() {
        if value.contains('\n') || value.contains('\r') {
            let delimiter = delimiter_for(value);
            rendered.push_str(&format!("{}<<{}\n{}\n{}\n", key, delimiter, value, delimiter));
        } else {
            rendered.push_str(&format!("{}={}\n", key, value));
        }
    }
    rendered
}

fn delimiter_for(value: &str) -> String {
    let hash = ContentHash::from_bytes(value.as_bytes());
    let mut delimiter = format!("ghadelimiter_{}", &hash.hex()[..16]);
    while value.contains(&delimiter) {
        delimiter.push('_');
    }
    delimiter
}
