//! StepOutput port - key=value results handed back to the CI runner

use crate::error::Result;

/// Ordered key/value pairs emitted by one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepOutputs {
    entries: Vec<(String, String)>,
}

impl StepOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Destination for step outputs.
///
/// Failing to deliver outputs is fatal: downstream steps would otherwise
/// run on stale or missing values.
pub trait StepOutputSink {
    fn write(&self, outputs: &StepOutputs) -> Result<()>;
}
