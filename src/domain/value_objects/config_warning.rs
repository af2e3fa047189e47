//! Configuration warning value object.

use std::fmt;

/// Non-fatal inventory finding surfaced as a CI warning annotation.
///
/// Warnings never fail a load; they only point at likely typos or
/// ambiguous entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// Key the host schema does not know about
    UnknownKey {
        /// Dotted path of the key (e.g. `hosts.0.adress`)
        path: String,
        /// The line number (1-indexed) if available
        line: Option<usize>,
        /// A suggested correction if available
        suggestion: Option<String>,
    },
    /// Host name used more than once; lookups take the first entry
    DuplicateHost { name: String },
}

impl ConfigWarning {
    pub fn line(&self) -> Option<usize> {
        match self {
            ConfigWarning::UnknownKey { line, .. } => *line,
            ConfigWarning::DuplicateHost { .. } => None,
        }
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::UnknownKey {
                path, suggestion, ..
            } => {
                write!(f, "unknown config key '{}'", path)?;
                if let Some(s) = suggestion {
                    write!(f, ". Did you mean '{}'?", s)?;
                }
                Ok(())
            }
            ConfigWarning::DuplicateHost { name } => write!(
                f,
                "host '{}' is defined more than once; the first definition is used",
                name
            ),
        }
    }
}
