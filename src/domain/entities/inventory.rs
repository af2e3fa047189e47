//! Inventory entity - ordered collection of host records

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

use super::host::HostRecord;
use crate::error::{Error, Result};

/// Root of the inventory document
///
/// ```yaml
/// hosts:
///   - name: web
///     address: 10.0.0.5:22
///     user: deploy
///     docker_compose:
///       path: deploy/web/docker-compose.yml
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub hosts: Vec<HostRecord>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<HostRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<HostRecord>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Inventory {
    pub fn new(hosts: Vec<HostRecord>) -> Self {
        Self { hosts }
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    /// Structural and per-entry checks; stops at the first problem
    pub fn validate(&self) -> Result<()> {
        if self.hosts.is_empty() {
            return Err(Error::Validation(
                "no hosts defined in configuration".to_string(),
            ));
        }
        for (i, host) in self.hosts.iter().enumerate() {
            host.validate_required(i + 1)?;
        }
        Ok(())
    }

    /// First host whose name equals `name`
    pub fn find_host(&self, name: &str) -> Result<&HostRecord> {
        self.hosts
            .iter()
            .find(|h| h.name == name)
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    /// Names that appear more than once, in first-seen order
    pub fn duplicate_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();
        for host in &self.hosts {
            if !seen.insert(host.name.as_str()) && reported.insert(host.name.as_str()) {
                duplicates.push(host.name.clone());
            }
        }
        duplicates
    }
}
