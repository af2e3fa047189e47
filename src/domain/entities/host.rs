//! Host record entity

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Address;
use crate::error::{Error, Result};

/// Docker Compose settings for one host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerCompose {
    #[serde(default)]
    pub path: String,
}

/// One named host in the inventory
///
/// `name`, `address` and `user` are mandatory; the compose path is only
/// required once the host is selected for deployment. Missing fields decode
/// as empty so validation can name them instead of failing inside serde.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub docker_compose: DockerCompose,
}

impl HostRecord {
    pub fn ip(&self) -> &str {
        self.address.as_ref().map(Address::ip).unwrap_or_default()
    }

    pub fn port(&self) -> &str {
        self.address.as_ref().map(Address::port).unwrap_or_default()
    }

    pub fn compose_path(&self) -> &str {
        &self.docker_compose.path
    }

    /// Check the fields every inventory entry must carry.
    ///
    /// `position` is the 1-based entry index, used when the name itself is
    /// missing.
    pub fn validate_required(&self, position: usize) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(format!(
                "host #{} missing required field: name",
                position
            )));
        }
        if self.address.is_none() {
            return Err(Error::Validation(format!(
                "host {} missing required field: address",
                self.name
            )));
        }
        if self.user.trim().is_empty() {
            return Err(Error::Validation(format!(
                "host {} missing required field: user",
                self.name
            )));
        }
        Ok(())
    }

    /// Additional check for the host selected as deploy target
    pub fn validate_for_deploy(&self) -> Result<()> {
        if self.compose_path().trim().is_empty() {
            return Err(Error::Validation(format!(
                "host {} is missing required docker compose path",
                self.name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(name: &str, address: Option<&str>, user: &str, compose: &str) -> HostRecord {
        HostRecord {
            name: name.to_string(),
            address: address.map(|a| Address::parse(a).unwrap()),
            user: user.to_string(),
            docker_compose: DockerCompose {
                path: compose.to_string(),
            },
        }
    }

    #[test]
    fn complete_host_passes_both_checks() {
        let h = host("web", Some("10.0.0.5:2222"), "deploy", "compose/web.yml");
        assert!(h.validate_required(1).is_ok());
        assert!(h.validate_for_deploy().is_ok());
        assert_eq!(h.ip(), "10.0.0.5");
        assert_eq!(h.port(), "2222");
    }

    #[test]
    fn missing_name_uses_position() {
        let err = host("", Some("10.0.0.5:22"), "deploy", "").validate_required(3).unwrap_err();
        assert_eq!(err.to_string(), "host #3 missing required field: name");
    }

    #[test]
    fn missing_address_is_named() {
        let err = host("web", None, "deploy", "").validate_required(1).unwrap_err();
        assert_eq!(err.to_string(), "host web missing required field: address");
    }

    #[test]
    fn missing_user_is_named() {
        let err = host("web", Some("10.0.0.5:22"), "  ", "").validate_required(1).unwrap_err();
        assert_eq!(err.to_string(), "host web missing required field: user");
    }

    #[test]
    fn compose_path_only_needed_for_deploy() {
        let h = host("web", Some("10.0.0.5:22"), "deploy", "");
        assert!(h.validate_required(1).is_ok());
        let err = h.validate_for_deploy().unwrap_err();
        assert!(err.to_string().contains("missing required docker compose path"));
    }

    #[test]
    fn accessors_are_empty_without_address() {
        let h = host("web", None, "deploy", "");
        assert_eq!(h.ip(), "");
        assert_eq!(h.port(), "");
    }
}
