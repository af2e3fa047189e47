//! Host address value object
//!
//! A raw `IP:PORT` string decomposed at load time. The original string is
//! kept verbatim so re-encoding never changes what the inventory said.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid address format {raw:?}, expected IP:PORT")]
pub struct AddressError {
    pub raw: String,
}

/// `IP:PORT` pair with exactly one colon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address {
    raw: String,
    ip: String,
    port: String,
}

impl Address {
    pub fn parse(raw: &str) -> Result<Self, AddressError> {
        let invalid = || AddressError {
            raw: raw.to_string(),
        };

        let mut parts = raw.split(':');
        let (ip, port) = match (parts.next(), parts.next(), parts.next()) {
            (Some(ip), Some(port), None) => (ip, port),
            _ => return Err(invalid()),
        };
        if ip.is_empty() || port.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            raw: raw.to_string(),
            ip: ip.to_string(),
            port: port.to_string(),
        })
    }

    /// The address exactly as written in the inventory
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn ip(&self) -> &str {
        &self.ip
    }

    pub fn port(&self) -> &str {
        &self.port
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.raw
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
