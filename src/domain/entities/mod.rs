//! Domain Entities
//!
//! - `HostRecord` - one named deploy target
//! - `Inventory` - the ordered, validated collection of host records

mod host;
mod inventory;

pub use host::{DockerCompose, HostRecord};
pub use inventory::Inventory;
