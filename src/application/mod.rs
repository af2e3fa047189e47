//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, value objects, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `DeployUseCase` - Ships the compose project and starts it (transfer, validate, pull, up)
//! - `ParseConfigUseCase` - Selects one host from the inventory and emits its step outputs

pub mod deploy;
pub mod parse_config;

pub use deploy::{connect, DeployFailure, DeployOptions, DeployResult, DeployUseCase};
pub use parse_config::{host_outputs, ParseConfigResult, ParseConfigUseCase};
