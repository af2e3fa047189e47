//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all process, file and network I/O.
//!
//! ## Structure
//!
//! - `events/` - deploy event sinks
//! - `ssh/` - OpenSSH remote session and SCP sink stream
//! - `github_output` - step-output file writer
//! - `yaml_inventory` - inventory document loader

pub mod events;
pub mod github_output;
pub mod ssh;
pub mod yaml_inventory;

pub use events::AnnotationEventSink;
pub use github_output::GithubOutputFile;
pub use ssh::SshSession;
pub use yaml_inventory::{load_inventory, LoadedInventory};
