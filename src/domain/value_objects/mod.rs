//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod address;
mod config_warning;
mod hash;

pub use address::{Address, AddressError};
pub use config_warning::ConfigWarning;
pub use hash::ContentHash;
