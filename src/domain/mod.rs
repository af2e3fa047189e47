//! Domain Layer
//!
//! Pure types and rules without process or network I/O.
//!
//! ## Structure
//!
//! - `entities/` - Host records and the inventory that holds them
//! - `value_objects/` - Immutable value types (Address, ContentHash)
//! - `ports/` - Interface definitions for infrastructure (RemoteSession,
//!   StepOutputSink, DeployEventSink)

pub mod entities;
pub mod ports;
pub mod value_objects;
