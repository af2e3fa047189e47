//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod deploy_events;
pub mod remote_session;
pub mod step_output;

pub use deploy_events::{DeployEvent, DeployEventSink, DeployStep, NoopEventSink};
pub use remote_session::{base_name, RemoteSession};
pub use step_output::{StepOutputSink, StepOutputs};
