//! SSH remote session adapter
//!
//! - `session` - `SshSession`, the `RemoteSession` implementation
//! - `scp` - the sink-mode stream fed during a transfer

pub mod scp;
mod session;

pub use session::SshSession;
