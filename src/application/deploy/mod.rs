//! Deploy Module
//!
//! Ships a compose project to one host and brings it up.
//!
//! ## Structure
//!
//! - `options` - Inputs for a single run (`DeployOptions`)
//! - `result` - Outcome types (`DeployResult`, `DeployFailure`)
//! - `use_case` - The ordered pipeline (`DeployUseCase`) and `connect`
//!
//! ## Usage
//!
//! ```ignore
//! use compose_deploy::application::deploy::{connect, DeployOptions, DeployUseCase};
//!
//! let session = connect(&config, &events)?;
//! let use_case = DeployUseCase::new(session);
//! let result = use_case.execute(&DeployOptions::from_config(&config));
//! ```

mod options;
mod result;
mod use_case;

pub use options::DeployOptions;
pub use result::{DeployFailure, DeployResult};
pub use use_case::{connect, DeployUseCase, ENV_FILE_NAME};
