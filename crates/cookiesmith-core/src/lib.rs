//! CookieSmith Core — configuration, error taxonomy, identifiers, payload
//! assembly.

pub mod assemble;
pub mod config;
pub mod error;
pub mod ids;
pub mod types;

pub use config::{HarvesterConfig, LaunchConfig, NavigationConfig, WaitStrategy};
pub use error::{Error, Result};
pub use types::CookieRecord;
