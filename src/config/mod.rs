// Re-exports so callers can "use crate::config::*".
pub mod config;
pub mod gate;
pub mod logging;
pub mod remote;

pub use config::*;
pub use gate::*;
pub use logging::*;
pub use remote::*;
