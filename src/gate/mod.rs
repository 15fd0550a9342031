//! The request gate: decides, before any handler runs, whether a request
//! passes, is redirected, and whether the session token is cleared.

pub mod decision;
pub mod middleware;
pub mod paths;

pub use decision::{Gate, GateOutcome};
pub use middleware::gate_requests;
pub use paths::{PathClass, PathTable};
