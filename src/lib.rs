//! Library exports for portalgate, shared between the binary and tests.

pub mod config;
pub mod error;
pub mod gate;
pub mod metrics;
pub mod posts;
pub mod remote;
pub mod routes;
pub mod session;
pub mod startup;
pub mod state;
pub mod utils;
pub mod verifier;
pub mod views;
