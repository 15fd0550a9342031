//! Client for the remote identity & content service.

pub mod client;
pub mod models;

pub use client::PortalClient;
pub use models::*;
