//! Shared application state.
//!
//! Holds the configuration and the long-lived services every handler and the
//! gate middleware draw on.

use std::sync::Arc;

use crate::config::ConfigV1;
use crate::gate::Gate;
use crate::metrics::Metrics;
use crate::posts::PostViewer;
use crate::remote::PortalClient;
use crate::session::SessionWriter;
use crate::verifier::{create_verifier, TokenVerifier};

/// Application state shared across all HTTP handlers.
///
/// Cloned per request; every field is a cheap handle.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Per-request access decision.
    pub gate: Arc<Gate>,
    /// Verifier shared with the gate, kept here for logout invalidation.
    pub verifier: Arc<dyn TokenVerifier>,
    /// Credential exchange for the login form.
    pub sessions: Arc<SessionWriter>,
    pub posts: Arc<PostViewer>,
    pub metrics: Metrics,
}

impl AppState {
    /// Wires one shared remote client into every service.
    pub fn new(config: Arc<ConfigV1>) -> Self {
        let client = Arc::new(PortalClient::new(&config.remote));
        let verifier = create_verifier(client.clone(), &config);
        Self::with_verifier(config, client, verifier)
    }

    /// Like [`AppState::new`] but with a caller-supplied verifier.
    pub fn with_verifier(
        config: Arc<ConfigV1>,
        client: Arc<PortalClient>,
        verifier: Arc<dyn TokenVerifier>,
    ) -> Self {
        let metrics = Metrics::new();
        let gate = Arc::new(Gate::new(&config.gate, verifier.clone(), metrics.clone()));
        AppState {
            gate,
            verifier,
            sessions: Arc::new(SessionWriter::new(client.clone())),
            posts: Arc::new(PostViewer::new(client)),
            metrics,
            config,
        }
    }
}
