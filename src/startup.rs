//! Application startup and server initialization.
//!
//! Builds the shared state and router, binds the listener and serves until
//! the process is stopped.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ConfigV1;
use crate::routes;
use crate::state::AppState;

/// Initializes and runs the application server.
///
/// # Errors
///
/// Returns an error if the server fails to bind to the configured address
/// or encounters a runtime error while serving.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(config.clone());
    let app = routes::create_router(state);

    info!("Starting server on {}", config.bind_address);
    info!(
        "Gating '{}' and {:?} against {}",
        config.gate.login_path,
        config.gate.protected_prefixes,
        config.remote.verify_url()
    );

    let listener = TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
