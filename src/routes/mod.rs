//! HTTP route definitions and handlers.
//!
//! Routes are grouped by concern (session, posts, pages, operations) and all
//! of them sit behind the request gate.

mod health_routes;
mod metrics_routes;
mod page_routes;
mod post_routes;
mod session_routes;

use axum::middleware::from_fn_with_state;
use axum::Router;

use crate::gate::gate_requests;
use crate::state::AppState;

/// Creates the application router with all configured routes.
///
/// The gate wraps every route, so it runs before any handler.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(session_routes::routes())
        .merge(post_routes::routes())
        .merge(page_routes::routes())
        .merge(health_routes::routes())
        .merge(metrics_routes::routes())
        .layer(from_fn_with_state(state.clone(), gate_requests))
        .with_state(state)
}
