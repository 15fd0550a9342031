//! Login form, credential submission and logout.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{
    routing::{get, post},
    Form, Router,
};
use tracing::info;

use crate::error::PortalError;
use crate::metrics::MetricsRecorder;
use crate::session::{clear_token_cookie, login_failure_message, read_token, token_cookie, Credentials};
use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;
use crate::views::login::login_page;

/// Registers session routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_form).post(login))
        .route("/logout", post(logout))
}

async fn login_form() -> Html<String> {
    Html(login_page(None, ""))
}

/// Exchanges the submitted credentials for a session cookie.
///
/// Success always lands on the configured landing page. Failures re-render
/// the form with a single user-facing message.
async fn login(
    State(state): State<AppState>,
    Form(credentials): Form<Credentials>,
) -> Result<Response, HTTPError> {
    match state.sessions.exchange(&credentials).await {
        Ok(grant) => {
            let cookie = token_cookie(
                &grant.token,
                grant.max_age_seconds,
                state.config.session.secure_cookie,
            )?;
            state.metrics.record_login_attempt("success");
            Ok((
                [(SET_COOKIE, cookie)],
                Redirect::to(&state.config.gate.landing_page),
            )
                .into_response())
        }
        Err(e) => {
            let (status, result) = match e {
                PortalError::Validation(_) => (StatusCode::BAD_REQUEST, "invalid_input"),
                _ => (StatusCode::UNAUTHORIZED, "failure"),
            };
            state.metrics.record_login_attempt(result);
            let page = login_page(Some(&login_failure_message(&e)), &credentials.email);
            Ok((status, Html(page)).into_response())
        }
    }
}

/// Clears the session cookie and forgets any cached verification for it.
async fn logout(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = read_token(&headers) {
        state.verifier.invalidate(&token);
        info!("Session signed out");
    }
    (
        [(
            SET_COOKIE,
            clear_token_cookie(state.config.session.secure_cookie),
        )],
        Redirect::to(&state.config.gate.login_path),
    )
}
