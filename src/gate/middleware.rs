use axum::extract::{Request, State};
use axum::http::header::SET_COOKIE;
use axum::http::Method;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use super::decision::GateOutcome;
use crate::session::{clear_token_cookie, read_token, sets_token};
use crate::state::AppState;

/// Axum middleware running the gate in front of every route.
///
/// The decision, including any verification call, completes before the
/// handler is invoked. Never fails: every branch is a navigation.
pub async fn gate_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let safe_method = matches!(*request.method(), Method::GET | Method::HEAD);
    let token = read_token(request.headers());
    let outcome = state.gate.evaluate(&path, token.as_deref()).await;

    let (mut response, clear_token) = match outcome {
        GateOutcome::PassThrough { clear_token } => (next.run(request).await, clear_token),
        // 307 would replay a form post against a GET-only page.
        GateOutcome::Redirect {
            location,
            clear_token,
        } if safe_method => (Redirect::temporary(&location).into_response(), clear_token),
        GateOutcome::Redirect {
            location,
            clear_token,
        } => (Redirect::to(&location).into_response(), clear_token),
    };

    // A handler that issued a fresh session wins over the stale one.
    if clear_token && !sets_token(response.headers()) {
        response.headers_mut().append(
            SET_COOKIE,
            clear_token_cookie(state.config.session.secure_cookie),
        );
    }
    response
}
