//! Post listing page.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::{routing::get, Router};

use crate::metrics::MetricsRecorder;
use crate::posts::PostsView;
use crate::session::read_token;
use crate::state::AppState;
use crate::views::posts::posts_page;

pub fn routes() -> Router<AppState> {
    Router::new().route("/posts", get(list_posts))
}

/// Renders the first page of posts, or the error state with `502`.
async fn list_posts(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let token = read_token(&headers);
    let view = state.posts.load(token.as_deref()).await;
    state.metrics.record_posts_load(view.result_label());

    let status = match view {
        PostsView::Page(_) => StatusCode::OK,
        PostsView::Error(_) => StatusCode::BAD_GATEWAY,
    };
    (status, Html(posts_page(&view)))
}
