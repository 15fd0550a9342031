//! Static portal pages. The protected ones are only reachable once the gate
//! has verified the session.

use axum::extract::Path;
use axum::response::Html;
use axum::{routing::get, Router};

use crate::state::AppState;
use crate::views::pages::{accounts_page, home_page, profile_page};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/profile", get(profile))
        .route("/accounts", get(accounts))
        .route("/accounts/:account_id", get(account))
}

async fn home() -> Html<String> {
    Html(home_page())
}

async fn profile() -> Html<String> {
    Html(profile_page())
}

async fn accounts() -> Html<String> {
    Html(accounts_page(None))
}

async fn account(Path(account_id): Path<String>) -> Html<String> {
    Html(accounts_page(Some(&account_id)))
}
