use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::error::PortalError;
use crate::remote::{PortalClient, PostPage};

pub const NO_TOKEN: &str = "No authentication token found";
pub const FETCH_FAILED: &str = "Failed to fetch posts";
pub const FETCH_ERRORED: &str = "An error occurred while fetching posts";

/// Either a page of posts or a message to show in its place.
#[derive(Debug, Clone, PartialEq)]
pub enum PostsView {
    Page(PostPage),
    Error(String),
}

impl PostsView {
    pub fn result_label(&self) -> &'static str {
        match self {
            PostsView::Page(_) => "success",
            PostsView::Error(_) => "error",
        }
    }
}

/// Whether a body's `error` field reports a failure. `null`, `false`, `0`
/// and `""` do not.
fn is_error_flag(error: &Value) -> bool {
    match error {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Fetches one page of posts for a session token. No retry, no timeout
/// beyond the transport's own.
pub struct PostViewer {
    client: Arc<PortalClient>,
}

impl PostViewer {
    pub fn new(client: Arc<PortalClient>) -> Self {
        Self { client }
    }

    pub async fn load(&self, token: Option<&str>) -> PostsView {
        let token = match token.filter(|t| !t.is_empty()) {
            Some(token) => token,
            None => return PostsView::Error(NO_TOKEN.to_string()),
        };

        match self.client.list_posts(token).await {
            Ok(listing) => {
                if let Some(err) = listing.error.filter(is_error_flag) {
                    warn!("Post list answered with an error: {}", err);
                    let message = match err {
                        Value::String(s) => s,
                        _ => FETCH_FAILED.to_string(),
                    };
                    return PostsView::Error(message);
                }
                let page = listing.data.unwrap_or_default();
                debug!(
                    "Loaded {} of {} posts",
                    page.rows.len(),
                    page.count
                );
                PostsView::Page(page)
            }
            Err(PortalError::Rejected { status, .. }) => {
                warn!("Post list rejected with status {}", status);
                PostsView::Error(FETCH_FAILED.to_string())
            }
            Err(e) => {
                error!("Error fetching posts: {}", e);
                PostsView::Error(FETCH_ERRORED.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RemoteConfig;
    use mockito::Server;

    fn viewer_for(base_url: String) -> PostViewer {
        let client = PortalClient::new(&RemoteConfig {
            base_url,
            ..RemoteConfig::default()
        });
        PostViewer::new(Arc::new(client))
    }

    #[tokio::test]
    async fn missing_token_makes_no_call() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/post/list")
            .expect(0)
            .create_async()
            .await;

        let view = viewer_for(server.url()).load(None).await;
        assert_eq!(view, PostsView::Error(NO_TOKEN.to_string()));
        m.assert_async().await;
    }

    #[tokio::test]
    async fn page_carries_rows_and_total() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/post/list")
            .match_header("authorization", "tok")
            .with_status(200)
            .with_body(
                r#"{"data": {"rows": [
                    {"id": 1, "description": "Sunset", "type": "photo", "account": {"fullName": "Ada"}},
                    {"id": 2, "description": "Dinner", "type": "review", "account": {"fullName": "Bo"}}
                ], "count": 17}}"#,
            )
            .create_async()
            .await;

        match viewer_for(server.url()).load(Some("tok")).await {
            PostsView::Page(page) => {
                assert_eq!(page.count, 17);
                assert_eq!(page.rows.len(), 2);
                assert_eq!(page.rows[1].account.full_name, "Bo");
            }
            other => panic!("expected a page, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn non_success_status_is_a_fetch_failure() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/post/list")
            .with_status(403)
            .create_async()
            .await;

        let view = viewer_for(server.url()).load(Some("tok")).await;
        assert_eq!(view, PostsView::Error(FETCH_FAILED.to_string()));
    }

    #[tokio::test]
    async fn error_field_in_body_is_shown() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/post/list")
            .with_status(200)
            .with_body(r#"{"error": "Token expired"}"#)
            .create_async()
            .await;

        let view = viewer_for(server.url()).load(Some("tok")).await;
        assert_eq!(view, PostsView::Error("Token expired".to_string()));
    }

    #[tokio::test]
    async fn falsy_error_field_still_shows_posts() {
        let mut server = Server::new_async().await;
        for error in ["false", "\"\"", "0", "null"] {
            let body = format!(r#"{{"error": {error}, "data": {{"rows": [], "count": 3}}}}"#);
            let m = server
                .mock("GET", "/post/list")
                .with_status(200)
                .with_body(body)
                .create_async()
                .await;

            match viewer_for(server.url()).load(Some("tok")).await {
                PostsView::Page(page) => assert_eq!(page.count, 3, "error = {error}"),
                other => panic!("error = {error}: expected a page, got {:?}", other),
            }
            m.remove_async().await;
        }
    }

    #[tokio::test]
    async fn error_flag_without_text_uses_generic_message() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/post/list")
            .with_status(200)
            .with_body(r#"{"error": true}"#)
            .create_async()
            .await;

        let view = viewer_for(server.url()).load(Some("tok")).await;
        assert_eq!(view, PostsView::Error(FETCH_FAILED.to_string()));
    }

    #[tokio::test]
    async fn missing_data_is_an_empty_page() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/post/list")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let view = viewer_for(server.url()).load(Some("tok")).await;
        assert_eq!(view, PostsView::Page(PostPage::default()));
    }

    #[tokio::test]
    async fn transport_failure_is_reported_generically() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let view = viewer_for(format!("http://{}", addr)).load(Some("tok")).await;
        assert_eq!(view, PostsView::Error(FETCH_ERRORED.to_string()));
    }
}
