#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use figment::{
    providers::{Format, Yaml},
    Figment,
};
use portalgate::config::{extract, ConfigV1};
use portalgate::routes::create_router;
use portalgate::state::AppState;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub fn load_test_config(base_url: &str, verify_timeout_in_ms: u64, cache_ttl: Option<u64>) -> ConfigV1 {
    let cache = cache_ttl
        .map(|ttl| format!("verification_cache:\n  ttl_seconds: {ttl}\n"))
        .unwrap_or_default();
    let yaml = format!(
        r#"
version: "1.0.0"
bind_address: 127.0.0.1:0
logging:
  level: "debug"
  format: "json"
remote:
  base_url: "{base_url}"
  verify_timeout_in_ms: {verify_timeout_in_ms}
gate:
  login_path: /login
  landing_page: /profile
  protected_prefixes: [/profile, /accounts, /posts]
{cache}"#
    );

    extract(&Figment::new().merge(Yaml::string(&yaml))).expect("Failed to parse test config YAML")
}

pub fn build_app(config: ConfigV1) -> Router {
    create_router(AppState::new(Arc::new(config)))
}

pub fn get(path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(path);
    if let Some(token) = token {
        builder = builder.header(COOKIE, format!("token={}", token));
    }
    builder.body(Body::empty()).expect("failed to build request")
}

pub fn post_form(path: &str, form: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(token) = token {
        builder = builder.header(COOKIE, format!("token={}", token));
    }
    builder
        .body(Body::from(form.to_string()))
        .expect("failed to build request")
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response.headers().get(LOCATION).and_then(|v| v.to_str().ok())
}

pub fn set_cookie(response: &Response<Body>) -> Option<&str> {
    response.headers().get(SET_COOKIE).and_then(|v| v.to_str().ok())
}

pub fn set_cookies(response: &Response<Body>) -> Vec<&str> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect()
}

pub fn clears_token(response: &Response<Body>) -> bool {
    set_cookie(response)
        .map(|c| c.starts_with("token=;") && c.contains("Max-Age=0"))
        .unwrap_or(false)
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    String::from_utf8(bytes.to_vec()).expect("body is not UTF-8")
}

/// A TCP endpoint that accepts connections and never answers.
pub async fn silent_endpoint() -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let handle = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    (format!("http://{}", addr), handle)
}
