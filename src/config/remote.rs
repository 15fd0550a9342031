use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where the remote identity & content service lives.
///
/// Endpoint URLs are built as `base_url` + path, so the paths keep their
/// leading slash.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct RemoteConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_login_path")]
    pub login_path: String,
    #[serde(default = "default_verify_path")]
    pub verify_path: String,
    #[serde(default = "default_posts_path")]
    pub posts_path: String,
    /// Hard bound on a single verification call.
    #[serde(default = "default_verify_timeout_in_ms")]
    pub verify_timeout_in_ms: u64,
}

impl RemoteConfig {
    pub fn login_url(&self) -> String {
        self.join(&self.login_path)
    }

    pub fn verify_url(&self) -> String {
        self.join(&self.verify_path)
    }

    pub fn posts_url(&self) -> String {
        self.join(&self.posts_path)
    }

    pub fn verify_timeout(&self) -> Duration {
        Duration::from_millis(self.verify_timeout_in_ms)
    }

    fn join(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            base_url: default_base_url(),
            login_path: default_login_path(),
            verify_path: default_verify_path(),
            posts_path: default_posts_path(),
            verify_timeout_in_ms: default_verify_timeout_in_ms(),
        }
    }
}

fn default_base_url() -> String {
    "https://crm-api-test.vindo.ai/api/v6/customer-portal".to_string()
}

fn default_login_path() -> String {
    "/auth/login".to_string()
}

fn default_verify_path() -> String {
    "/auth/me".to_string()
}

fn default_posts_path() -> String {
    "/post/list".to_string()
}

fn default_verify_timeout_in_ms() -> u64 {
    3000
}
