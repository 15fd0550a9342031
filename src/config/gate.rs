use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The static prefix table and redirect targets used by the request gate.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct GateConfig {
    /// Path of the login page. Doubles as the login-class prefix.
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Where a verified user is sent after login or when visiting the login page.
    #[serde(default = "default_landing_page")]
    pub landing_page: String,
    #[serde(default = "default_protected_prefixes")]
    pub protected_prefixes: Vec<String>,
}

impl Default for GateConfig {
    fn default() -> Self {
        GateConfig {
            login_path: default_login_path(),
            landing_page: default_landing_page(),
            protected_prefixes: default_protected_prefixes(),
        }
    }
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_landing_page() -> String {
    "/profile".to_string()
}

fn default_protected_prefixes() -> Vec<String> {
    ["/profile", "/accounts", "/posts"]
        .iter()
        .map(|p| p.to_string())
        .collect()
}

/// Cookie attributes that are allowed to vary between deployments.
#[derive(Deserialize, Serialize, Debug, Clone, Default, JsonSchema)]
pub struct SessionConfig {
    /// Adds `Secure` to the session cookie. Enable when served over HTTPS.
    #[serde(default)]
    pub secure_cookie: bool,
}

/// Enables caching of successful verifications for `ttl_seconds`.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct VerificationCacheConfig {
    pub ttl_seconds: u64,
}
