use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::time::timeout;
use tracing::{debug, warn};

use super::TokenVerifier;
use crate::remote::PortalClient;
use crate::utils::log_throttle::LogThrottle;

const UNREACHABLE_LOG_WINDOW: Duration = Duration::from_secs(30);
const UNREACHABLE_KEY: &str = "verifier.remote.unreachable";

/// Verifies tokens by calling the remote who-am-i endpoint, once per call,
/// within a fixed deadline.
pub struct RemoteVerifier {
    client: Arc<PortalClient>,
    deadline: Duration,
    throttle: LogThrottle,
}

impl RemoteVerifier {
    pub fn new(client: Arc<PortalClient>, deadline: Duration) -> Self {
        Self {
            client,
            deadline,
            throttle: LogThrottle::new(UNREACHABLE_LOG_WINDOW),
        }
    }
}

/// The remote contract signals validity two ways. The boolean wins; the
/// message is the fallback.
pub(crate) fn body_accepts(body: &Value) -> bool {
    body.get("success").and_then(Value::as_bool) == Some(true)
        || body.get("message").and_then(Value::as_str) == Some("Success")
}

#[async_trait::async_trait]
impl TokenVerifier for RemoteVerifier {
    fn get_name(&self) -> &str {
        "remote"
    }

    async fn verify(&self, token: &str) -> bool {
        if token.is_empty() {
            debug!("Refusing to verify an empty token");
            return false;
        }

        // Dropping the future on timeout aborts the in-flight request.
        match timeout(self.deadline, self.client.who_am_i(token)).await {
            Ok(Ok(body)) => {
                let accepted = body_accepts(&body);
                debug!(accepted, "Verification endpoint answered");
                accepted
            }
            Ok(Err(e)) => {
                debug!("Verification failed: {}", e);
                false
            }
            Err(_) => {
                if let Some(suppressed_count) = self.throttle.admit(UNREACHABLE_KEY) {
                    warn!(
                        event_name = UNREACHABLE_KEY,
                        event_domain = "verifier",
                        timeout_ms = self.deadline.as_millis() as u64,
                        suppressed_count,
                        "verification endpoint did not answer in time"
                    );
                }
                false
            }
        }
    }
}
