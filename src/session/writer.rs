use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use super::cookie::{is_cookie_safe, MAX_SESSION_SECONDS};
use crate::error::PortalError;
use crate::remote::PortalClient;

pub const MISSING_CREDENTIALS: &str = "Email and password are required.";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials.";

/// Login form fields. Absent fields deserialize as empty strings and are
/// rejected by [`SessionWriter::exchange`].
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// A token ready to be written as the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginGrant {
    pub token: String,
    pub max_age_seconds: u64,
}

/// Turns the provider's `expiresIn` into a cookie lifetime.
///
/// The result is the provider's value rounded down and capped at
/// [`MAX_SESSION_SECONDS`]. Missing, zero and non-numeric values fall back to
/// the ceiling; negative values expire the cookie at once.
pub fn clamp_lifetime(expires_in: Option<&Value>) -> u64 {
    let reported = match expires_in {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match reported {
        Some(secs) if secs.is_finite() && secs != 0.0 => {
            (secs.max(0.0).floor() as u64).min(MAX_SESSION_SECONDS)
        }
        _ => MAX_SESSION_SECONDS,
    }
}

/// The message shown on the login page for a failed exchange.
///
/// Everything except a validation error or a provider-supplied message is
/// flattened into [`INVALID_CREDENTIALS`].
pub fn login_failure_message(error: &PortalError) -> String {
    match error {
        PortalError::Validation(message) => message.clone(),
        PortalError::Rejected {
            message: Some(message),
            ..
        } if !message.trim().is_empty() => message.clone(),
        _ => INVALID_CREDENTIALS.to_string(),
    }
}

/// Exchanges credentials for a session token.
pub struct SessionWriter {
    client: Arc<PortalClient>,
}

impl SessionWriter {
    pub fn new(client: Arc<PortalClient>) -> Self {
        Self { client }
    }

    /// Validates the credentials, calls the login endpoint and clamps the
    /// reported lifetime. Empty credentials never reach the network.
    pub async fn exchange(&self, credentials: &Credentials) -> Result<LoginGrant, PortalError> {
        if credentials.email.is_empty() || credentials.password.is_empty() {
            return Err(PortalError::Validation(MISSING_CREDENTIALS.to_string()));
        }

        let response = self
            .client
            .login(&credentials.email, &credentials.password)
            .await
            .map_err(|e| {
                warn!("Login for '{}' failed: {}", credentials.email, e);
                e
            })?;

        let token = match response.access_token {
            Some(token) if is_cookie_safe(&token) => token,
            Some(token) if !token.is_empty() => {
                warn!(
                    "Login response for '{}' carried a token that cannot be stored in a cookie",
                    credentials.email
                );
                return Err(PortalError::Payload(
                    "customerPortalAccessToken is not a valid cookie value".to_string(),
                ));
            }
            _ => {
                warn!("Login response for '{}' carried no token", credentials.email);
                return Err(PortalError::Payload(
                    "missing customerPortalAccessToken".to_string(),
                ));
            }
        };

        let max_age_seconds = clamp_lifetime(response.expires_in.as_ref());
        info!(
            "Issued session for '{}' valid for {}s",
            credentials.email, max_age_seconds
        );
        Ok(LoginGrant {
            token,
            max_age_seconds,
        })
    }
}
