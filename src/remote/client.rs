use http::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use tracing::{debug, info};

use super::models::{ErrorBody, LoginRequest, LoginResponse, PostListResponse};
use crate::config::RemoteConfig;
use crate::error::PortalError;

/// Thin wrapper around one shared `reqwest::Client` and the three endpoints
/// of the remote service.
///
/// The remote contract puts the raw token in `Authorization`, without a
/// `Bearer ` prefix.
pub struct PortalClient {
    http: reqwest::Client,
    config: RemoteConfig,
}

impl PortalClient {
    pub fn new(config: &RemoteConfig) -> Self {
        info!("Creating portal client for '{}'", config.base_url);
        Self {
            http: reqwest::Client::new(),
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    /// Exchanges credentials for an access token.
    ///
    /// A non-success answer is returned as `Rejected`, carrying the
    /// provider's `message` when the body has one.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, PortalError> {
        let url = self.config.login_url();
        debug!("Sending login request to: {}", url);

        let response = self
            .http
            .post(&url)
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<ErrorBody>().await.unwrap_or_default();
            return Err(PortalError::Rejected {
                status: status.as_u16(),
                message: body.message,
            });
        }

        Ok(response.json::<LoginResponse>().await?)
    }

    /// Calls the verification endpoint and returns its JSON body untouched.
    ///
    /// Unbounded; callers that need a deadline wrap it themselves.
    pub async fn who_am_i(&self, token: &str) -> Result<Value, PortalError> {
        let url = self.config.verify_url();
        debug!("Sending verification request to: {}", url);

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, token)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PortalError::Rejected {
                status: status.as_u16(),
                message: None,
            });
        }

        Ok(response.json::<Value>().await?)
    }

    /// Fetches one page of posts visible to the token's owner.
    pub async fn list_posts(&self, token: &str) -> Result<PostListResponse, PortalError> {
        let url = self.config.posts_url();
        debug!("Sending post list request to: {}", url);

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, token)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PortalError::Rejected {
                status: status.as_u16(),
                message: None,
            });
        }

        Ok(response.json::<PostListResponse>().await?)
    }
}
