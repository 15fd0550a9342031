//! Token verification: is this session token still accepted upstream?

pub mod cached_verifier;
pub mod remote_verifier;

use std::sync::Arc;

use tracing::info;

pub use cached_verifier::CachedVerifier;
pub use remote_verifier::RemoteVerifier;

use crate::config::ConfigV1;
use crate::remote::PortalClient;

/// Answers whether a session token is currently valid.
///
/// Implementations fail closed: any error, timeout or unexpected answer is
/// `false`. Callers must not pass an empty token.
#[async_trait::async_trait]
pub trait TokenVerifier: Send + Sync {
    fn get_name(&self) -> &str;

    async fn verify(&self, token: &str) -> bool;

    /// Forgets anything remembered about `token`. Called on logout and when
    /// the gate clears a token.
    fn invalidate(&self, _token: &str) {}
}

/// Builds the verifier chain from config: the remote verifier, wrapped in a
/// cache when `verification_cache` is set.
pub fn create_verifier(client: Arc<PortalClient>, config: &ConfigV1) -> Arc<dyn TokenVerifier> {
    let remote = RemoteVerifier::new(client, config.remote.verify_timeout());
    match &config.verification_cache {
        Some(cache) => {
            info!(
                "Caching successful verifications for {}s",
                cache.ttl_seconds
            );
            Arc::new(CachedVerifier::new(remote, cache.ttl_seconds))
        }
        None => Arc::new(remote),
    }
}
