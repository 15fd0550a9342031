use std::sync::{Mutex, PoisonError};

use cached::{Cached, TimedCache};
use tracing::debug;

use super::TokenVerifier;

/// Remembers successful verifications for a fixed lifespan.
///
/// Only `true` answers are cached, so a rejected token is re-checked on its
/// next request. The lock is never held across the inner call.
pub struct CachedVerifier<V> {
    inner: V,
    ttl_seconds: u64,
    verified: Mutex<TimedCache<String, ()>>,
}

impl<V: TokenVerifier> CachedVerifier<V> {
    pub fn new(inner: V, ttl_seconds: u64) -> Self {
        Self {
            inner,
            ttl_seconds,
            verified: Mutex::new(TimedCache::with_lifespan(ttl_seconds)),
        }
    }

    fn is_cached(&self, token: &str) -> bool {
        let mut cache = self.verified.lock().unwrap_or_else(PoisonError::into_inner);
        cache.cache_get(token).is_some()
    }
}

#[async_trait::async_trait]
impl<V: TokenVerifier> TokenVerifier for CachedVerifier<V> {
    fn get_name(&self) -> &str {
        "cached"
    }

    async fn verify(&self, token: &str) -> bool {
        if token.is_empty() {
            return false;
        }
        if self.is_cached(token) {
            debug!(
                event_name = "verifier.cache.hit",
                event_domain = "verifier",
                cache_ttl_seconds = self.ttl_seconds,
                "verification served from cache"
            );
            return true;
        }

        let accepted = self.inner.verify(token).await;
        if accepted {
            self.verified
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .cache_set(token.to_string(), ());
        }
        accepted
    }

    fn invalidate(&self, token: &str) {
        self.verified
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .cache_remove(token);
        self.inner.invalidate(token);
    }
}
