use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use super::paths::{PathClass, PathTable};
use crate::config::GateConfig;
use crate::metrics::{Metrics, MetricsRecorder};
use crate::verifier::TokenVerifier;

/// What the gate decided for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Run the route handler.
    PassThrough { clear_token: bool },
    /// Skip the handler and send the client to `location`.
    Redirect { location: String, clear_token: bool },
}

impl GateOutcome {
    pub fn clears_token(&self) -> bool {
        match self {
            GateOutcome::PassThrough { clear_token } => *clear_token,
            GateOutcome::Redirect { clear_token, .. } => *clear_token,
        }
    }

    /// Metric label.
    pub fn label(&self) -> &'static str {
        match self {
            GateOutcome::PassThrough { clear_token: false } => "pass",
            GateOutcome::PassThrough { clear_token: true } => "pass_clear",
            GateOutcome::Redirect {
                clear_token: false, ..
            } => "redirect",
            GateOutcome::Redirect {
                clear_token: true, ..
            } => "redirect_clear",
        }
    }
}

/// Per-request access decision.
///
/// | class     | token | verified | outcome                     |
/// |-----------|-------|----------|-----------------------------|
/// | login     | no    |          | pass                        |
/// | login     | yes   | yes      | redirect to landing page    |
/// | login     | yes   | no       | pass, clear token           |
/// | protected | no    |          | redirect to login           |
/// | protected | yes   | yes      | pass                        |
/// | protected | yes   | no       | redirect to login, clear    |
/// | public    |       |          | pass                        |
pub struct Gate {
    paths: PathTable,
    login_page: String,
    landing_page: String,
    verifier: Arc<dyn TokenVerifier>,
    metrics: Metrics,
}

impl Gate {
    pub fn new(config: &GateConfig, verifier: Arc<dyn TokenVerifier>, metrics: Metrics) -> Self {
        Self {
            paths: PathTable::new(config),
            login_page: config.login_path.clone(),
            landing_page: config.landing_page.clone(),
            verifier,
            metrics,
        }
    }

    pub fn classify(&self, path: &str) -> PathClass {
        self.paths.classify(path)
    }

    /// Decides the outcome for `path`. Only login and protected paths that
    /// carry a token cost a verification call.
    pub async fn evaluate(&self, path: &str, token: Option<&str>) -> GateOutcome {
        let token = token.filter(|t| !t.is_empty());
        let class = self.paths.classify(path);

        let outcome = match (class, token) {
            (PathClass::Public, _) => GateOutcome::PassThrough { clear_token: false },
            (PathClass::Login, None) => GateOutcome::PassThrough { clear_token: false },
            (PathClass::Login, Some(token)) => {
                if self.check(token).await {
                    GateOutcome::Redirect {
                        location: self.landing_page.clone(),
                        clear_token: false,
                    }
                } else {
                    GateOutcome::PassThrough { clear_token: true }
                }
            }
            (PathClass::Protected, None) => GateOutcome::Redirect {
                location: self.login_page.clone(),
                clear_token: false,
            },
            (PathClass::Protected, Some(token)) => {
                if self.check(token).await {
                    GateOutcome::PassThrough { clear_token: false }
                } else {
                    GateOutcome::Redirect {
                        location: self.login_page.clone(),
                        clear_token: true,
                    }
                }
            }
        };

        if let (true, Some(token)) = (outcome.clears_token(), token) {
            self.verifier.invalidate(token);
        }

        debug!(
            event_name = "gate.decision",
            event_domain = "gate",
            path,
            path_class = class.as_str(),
            has_token = token.is_some(),
            outcome = outcome.label(),
            "gate decided"
        );
        self.metrics
            .record_gate_outcome(class.as_str(), outcome.label());
        outcome
    }

    async fn check(&self, token: &str) -> bool {
        let started = Instant::now();
        let accepted = self.verifier.verify(token).await;
        let result = if accepted { "valid" } else { "invalid" };
        self.metrics
            .record_verification(result, started.elapsed().as_secs_f64());
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed {
        accept: bool,
        calls: AtomicUsize,
        invalidated: AtomicUsize,
    }

    impl Fixed {
        fn new(accept: bool) -> Arc<Self> {
            Arc::new(Self {
                accept,
                calls: AtomicUsize::new(0),
                invalidated: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait::async_trait]
    impl TokenVerifier for Fixed {
        fn get_name(&self) -> &str {
            "fixed"
        }

        async fn verify(&self, _token: &str) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.accept
        }

        fn invalidate(&self, _token: &str) {
            self.invalidated.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn gate(verifier: Arc<Fixed>) -> Gate {
        Gate::new(&GateConfig::default(), verifier, Metrics::new())
    }

    fn redirect(location: &str, clear_token: bool) -> GateOutcome {
        GateOutcome::Redirect {
            location: location.to_string(),
            clear_token,
        }
    }

    #[tokio::test]
    async fn login_without_token_passes_without_a_call() {
        let verifier = Fixed::new(true);
        let outcome = gate(verifier.clone()).evaluate("/login", None).await;

        assert_eq!(outcome, GateOutcome::PassThrough { clear_token: false });
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn login_with_verified_token_goes_to_landing_page() {
        let verifier = Fixed::new(true);
        let outcome = gate(verifier.clone()).evaluate("/login", Some("tok")).await;

        assert_eq!(outcome, redirect("/profile", false));
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn login_with_stale_token_passes_and_clears() {
        let verifier = Fixed::new(false);
        let outcome = gate(verifier.clone()).evaluate("/login", Some("tok")).await;

        assert_eq!(outcome, GateOutcome::PassThrough { clear_token: true });
        assert_eq!(verifier.invalidated.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn protected_without_token_goes_to_login() {
        let verifier = Fixed::new(true);
        let outcome = gate(verifier.clone()).evaluate("/profile", None).await;

        assert_eq!(outcome, redirect("/login", false));
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn protected_with_verified_token_passes() {
        let verifier = Fixed::new(true);
        let outcome = gate(verifier.clone()).evaluate("/posts", Some("tok")).await;

        assert_eq!(outcome, GateOutcome::PassThrough { clear_token: false });
        assert_eq!(verifier.invalidated.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn protected_with_rejected_token_goes_to_login_and_clears() {
        let verifier = Fixed::new(false);
        let outcome = gate(verifier.clone())
            .evaluate("/accounts/42", Some("tok"))
            .await;

        assert_eq!(outcome, redirect("/login", true));
        assert_eq!(verifier.invalidated.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn public_paths_never_verify() {
        let verifier = Fixed::new(false);
        let gate = gate(verifier.clone());

        for token in [None, Some("tok")] {
            let outcome = gate.evaluate("/about", token).await;
            assert_eq!(outcome, GateOutcome::PassThrough { clear_token: false });
        }
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_token_counts_as_missing() {
        let verifier = Fixed::new(true);
        let outcome = gate(verifier.clone()).evaluate("/profile", Some("")).await;

        assert_eq!(outcome, redirect("/login", false));
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 0);
    }
}
