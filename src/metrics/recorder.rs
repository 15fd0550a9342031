//! Metrics recording implementation using Prometheus.

use prometheus::{
    register_counter_vec_with_registry, register_histogram_vec_with_registry, CounterVec,
    Encoder, HistogramVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

/// Trait for recording application metrics.
pub trait MetricsRecorder: Clone + Send + Sync + 'static {
    /// Records the outcome the gate chose for a request.
    fn record_gate_outcome(&self, path_class: &str, outcome: &str);

    /// Records one verification call and how long it took.
    fn record_verification(&self, result: &str, duration_secs: f64);

    /// Records a credential exchange attempt.
    fn record_login_attempt(&self, result: &str);

    /// Records a post-listing load.
    fn record_posts_load(&self, result: &str);
}

/// Prometheus metrics collector.
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,
    gate_decisions_total: CounterVec,
    verifications_total: CounterVec,
    verification_duration_seconds: HistogramVec,
    login_attempts_total: CounterVec,
    post_loads_total: CounterVec,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Creates a new metrics instance with its own Prometheus registry.
    ///
    /// Registration only fails on duplicate names within a registry, which a
    /// fresh registry rules out.
    pub fn new() -> Self {
        let registry = Arc::new(Registry::new());

        let gate_decisions_total = register_counter_vec_with_registry!(
            Opts::new(
                "gate_decisions_total",
                "Request gate outcomes by path class"
            ),
            &["path_class", "outcome"],
            registry.clone()
        )
        .expect("Failed to register gate_decisions_total");

        let verifications_total = register_counter_vec_with_registry!(
            Opts::new(
                "token_verifications_total",
                "Token verification calls by result"
            ),
            &["result"],
            registry.clone()
        )
        .expect("Failed to register token_verifications_total");

        let verification_duration_seconds = register_histogram_vec_with_registry!(
            "token_verification_duration_seconds",
            "Token verification duration in seconds",
            &["result"],
            vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0],
            registry.clone()
        )
        .expect("Failed to register token_verification_duration_seconds");

        let login_attempts_total = register_counter_vec_with_registry!(
            Opts::new("login_attempts_total", "Credential exchanges by result"),
            &["result"],
            registry.clone()
        )
        .expect("Failed to register login_attempts_total");

        let post_loads_total = register_counter_vec_with_registry!(
            Opts::new("post_loads_total", "Post list loads by result"),
            &["result"],
            registry.clone()
        )
        .expect("Failed to register post_loads_total");

        Metrics {
            registry,
            gate_decisions_total,
            verifications_total,
            verification_duration_seconds,
            login_attempts_total,
            post_loads_total,
        }
    }

    /// Renders all metrics in Prometheus text format.
    pub fn render(&self) -> Result<String, String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| format!("Failed to encode metrics: {}", e))?;
        String::from_utf8(buffer).map_err(|e| format!("Metrics are not UTF-8: {}", e))
    }
}

impl MetricsRecorder for Metrics {
    fn record_gate_outcome(&self, path_class: &str, outcome: &str) {
        self.gate_decisions_total
            .with_label_values(&[path_class, outcome])
            .inc();
    }

    fn record_verification(&self, result: &str, duration_secs: f64) {
        self.verifications_total.with_label_values(&[result]).inc();
        self.verification_duration_seconds
            .with_label_values(&[result])
            .observe(duration_secs);
    }

    fn record_login_attempt(&self, result: &str) {
        self.login_attempts_total.with_label_values(&[result]).inc();
    }

    fn record_posts_load(&self, result: &str) {
        self.post_loads_total.with_label_values(&[result]).inc();
    }
}
