//! Metrics collection and exposition for Prometheus.
//!
//! Counts gate decisions, verification calls, logins and post loads.

mod recorder;

pub use recorder::{Metrics, MetricsRecorder};
