//! Service Metrics
//!
//! Prediction counters and latency, kept in a dedicated Prometheus registry
//! and exposed on `/metrics`.

use crate::domain::ports::ClusterId;
use crate::error::{Error, ErrorKind, Result};
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder};
use std::time::Duration;

/// Prometheus metrics for the prediction pipeline
#[derive(Clone)]
pub struct ServiceMetrics {
    registry: Registry,
    predictions: IntCounterVec,
    errors: IntCounterVec,
    duration: Histogram,
}

impl ServiceMetrics {
    /// Create and register all metrics
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let predictions = IntCounterVec::new(
            Opts::new(
                "usage_cluster_predictions_total",
                "Cluster assignments served, by cluster",
            ),
            &["cluster"],
        )?;
        let errors = IntCounterVec::new(
            Opts::new(
                "usage_cluster_prediction_errors_total",
                "Failed prediction requests, by error kind",
            ),
            &["kind"],
        )?;
        let duration = Histogram::with_opts(
            HistogramOpts::new(
                "usage_cluster_prediction_duration_seconds",
                "Time spent in the prediction pipeline",
            )
            .buckets(vec![0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01]),
        )?;

        registry.register(Box::new(predictions.clone()))?;
        registry.register(Box::new(errors.clone()))?;
        registry.register(Box::new(duration.clone()))?;

        Ok(Self {
            registry,
            predictions,
            errors,
            duration,
        })
    }

    /// Record a successful assignment
    pub fn record_prediction(&self, cluster: ClusterId, elapsed: Duration) {
        let label = cluster.to_string();
        self.predictions.with_label_values(&[label.as_str()]).inc();
        self.duration.observe(elapsed.as_secs_f64());
    }

    /// Record a failed request
    pub fn record_error(&self, kind: ErrorKind) {
        self.errors.with_label_values(&[kind.as_str()]).inc();
    }

    /// Predictions served so far for one cluster
    pub fn predictions_for(&self, cluster: ClusterId) -> u64 {
        let label = cluster.to_string();
        self.predictions.with_label_values(&[label.as_str()]).get()
    }

    /// Failed requests so far of one kind
    pub fn errors_for(&self, kind: ErrorKind) -> u64 {
        self.errors.with_label_values(&[kind.as_str()]).get()
    }

    /// Render the text exposition format
    pub fn encode(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| Error::Internal(format!("metrics encoding: {}", e)))
    }
}
