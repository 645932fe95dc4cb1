//! Domain Ports - Core trait definitions for the inference pipeline
//!
//! The fitted objects produced by offline training are consumed through these
//! traits, so the pipeline only depends on "can transform" and "can predict".

use crate::error::Result;
use serde::{Deserialize, Serialize};

// =============================================================================
// Cluster Identifier
// =============================================================================

/// Cluster label emitted by the clustering model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterId(pub i64);

impl ClusterId {
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ClusterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ClusterId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

// =============================================================================
// Fitted Transform Ports
// =============================================================================

/// A fitted, deterministic transform over one feature row
pub trait FeatureScaler: Send + Sync {
    /// Number of features the scaler was fitted on
    fn n_features(&self) -> usize;

    /// Transform a single row; fails on a dimension mismatch
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>>;
}

/// A fitted clustering model assigning one row to one cluster
pub trait ClusterModel: Send + Sync {
    /// Number of features the model was fitted on
    fn n_features(&self) -> usize;

    /// Number of clusters the model can emit
    fn n_clusters(&self) -> usize;

    /// Assign a single (already scaled) row to a cluster
    fn predict(&self, features: &[f64]) -> Result<ClusterId>;
}
