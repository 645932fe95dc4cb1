//! Cluster Assignment Service
//!
//! Drives one form submission through coercion, feature derivation,
//! scaling, prediction and description. Holds only shared read-only
//! artifacts, so one instance serves every request.

use super::explainer::describe;
use super::predictor::Predictor;
use crate::artifacts::ArtifactStore;
use crate::domain::ports::ClusterId;
use crate::error::Result;
use crate::features::{FeatureDeriver, FeatureVector, Submission};
use crate::metrics::ServiceMetrics;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Result of assigning one submission to a cluster
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub cluster: ClusterId,
    pub description: &'static str,
    /// Phone brand read from the device descriptor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub features: FeatureVector,
    pub scaled_features: Vec<f64>,
}

/// Stateless request pipeline over shared artifacts
#[derive(Clone)]
pub struct ClusterService {
    artifacts: Arc<ArtifactStore>,
    metrics: ServiceMetrics,
}

impl ClusterService {
    pub fn new(artifacts: Arc<ArtifactStore>, metrics: ServiceMetrics) -> Self {
        Self { artifacts, metrics }
    }

    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    pub fn metrics(&self) -> &ServiceMetrics {
        &self.metrics
    }

    /// Assign raw form key/value pairs to a cluster
    pub fn assign<I, K, V>(&self, form: I) -> Result<Assignment>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let started = Instant::now();
        let result = self.run(form);

        match &result {
            Ok(assignment) => {
                self.metrics
                    .record_prediction(assignment.cluster, started.elapsed());
            }
            Err(e) => {
                warn!("Prediction failed: {}", e);
                self.metrics.record_error(e.kind());
            }
        }

        result
    }

    fn run<I, K, V>(&self, form: I) -> Result<Assignment>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let submission = Submission::from_pairs(form);
        debug!("Form values (converted): {:?}", submission);

        let derived = FeatureDeriver::new(&self.artifacts).derive(&submission)?;
        debug!("Final features (before scaling): {:?}", derived.vector);

        let prediction = Predictor::from_store(&self.artifacts).predict(derived.vector.as_slice())?;

        Ok(Assignment {
            cluster: prediction.cluster,
            description: describe(prediction.cluster),
            brand: derived.encoded.brand,
            features: derived.vector,
            scaled_features: prediction.scaled,
        })
    }
}
