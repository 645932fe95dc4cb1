//! Scaler/Predictor Adapter
//!
//! Applies the fitted scaler and then the clustering model to one feature
//! row. No logic of its own.

use crate::artifacts::ArtifactStore;
use crate::domain::ports::{ClusterId, ClusterModel, FeatureScaler};
use crate::error::Result;
use tracing::debug;

/// Outcome of scaling and assigning one row
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub cluster: ClusterId,
    pub scaled: Vec<f64>,
}

/// Sequential scaler → model application
pub struct Predictor<'a> {
    scaler: &'a dyn FeatureScaler,
    model: &'a dyn ClusterModel,
}

impl<'a> Predictor<'a> {
    pub fn new(scaler: &'a dyn FeatureScaler, model: &'a dyn ClusterModel) -> Self {
        Self { scaler, model }
    }

    /// Predictor over the loaded artifacts
    pub fn from_store(store: &'a ArtifactStore) -> Self {
        Self::new(store.scaler(), store.model())
    }

    /// Scale then assign; each port rejects rows of the wrong width
    pub fn predict(&self, features: &[f64]) -> Result<Prediction> {
        let scaled = self.scaler.transform(features)?;
        debug!("Scaled features: {:?}", scaled);

        let cluster = self.model.predict(&scaled)?;
        debug!("Prediction: {}", cluster);

        Ok(Prediction { cluster, scaled })
    }
}
