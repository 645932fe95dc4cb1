//! Artifact Loader
//!
//! Loads every trained artifact once at startup into an immutable
//! [`ArtifactStore`]. Any missing, corrupt or mismatched artifact is fatal.

use super::encoder::{BrandEncoder, LabelEncoder};
use super::manifest::ArtifactManifest;
use super::model::KMeansModel;
use super::scaler::StandardScaler;
use crate::domain::ports::{ClusterModel, FeatureScaler};
use crate::domain::schema::{feature_names, CategoricalField, FEATURE_COUNT};
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

// =============================================================================
// Categorical Encoders
// =============================================================================

/// One fitted encoder per categorical field
#[derive(Debug, Clone)]
pub struct CategoricalEncoders {
    v1: LabelEncoder,
    v4: LabelEncoder,
    v7: LabelEncoder,
    v8: LabelEncoder,
}

impl CategoricalEncoders {
    pub fn new(v1: LabelEncoder, v4: LabelEncoder, v7: LabelEncoder, v8: LabelEncoder) -> Self {
        Self { v1, v4, v7, v8 }
    }

    pub fn get(&self, field: CategoricalField) -> &LabelEncoder {
        match field {
            CategoricalField::V1 => &self.v1,
            CategoricalField::V4 => &self.v4,
            CategoricalField::V7 => &self.v7,
            CategoricalField::V8 => &self.v8,
        }
    }
}

// =============================================================================
// Artifact Store
// =============================================================================

/// Process-wide, read-only trained artifacts
#[derive(Debug)]
pub struct ArtifactStore {
    model: KMeansModel,
    scaler: StandardScaler,
    encoders: CategoricalEncoders,
    brands: BrandEncoder,
}

impl ArtifactStore {
    /// Assemble a store from already-built parts, checking that the scaler
    /// and model agree with the feature schema
    pub fn from_parts(
        model: KMeansModel,
        scaler: StandardScaler,
        encoders: CategoricalEncoders,
        brands: BrandEncoder,
    ) -> Result<Self> {
        if scaler.n_features() != FEATURE_COUNT {
            return Err(Error::ArtifactInvalid {
                artifact: "scaler".into(),
                reason: format!(
                    "fitted on {} features, expected {}",
                    scaler.n_features(),
                    FEATURE_COUNT
                ),
            });
        }

        if let Some(names) = scaler.feature_names() {
            let expected = feature_names();
            if names.iter().map(String::as_str).ne(expected.iter().copied()) {
                return Err(Error::ArtifactInvalid {
                    artifact: "scaler".into(),
                    reason: format!("feature names {:?} do not match {:?}", names, expected),
                });
            }
        }

        if model.n_features() != FEATURE_COUNT {
            return Err(Error::ArtifactInvalid {
                artifact: "model".into(),
                reason: format!(
                    "fitted on {} features, expected {}",
                    model.n_features(),
                    FEATURE_COUNT
                ),
            });
        }

        Ok(Self {
            model,
            scaler,
            encoders,
            brands,
        })
    }

    /// Load all artifacts from `dir` as described by `manifest`
    pub fn load(dir: impl AsRef<Path>, manifest: &ArtifactManifest) -> Result<Arc<Self>> {
        let dir = dir.as_ref();
        info!("Loading artifacts from {}", dir.display());

        let model: KMeansModel = read_artifact(dir, &manifest.model)?;
        model.validate()?;
        info!(
            "  model: {} clusters over {} features",
            model.n_clusters(),
            model.n_features()
        );

        let scaler: StandardScaler = read_artifact(dir, &manifest.scaler)?;
        scaler.validate()?;
        info!("  scaler: {} features", scaler.n_features());

        let mut loaded = Vec::with_capacity(CategoricalField::ALL.len());
        for field in CategoricalField::ALL {
            let encoder: LabelEncoder = read_artifact(dir, manifest.encoder_path(field))?;
            encoder.validate(&format!("{} encoder", field))?;
            info!("  {} encoder: {} classes", field, encoder.len());
            loaded.push(encoder);
        }
        let [v1, v4, v7, v8]: [LabelEncoder; 4] = loaded
            .try_into()
            .map_err(|_| Error::Internal("categorical encoder count".into()))?;

        let brand_encoder: LabelEncoder = read_artifact(dir, &manifest.phone_brand_encoder)?;
        brand_encoder.validate("phone brand encoder")?;
        let brands = BrandEncoder::new(brand_encoder, manifest.fallback_brand.clone())?;
        info!(
            "  phone brand encoder: {} classes (fallback {:?} = {})",
            brands.encoder().len(),
            brands.fallback(),
            brands.fallback_code()
        );

        let store = Self::from_parts(
            model,
            scaler,
            CategoricalEncoders::new(v1, v4, v7, v8),
            brands,
        )?;
        Ok(Arc::new(store))
    }

    pub fn model(&self) -> &KMeansModel {
        &self.model
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn encoder(&self, field: CategoricalField) -> &LabelEncoder {
        self.encoders.get(field)
    }

    pub fn brands(&self) -> &BrandEncoder {
        &self.brands
    }
}

/// Read and deserialize one JSON artifact
fn read_artifact<T: DeserializeOwned>(dir: &Path, file: &Path) -> Result<T> {
    let path = ArtifactManifest::resolve(dir, file);
    debug!("Reading artifact {}", path.display());

    let bytes = std::fs::read(&path).map_err(|source| Error::ArtifactIo {
        path: path.clone(),
        source,
    })?;

    serde_json::from_slice(&bytes).map_err(|source| Error::ArtifactParse { path, source })
}
