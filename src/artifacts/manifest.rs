//! Artifact Manifest
//!
//! File names of the trained artifacts, relative to the artifact directory.
//! Defaults match what the training pipeline exports; a YAML manifest can
//! override any of them.

use crate::domain::schema::CategoricalField;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Label of the brand bucket used for unseen phone brands
pub const DEFAULT_FALLBACK_BRAND: &str = "Autre";

/// Where each artifact lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactManifest {
    pub model: PathBuf,
    pub scaler: PathBuf,
    pub encoder_v1: PathBuf,
    pub encoder_v4: PathBuf,
    pub encoder_v7: PathBuf,
    pub encoder_v8: PathBuf,
    pub phone_brand_encoder: PathBuf,
    /// Brand class used when the submitted brand is unknown
    pub fallback_brand: String,
}

impl Default for ArtifactManifest {
    fn default() -> Self {
        Self {
            model: PathBuf::from("model.json"),
            scaler: PathBuf::from("scaler.json"),
            encoder_v1: PathBuf::from("le_v1.json"),
            encoder_v4: PathBuf::from("le_v4.json"),
            encoder_v7: PathBuf::from("le_v7.json"),
            encoder_v8: PathBuf::from("le_v8.json"),
            phone_brand_encoder: PathBuf::from("le_phone_brand.json"),
            fallback_brand: DEFAULT_FALLBACK_BRAND.to_string(),
        }
    }
}

impl ArtifactManifest {
    /// Parse a manifest from YAML text
    pub fn from_yaml(text: &str) -> Result<Self> {
        let manifest: Self = serde_yaml::from_str(text)?;
        if manifest.fallback_brand.trim().is_empty() {
            return Err(Error::Configuration("fallback_brand must not be empty".into()));
        }
        Ok(manifest)
    }

    /// Read a manifest file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("cannot read manifest {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&text)
    }

    /// Encoder file for a categorical field
    pub fn encoder_path(&self, field: CategoricalField) -> &Path {
        match field {
            CategoricalField::V1 => &self.encoder_v1,
            CategoricalField::V4 => &self.encoder_v4,
            CategoricalField::V7 => &self.encoder_v7,
            CategoricalField::V8 => &self.encoder_v8,
        }
    }

    /// Resolve an artifact path against the artifact directory
    pub fn resolve(dir: &Path, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            dir.join(file)
        }
    }
}
