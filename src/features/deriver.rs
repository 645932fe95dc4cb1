//! Feature Deriver
//!
//! Turns a coerced [`Submission`] into the fixed-order feature vector the
//! scaler and model were fitted on:
//!
//! 1. encode the categorical fields that are present (V1, V4, V7, V8)
//! 2. extract and encode the phone brand from the device descriptor
//! 3. sum the aggregate field groups
//! 4. select the eleven features in fitted order, defaulting to 0

use super::brand::extract_brand;
use super::submission::Submission;
use crate::artifacts::ArtifactStore;
use crate::domain::schema::{
    Aggregate, CategoricalField, FeatureSource, AGGREGATE_COUNT, DEVICE_FIELD, FEATURE_COUNT,
    PHONE_BRAND_ENCODED, SELECTED_FEATURES,
};
use crate::error::Result;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use tracing::debug;

// =============================================================================
// Encoded Values
// =============================================================================

/// Categorical codes produced for one submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedValues {
    categorical: [Option<usize>; 4],
    /// Brand extracted from the device descriptor, if any
    pub brand: Option<String>,
    /// Code of the brand, or of the fallback bucket
    pub phone_brand: usize,
}

impl EncodedValues {
    fn slot(field: CategoricalField) -> usize {
        match field {
            CategoricalField::V1 => 0,
            CategoricalField::V4 => 1,
            CategoricalField::V7 => 2,
            CategoricalField::V8 => 3,
        }
    }

    /// Code for a categorical field, if it was submitted
    pub fn get(&self, field: CategoricalField) -> Option<usize> {
        self.categorical[Self::slot(field)]
    }

    fn set(&mut self, field: CategoricalField, code: usize) {
        self.categorical[Self::slot(field)] = Some(code);
    }
}

impl Serialize for EncodedValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for field in CategoricalField::ALL {
            if let Some(code) = self.get(field) {
                map.serialize_entry(field.encoded_name(), &code)?;
            }
        }
        map.serialize_entry(PHONE_BRAND_ENCODED, &self.phone_brand)?;
        map.end()
    }
}

// =============================================================================
// Aggregates
// =============================================================================

/// Derived sums, one per [`Aggregate`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Aggregates([f64; AGGREGATE_COUNT]);

impl Aggregates {
    pub fn get(&self, aggregate: Aggregate) -> f64 {
        self.0[Self::slot(aggregate)]
    }

    fn slot(aggregate: Aggregate) -> usize {
        Aggregate::ALL
            .iter()
            .position(|a| *a == aggregate)
            .unwrap_or_default()
    }
}

impl Serialize for Aggregates {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(AGGREGATE_COUNT))?;
        for (aggregate, value) in Aggregate::ALL.iter().zip(self.0) {
            map.serialize_entry(aggregate.name(), &value)?;
        }
        map.end()
    }
}

// =============================================================================
// Feature Vector
// =============================================================================

/// The eleven model features in fitted order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value of a feature by name
    pub fn get(&self, name: &str) -> Option<f64> {
        SELECTED_FEATURES
            .iter()
            .position(|source| source.name() == name)
            .map(|i| self.0[i])
    }

    /// (name, value) pairs in fitted order
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        SELECTED_FEATURES
            .iter()
            .map(FeatureSource::name)
            .zip(self.0.iter().copied())
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (name, value) in self.named() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}

/// Everything derived from one submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedFeatures {
    pub encoded: EncodedValues,
    pub aggregates: Aggregates,
    pub vector: FeatureVector,
}

// =============================================================================
// Feature Deriver
// =============================================================================

/// Derives model features using the shared encoders
pub struct FeatureDeriver<'a> {
    artifacts: &'a ArtifactStore,
}

impl<'a> FeatureDeriver<'a> {
    pub fn new(artifacts: &'a ArtifactStore) -> Self {
        Self { artifacts }
    }

    /// Run the full derivation
    pub fn derive(&self, submission: &Submission) -> Result<DerivedFeatures> {
        let encoded = self.encode(submission)?;
        debug!("Encoded values: {:?}", encoded);

        let aggregates = self.aggregate(submission)?;
        debug!("Aggregates: {:?}", aggregates);

        let vector = self.assemble(submission, &encoded, &aggregates)?;
        Ok(DerivedFeatures {
            encoded,
            aggregates,
            vector,
        })
    }

    /// Encode categorical fields and the phone brand
    pub fn encode(&self, submission: &Submission) -> Result<EncodedValues> {
        let mut encoded = EncodedValues::default();

        for field in CategoricalField::ALL {
            if let Some(value) = submission.get(field.field_name()) {
                let code = self
                    .artifacts
                    .encoder(field)
                    .transform(field.field_name(), value.text())?;
                encoded.set(field, code);
            }
        }

        let brand = submission.raw(DEVICE_FIELD).and_then(extract_brand);
        encoded.phone_brand = self.artifacts.brands().encode(brand);
        encoded.brand = brand.map(str::to_string);

        Ok(encoded)
    }

    /// Sum every aggregate group
    pub fn aggregate(&self, submission: &Submission) -> Result<Aggregates> {
        let mut sums = [0.0; AGGREGATE_COUNT];
        for (slot, aggregate) in sums.iter_mut().zip(Aggregate::ALL) {
            *slot = submission.sum(aggregate.fields())?;
        }
        Ok(Aggregates(sums))
    }

    /// Select the fitted features in order
    pub fn assemble(
        &self,
        submission: &Submission,
        encoded: &EncodedValues,
        aggregates: &Aggregates,
    ) -> Result<FeatureVector> {
        let mut values = [0.0; FEATURE_COUNT];
        for (value, source) in values.iter_mut().zip(SELECTED_FEATURES) {
            *value = match source {
                FeatureSource::Raw(field) => submission.number_or_zero(field)?,
                FeatureSource::Aggregate(aggregate) => aggregates.get(aggregate),
                FeatureSource::Encoded(field) => {
                    encoded.get(field).map(|code| code as f64).unwrap_or(0.0)
                }
            };
        }
        Ok(FeatureVector(values))
    }
}
