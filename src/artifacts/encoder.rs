//! Label Encoders
//!
//! A fitted label encoder maps a closed, sorted vocabulary of categories to
//! integer codes. The code of a category is its position in the vocabulary.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

// =============================================================================
// Label Encoder
// =============================================================================

/// Fitted category vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Build an encoder from its fitted classes
    pub fn new(classes: Vec<String>) -> Result<Self> {
        let encoder = Self { classes };
        encoder.validate("label encoder")?;
        Ok(encoder)
    }

    /// Check that the vocabulary is non-empty, sorted and unique
    pub fn validate(&self, artifact: &str) -> Result<()> {
        if self.classes.is_empty() {
            return Err(Error::ArtifactInvalid {
                artifact: artifact.to_string(),
                reason: "encoder has no classes".into(),
            });
        }

        if let Some(pair) = self.classes.windows(2).find(|w| w[0] >= w[1]) {
            return Err(Error::ArtifactInvalid {
                artifact: artifact.to_string(),
                reason: format!(
                    "classes must be sorted and unique ({:?} before {:?})",
                    pair[0], pair[1]
                ),
            });
        }

        Ok(())
    }

    /// Fitted classes in code order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Check if a category was seen at fit time
    pub fn contains(&self, category: &str) -> bool {
        self.code_of(category).is_some()
    }

    /// Code for a known category
    pub fn code_of(&self, category: &str) -> Option<usize> {
        self.classes
            .binary_search_by(|class| class.as_str().cmp(category))
            .ok()
    }

    /// Encode a category, failing on anything outside the vocabulary
    pub fn transform(&self, field: &str, category: &str) -> Result<usize> {
        self.code_of(category).ok_or_else(|| Error::UnknownCategory {
            field: field.to_string(),
            value: category.to_string(),
        })
    }
}

// =============================================================================
// Brand Encoder
// =============================================================================

/// Phone brand encoder with an "Other" bucket for unseen brands
#[derive(Debug, Clone)]
pub struct BrandEncoder {
    encoder: LabelEncoder,
    fallback: String,
    fallback_code: usize,
}

impl BrandEncoder {
    /// Wrap a fitted encoder; the fallback label must be one of its classes
    pub fn new(encoder: LabelEncoder, fallback: impl Into<String>) -> Result<Self> {
        let fallback = fallback.into();
        let fallback_code = encoder.code_of(&fallback).ok_or_else(|| Error::ArtifactInvalid {
            artifact: "phone brand encoder".into(),
            reason: format!("fallback brand {:?} is not a fitted class", fallback),
        })?;

        Ok(Self {
            encoder,
            fallback,
            fallback_code,
        })
    }

    /// Encode an extracted brand, using the fallback bucket when the brand is
    /// missing or was never seen
    pub fn encode(&self, brand: Option<&str>) -> usize {
        brand
            .and_then(|b| self.encoder.code_of(b))
            .unwrap_or(self.fallback_code)
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn fallback_code(&self) -> usize {
        self.fallback_code
    }

    pub fn encoder(&self) -> &LabelEncoder {
        &self.encoder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn classes(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_transform_known_category() {
        let encoder = LabelEncoder::new(classes(&["4G", "5G", "ADSL", "FIBRE"])).unwrap();

        assert_eq!(encoder.transform("V7", "4G").unwrap(), 0);
        assert_eq!(encoder.transform("V7", "ADSL").unwrap(), 2);
        assert_eq!(encoder.transform("V7", "FIBRE").unwrap(), 3);
        assert_eq!(encoder.len(), 4);
    }

    #[test]
    fn test_transform_unknown_category() {
        let encoder = LabelEncoder::new(classes(&["A", "B"])).unwrap();

        let err = encoder.transform("V4", "C").unwrap_err();
        assert_matches!(err, Error::UnknownCategory { ref field, ref value } if field == "V4" && value == "C");
    }

    #[test]
    fn test_rejects_invalid_vocabulary() {
        assert!(LabelEncoder::new(vec![]).is_err());
        assert!(LabelEncoder::new(classes(&["B", "A"])).is_err());
        assert!(LabelEncoder::new(classes(&["A", "A"])).is_err());
    }

    #[test]
    fn test_brand_encoder_fallback() {
        let encoder = LabelEncoder::new(classes(&["Apple", "Autre", "Huawei", "Samsung"])).unwrap();
        let brands = BrandEncoder::new(encoder, "Autre").unwrap();

        assert_eq!(brands.fallback_code(), 1);
        assert_eq!(brands.encode(Some("Samsung")), 3);
        assert_eq!(brands.encode(Some("Apple")), 0);
        assert_eq!(brands.encode(Some("Nokia")), 1);
        assert_eq!(brands.encode(Some("samsung")), 1);
        assert_eq!(brands.encode(None), 1);
    }

    #[test]
    fn test_brand_encoder_requires_fallback_class() {
        let encoder = LabelEncoder::new(classes(&["Apple", "Samsung"])).unwrap();
        assert_matches!(
            BrandEncoder::new(encoder, "Autre"),
            Err(Error::ArtifactInvalid { .. })
        );
    }
}
