//! Form Submissions
//!
//! Raw form values are coerced once, at the boundary, into either a number
//! or categorical text. Blank values count as absent. The untrimmed text is
//! kept alongside for fields read verbatim, such as the device descriptor.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

// =============================================================================
// Field Value
// =============================================================================

/// A submitted value after numeric coercion
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Parsed as a finite number; the submitted text is kept for encoding
    Numeric { value: f64, text: String },
    /// Anything that does not parse as a finite number
    Categorical(String),
}

impl FieldValue {
    /// Coerce raw form text; `None` when the value is blank
    pub fn parse(raw: &str) -> Option<Self> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }

        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Some(FieldValue::Numeric {
                value,
                text: text.to_string(),
            }),
            _ => Some(FieldValue::Categorical(text.to_string())),
        }
    }

    /// Submitted text (trimmed)
    pub fn text(&self) -> &str {
        match self {
            FieldValue::Numeric { text, .. } => text,
            FieldValue::Categorical(text) => text,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Numeric { value, .. } => Some(*value),
            FieldValue::Categorical(_) => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldValue::Numeric { .. })
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            FieldValue::Numeric { value, .. } => serializer.serialize_f64(*value),
            FieldValue::Categorical(text) => serializer.serialize_str(text),
        }
    }
}

// =============================================================================
// Submission
// =============================================================================

/// One coerced form submission, in submission order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Submission {
    values: IndexMap<String, FieldValue>,
    #[serde(skip)]
    raw: IndexMap<String, String>,
}

impl Submission {
    /// Coerce raw key/value pairs; a later value for the same key replaces
    /// an earlier one
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut values = IndexMap::new();
        let mut raw_values = IndexMap::new();
        for (key, raw) in pairs {
            let key = key.into();
            let raw = raw.as_ref();
            match FieldValue::parse(raw) {
                Some(value) => {
                    raw_values.insert(key.clone(), raw.to_string());
                    values.insert(key, value);
                }
                None => {
                    raw_values.shift_remove(&key);
                    values.shift_remove(&key);
                }
            }
        }
        Self {
            values,
            raw: raw_values,
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Submitted text exactly as received, for a non-blank field
    pub fn raw(&self, field: &str) -> Option<&str> {
        self.raw.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Numeric value of a field; absent fields are 0 and non-numeric text
    /// is rejected
    pub fn number_or_zero(&self, field: &str) -> Result<f64> {
        match self.values.get(field) {
            None => Ok(0.0),
            Some(FieldValue::Numeric { value, .. }) => Ok(*value),
            Some(FieldValue::Categorical(text)) => Err(Error::NonNumericField {
                field: field.to_string(),
                value: text.clone(),
            }),
        }
    }

    /// Sum of the listed fields, treating absentees as 0
    pub fn sum(&self, fields: &[&str]) -> Result<f64> {
        fields
            .iter()
            .try_fold(0.0, |total, field| -> Result<f64> {
                Ok(total + self.number_or_zero(field)?)
            })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}
