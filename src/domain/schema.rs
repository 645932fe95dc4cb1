//! Feature Schema
//!
//! Field names, aggregate groups and the ordered feature selection the
//! scaler and model were fitted on. Changing anything here invalidates the
//! trained artifacts.

use serde::{Deserialize, Serialize};

/// Number of features consumed by the scaler and the model
pub const FEATURE_COUNT: usize = 11;

/// Number of derived aggregate sums
pub const AGGREGATE_COUNT: usize = 6;

/// Number of raw form fields (V1..V28)
pub const FORM_FIELD_COUNT: usize = 28;

/// Free-text device descriptor the phone brand is read from
pub const DEVICE_FIELD: &str = "V9";

/// Name of the encoded phone brand in debug output
pub const PHONE_BRAND_ENCODED: &str = "phone_brand_encoded";

/// Raw form field names in display order
pub fn form_fields() -> impl Iterator<Item = String> {
    (1..=FORM_FIELD_COUNT).map(|i| format!("V{}", i))
}

// =============================================================================
// Categorical Fields
// =============================================================================

/// Form fields encoded with a fitted label encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoricalField {
    V1,
    V4,
    V7,
    V8,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 4] = [
        CategoricalField::V1,
        CategoricalField::V4,
        CategoricalField::V7,
        CategoricalField::V8,
    ];

    /// Form field name
    pub fn field_name(&self) -> &'static str {
        match self {
            CategoricalField::V1 => "V1",
            CategoricalField::V4 => "V4",
            CategoricalField::V7 => "V7",
            CategoricalField::V8 => "V8",
        }
    }

    /// Name of the encoded feature
    pub fn encoded_name(&self) -> &'static str {
        match self {
            CategoricalField::V1 => "V1_encoded",
            CategoricalField::V4 => "V4_encoded",
            CategoricalField::V7 => "V7_encoded",
            CategoricalField::V8 => "V8_encoded",
        }
    }
}

impl std::fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.field_name())
    }
}

// =============================================================================
// Aggregate Groups
// =============================================================================

/// Derived sums over disjoint groups of raw fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregate {
    TotalInOut,
    TotalNbRecharge,
    TotalRecharge,
    TotalRevenuOp,
    TotalNomtantRemb,
    TotalNbOptions,
}

impl Aggregate {
    pub const ALL: [Aggregate; AGGREGATE_COUNT] = [
        Aggregate::TotalInOut,
        Aggregate::TotalNbRecharge,
        Aggregate::TotalRecharge,
        Aggregate::TotalRevenuOp,
        Aggregate::TotalNomtantRemb,
        Aggregate::TotalNbOptions,
    ];

    /// Feature name as used at training time
    pub fn name(&self) -> &'static str {
        match self {
            Aggregate::TotalInOut => "total_in_out",
            Aggregate::TotalNbRecharge => "total_nb_recharge",
            Aggregate::TotalRecharge => "total_recharge",
            Aggregate::TotalRevenuOp => "total_revenu_op",
            Aggregate::TotalNomtantRemb => "total_nomtant_remb",
            Aggregate::TotalNbOptions => "total_nb_options",
        }
    }

    /// Raw fields summed into this aggregate
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            Aggregate::TotalInOut => &["V12", "V11"],
            Aggregate::TotalNbRecharge => &["V13", "V14", "V15", "V16", "V17"],
            Aggregate::TotalRecharge => &["V18", "V19", "V20", "V21", "V22"],
            Aggregate::TotalRevenuOp => &["V23", "V24"],
            Aggregate::TotalNomtantRemb => &["V25", "V26"],
            Aggregate::TotalNbOptions => &["V27", "V28"],
        }
    }
}

impl std::fmt::Display for Aggregate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// =============================================================================
// Feature Selection
// =============================================================================

/// Where a selected feature's value comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureSource {
    /// A numeric form field taken as submitted
    Raw(&'static str),
    /// One of the derived sums
    Aggregate(Aggregate),
    /// A categorical code
    Encoded(CategoricalField),
}

impl FeatureSource {
    pub fn name(&self) -> &'static str {
        match self {
            FeatureSource::Raw(field) => *field,
            FeatureSource::Aggregate(aggregate) => aggregate.name(),
            FeatureSource::Encoded(field) => field.encoded_name(),
        }
    }
}

/// Features fed to the scaler, in fitted order
pub const SELECTED_FEATURES: [FeatureSource; FEATURE_COUNT] = [
    FeatureSource::Raw("V6"),
    FeatureSource::Raw("V10"),
    FeatureSource::Raw("V11"),
    FeatureSource::Raw("V12"),
    FeatureSource::Aggregate(Aggregate::TotalRevenuOp),
    FeatureSource::Aggregate(Aggregate::TotalNbOptions),
    FeatureSource::Aggregate(Aggregate::TotalRecharge),
    FeatureSource::Aggregate(Aggregate::TotalNomtantRemb),
    FeatureSource::Aggregate(Aggregate::TotalNbRecharge),
    FeatureSource::Encoded(CategoricalField::V7),
    FeatureSource::Raw("V5"),
];

/// Names of the selected features, in fitted order
pub fn feature_names() -> [&'static str; FEATURE_COUNT] {
    SELECTED_FEATURES.map(|source| source.name())
}
