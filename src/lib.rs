//! Usage Cluster Service
//!
//! Assigns telephone account usage records to one of the behavioral
//! clusters found by an offline k-means training run.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                        HTTP (axum)                               │
//! │   GET /   POST /predict   POST /v1/predict   /metrics  /healthz  │
//! └────────────────────────────────┬─────────────────────────────────┘
//!                                  │ form key/value pairs
//!                     ┌────────────┴────────────┐
//!                     │     ClusterService      │
//!                     └────────────┬────────────┘
//!        ┌─────────────────────────┼─────────────────────────┐
//!        │                         │                         │
//! ┌──────┴───────┐        ┌────────┴────────┐       ┌────────┴───────┐
//! │   Feature    │        │  Scaler → Model │       │    Cluster     │
//! │   Deriver    │ ─────▶ │    Predictor    │ ────▶ │   Explainer    │
//! └──────┬───────┘        └────────┬────────┘       └────────────────┘
//!        │                         │
//! ┌──────┴─────────────────────────┴─────────────────────────────────┐
//! │      ArtifactStore (encoders, scaler, model; read-only)          │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`api`]: HTTP router, handlers and server
//! - [`artifacts`]: Trained encoders, scaler and model, and their loader
//! - [`features`]: Form coercion, brand extraction and feature derivation
//! - [`inference`]: Prediction, cluster descriptions and the request pipeline
//! - [`domain`]: Feature schema and the scaler/model ports
//! - [`metrics`]: Prometheus metrics
//! - [`error`]: Error types and handling

pub mod api;
pub mod artifacts;
pub mod domain;
pub mod error;
pub mod features;
pub mod inference;
pub mod metrics;

// Re-export commonly used types
pub use api::{ApiServer, ApiServerConfig, RestRouter};

pub use artifacts::{
    ArtifactManifest, ArtifactStore, BrandEncoder, CategoricalEncoders, KMeansModel,
    LabelEncoder, StandardScaler,
};

pub use domain::ports::{ClusterId, ClusterModel, FeatureScaler};
pub use domain::schema::{Aggregate, CategoricalField, FeatureSource, FEATURE_COUNT};

pub use error::{Error, ErrorKind, Result};

pub use features::{extract_brand, FeatureDeriver, FeatureVector, FieldValue, Submission};

pub use inference::{describe, Assignment, ClusterService, Prediction, Predictor};

pub use metrics::ServiceMetrics;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
