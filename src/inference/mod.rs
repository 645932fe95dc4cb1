//! Inference Module
//!
//! Scaling and cluster assignment over the loaded artifacts, cluster
//! descriptions, and the per-request service tying the pipeline together.

pub mod explainer;
pub mod predictor;
pub mod service;

pub use explainer::*;
pub use predictor::*;
pub use service::*;
