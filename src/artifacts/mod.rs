//! Artifact Module
//!
//! Trained objects exported by the offline pipeline: label encoders, the
//! feature scaler and the clustering model, plus the loader that reads them.

pub mod encoder;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod loader;
pub mod manifest;
pub mod model;
pub mod scaler;

pub use encoder::*;
pub use loader::*;
pub use manifest::*;
pub use model::*;
pub use scaler::*;
