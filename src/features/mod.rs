//! Features Module
//!
//! Form coercion, phone brand extraction and derivation of the model's
//! feature vector.

pub mod brand;
pub mod deriver;
pub mod submission;

pub use brand::*;
pub use deriver::*;
pub use submission::*;
