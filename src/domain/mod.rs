//! Domain Module
//!
//! Core types shared by the artifact, feature and inference layers.

pub mod ports;
pub mod schema;

pub use ports::*;
pub use schema::*;
