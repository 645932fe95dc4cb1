//! API Module
//!
//! HTTP surface: the browser form, the JSON prediction API and the
//! operational endpoints.

pub mod rest;
pub mod server;
pub mod views;

pub use rest::*;
pub use server::*;
