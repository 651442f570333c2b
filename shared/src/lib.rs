//! Shared types and models for ShopLedger
//!
//! This crate contains the domain models and validation helpers shared
//! between the backend service, its handlers, and the test suites.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::*;
