//! Database models for the ShopLedger backend
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
