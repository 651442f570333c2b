//! External collaborators consumed by the core services

pub mod sku;

pub use sku::{IssuedSku, QrSkuIssuer, SkuIssuer};
