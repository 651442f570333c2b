//! HTTP handlers for the ShopLedger backend

pub mod auth;
pub mod catalog;
pub mod health;
pub mod movement;
pub mod reporting;

pub use auth::*;
pub use catalog::*;
pub use health::*;
pub use movement::*;
pub use reporting::*;
