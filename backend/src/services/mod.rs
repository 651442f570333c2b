//! Business logic services for the ShopLedger backend

pub mod auth;
pub mod catalog;
pub mod movement;
pub mod reporting;

pub use auth::AuthService;
pub use catalog::CatalogService;
pub use movement::MovementService;
pub use reporting::ReportingService;
