//! Request middleware for the ShopLedger backend

pub mod auth;

pub use auth::{auth_middleware, AuthUser, CurrentUser};
