//! Movement log models
//!
//! A movement is either a purchase (stock increase) or a sale (stock
//! decrease). Both are immutable once recorded; corrections are made by
//! recording a new movement, never by editing history.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stock-increasing purchase from a supplier
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Purchase {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_cost: Decimal,
    /// quantity x unit_cost, computed at write time
    pub total_cost: Decimal,
    pub supplier: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A stock-decreasing sale to a customer
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Sale {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
    /// quantity x unit_price, computed at write time
    pub total_price: Decimal,
    pub customer_name: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
