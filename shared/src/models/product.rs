//! Product catalog model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A catalog product with its current stock level
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    /// Opaque unique identifier issued at creation, immutable afterwards
    pub sku: String,
    pub category: String,
    pub price: Decimal,
    pub stock_quantity: i32,
    /// Reorder threshold
    pub min_stock: i32,
    /// Reference to the scannable code artifact, stored but never interpreted
    pub qr_code_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// A product is low on stock when at or below its reorder threshold
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity <= self.min_stock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock: i32, min: i32) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "Rice 5kg".to_string(),
            sku: "PRD0A1B2C3D".to_string(),
            category: "Grains".to_string(),
            price: Decimal::new(2590, 2),
            stock_quantity: stock,
            min_stock: min,
            qr_code_path: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_low_stock_at_threshold() {
        assert!(product(10, 10).is_low_stock());
    }

    #[test]
    fn test_low_stock_below_threshold() {
        assert!(product(3, 10).is_low_stock());
        assert!(product(0, 0).is_low_stock());
    }

    #[test]
    fn test_not_low_stock_above_threshold() {
        assert!(!product(11, 10).is_low_stock());
    }
}
