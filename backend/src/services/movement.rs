//! Movement log service: purchases in, sales out
//!
//! Each recording runs as a single transaction that locks the product row,
//! validates the precondition, inserts the movement, and applies the signed
//! stock delta. Two concurrent sales of the last unit cannot both pass the
//! stock check. There is no reversal API; corrections are new movements.

use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Purchase, Sale};
use shared::validation::{validate_movement_quantity, validate_unit_amount};

/// Movement log service
#[derive(Clone)]
pub struct MovementService {
    db: PgPool,
}

/// Input for recording a stock-increasing purchase
#[derive(Debug, Deserialize)]
pub struct RecordPurchaseInput {
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_cost: Decimal,
    pub supplier: Option<String>,
    pub notes: Option<String>,
}

/// Input for recording a stock-decreasing sale
#[derive(Debug, Deserialize)]
pub struct RecordSaleInput {
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub customer_name: Option<String>,
    pub notes: Option<String>,
}

impl MovementService {
    /// Create a new MovementService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a purchase and increment the product's stock atomically
    pub async fn record_purchase(&self, input: RecordPurchaseInput) -> AppResult<Purchase> {
        validate_movement_quantity(input.quantity).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: msg.to_string(),
        })?;
        validate_unit_amount(input.unit_cost).map_err(|msg| AppError::Validation {
            field: "unit_cost".to_string(),
            message: msg.to_string(),
        })?;

        let total_cost = Decimal::from(input.quantity) * input.unit_cost;

        let mut tx = self.db.begin().await?;

        // The update takes the row lock and doubles as the existence check
        let updated = sqlx::query(
            r#"
            UPDATE products
            SET stock_quantity = stock_quantity + $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(input.product_id)
        .bind(input.quantity)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound("Product".to_string()));
        }

        let purchase = sqlx::query_as::<_, Purchase>(
            r#"
            INSERT INTO purchases (product_id, quantity, unit_cost, total_cost, supplier, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, product_id, quantity, unit_cost, total_cost, supplier, notes, created_at
            "#,
        )
        .bind(input.product_id)
        .bind(input.quantity)
        .bind(input.unit_cost)
        .bind(total_cost)
        .bind(&input.supplier)
        .bind(&input.notes)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(purchase)
    }

    /// Record a sale and decrement the product's stock atomically.
    /// Fails with the available quantity, and without any mutation, when the
    /// sale would drive stock negative.
    pub async fn record_sale(&self, input: RecordSaleInput) -> AppResult<Sale> {
        validate_movement_quantity(input.quantity).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: msg.to_string(),
        })?;
        validate_unit_amount(input.unit_price).map_err(|msg| AppError::Validation {
            field: "unit_price".to_string(),
            message: msg.to_string(),
        })?;

        let total_price = Decimal::from(input.quantity) * input.unit_price;

        let mut tx = self.db.begin().await?;

        // Row lock so the stock check and the decrement apply as one unit
        let available = sqlx::query_scalar::<_, i32>(
            "SELECT stock_quantity FROM products WHERE id = $1 FOR UPDATE",
        )
        .bind(input.product_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        if available < input.quantity {
            return Err(AppError::InsufficientStock { available });
        }

        let sale = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales (product_id, quantity, unit_price, total_price, customer_name, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, product_id, quantity, unit_price, total_price, customer_name, notes, created_at
            "#,
        )
        .bind(input.product_id)
        .bind(input.quantity)
        .bind(input.unit_price)
        .bind(total_price)
        .bind(&input.customer_name)
        .bind(&input.notes)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE products
            SET stock_quantity = stock_quantity - $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(input.product_id)
        .bind(input.quantity)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(sale)
    }

    /// List purchases, newest first
    pub async fn list_purchases(&self) -> AppResult<Vec<Purchase>> {
        let purchases = sqlx::query_as::<_, Purchase>(
            r#"
            SELECT id, product_id, quantity, unit_cost, total_cost, supplier, notes, created_at
            FROM purchases
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(purchases)
    }

    /// List sales, newest first
    pub async fn list_sales(&self) -> AppResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, product_id, quantity, unit_price, total_price, customer_name, notes, created_at
            FROM sales
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(sales)
    }
}
