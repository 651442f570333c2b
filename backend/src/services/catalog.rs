//! Catalog service for product records and stock levels
//!
//! Stock is normally mutated through the movement log; the direct edit in
//! `update_product` is allowed and intentionally breaks movement provenance.

use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::external::SkuIssuer;
use crate::models::Product;
use shared::validation::{
    validate_category, validate_product_name, validate_sku, validate_stock_level,
    validate_unit_amount,
};

/// Catalog service for managing the product catalog
#[derive(Clone)]
pub struct CatalogService {
    db: PgPool,
}

/// Input for adding a product to the catalog
#[derive(Debug, Deserialize)]
pub struct CreateProductInput {
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub min_stock: i32,
}

/// Input for a partial product update
#[derive(Debug, Deserialize)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
    pub min_stock: Option<i32>,
}

const PRODUCT_COLUMNS: &str =
    "id, name, sku, category, price, stock_quantity, min_stock, qr_code_path, created_at, updated_at";

impl CatalogService {
    /// Create a new CatalogService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Add a product to the catalog, issuing its SKU and code artifact
    pub async fn create_product(
        &self,
        issuer: &dyn SkuIssuer,
        input: CreateProductInput,
    ) -> AppResult<Product> {
        validate_product_name(&input.name).map_err(|msg| AppError::Validation {
            field: "name".to_string(),
            message: msg.to_string(),
        })?;
        validate_category(&input.category).map_err(|msg| AppError::Validation {
            field: "category".to_string(),
            message: msg.to_string(),
        })?;
        validate_unit_amount(input.price).map_err(|msg| AppError::Validation {
            field: "price".to_string(),
            message: msg.to_string(),
        })?;
        validate_stock_level(input.stock_quantity).map_err(|msg| AppError::Validation {
            field: "stock_quantity".to_string(),
            message: msg.to_string(),
        })?;
        validate_stock_level(input.min_stock).map_err(|msg| AppError::Validation {
            field: "min_stock".to_string(),
            message: msg.to_string(),
        })?;

        let issued = issuer.issue(input.name.trim());

        // A colliding SKU surfaces as a duplicate-entry error via the
        // unique constraint; the issuer is not consulted twice.
        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (name, sku, category, price, stock_quantity, min_stock, qr_code_path)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {PRODUCT_COLUMNS}
            "#,
        ))
        .bind(input.name.trim())
        .bind(&issued.sku)
        .bind(input.category.trim())
        .bind(input.price)
        .bind(input.stock_quantity)
        .bind(input.min_stock)
        .bind(&issued.artifact_ref)
        .fetch_one(&self.db)
        .await?;

        Ok(product)
    }

    /// Partially update a product's mutable fields.
    /// The SKU is immutable once issued and is not part of the input.
    pub async fn update_product(&self, id: Uuid, input: UpdateProductInput) -> AppResult<Product> {
        let mut tx = self.db.begin().await?;

        let existing = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        let name = input.name.unwrap_or(existing.name);
        let category = input.category.unwrap_or(existing.category);
        let price = input.price.unwrap_or(existing.price);
        let stock_quantity = input.stock_quantity.unwrap_or(existing.stock_quantity);
        let min_stock = input.min_stock.unwrap_or(existing.min_stock);

        validate_product_name(&name).map_err(|msg| AppError::Validation {
            field: "name".to_string(),
            message: msg.to_string(),
        })?;
        validate_category(&category).map_err(|msg| AppError::Validation {
            field: "category".to_string(),
            message: msg.to_string(),
        })?;
        validate_unit_amount(price).map_err(|msg| AppError::Validation {
            field: "price".to_string(),
            message: msg.to_string(),
        })?;
        validate_stock_level(stock_quantity).map_err(|msg| AppError::Validation {
            field: "stock_quantity".to_string(),
            message: msg.to_string(),
        })?;
        validate_stock_level(min_stock).map_err(|msg| AppError::Validation {
            field: "min_stock".to_string(),
            message: msg.to_string(),
        })?;

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET name = $2, category = $3, price = $4, stock_quantity = $5, min_stock = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(name.trim())
        .bind(category.trim())
        .bind(price)
        .bind(stock_quantity)
        .bind(min_stock)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(product)
    }

    /// Remove a product from the catalog.
    /// Deletion is restricted while movements reference the product, so the
    /// ledger never holds dangling references.
    pub async fn delete_product(&self, id: Uuid) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let movement_count: i64 = sqlx::query_scalar(
            r#"
            SELECT (SELECT COUNT(*) FROM purchases WHERE product_id = $1)
                 + (SELECT COUNT(*) FROM sales WHERE product_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        if movement_count > 0 {
            return Err(AppError::Conflict {
                resource: "product".to_string(),
                message: "Product has recorded movements and cannot be deleted".to_string(),
            });
        }

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product".to_string()));
        }

        tx.commit().await?;

        Ok(())
    }

    /// Get a product by id
    pub async fn get_product(&self, id: Uuid) -> AppResult<Product> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        Ok(product)
    }

    /// Get a product by its SKU (the scan lookup)
    pub async fn get_product_by_sku(&self, sku: &str) -> AppResult<Product> {
        validate_sku(sku).map_err(|msg| AppError::Validation {
            field: "sku".to_string(),
            message: msg.to_string(),
        })?;

        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE sku = $1"
        ))
        .bind(sku)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        Ok(product)
    }

    /// List products, optionally filtered by a case-insensitive substring
    /// match against name or category
    pub async fn search_products(&self, search: Option<&str>) -> AppResult<Vec<Product>> {
        let search = search.map(str::trim).filter(|s| !s.is_empty());

        let products = match search {
            Some(term) => {
                let pattern = format!("%{}%", term);
                sqlx::query_as::<_, Product>(&format!(
                    r#"
                    SELECT {PRODUCT_COLUMNS}
                    FROM products
                    WHERE name ILIKE $1 OR category ILIKE $1
                    ORDER BY name
                    "#,
                ))
                .bind(pattern)
                .fetch_all(&self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, Product>(&format!(
                    "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY name"
                ))
                .fetch_all(&self.db)
                .await?
            }
        };

        Ok(products)
    }

    /// List products at or below their reorder threshold
    pub async fn list_low_stock(&self) -> AppResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE stock_quantity <= min_stock
            ORDER BY name
            "#,
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(products)
    }
}
