//! Validation utilities for ShopLedger
//!
//! Pure input checks shared by the catalog and movement services. Each
//! returns a static message suitable for a structured validation error.

use rust_decimal::Decimal;

// ============================================================================
// Catalog Validations
// ============================================================================

/// Validate a product name (required, at most 100 characters)
pub fn validate_product_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Product name is required");
    }
    if trimmed.len() > 100 {
        return Err("Product name must be at most 100 characters");
    }
    Ok(())
}

/// Validate a product category (required, at most 50 characters)
pub fn validate_category(category: &str) -> Result<(), &'static str> {
    let trimmed = category.trim();
    if trimmed.is_empty() {
        return Err("Category is required");
    }
    if trimmed.len() > 50 {
        return Err("Category must be at most 50 characters");
    }
    Ok(())
}

/// Validate a unit price or unit cost (non-negative)
pub fn validate_unit_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount < Decimal::ZERO {
        return Err("Amount cannot be negative");
    }
    Ok(())
}

/// Validate a stock level or reorder threshold (non-negative)
pub fn validate_stock_level(level: i32) -> Result<(), &'static str> {
    if level < 0 {
        return Err("Stock level cannot be negative");
    }
    Ok(())
}

/// Validate a SKU (non-empty, at most 20 uppercase alphanumeric characters)
pub fn validate_sku(sku: &str) -> Result<(), &'static str> {
    if sku.is_empty() {
        return Err("SKU is required");
    }
    if sku.len() > 20 {
        return Err("SKU must be at most 20 characters");
    }
    if !sku.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()) {
        return Err("SKU must be uppercase alphanumeric only");
    }
    Ok(())
}

// ============================================================================
// Movement Validations
// ============================================================================

/// Validate a movement quantity (strictly positive)
pub fn validate_movement_quantity(quantity: i32) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err("Quantity must be positive");
    }
    Ok(())
}

// ============================================================================
// Account Validations
// ============================================================================

/// Validate a username (3-80 characters, no whitespace)
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.len() < 3 {
        return Err("Username must be at least 3 characters");
    }
    if username.len() > 80 {
        return Err("Username must be at most 80 characters");
    }
    if username.chars().any(|c| c.is_whitespace()) {
        return Err("Username cannot contain whitespace");
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}
