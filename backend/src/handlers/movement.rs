//! HTTP handlers for purchase and sale recording

use axum::{extract::State, http::StatusCode, Json};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::models::{Purchase, Sale};
use crate::services::movement::{MovementService, RecordPurchaseInput, RecordSaleInput};
use crate::AppState;

/// List purchases, newest first
pub async fn list_purchases(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<Purchase>>> {
    let service = MovementService::new(state.db);
    let purchases = service.list_purchases().await?;
    Ok(Json(purchases))
}

/// Record a purchase
pub async fn record_purchase(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Json(input): Json<RecordPurchaseInput>,
) -> AppResult<(StatusCode, Json<Purchase>)> {
    let service = MovementService::new(state.db);
    let purchase = service.record_purchase(input).await?;
    Ok((StatusCode::CREATED, Json(purchase)))
}

/// List sales, newest first
pub async fn list_sales(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<Sale>>> {
    let service = MovementService::new(state.db);
    let sales = service.list_sales().await?;
    Ok(Json(sales))
}

/// Record a sale
pub async fn record_sale(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Json(input): Json<RecordSaleInput>,
) -> AppResult<(StatusCode, Json<Sale>)> {
    let service = MovementService::new(state.db);
    let sale = service.record_sale(input).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}
