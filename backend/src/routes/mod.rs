//! Route definitions for the ShopLedger backend

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public)
        .nest("/auth", auth_routes())
        // Public scan lookup (unauthenticated - for QR code scanning)
        .route("/scan/:sku", get(handlers::get_product_by_sku))
        // Protected routes - product catalog
        .nest("/products", product_routes())
        // Protected routes - purchase log
        .nest("/purchases", purchase_routes())
        // Protected routes - sales log
        .nest("/sales", sale_routes())
        // Protected routes - dashboard and reports
        .nest("/reports", report_routes())
}

/// Authentication routes (login public, session lookup protected)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::login))
        .merge(session_routes())
}

/// Session routes (protected)
fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(handlers::me))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Product catalog routes (protected)
fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route("/low-stock", get(handlers::list_low_stock))
        .route(
            "/:product_id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Purchase log routes (protected)
fn purchase_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_purchases).post(handlers::record_purchase),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Sales log routes (protected)
fn sale_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_sales).post(handlers::record_sale))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Dashboard and report routes (protected)
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/summary", get(handlers::get_report_summary))
        .route("/sales/export", get(handlers::export_sales_csv))
        .route_layer(middleware::from_fn(auth_middleware))
}
