//! HTTP handlers for dashboard and report endpoints

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::reporting::{DashboardSummary, ReportSummary, ReportingService};
use crate::AppState;

/// Dashboard metrics
pub async fn get_dashboard(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<DashboardSummary>> {
    let service = ReportingService::new(state.db);
    let summary = service.dashboard_summary(Utc::now()).await?;
    Ok(Json(summary))
}

/// Full summary report
pub async fn get_report_summary(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<ReportSummary>> {
    let service = ReportingService::new(state.db);
    let summary = service.report_summary(Utc::now()).await?;
    Ok(Json(summary))
}

/// Export the sales log as CSV
pub async fn export_sales_csv(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Response> {
    let service = ReportingService::new(state.db);
    let csv_data = service.export_sales_csv().await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"sales.csv\"",
            ),
        ],
        csv_data,
    )
        .into_response())
}
