//! Report route: render and dispatch an inventory report.

use axum::{extract::State, Json};

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::models::inventory::InventoryRecord;
use crate::services::report::{self as report_service, ReportReceipt};
use crate::AppState;

/// POST /api/send-report. The body is the list of records to include.
pub async fn send_report(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(records): Json<Vec<InventoryRecord>>,
) -> Result<Json<ApiResponse<ReportReceipt>>, AppError> {
    tracing::info!(user = %user.email, records = records.len(), "report requested");
    let receipt =
        report_service::dispatch(state.config.report_relay_url.as_deref(), &records).await?;
    Ok(ApiResponse::success(receipt))
}
