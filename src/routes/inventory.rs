//! Inventory routes: the fixed CRUD contract consumed by the editor.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::models::inventory::{InventoryDraft, InventoryRecord};
use crate::services::inventory::{self as inventory_service, ListFilters};
use crate::AppState;

/// GET /inventory/get/all, listing records with server-side filters.
pub async fn list(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(filters): Query<ListFilters>,
) -> Result<Json<ApiResponse<Vec<InventoryRecord>>>, AppError> {
    let records = inventory_service::list(&state.db, &filters).await?;
    Ok(ApiResponse::success(records))
}

/// GET /inventory/getById/{id}, fetching one record.
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<InventoryRecord>>, AppError> {
    let id = parse_id(&id)?;
    let record = inventory_service::find_by_id(&state.db, id).await?;
    Ok(ApiResponse::success(record))
}

/// POST /inventory/add, creating a record.
pub async fn create(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(draft): Json<InventoryDraft>,
) -> Result<Json<ApiResponse<InventoryRecord>>, AppError> {
    let record = inventory_service::create(&state.db, &draft).await?;
    Ok(ApiResponse::success(record))
}

/// PUT /inventory/update/{id}, replacing a record's fields.
pub async fn update(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
    Json(draft): Json<InventoryDraft>,
) -> Result<Json<ApiResponse<InventoryRecord>>, AppError> {
    let id = parse_id(&id)?;
    let record = inventory_service::update(&state.db, id, &draft).await?;
    Ok(ApiResponse::success(record))
}

/// DELETE /inventory/delete/{id}.
pub async fn delete(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<&'static str>>, AppError> {
    let id = parse_id(&id)?;
    inventory_service::delete(&state.db, id).await?;
    Ok(ApiResponse::success("Item deleted successfully"))
}

/// Invalid identity formats are a 400, not a 404.
fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    raw.parse()
        .map_err(|_| AppError::Validation("Invalid ID format".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_uuid() {
        assert!(parse_id("7f1f84f8-6a70-4a3b-9c2e-3f58e2f0a111").is_ok());
    }

    #[test]
    fn parse_id_rejects_garbage() {
        let err = parse_id("not-a-uuid").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
