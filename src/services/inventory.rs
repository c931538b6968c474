//! Inventory record service: SQL CRUD and server-side list filtering.

use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;
use crate::models::inventory::{
    ApplicationType, Deployment, InventoryDraft, InventoryRecord, Severity, Stage,
};

/// Query-string filters accepted by the list endpoint. The client omits
/// empty fields entirely, so every present value is meaningful.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListFilters {
    pub search: Option<String>,
    pub severity: Option<Severity>,
    pub stage: Option<Stage>,
    pub application_type: Option<ApplicationType>,
    pub deployment: Option<Deployment>,
}

const RECORD_COLUMNS: &str = "id, app_id, application_name, urls, severity, deployment, \
     cloud_provider, dc_type, stage, publish, availability_rating, criticality_rating, \
     go_live_date, application_type, developed_by, soc_monitoring, endpoint_security, \
     access_control, manager, vapt_status, risk_assessment_date, smtp_enabled, \
     business_owner, business_dept_owner, service_type, service_window, business_severity, \
     technology_stack, application_description, created_at, updated_at";

/// Create a new record, validating required fields and rating ranges.
pub async fn create(pool: &PgPool, draft: &InventoryDraft) -> Result<InventoryRecord, AppError> {
    draft
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let record = sqlx::query_as::<_, InventoryRecord>(&format!(
        r#"
        INSERT INTO inventory (app_id, application_name, urls, severity, deployment,
            cloud_provider, dc_type, stage, publish, availability_rating, criticality_rating,
            go_live_date, application_type, developed_by, soc_monitoring, endpoint_security,
            access_control, manager, vapt_status, risk_assessment_date, smtp_enabled,
            business_owner, business_dept_owner, service_type, service_window,
            business_severity, technology_stack, application_description)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28)
        RETURNING {RECORD_COLUMNS}
        "#
    ))
    .bind(&draft.app_id)
    .bind(&draft.application_name)
    .bind(&draft.urls)
    .bind(draft.severity)
    .bind(draft.deployment)
    .bind(draft.cloud_provider)
    .bind(draft.dc_type)
    .bind(draft.stage)
    .bind(draft.publish)
    .bind(draft.availability_rating)
    .bind(draft.criticality_rating)
    .bind(draft.go_live_date)
    .bind(draft.application_type)
    .bind(draft.developed_by)
    .bind(draft.soc_monitoring)
    .bind(draft.endpoint_security)
    .bind(draft.access_control)
    .bind(draft.manager)
    .bind(draft.vapt_status)
    .bind(draft.risk_assessment_date)
    .bind(draft.smtp_enabled)
    .bind(&draft.business_owner)
    .bind(&draft.business_dept_owner)
    .bind(&draft.service_type)
    .bind(&draft.service_window)
    .bind(&draft.business_severity)
    .bind(&draft.technology_stack)
    .bind(&draft.application_description)
    .fetch_one(pool)
    .await?;

    Ok(record)
}

/// Find a record by ID.
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<InventoryRecord, AppError> {
    sqlx::query_as::<_, InventoryRecord>(&format!(
        "SELECT {RECORD_COLUMNS} FROM inventory WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Item not found".to_string()))
}

/// List records matching the given filters, name ordered.
pub async fn list(pool: &PgPool, filters: &ListFilters) -> Result<Vec<InventoryRecord>, AppError> {
    let mut conditions: Vec<String> = Vec::new();
    let mut param_index = 0u32;

    // Build dynamic WHERE clauses
    if filters.search.as_deref().is_some_and(|s| !s.is_empty()) {
        param_index += 1;
        conditions.push(format!("application_name ILIKE ${param_index}"));
    }
    if filters.severity.is_some() {
        param_index += 1;
        conditions.push(format!("severity = ${param_index}"));
    }
    if filters.stage.is_some() {
        param_index += 1;
        conditions.push(format!("stage = ${param_index}"));
    }
    if filters.application_type.is_some() {
        param_index += 1;
        conditions.push(format!("application_type = ${param_index}"));
    }
    if filters.deployment.is_some() {
        param_index += 1;
        conditions.push(format!("deployment = ${param_index}"));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let sql = format!(
        "SELECT {RECORD_COLUMNS} FROM inventory {where_clause} ORDER BY application_name ASC"
    );

    let mut query = sqlx::query_as::<_, InventoryRecord>(&sql);
    if let Some(search) = filters.search.as_deref().filter(|s| !s.is_empty()) {
        query = query.bind(format!("%{search}%"));
    }
    if let Some(severity) = filters.severity {
        query = query.bind(severity);
    }
    if let Some(stage) = filters.stage {
        query = query.bind(stage);
    }
    if let Some(application_type) = filters.application_type {
        query = query.bind(application_type);
    }
    if let Some(deployment) = filters.deployment {
        query = query.bind(deployment);
    }

    Ok(query.fetch_all(pool).await?)
}

/// Replace all draft fields of a record. The editor always submits the
/// full draft, so this is a plain overwrite rather than a partial patch.
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    draft: &InventoryDraft,
) -> Result<InventoryRecord, AppError> {
    draft
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    sqlx::query_as::<_, InventoryRecord>(&format!(
        r#"
        UPDATE inventory SET
            app_id = $2, application_name = $3, urls = $4, severity = $5,
            deployment = $6, cloud_provider = $7, dc_type = $8, stage = $9,
            publish = $10, availability_rating = $11, criticality_rating = $12,
            go_live_date = $13, application_type = $14, developed_by = $15,
            soc_monitoring = $16, endpoint_security = $17, access_control = $18,
            manager = $19, vapt_status = $20, risk_assessment_date = $21,
            smtp_enabled = $22, business_owner = $23, business_dept_owner = $24,
            service_type = $25, service_window = $26, business_severity = $27,
            technology_stack = $28, application_description = $29,
            updated_at = NOW()
        WHERE id = $1
        RETURNING {RECORD_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&draft.app_id)
    .bind(&draft.application_name)
    .bind(&draft.urls)
    .bind(draft.severity)
    .bind(draft.deployment)
    .bind(draft.cloud_provider)
    .bind(draft.dc_type)
    .bind(draft.stage)
    .bind(draft.publish)
    .bind(draft.availability_rating)
    .bind(draft.criticality_rating)
    .bind(draft.go_live_date)
    .bind(draft.application_type)
    .bind(draft.developed_by)
    .bind(draft.soc_monitoring)
    .bind(draft.endpoint_security)
    .bind(draft.access_control)
    .bind(draft.manager)
    .bind(draft.vapt_status)
    .bind(draft.risk_assessment_date)
    .bind(draft.smtp_enabled)
    .bind(&draft.business_owner)
    .bind(&draft.business_dept_owner)
    .bind(&draft.service_type)
    .bind(&draft.service_window)
    .bind(&draft.business_severity)
    .bind(&draft.technology_stack)
    .bind(&draft.application_description)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Item not found".to_string()))
}

/// Delete a record by ID.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM inventory WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Item not found".to_string()));
    }
    Ok(())
}
