//! Inventory report rendering and out-of-band dispatch.
//!
//! The caller posts the records it wants reported; the service renders a
//! CSV summary and hands it to the configured mail relay. Actual mail
//! delivery happens outside this process.

use serde::Serialize;

use crate::errors::AppError;
use crate::models::inventory::InventoryRecord;

/// Receipt returned to the caller after a report is dispatched.
#[derive(Debug, Serialize)]
pub struct ReportReceipt {
    pub records: usize,
    pub bytes: usize,
}

/// Render the report body: one CSV row per record with the columns the
/// list view shows.
pub fn render_csv(records: &[InventoryRecord]) -> Result<String, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record([
            "appId",
            "applicationName",
            "severity",
            "deployment",
            "stage",
            "applicationType",
            "serviceType",
            "businessOwner",
        ])
        .map_err(|e| AppError::Internal(format!("CSV write failed: {e}")))?;

    for record in records {
        let f = &record.fields;
        writer
            .write_record([
                f.app_id.as_str(),
                f.application_name.as_str(),
                wire_name(&f.severity).as_str(),
                wire_name(&f.deployment).as_str(),
                wire_name(&f.stage).as_str(),
                wire_name(&f.application_type).as_str(),
                f.service_type.as_deref().unwrap_or(""),
                f.business_owner.as_deref().unwrap_or(""),
            ])
            .map_err(|e| AppError::Internal(format!("CSV write failed: {e}")))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("CSV write failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| AppError::Internal(format!("CSV encoding failed: {e}")))
}

fn wire_name<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_default()
        .trim_matches('"')
        .to_string()
}

/// Render the records and forward them to the mail relay endpoint.
pub async fn dispatch(
    relay_url: Option<&str>,
    records: &[InventoryRecord],
) -> Result<ReportReceipt, AppError> {
    let relay_url = relay_url
        .ok_or_else(|| AppError::Validation("REPORT_RELAY_URL is not configured".to_string()))?;

    let body = render_csv(records)?;
    let receipt = ReportReceipt {
        records: records.len(),
        bytes: body.len(),
    };

    let payload = serde_json::json!({
        "subject": format!("Inventory report ({} records)", records.len()),
        "content_type": "text/csv",
        "body": body,
    });

    let response = reqwest::Client::new()
        .post(relay_url)
        .json(&payload)
        .send()
        .await
        .map_err(|e| AppError::Internal(format!("Report relay unreachable: {e}")))?;

    if !response.status().is_success() {
        return Err(AppError::Internal(format!(
            "Report relay returned {}",
            response.status()
        )));
    }

    tracing::info!(records = receipt.records, bytes = receipt.bytes, "report dispatched");
    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inventory::{InventoryDraft, Severity};
    use chrono::Utc;
    use uuid::Uuid;

    fn record(app_id: &str, name: &str) -> InventoryRecord {
        InventoryRecord {
            id: Uuid::new_v4(),
            fields: InventoryDraft {
                app_id: app_id.to_string(),
                application_name: name.to_string(),
                severity: Severity::Critical,
                ..Default::default()
            },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn csv_has_header_and_one_row_per_record() {
        let records = vec![record("APP-1", "Payroll"), record("APP-2", "CRM")];
        let csv = render_csv(&records).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("appId,applicationName"));
        assert!(lines[1].contains("APP-1"));
        assert!(lines[1].contains("Critical"));
        assert!(lines[2].contains("CRM"));
    }

    #[test]
    fn csv_of_empty_list_is_header_only() {
        let csv = render_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[tokio::test]
    async fn dispatch_without_relay_is_rejected() {
        let err = dispatch(None, &[]).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
