//! Inventory record model: the sole domain entity plus its wire enums.
//!
//! Wire names are camelCase and enum values match the strings the UI has
//! always sent ("Non-Critical", "Vendor Site", "In-House", ...), so stored
//! data and the REST contract stay stable.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "severity_level")]
pub enum Severity {
    Critical,
    #[sqlx(rename = "Non-Critical")]
    #[serde(rename = "Non-Critical")]
    NonCritical,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "deployment_model")]
pub enum Deployment {
    Onprem,
    #[sqlx(rename = "DC")]
    #[serde(rename = "DC")]
    Dc,
    #[sqlx(rename = "DR")]
    #[serde(rename = "DR")]
    Dr,
    Cloud,
    Hybrid,
    #[sqlx(rename = "Vendor Site")]
    #[serde(rename = "Vendor Site")]
    VendorSite,
}

impl Deployment {
    /// Whether this deployment takes a cloud provider.
    pub fn is_cloud(self) -> bool {
        self == Self::Cloud
    }

    /// Whether this deployment takes a DC type.
    pub fn is_datacenter(self) -> bool {
        matches!(self, Self::Dc | Self::Dr)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "cloud_provider")]
pub enum CloudProvider {
    Azure,
    #[sqlx(rename = "AWS")]
    #[serde(rename = "AWS")]
    Aws,
    #[sqlx(rename = "GCP")]
    #[serde(rename = "GCP")]
    Gcp,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "dc_type")]
pub enum DcType {
    #[sqlx(rename = "DC")]
    #[serde(rename = "DC")]
    Dc,
    #[sqlx(rename = "DR")]
    #[serde(rename = "DR")]
    Dr,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "lifecycle_stage")]
pub enum Stage {
    Live,
    Preprod,
    Sunset,
    Decom,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "publish_mode")]
pub enum Publish {
    Internet,
    #[sqlx(rename = "Non-Internet")]
    #[serde(rename = "Non-Internet")]
    NonInternet,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "application_type")]
pub enum ApplicationType {
    Business,
    Infra,
    Security,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "developed_by")]
pub enum DevelopedBy {
    #[sqlx(rename = "In-House")]
    #[serde(rename = "In-House")]
    InHouse,
    #[sqlx(rename = "OEM")]
    #[serde(rename = "OEM")]
    Oem,
    Vendor,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "endpoint_security")]
pub enum EndpointSecurity {
    #[sqlx(rename = "NA")]
    #[serde(rename = "NA")]
    Na,
    #[sqlx(rename = "HIPS")]
    #[serde(rename = "HIPS")]
    Hips,
    #[sqlx(rename = "EDR")]
    #[serde(rename = "EDR")]
    Edr,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "access_control")]
pub enum AccessControl {
    #[sqlx(rename = "NA")]
    #[serde(rename = "NA")]
    Na,
    #[sqlx(rename = "PAM")]
    #[serde(rename = "PAM")]
    Pam,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "manager_type")]
pub enum Manager {
    Business,
    #[sqlx(rename = "IT")]
    #[serde(rename = "IT")]
    It,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "vapt_status")]
pub enum VaptStatus {
    #[sqlx(rename = "VA")]
    #[serde(rename = "VA")]
    Va,
    #[sqlx(rename = "PT")]
    #[serde(rename = "PT")]
    Pt,
    #[sqlx(rename = "API")]
    #[serde(rename = "API")]
    Api,
}

/// The five optional URL slots of a record, stored as one JSONB column.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct UrlSet {
    pub external_prod: Option<String>,
    #[serde(rename = "externalUAT")]
    pub external_uat: Option<String>,
    pub internal_prod: Option<String>,
    #[serde(rename = "internalUAT")]
    pub internal_uat: Option<String>,
    pub api: Option<String>,
}

/// All user-editable fields of a record. This is what the editor drafts
/// against and what create/update submit; identity lives on
/// [`InventoryRecord`] only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryDraft {
    #[validate(length(min = 1, message = "appId is required"))]
    pub app_id: String,
    #[validate(length(min = 1, message = "applicationName is required"))]
    pub application_name: String,
    pub urls: Json<UrlSet>,
    pub severity: Severity,
    pub deployment: Deployment,
    pub cloud_provider: Option<CloudProvider>,
    pub dc_type: Option<DcType>,
    pub stage: Stage,
    pub publish: Publish,
    #[validate(range(min = 1, max = 4, message = "availabilityRating must be 1-4"))]
    pub availability_rating: i16,
    #[validate(range(min = 1, max = 4, message = "criticalityRating must be 1-4"))]
    pub criticality_rating: i16,
    pub go_live_date: Option<NaiveDate>,
    pub application_type: ApplicationType,
    pub developed_by: DevelopedBy,
    pub soc_monitoring: bool,
    pub endpoint_security: EndpointSecurity,
    pub access_control: AccessControl,
    pub manager: Manager,
    pub vapt_status: VaptStatus,
    pub risk_assessment_date: Option<NaiveDate>,
    pub smtp_enabled: bool,
    pub business_owner: Option<String>,
    pub business_dept_owner: Option<String>,
    pub service_type: Option<String>,
    pub service_window: Option<String>,
    pub business_severity: Option<String>,
    pub technology_stack: Json<Vec<String>>,
    pub application_description: Option<String>,
}

impl Default for InventoryDraft {
    /// Creation defaults, matching what the add form has always seeded.
    fn default() -> Self {
        Self {
            app_id: String::new(),
            application_name: String::new(),
            urls: Json(UrlSet::default()),
            severity: Severity::NonCritical,
            deployment: Deployment::Onprem,
            cloud_provider: None,
            dc_type: None,
            stage: Stage::Live,
            publish: Publish::Internet,
            availability_rating: 1,
            criticality_rating: 1,
            go_live_date: None,
            application_type: ApplicationType::Business,
            developed_by: DevelopedBy::InHouse,
            soc_monitoring: false,
            endpoint_security: EndpointSecurity::Na,
            access_control: AccessControl::Na,
            manager: Manager::Business,
            vapt_status: VaptStatus::Va,
            risk_assessment_date: None,
            smtp_enabled: false,
            business_owner: None,
            business_dept_owner: None,
            service_type: None,
            service_window: None,
            business_severity: None,
            technology_stack: Json(Vec::new()),
            application_description: None,
        }
    }
}

/// Full inventory record as stored and served: identity plus draft fields.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub id: Uuid,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub fields: InventoryDraft,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InventoryRecord {
    /// Strip identity and timestamps, yielding an editable baseline.
    pub fn into_draft(self) -> InventoryDraft {
        self.fields
    }
}
