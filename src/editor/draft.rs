//! Immutable draft state for the add/edit forms.

use chrono::NaiveDate;

use crate::models::inventory::{
    AccessControl, ApplicationType, CloudProvider, DcType, DevelopedBy, Deployment,
    EndpointSecurity, InventoryDraft, Manager, Publish, Severity, Stage, VaptStatus,
};

/// The five addressable slots inside the `urls` sub-object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlField {
    ExternalProd,
    ExternalUat,
    InternalProd,
    InternalUat,
    Api,
}

/// One field-level edit command.
///
/// Nested URL edits get their own variant instead of a dotted-path string,
/// so a typo in a field name is a compile error rather than a silent no-op.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    AppId(String),
    ApplicationName(String),
    Url(UrlField, String),
    Severity(Severity),
    Deployment(Deployment),
    CloudProvider(Option<CloudProvider>),
    DcType(Option<DcType>),
    Stage(Stage),
    Publish(Publish),
    AvailabilityRating(i16),
    CriticalityRating(i16),
    GoLiveDate(Option<NaiveDate>),
    ApplicationType(ApplicationType),
    DevelopedBy(DevelopedBy),
    SocMonitoring(bool),
    EndpointSecurity(EndpointSecurity),
    AccessControl(AccessControl),
    Manager(Manager),
    VaptStatus(VaptStatus),
    RiskAssessmentDate(Option<NaiveDate>),
    SmtpEnabled(bool),
    BusinessOwner(String),
    BusinessDeptOwner(String),
    ServiceType(String),
    ServiceWindow(String),
    BusinessSeverity(String),
    ApplicationDescription(String),
}

/// Holds the mutable draft of a record being created or edited.
///
/// Every update produces a new state and leaves the previous one intact, so
/// a baseline snapshot taken earlier is never disturbed by later edits.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftFormState {
    draft: InventoryDraft,
}

impl DraftFormState {
    /// Seed with creation defaults (the add flow).
    pub fn new() -> Self {
        Self {
            draft: InventoryDraft::default(),
        }
    }

    /// Seed with a fetched record, identity already stripped (the edit flow).
    pub fn from_record(draft: InventoryDraft) -> Self {
        Self { draft }
    }

    pub fn draft(&self) -> &InventoryDraft {
        &self.draft
    }

    pub fn into_draft(self) -> InventoryDraft {
        self.draft
    }

    /// Apply a single field update, returning the next state.
    ///
    /// Changing `deployment` clears `cloudProvider` when the new value is
    /// not Cloud and `dcType` when the new value is not DC/DR, in the same
    /// atomic step.
    pub fn apply(&self, update: FieldUpdate) -> Self {
        let mut next = self.draft.clone();
        match update {
            FieldUpdate::AppId(v) => next.app_id = v,
            FieldUpdate::ApplicationName(v) => next.application_name = v,
            FieldUpdate::Url(slot, v) => {
                let value = normalize_text(v);
                match slot {
                    UrlField::ExternalProd => next.urls.external_prod = value,
                    UrlField::ExternalUat => next.urls.external_uat = value,
                    UrlField::InternalProd => next.urls.internal_prod = value,
                    UrlField::InternalUat => next.urls.internal_uat = value,
                    UrlField::Api => next.urls.api = value,
                }
            }
            FieldUpdate::Severity(v) => next.severity = v,
            FieldUpdate::Deployment(v) => {
                next.deployment = v;
                if !v.is_cloud() {
                    next.cloud_provider = None;
                }
                if !v.is_datacenter() {
                    next.dc_type = None;
                }
            }
            FieldUpdate::CloudProvider(v) => next.cloud_provider = v,
            FieldUpdate::DcType(v) => next.dc_type = v,
            FieldUpdate::Stage(v) => next.stage = v,
            FieldUpdate::Publish(v) => next.publish = v,
            FieldUpdate::AvailabilityRating(v) => next.availability_rating = v,
            FieldUpdate::CriticalityRating(v) => next.criticality_rating = v,
            FieldUpdate::GoLiveDate(v) => next.go_live_date = v,
            FieldUpdate::ApplicationType(v) => next.application_type = v,
            FieldUpdate::DevelopedBy(v) => next.developed_by = v,
            FieldUpdate::SocMonitoring(v) => next.soc_monitoring = v,
            FieldUpdate::EndpointSecurity(v) => next.endpoint_security = v,
            FieldUpdate::AccessControl(v) => next.access_control = v,
            FieldUpdate::Manager(v) => next.manager = v,
            FieldUpdate::VaptStatus(v) => next.vapt_status = v,
            FieldUpdate::RiskAssessmentDate(v) => next.risk_assessment_date = v,
            FieldUpdate::SmtpEnabled(v) => next.smtp_enabled = v,
            FieldUpdate::BusinessOwner(v) => next.business_owner = normalize_text(v),
            FieldUpdate::BusinessDeptOwner(v) => next.business_dept_owner = normalize_text(v),
            FieldUpdate::ServiceType(v) => next.service_type = normalize_text(v),
            FieldUpdate::ServiceWindow(v) => next.service_window = normalize_text(v),
            FieldUpdate::BusinessSeverity(v) => next.business_severity = normalize_text(v),
            FieldUpdate::ApplicationDescription(v) => {
                next.application_description = normalize_text(v)
            }
        }
        Self { draft: next }
    }

    /// Add a technology tag. No-op when the trimmed tag is empty or already
    /// present.
    pub fn add_tag(&self, tag: &str) -> Self {
        let tag = tag.trim();
        if tag.is_empty() || self.draft.technology_stack.iter().any(|t| t == tag) {
            return self.clone();
        }
        let mut next = self.draft.clone();
        next.technology_stack.push(tag.to_string());
        Self { draft: next }
    }

    /// Remove all occurrences of a technology tag.
    pub fn remove_tag(&self, tag: &str) -> Self {
        let mut next = self.draft.clone();
        next.technology_stack.retain(|t| t != tag);
        Self { draft: next }
    }
}

impl Default for DraftFormState {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_text(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
