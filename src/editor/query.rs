//! List query construction: the server-side query string and the
//! client-side narrowing predicate.

use serde::Serialize;

use crate::models::inventory::{
    AccessControl, ApplicationType, CloudProvider, DcType, DevelopedBy, Deployment,
    EndpointSecurity, InventoryRecord, Manager, Publish, Severity, Stage, VaptStatus,
};

/// Criteria sent to the server with the list call.
///
/// Only these five fields are filtered server-side; everything else is
/// narrowed client-side by [`FilterSet`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchParams {
    pub search: String,
    pub severity: Option<Severity>,
    pub stage: Option<Stage>,
    pub application_type: Option<ApplicationType>,
    pub deployment: Option<Deployment>,
}

impl SearchParams {
    /// Build a URL-encoded query string with stable key order, omitting
    /// empty fields.
    pub fn build(&self) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        if !self.search.is_empty() {
            pairs.push(("search", self.search.clone()));
        }
        if let Some(ref v) = self.severity {
            pairs.push(("severity", wire_name(v)));
        }
        if let Some(ref v) = self.stage {
            pairs.push(("stage", wire_name(v)));
        }
        if let Some(ref v) = self.application_type {
            pairs.push(("applicationType", wire_name(v)));
        }
        if let Some(ref v) = self.deployment {
            pairs.push(("deployment", wire_name(v)));
        }

        pairs
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Serialized wire name of a unit enum variant ("Non-Critical", "DC", ...).
fn wire_name<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_default()
        .trim_matches('"')
        .to_string()
}

/// Client-side narrowing applied on top of whatever the server returned.
/// Every populated criterion must match for a record to stay visible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    pub name_contains: Option<String>,
    pub severity: Option<Severity>,
    pub deployment: Option<Deployment>,
    pub stage: Option<Stage>,
    pub publish: Option<Publish>,
    pub application_type: Option<ApplicationType>,
    pub developed_by: Option<DevelopedBy>,
    pub cloud_provider: Option<CloudProvider>,
    pub dc_type: Option<DcType>,
    pub manager: Option<Manager>,
    pub vapt_status: Option<VaptStatus>,
    pub endpoint_security: Option<EndpointSecurity>,
    pub access_control: Option<AccessControl>,
    pub soc_monitoring: Option<bool>,
    pub smtp_enabled: Option<bool>,
}

impl FilterSet {
    pub fn matches(&self, record: &InventoryRecord) -> bool {
        let f = &record.fields;
        self.severity.map_or(true, |v| f.severity == v)
            && self.deployment.map_or(true, |v| f.deployment == v)
            && self.stage.map_or(true, |v| f.stage == v)
            && self.publish.map_or(true, |v| f.publish == v)
            && self.application_type.map_or(true, |v| f.application_type == v)
            && self.developed_by.map_or(true, |v| f.developed_by == v)
            && self
                .cloud_provider
                .map_or(true, |v| f.cloud_provider == Some(v))
            && self.dc_type.map_or(true, |v| f.dc_type == Some(v))
            && self.manager.map_or(true, |v| f.manager == v)
            && self.vapt_status.map_or(true, |v| f.vapt_status == v)
            && self
                .endpoint_security
                .map_or(true, |v| f.endpoint_security == v)
            && self.access_control.map_or(true, |v| f.access_control == v)
            && self.soc_monitoring.map_or(true, |v| f.soc_monitoring == v)
            && self.smtp_enabled.map_or(true, |v| f.smtp_enabled == v)
            && self.name_contains.as_deref().map_or(true, |needle| {
                f.application_name
                    .to_lowercase()
                    .contains(&needle.to_lowercase())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inventory::InventoryDraft;
    use chrono::Utc;
    use uuid::Uuid;

    fn record(name: &str) -> InventoryRecord {
        InventoryRecord {
            id: Uuid::new_v4(),
            fields: InventoryDraft {
                app_id: "APP-1".to_string(),
                application_name: name.to_string(),
                ..Default::default()
            },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn build_omits_empty_fields() {
        let params = SearchParams {
            severity: Some(Severity::Critical),
            ..Default::default()
        };
        assert_eq!(params.build(), "severity=Critical");
    }

    #[test]
    fn build_uses_stable_key_order() {
        let params = SearchParams {
            search: "pay".to_string(),
            severity: Some(Severity::NonCritical),
            stage: Some(Stage::Live),
            application_type: Some(ApplicationType::Infra),
            deployment: Some(Deployment::VendorSite),
        };
        assert_eq!(
            params.build(),
            "search=pay&severity=Non-Critical&stage=Live&applicationType=Infra&deployment=Vendor%20Site"
        );
    }

    #[test]
    fn build_encodes_search_text() {
        let params = SearchParams {
            search: "a b&c".to_string(),
            ..Default::default()
        };
        assert_eq!(params.build(), "search=a%20b%26c");
    }

    #[test]
    fn empty_params_build_empty_string() {
        assert_eq!(SearchParams::default().build(), "");
    }

    #[test]
    fn empty_filter_set_matches_everything() {
        assert!(FilterSet::default().matches(&record("Payroll")));
    }

    #[test]
    fn all_criteria_must_match() {
        let mut rec = record("Payroll");
        rec.fields.severity = Severity::Critical;
        rec.fields.soc_monitoring = true;

        let filters = FilterSet {
            severity: Some(Severity::Critical),
            soc_monitoring: Some(true),
            ..Default::default()
        };
        assert!(filters.matches(&rec));

        let filters = FilterSet {
            severity: Some(Severity::Critical),
            soc_monitoring: Some(false),
            ..Default::default()
        };
        assert!(!filters.matches(&rec));
    }

    #[test]
    fn name_match_is_case_insensitive_substring() {
        let rec = record("Payroll Engine");
        let filters = FilterSet {
            name_contains: Some("ROLL".to_string()),
            ..Default::default()
        };
        assert!(filters.matches(&rec));

        let filters = FilterSet {
            name_contains: Some("ledger".to_string()),
            ..Default::default()
        };
        assert!(!filters.matches(&rec));
    }

    #[test]
    fn dependent_field_filters_compare_against_options() {
        let mut rec = record("CRM");
        rec.fields.deployment = Deployment::Cloud;
        rec.fields.cloud_provider = Some(CloudProvider::Gcp);

        let filters = FilterSet {
            cloud_provider: Some(CloudProvider::Gcp),
            ..Default::default()
        };
        assert!(filters.matches(&rec));

        let filters = FilterSet {
            cloud_provider: Some(CloudProvider::Aws),
            ..Default::default()
        };
        assert!(!filters.matches(&rec));
    }
}
