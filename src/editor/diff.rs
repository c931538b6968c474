//! Change detection between a draft and its baseline snapshot.

use crate::models::inventory::{InventoryDraft, UrlSet};

/// Returns true iff at least one field of the draft differs from the
/// original under the form's comparison rules: booleans by identity, text
/// with both-empty treated as equal, the technology list order-independent,
/// and the `urls` sub-object key by key. Gates whether save is enabled, so
/// a no-op edit never reaches the network.
pub fn has_changes(original: &InventoryDraft, draft: &InventoryDraft) -> bool {
    original.app_id != draft.app_id
        || original.application_name != draft.application_name
        || urls_differ(&original.urls, &draft.urls)
        || original.severity != draft.severity
        || original.deployment != draft.deployment
        || original.cloud_provider != draft.cloud_provider
        || original.dc_type != draft.dc_type
        || original.stage != draft.stage
        || original.publish != draft.publish
        || original.availability_rating != draft.availability_rating
        || original.criticality_rating != draft.criticality_rating
        || original.go_live_date != draft.go_live_date
        || original.application_type != draft.application_type
        || original.developed_by != draft.developed_by
        || original.soc_monitoring != draft.soc_monitoring
        || original.endpoint_security != draft.endpoint_security
        || original.access_control != draft.access_control
        || original.manager != draft.manager
        || original.vapt_status != draft.vapt_status
        || original.risk_assessment_date != draft.risk_assessment_date
        || original.smtp_enabled != draft.smtp_enabled
        || text_differs(&original.business_owner, &draft.business_owner)
        || text_differs(&original.business_dept_owner, &draft.business_dept_owner)
        || text_differs(&original.service_type, &draft.service_type)
        || text_differs(&original.service_window, &draft.service_window)
        || text_differs(&original.business_severity, &draft.business_severity)
        || tags_differ(&original.technology_stack, &draft.technology_stack)
        || text_differs(
            &original.application_description,
            &draft.application_description,
        )
}

/// Optional text comparison where absent and empty are the same thing.
fn text_differs(a: &Option<String>, b: &Option<String>) -> bool {
    let a = a.as_deref().unwrap_or("");
    let b = b.as_deref().unwrap_or("");
    a != b
}

/// Order-independent tag comparison via sorted copies.
fn tags_differ(a: &[String], b: &[String]) -> bool {
    if a.len() != b.len() {
        return true;
    }
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort();
    b.sort();
    a != b
}

fn urls_differ(a: &UrlSet, b: &UrlSet) -> bool {
    text_differs(&a.external_prod, &b.external_prod)
        || text_differs(&a.external_uat, &b.external_uat)
        || text_differs(&a.internal_prod, &b.internal_prod)
        || text_differs(&a.internal_uat, &b.internal_uat)
        || text_differs(&a.api, &b.api)
}
