//! Editing session scenarios against an in-memory record store.

use std::sync::Mutex;

use chrono::Utc;
use uuid::Uuid;

use appledger::editor::draft::FieldUpdate;
use appledger::editor::query::SearchParams;
use appledger::editor::session::{
    EditorSession, EditorState, RecordStore, SaveOutcome, StoreError,
};
use appledger::models::inventory::{InventoryDraft, InventoryRecord, Severity};

#[derive(Default)]
struct CallCounts {
    list: usize,
    get: usize,
    create: usize,
    update: usize,
    delete: usize,
}

#[derive(Default)]
struct MemoryStoreInner {
    records: Vec<InventoryRecord>,
    counts: CallCounts,
    fail_list: bool,
    fail_get: bool,
    fail_update: bool,
    fail_delete: bool,
}

/// In-memory store with injectable failures and call counters.
#[derive(Default)]
struct MemoryStore {
    inner: Mutex<MemoryStoreInner>,
}

impl MemoryStore {
    fn with_records(records: Vec<InventoryRecord>) -> Self {
        Self {
            inner: Mutex::new(MemoryStoreInner {
                records,
                ..Default::default()
            }),
        }
    }

    fn set_failure(&self, f: impl FnOnce(&mut MemoryStoreInner)) {
        f(&mut self.inner.lock().unwrap());
    }
}

impl RecordStore for &MemoryStore {
    async fn list(&self, _params: &SearchParams) -> Result<Vec<InventoryRecord>, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.counts.list += 1;
        if inner.fail_list {
            return Err(StoreError::Network("connection refused".to_string()));
        }
        Ok(inner.records.clone())
    }

    async fn get(&self, id: Uuid) -> Result<InventoryRecord, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.counts.get += 1;
        if inner.fail_get {
            return Err(StoreError::Network("connection refused".to_string()));
        }
        inner
            .records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn create(&self, draft: &InventoryDraft) -> Result<InventoryRecord, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.counts.create += 1;
        let record = record_from(draft.clone());
        inner.records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: Uuid, draft: &InventoryDraft) -> Result<InventoryRecord, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.counts.update += 1;
        if inner.fail_update {
            return Err(StoreError::Api {
                status: 500,
                message: "boom".to_string(),
            });
        }
        let record = inner
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound)?;
        record.fields = draft.clone();
        Ok(record.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.counts.delete += 1;
        if inner.fail_delete {
            return Err(StoreError::Network("connection reset".to_string()));
        }
        let before = inner.records.len();
        inner.records.retain(|r| r.id != id);
        if inner.records.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

fn record_from(fields: InventoryDraft) -> InventoryRecord {
    InventoryRecord {
        id: Uuid::new_v4(),
        fields,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn sample_record(app_id: &str, name: &str) -> InventoryRecord {
    record_from(InventoryDraft {
        app_id: app_id.to_string(),
        application_name: name.to_string(),
        ..Default::default()
    })
}

#[tokio::test]
async fn add_with_missing_required_fields_is_rejected_locally() {
    let store = MemoryStore::default();
    let mut session = EditorSession::new(&store);

    session.open_add();
    session.apply(FieldUpdate::ApplicationName("Payroll".to_string()));

    let err = session.save().await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert!(err.to_string().contains("appId is required"));

    // No network call was made and the editor stays open with the draft.
    {
        let inner = store.inner.lock().unwrap();
        assert_eq!(inner.counts.create, 0);
        assert_eq!(inner.counts.list, 0);
    }
    match session.state() {
        EditorState::Adding { form } => {
            assert_eq!(form.draft().application_name, "Payroll");
        }
        other => panic!("expected Adding, got {other:?}"),
    }
    assert!(session.take_error().is_some());
}

#[tokio::test]
async fn add_flow_creates_and_refreshes() {
    let store = MemoryStore::default();
    let mut session = EditorSession::new(&store);

    session.open_add();
    session.apply(FieldUpdate::AppId("APP-1".to_string()));
    session.apply(FieldUpdate::ApplicationName("Payroll".to_string()));
    session.add_tag("rust");

    let outcome = session.save().await.unwrap();
    assert_eq!(outcome, SaveOutcome::Saved);
    assert!(matches!(session.state(), EditorState::Closed));
    assert_eq!(session.records().len(), 1);
    assert_eq!(session.records()[0].fields.app_id, "APP-1");
    assert!(session.take_error().is_none());
}

#[tokio::test]
async fn failed_fetch_keeps_editor_closed_and_list_intact() {
    let existing = sample_record("APP-1", "Payroll");
    let id = existing.id;
    let store = MemoryStore::with_records(vec![existing]);
    let mut session = EditorSession::new(&store);
    session.refresh().await;

    store.set_failure(|inner| inner.fail_get = true);
    session.open_edit(id).await;

    assert!(matches!(session.state(), EditorState::Closed));
    assert_eq!(session.records().len(), 1);
    assert!(session.take_error().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn edit_without_changes_cannot_save() {
    let existing = sample_record("APP-1", "Payroll");
    let id = existing.id;
    let store = MemoryStore::with_records(vec![existing]);
    let mut session = EditorSession::new(&store);

    session.open_edit(id).await;
    assert!(!session.can_save());

    let outcome = session.save().await.unwrap();
    assert_eq!(outcome, SaveOutcome::NotEnabled);
    assert_eq!(store.inner.lock().unwrap().counts.update, 0);
}

#[tokio::test]
async fn edit_with_changes_saves_and_closes() {
    let existing = sample_record("APP-1", "Payroll");
    let id = existing.id;
    let store = MemoryStore::with_records(vec![existing]);
    let mut session = EditorSession::new(&store);

    session.open_edit(id).await;
    session.apply(FieldUpdate::Severity(Severity::Critical));
    assert!(session.can_save());

    let outcome = session.save().await.unwrap();
    assert_eq!(outcome, SaveOutcome::Saved);
    assert!(matches!(session.state(), EditorState::Closed));
    assert_eq!(session.records()[0].fields.severity, Severity::Critical);
}

#[tokio::test]
async fn reverting_an_edit_disables_save_again() {
    let existing = sample_record("APP-1", "Payroll");
    let id = existing.id;
    let store = MemoryStore::with_records(vec![existing]);
    let mut session = EditorSession::new(&store);

    session.open_edit(id).await;
    session.apply(FieldUpdate::ApplicationName("Payroll 2".to_string()));
    assert!(session.can_save());

    session.apply(FieldUpdate::ApplicationName("Payroll".to_string()));
    assert!(!session.can_save());
}

#[tokio::test]
async fn failed_save_keeps_draft_and_reenables_save() {
    let existing = sample_record("APP-1", "Payroll");
    let id = existing.id;
    let store = MemoryStore::with_records(vec![existing]);
    let mut session = EditorSession::new(&store);

    session.open_edit(id).await;
    session.apply(FieldUpdate::ApplicationName("Payroll 2".to_string()));
    store.set_failure(|inner| inner.fail_update = true);

    let err = session.save().await.unwrap_err();
    assert!(matches!(err, StoreError::Api { status: 500, .. }));

    match session.state() {
        EditorState::Editing { form, saving, .. } => {
            assert_eq!(form.draft().application_name, "Payroll 2");
            assert!(!saving);
        }
        other => panic!("expected Editing, got {other:?}"),
    }
    assert!(session.can_save());
    assert!(session.take_error().unwrap().contains("boom"));
}

#[tokio::test]
async fn delete_requires_confirmation() {
    let existing = sample_record("APP-1", "Payroll");
    let id = existing.id;
    let store = MemoryStore::with_records(vec![existing]);
    let mut session = EditorSession::new(&store);
    session.refresh().await;

    session.request_delete(id);
    let pending = session.pending_delete().unwrap();
    assert_eq!(pending.app_id, "APP-1");

    // No store call until confirmed.
    assert_eq!(store.inner.lock().unwrap().counts.delete, 0);

    session.cancel_delete();
    assert!(session.pending_delete().is_none());
    assert_eq!(session.records().len(), 1);
}

#[tokio::test]
async fn confirmed_delete_removes_record_and_refreshes() {
    let keep = sample_record("APP-1", "Payroll");
    let remove = sample_record("APP-2", "CRM");
    let remove_id = remove.id;
    let store = MemoryStore::with_records(vec![keep, remove]);
    let mut session = EditorSession::new(&store);
    session.refresh().await;

    session.request_delete(remove_id);
    session.confirm_delete().await.unwrap();

    assert!(session.pending_delete().is_none());
    assert_eq!(session.records().len(), 1);
    assert!(session.records().iter().all(|r| r.id != remove_id));
}

#[tokio::test]
async fn failed_delete_keeps_pending_and_list() {
    let existing = sample_record("APP-1", "Payroll");
    let id = existing.id;
    let store = MemoryStore::with_records(vec![existing]);
    let mut session = EditorSession::new(&store);
    session.refresh().await;
    store.set_failure(|inner| inner.fail_delete = true);

    session.request_delete(id);
    let err = session.confirm_delete().await.unwrap_err();
    assert!(matches!(err, StoreError::Network(_)));

    assert!(session.pending_delete().is_some());
    assert_eq!(session.records().len(), 1);
    assert!(session.take_error().is_some());
}

#[tokio::test]
async fn failed_refresh_keeps_previous_buffer() {
    let existing = sample_record("APP-1", "Payroll");
    let store = MemoryStore::with_records(vec![existing]);
    let mut session = EditorSession::new(&store);
    session.refresh().await;
    assert_eq!(session.records().len(), 1);

    store.set_failure(|inner| inner.fail_list = true);
    session.refresh().await;

    assert_eq!(session.records().len(), 1);
    assert!(session.take_error().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn request_delete_for_unknown_id_is_ignored() {
    let store = MemoryStore::with_records(vec![sample_record("APP-1", "Payroll")]);
    let mut session = EditorSession::new(&store);
    session.refresh().await;

    session.request_delete(Uuid::new_v4());
    assert!(session.pending_delete().is_none());
}
