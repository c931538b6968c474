//! Record lifecycle orchestration for a single editing session.

use uuid::Uuid;
use validator::Validate;

use crate::editor::diff::has_changes;
use crate::editor::draft::{DraftFormState, FieldUpdate};
use crate::editor::query::{FilterSet, SearchParams};
use crate::models::inventory::{InventoryDraft, InventoryRecord};

/// Errors surfaced by the editing session. None are fatal; the session
/// remains usable and a failed call requires explicit re-initiation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Record not found")]
    NotFound,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

/// Backend collaborator behind the editing session.
///
/// Implemented over HTTP by [`crate::client::ApiClient`]; tests substitute
/// an in-memory store.
#[allow(async_fn_in_trait)]
pub trait RecordStore {
    async fn list(&self, params: &SearchParams) -> Result<Vec<InventoryRecord>, StoreError>;
    async fn get(&self, id: Uuid) -> Result<InventoryRecord, StoreError>;
    async fn create(&self, draft: &InventoryDraft) -> Result<InventoryRecord, StoreError>;
    async fn update(&self, id: Uuid, draft: &InventoryDraft) -> Result<InventoryRecord, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

/// Current editor mode.
#[derive(Debug, Clone)]
pub enum EditorState {
    Closed,
    /// Creating a new record from defaults.
    Adding { form: DraftFormState },
    /// Editing an existing record against its fetched baseline.
    Editing {
        id: Uuid,
        baseline: InventoryDraft,
        form: DraftFormState,
        saving: bool,
    },
}

/// A delete awaiting user confirmation, keyed by identity but carrying the
/// human-readable appId for the prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDelete {
    pub id: Uuid,
    pub app_id: String,
}

/// What a save attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Draft submitted, list refreshed, editor closed.
    Saved,
    /// Nothing to do: save is not currently enabled.
    NotEnabled,
}

/// One user session's view of the inventory: the list buffer, the editor
/// state and the pending delete confirmation. All state is owned
/// exclusively here; the only in-flight guard is the `saving` flag on an
/// active edit.
pub struct EditorSession<S: RecordStore> {
    store: S,
    records: Vec<InventoryRecord>,
    pub search: SearchParams,
    pub filters: FilterSet,
    state: EditorState,
    pending_delete: Option<PendingDelete>,
    last_error: Option<String>,
}

impl<S: RecordStore> EditorSession<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            records: Vec::new(),
            search: SearchParams::default(),
            filters: FilterSet::default(),
            state: EditorState::Closed,
            pending_delete: None,
            last_error: None,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn records(&self) -> &[InventoryRecord] {
        &self.records
    }

    /// Records surviving the client-side filter predicate.
    pub fn visible_records(&self) -> Vec<&InventoryRecord> {
        self.records
            .iter()
            .filter(|r| self.filters.matches(r))
            .collect()
    }

    pub fn pending_delete(&self) -> Option<&PendingDelete> {
        self.pending_delete.as_ref()
    }

    /// Take the most recent user-visible error message, clearing it.
    pub fn take_error(&mut self) -> Option<String> {
        self.last_error.take()
    }

    /// Re-fetch the list with the current search params. On failure the
    /// previous buffer is kept and the error surfaced.
    pub async fn refresh(&mut self) {
        match self.store.list(&self.search).await {
            Ok(records) => self.records = records,
            Err(e) => {
                tracing::warn!(error = %e, "list refresh failed");
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Open the add editor with creation defaults.
    pub fn open_add(&mut self) {
        self.state = EditorState::Adding {
            form: DraftFormState::new(),
        };
    }

    /// Fetch a record and open the edit editor on it. On failure the editor
    /// stays closed and the error is surfaced; the list is untouched.
    pub async fn open_edit(&mut self, id: Uuid) {
        match self.store.get(id).await {
            Ok(record) => {
                let baseline = record.into_draft();
                self.state = EditorState::Editing {
                    id,
                    form: DraftFormState::from_record(baseline.clone()),
                    baseline,
                    saving: false,
                };
            }
            Err(e) => {
                tracing::warn!(record = %id, error = %e, "fetch for edit failed");
                self.state = EditorState::Closed;
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Close the editor, discarding any draft.
    pub fn close_editor(&mut self) {
        self.state = EditorState::Closed;
    }

    /// Apply a field update to the active draft. Ignored when closed.
    pub fn apply(&mut self, update: FieldUpdate) {
        match &mut self.state {
            EditorState::Adding { form } | EditorState::Editing { form, .. } => {
                *form = form.apply(update);
            }
            EditorState::Closed => {}
        }
    }

    pub fn add_tag(&mut self, tag: &str) {
        match &mut self.state {
            EditorState::Adding { form } | EditorState::Editing { form, .. } => {
                *form = form.add_tag(tag);
            }
            EditorState::Closed => {}
        }
    }

    pub fn remove_tag(&mut self, tag: &str) {
        match &mut self.state {
            EditorState::Adding { form } | EditorState::Editing { form, .. } => {
                *form = form.remove_tag(tag);
            }
            EditorState::Closed => {}
        }
    }

    /// Whether the save control is enabled: always in the add flow, and in
    /// the edit flow only when the draft differs from the baseline and no
    /// save is in flight.
    pub fn can_save(&self) -> bool {
        match &self.state {
            EditorState::Adding { .. } => true,
            EditorState::Editing {
                baseline,
                form,
                saving,
                ..
            } => !saving && has_changes(baseline, form.draft()),
            EditorState::Closed => false,
        }
    }

    /// Submit the active draft.
    ///
    /// Add flow: required-field validation rejects locally before any
    /// network call. Edit flow: gated by [`can_save`](Self::can_save). On
    /// success the list is refreshed and the editor closed; on failure the
    /// draft stays intact, the error is surfaced, and (for edits) the save
    /// control is re-enabled.
    pub async fn save(&mut self) -> Result<SaveOutcome, StoreError> {
        match self.state.clone() {
            EditorState::Adding { form } => {
                if let Err(e) = form.draft().validate() {
                    let message = flatten_validation(&e);
                    self.last_error = Some(message.clone());
                    return Err(StoreError::Validation(message));
                }
                match self.store.create(form.draft()).await {
                    Ok(created) => {
                        tracing::info!(record = %created.id, "record created");
                        self.state = EditorState::Closed;
                        self.refresh().await;
                        Ok(SaveOutcome::Saved)
                    }
                    Err(e) => {
                        self.last_error = Some(e.to_string());
                        Err(e)
                    }
                }
            }
            EditorState::Editing {
                id,
                baseline,
                form,
                saving,
            } => {
                if saving || !has_changes(&baseline, form.draft()) {
                    return Ok(SaveOutcome::NotEnabled);
                }
                self.set_saving(true);
                match self.store.update(id, form.draft()).await {
                    Ok(_) => {
                        self.state = EditorState::Closed;
                        self.refresh().await;
                        Ok(SaveOutcome::Saved)
                    }
                    Err(e) => {
                        self.set_saving(false);
                        self.last_error = Some(e.to_string());
                        Err(e)
                    }
                }
            }
            EditorState::Closed => Ok(SaveOutcome::NotEnabled),
        }
    }

    fn set_saving(&mut self, value: bool) {
        if let EditorState::Editing { saving, .. } = &mut self.state {
            *saving = value;
        }
    }

    /// First step of the two-step delete: remember which record is up for
    /// deletion, with its appId for the confirmation prompt.
    pub fn request_delete(&mut self, id: Uuid) {
        if let Some(record) = self.records.iter().find(|r| r.id == id) {
            self.pending_delete = Some(PendingDelete {
                id,
                app_id: record.fields.app_id.clone(),
            });
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Commit the pending delete. On success the list is refreshed; on
    /// failure it is left unchanged and the confirmation stays pending.
    pub async fn confirm_delete(&mut self) -> Result<(), StoreError> {
        let Some(pending) = self.pending_delete.clone() else {
            return Ok(());
        };
        match self.store.delete(pending.id).await {
            Ok(()) => {
                tracing::info!(record = %pending.id, app_id = %pending.app_id, "record deleted");
                self.pending_delete = None;
                self.refresh().await;
                Ok(())
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }
}

fn flatten_validation(errors: &validator::ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            errs.first()
                .and_then(|e| e.message.as_ref())
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{field} is invalid"))
        })
        .collect();
    parts.sort();
    parts.join("; ")
}
