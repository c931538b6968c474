//! Client-side record-editing core.
//!
//! The add/view/edit flows all share the same machinery: an immutable draft
//! state ([`draft::DraftFormState`]), change detection against the fetched
//! baseline ([`diff::has_changes`]), list query construction
//! ([`query::SearchParams`]) and the lifecycle orchestration in
//! [`session::EditorSession`], which talks to the backend only through the
//! [`session::RecordStore`] trait.

pub mod diff;
pub mod draft;
pub mod query;
pub mod session;
