//! The write seam between the import loop and the document store.

use menuport_types::{MenuItem, StoreError};

/// A document store addressed by string identifier within one collection.
///
/// The production implementation is [`crate::FirestoreStore`]; tests
/// inject in-memory doubles.
pub trait DocumentStore {
    /// Unconditional create-or-replace of the full document under
    /// `doc_id`. Last write wins; no uniqueness check is performed.
    fn upsert(&mut self, doc_id: &str, item: &MenuItem) -> Result<(), StoreError>;

    /// Cheap connectivity probe against the target collection.
    fn healthcheck(&mut self) -> Result<(), StoreError>;
}
