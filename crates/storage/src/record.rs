//! The internal storage row.

use graffiti_core::Object;

/// A stored record: the public [`Object`] plus the backend-assigned
/// `revision` token used only to break ties between concurrent writes
/// that land with the same `lastModified` (spec.md §5). `revision` never
/// leaves the storage layer.
#[derive(Debug, Clone)]
pub struct StorageRecord {
    /// The public object.
    pub doc: Object,
    /// Tie-break token; largest wins when `lastModified` is equal.
    pub revision: String,
}

impl StorageRecord {
    /// True if `candidate` should replace this record under spec.md §5's
    /// tie-break rule: higher `lastModified` wins; ties broken by
    /// lexicographically larger `revision`.
    pub fn loses_to(&self, candidate_last_modified: u64, candidate_revision: &str) -> bool {
        (candidate_last_modified, candidate_revision)
            > (self.doc.last_modified, self.revision.as_str())
    }
}
