//! The storage abstraction.
//!
//! This trait is the seam between the object store / discovery engine and
//! whatever ordered key-value backend actually holds the data. The crate
//! ships one implementation (`graffiti-storage`'s in-memory backend);
//! the trait exists so a future disk-backed or networked backend can be
//! swapped in without touching `graffiti-engine`.

use crate::object::Object;

/// A single row returned from a [`Storage::range`] scan: the secondary
/// index key the row was found under, and the document it points at.
#[derive(Debug, Clone)]
pub struct StoredRow {
    /// The secondary index key this row was scanned under (e.g.
    /// `urlencode(channel) + "/" + pad15(lastModified)`).
    pub index_key: String,
    /// The object the index row points at. `None` when the index row
    /// exists but its document has since been removed — discovery skips
    /// rows with no attached document.
    pub doc: Option<Object>,
}

/// A snapshot of the backend's logical clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageInfo {
    /// The highest sequence number assigned to any write so far.
    pub monotonic_seq: u64,
}

/// The ordered key-value store contract.
///
/// All methods are safe to call concurrently from multiple threads.
/// `put`/`bulk_put` resolve concurrent writes to the same url: the
/// write with the higher `lastModified` wins; ties are broken by an
/// internal, backend-assigned revision token (largest wins). The loser
/// is silently superseded.
pub trait Storage: Send + Sync {
    /// Get the current (live or tombstoned) record at `url`, if any.
    fn get(&self, url: &str) -> Option<Object>;

    /// Atomically write `doc` under its `url`. `doc.last_modified` must
    /// already be stamped by the caller (via [`Storage::next_seq`]).
    /// Returns the record that is live at `url` after this call — which
    /// may be `doc` itself, or a concurrently-written record that won
    /// the tie-break.
    fn put(&self, doc: Object) -> Object;

    /// `put` applied to each of `docs` in order. Not atomic across the
    /// batch — each document's url is still resolved independently.
    fn bulk_put(&self, docs: Vec<Object>) -> Vec<Object> {
        docs.into_iter().map(|doc| self.put(doc)).collect()
    }

    /// Scan a named secondary index over `[start, end]` (inclusive),
    /// in ascending key order, with documents attached.
    fn range(&self, index: &str, start: &str, end: &str) -> Vec<StoredRow>;

    /// Peek the current logical clock value without advancing it. Used
    /// to sample the `startClock` watermark at the beginning of a
    /// `discover` scan.
    fn current_seq(&self) -> u64;

    /// Atomically advance and return the logical clock. Used to stamp
    /// `lastModified` on every successful write.
    fn next_seq(&self) -> u64;

    /// Convenience accessor bundling [`Storage::current_seq`].
    fn info(&self) -> StorageInfo {
        StorageInfo {
            monotonic_seq: self.current_seq(),
        }
    }
}
