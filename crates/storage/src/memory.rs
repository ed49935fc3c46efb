//! `InMemoryBackend`: a `DashMap`-backed, thread-safe storage backend
//! implementing `graffiti_core::Storage`.
//!
//! Mirrors the teacher's `ShardedStore` (`crates/storage/src/sharded.rs`):
//! `DashMap` gives lock-free reads and serializes writers only on the
//! shard holding the contended url, via `DashMap::entry`. Secondary
//! indexes are plain `BTreeMap`s behind a `parking_lot::RwLock` so range
//! scans can walk them in lexicographic key order.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::trace;

use graffiti_core::{Object, Storage, StorageInfo, StoredRow};

use crate::index_names::{pad_last_modified, CHANNEL_INDEX, ORPHAN_INDEX};
use crate::record::StorageRecord;

/// In-memory object store plus secondary indexes.
///
/// Safe to share across threads behind an `Arc` (it is itself
/// `Send + Sync`); callers never need an external lock.
#[derive(Default)]
pub struct InMemoryBackend {
    primary: DashMap<String, StorageRecord>,
    channel_index: RwLock<BTreeMap<String, String>>,
    orphan_index: RwLock<BTreeMap<String, String>>,
    seq: AtomicU64,
}

impl InMemoryBackend {
    /// Build an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    fn index_rows_for(doc: &Object) -> Vec<(&'static str, String)> {
        let suffix = pad_last_modified(doc.last_modified);
        if doc.channels.is_empty() {
            vec![(
                ORPHAN_INDEX,
                format!("{}/{}", urlencoding::encode(&doc.actor), suffix),
            )]
        } else {
            doc.channels
                .iter()
                .map(|channel| {
                    (
                        CHANNEL_INDEX,
                        format!("{}/{}", urlencoding::encode(channel), suffix),
                    )
                })
                .collect()
        }
    }

    fn insert_index_rows(&self, doc: &Object) {
        for (index, key) in Self::index_rows_for(doc) {
            let mut guard = match index {
                CHANNEL_INDEX => self.channel_index.write(),
                _ => self.orphan_index.write(),
            };
            guard.insert(key, doc.url.clone());
        }
    }

    fn remove_index_rows(&self, doc: &Object) {
        for (index, key) in Self::index_rows_for(doc) {
            let mut guard = match index {
                CHANNEL_INDEX => self.channel_index.write(),
                _ => self.orphan_index.write(),
            };
            guard.remove(&key);
        }
    }
}

impl Storage for InMemoryBackend {
    fn get(&self, url: &str) -> Option<Object> {
        self.primary.get(url).map(|r| r.doc.clone())
    }

    fn put(&self, doc: Object) -> Object {
        let revision = graffiti_core::generate_id();

        match self.primary.entry(doc.url.clone()) {
            Entry::Vacant(slot) => {
                trace!(url = %doc.url, last_modified = doc.last_modified, "insert");
                self.insert_index_rows(&doc);
                slot.insert(StorageRecord {
                    doc: doc.clone(),
                    revision,
                });
                doc
            }
            Entry::Occupied(mut slot) => {
                if slot.get().loses_to(doc.last_modified, &revision) {
                    trace!(url = %doc.url, last_modified = doc.last_modified, "overwrite");
                    self.remove_index_rows(&slot.get().doc);
                    self.insert_index_rows(&doc);
                    slot.insert(StorageRecord {
                        doc: doc.clone(),
                        revision,
                    });
                    doc
                } else {
                    trace!(url = %doc.url, "write superseded by concurrent winner");
                    slot.get().doc.clone()
                }
            }
        }
    }

    fn range(&self, index: &str, start: &str, end: &str) -> Vec<StoredRow> {
        let guard = match index {
            CHANNEL_INDEX => self.channel_index.read(),
            ORPHAN_INDEX => self.orphan_index.read(),
            _ => return Vec::new(),
        };
        guard
            .range(start.to_string()..=end.to_string())
            .map(|(key, url)| StoredRow {
                index_key: key.clone(),
                doc: self.primary.get(url).map(|r| r.doc.clone()),
            })
            .collect()
    }

    fn current_seq(&self) -> u64 {
        self.seq.load(Ordering::SeqCst)
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn info(&self) -> StorageInfo {
        StorageInfo {
            monotonic_seq: self.current_seq(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graffiti_core::{encode_object_url, PartialObject};
    use serde_json::json;

    fn object(url: &str, actor: &str, channels: &[&str], last_modified: u64) -> Object {
        let partial = PartialObject::new(json!({"x": 1}))
            .unwrap()
            .with_channels(channels.iter().map(|c| c.to_string()));
        Object {
            url: url.to_string(),
            actor: actor.to_string(),
            value: partial.value,
            channels: partial.channels,
            allowed: partial.allowed,
            last_modified,
            tombstone: false,
        }
    }

    #[test]
    fn put_then_get_round_trips() {
        let backend = InMemoryBackend::new();
        let url = encode_object_url("alice", "1");
        let doc = object(&url, "alice", &["c"], 1);
        backend.put(doc.clone());
        assert_eq!(backend.get(&url), Some(doc));
    }

    #[test]
    fn get_missing_is_none() {
        let backend = InMemoryBackend::new();
        assert!(backend.get("graffiti:object/nobody/nothing").is_none());
    }

    #[test]
    fn higher_last_modified_wins_concurrent_write() {
        let backend = InMemoryBackend::new();
        let url = encode_object_url("alice", "1");
        backend.put(object(&url, "alice", &["c"], 5));
        backend.put(object(&url, "alice", &["c"], 3)); // stale write, loses
        let current = backend.get(&url).unwrap();
        assert_eq!(current.last_modified, 5);

        backend.put(object(&url, "alice", &["c"], 10)); // fresh write, wins
        let current = backend.get(&url).unwrap();
        assert_eq!(current.last_modified, 10);
    }

    #[test]
    fn range_scans_channel_index_in_order() {
        let backend = InMemoryBackend::new();
        for (id, lm) in [("1", 10u64), ("2", 20), ("3", 30)] {
            let url = encode_object_url("alice", id);
            backend.put(object(&url, "alice", &["c"], lm));
        }
        let encoded = urlencoding::encode("c").into_owned();
        let start = format!("{encoded}/{}", crate::index_names::pad_last_modified(0));
        let end = format!("{encoded}/{}", crate::index_names::pad_last_modified(25));
        let rows = backend.range(CHANNEL_INDEX, &start, &end);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].index_key < rows[1].index_key);
        assert_eq!(rows[0].doc.as_ref().unwrap().last_modified, 10);
        assert_eq!(rows[1].doc.as_ref().unwrap().last_modified, 20);
    }

    #[test]
    fn range_is_empty_for_unknown_index() {
        let backend = InMemoryBackend::new();
        assert!(backend.range("nonsense", "", "\u{FFFF}").is_empty());
    }

    #[test]
    fn superseding_write_moves_index_row_not_duplicates_it() {
        let backend = InMemoryBackend::new();
        let url = encode_object_url("alice", "1");
        backend.put(object(&url, "alice", &["c"], 10));
        backend.put(object(&url, "alice", &["c"], 20));

        let encoded = urlencoding::encode("c").into_owned();
        let start = format!("{encoded}/{}", crate::index_names::pad_last_modified(0));
        let end = format!("{encoded}/{}", crate::index_names::pad_last_modified(u64::MAX));
        let rows = backend.range(CHANNEL_INDEX, &start, &end);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].doc.as_ref().unwrap().last_modified, 20);
    }

    #[test]
    fn orphan_objects_go_to_orphan_index_not_channel_index() {
        let backend = InMemoryBackend::new();
        let url = encode_object_url("alice", "1");
        backend.put(object(&url, "alice", &[], 10));

        let encoded = urlencoding::encode("alice").into_owned();
        let start = format!("{encoded}/{}", crate::index_names::pad_last_modified(0));
        let end = format!("{encoded}/{}", crate::index_names::pad_last_modified(u64::MAX));
        assert!(backend.range(CHANNEL_INDEX, &start, &end).is_empty());
        assert_eq!(backend.range(ORPHAN_INDEX, &start, &end).len(), 1);
    }

    #[test]
    fn next_seq_is_monotonic_and_current_seq_peeks() {
        let backend = InMemoryBackend::new();
        assert_eq!(backend.current_seq(), 0);
        assert_eq!(backend.next_seq(), 1);
        assert_eq!(backend.current_seq(), 1);
        assert_eq!(backend.next_seq(), 2);
    }
}
