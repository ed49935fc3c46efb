//! The in-memory storage backend for the Graffiti object store.
//!
//! Implements `graffiti_core::Storage` with:
//! - [`InMemoryBackend`]: a `DashMap`-sharded primary store, giving
//!   lock-free reads and per-url write serialization (the teacher's
//!   `ShardedStore` pattern, `crates/storage/src/sharded.rs`).
//! - Two incrementally-maintained secondary indexes: the required
//!   `objectsByChannelAndLastModified` (spec.md §4.6), and the
//!   supplemental `objectsByActorOrphan` (SPEC_FULL.md §4.8).

#![warn(missing_docs)]

pub mod index_names;
pub mod memory;
pub mod record;

pub use index_names::{pad_last_modified, CHANNEL_INDEX, ORPHAN_INDEX, PAD_WIDTH};
pub use memory::InMemoryBackend;
pub use record::StorageRecord;
