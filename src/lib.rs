//! Graffiti: a local, embeddable object store for actor-owned JSON
//! objects grouped into channels, discoverable by schema-filtered
//! streaming queries, with tombstone-based deletion and a resumable
//! change feed.
//!
//! This crate is a thin re-export of [`graffiti_api::GraffitiDb`] and the
//! types its public operations traffic in. The layered implementation
//! lives in `graffiti-core`, `graffiti-storage`, `graffiti-schema`,
//! `graffiti-access`, and `graffiti-engine`; see those crates for the
//! storage adapter, codec, schema compiler, access control, and
//! discovery engine respectively.

#![warn(missing_docs)]

pub use graffiti_api::{
    decode_object_url, encode_object_url, Channel, Continuation, ContinuationHandle,
    DiscoverEvent, DiscoverStream, Error, GraffitiConfig, GraffitiDb, InMemoryBackend, Limits,
    Object, PartialObject, Result, Session, SessionEvent, SessionManager, Storage,
};
