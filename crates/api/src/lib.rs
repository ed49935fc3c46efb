//! The embeddable Graffiti object store facade.
//!
//! [`GraffitiDb`] wires the lower layers — storage, schema compilation,
//! access control, object CRUD, and streaming discovery — into a single
//! handle a host process constructs once and shares. Every public
//! operation here desugars to exactly one call against
//! `graffiti-engine`'s `ObjectStore`/`DiscoveryEngine`; this crate adds
//! no behavior of its own beyond wiring and a shared [`SessionManager`].

#![warn(missing_docs)]

use std::sync::Arc;

use tracing::info;

pub use graffiti_core::{
    decode_object_url, encode_object_url, Channel, Error, Limits, Object, PartialObject, Result,
    Session, Storage,
};
pub use graffiti_engine::{
    Continuation, ContinuationHandle, DiscoverEvent, DiscoverStream, GraffitiConfig, SessionEvent,
    SessionManager,
};
pub use graffiti_storage::InMemoryBackend;

use graffiti_engine::{DiscoveryEngine, ObjectStore};

/// A single embeddable Graffiti object store backed by an in-memory,
/// thread-safe storage layer.
///
/// Cloning is not supported directly; share a `GraffitiDb` behind an
/// `Arc` across tasks/threads the way the storage and discovery layers
/// already expect (both are `Send + Sync` by construction).
pub struct GraffitiDb {
    config: GraffitiConfig,
    objects: ObjectStore,
    discovery: DiscoveryEngine,
    sessions: SessionManager,
}

impl Default for GraffitiDb {
    fn default() -> Self {
        Self::new()
    }
}

impl GraffitiDb {
    /// Build a database with [`GraffitiConfig::default`].
    pub fn new() -> Self {
        Self::with_config(GraffitiConfig::default())
    }

    /// Build a database with an explicit configuration.
    pub fn with_config(config: GraffitiConfig) -> Self {
        let storage: Arc<dyn Storage> = Arc::new(InMemoryBackend::new());
        let objects = ObjectStore::with_limits(Arc::clone(&storage), config.limits.clone());
        let discovery = DiscoveryEngine::new(storage, config.continue_buffer);
        let sessions = SessionManager::new();
        sessions.announce_initialized();

        info!(backend = %config.backend_name, "graffiti db initialized");
        GraffitiDb {
            config,
            objects,
            discovery,
            sessions,
        }
    }

    /// The configuration this database was built with.
    pub fn config(&self) -> &GraffitiConfig {
        &self.config
    }

    /// The shared session lifecycle collaborator (spec.md §6).
    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// `post(partial, session) → object` (spec.md §4.4).
    pub async fn post(&self, partial: PartialObject, session: &Session) -> Result<Object> {
        self.objects.post(partial, session).await
    }

    /// `get(url, schema, session) → object` (spec.md §4.4).
    pub async fn get(
        &self,
        url: &str,
        schema: &serde_json::Value,
        session: Option<&Session>,
    ) -> Result<Object> {
        self.objects.get(url, schema, session).await
    }

    /// `delete(url, session) → void` (spec.md §4.4).
    pub async fn delete(&self, url: &str, session: &Session) -> Result<()> {
        self.objects.delete(url, session).await
    }

    /// `discover(channels, schema, session) → stream<DiscoverEvent> then
    /// Continuation` (spec.md §4.5).
    pub async fn discover(
        &self,
        channels: Vec<String>,
        schema: serde_json::Value,
        session: Option<Session>,
    ) -> Result<(DiscoverStream, ContinuationHandle)> {
        self.discovery.discover(channels, schema, session).await
    }

    /// `continue(cursor, session) → stream<DiscoverEvent> then
    /// Continuation` (spec.md §4.5).
    pub async fn r#continue(
        &self,
        cursor: &str,
        session: Option<Session>,
    ) -> Result<(DiscoverStream, ContinuationHandle)> {
        self.discovery.r#continue(cursor, session).await
    }
}
