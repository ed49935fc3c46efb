//! The object store: `post`, `get`, `delete`.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, warn};

use graffiti_access::{is_visible, mask};
use graffiti_core::{
    decode_object_url, encode_object_url, generate_id, Error, Limits, Object, PartialObject,
    Result, Session, Storage,
};
use graffiti_schema::compile_cached;

/// Maximum number of times `delete` retries its tombstone write before
/// giving up and logging a warning. The in-memory backend's tie-break is
/// deterministic and single-process, so this loop converges in O(1)
/// iterations in practice; the bound exists only as a defensive backstop.
const MAX_DELETE_RETRIES: u32 = 8;

/// The object store, backed by any [`Storage`] implementation.
pub struct ObjectStore {
    storage: Arc<dyn Storage>,
    limits: Limits,
}

impl ObjectStore {
    /// Build an object store over `storage`, with [`Limits::default`].
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self::with_limits(storage, Limits::default())
    }

    /// Build an object store over `storage`, enforcing `limits` on every
    /// `post`.
    pub fn with_limits(storage: Arc<dyn Storage>, limits: Limits) -> Self {
        ObjectStore { storage, limits }
    }

    /// Access the underlying storage handle (used by the discovery
    /// engine, which shares the same backend).
    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// Mint a fresh object owned by `session.actor`.
    ///
    /// Fails with [`Error::InvalidSchema`] if `partial.value` is not a
    /// JSON object (spec.md §3's data-model invariant) — enforced here,
    /// at the actual public API boundary, rather than relying solely on
    /// [`PartialObject::new`]'s constructor-time check, since
    /// `PartialObject`'s fields are all `pub` and `Default`-constructible.
    /// Fails with [`Error::LimitExceeded`] if `partial` or `session.actor`
    /// exceeds this store's configured [`Limits`] — checked before a url
    /// is minted or anything reaches the backend.
    pub async fn post(&self, partial: PartialObject, session: &Session) -> Result<Object> {
        if !partial.value.is_object() {
            return Err(Error::invalid_schema(
                "object value must be a JSON object, not null or an array",
            ));
        }
        self.limits.check_post(&session.actor, &partial)?;
        let id = generate_id();
        let url = encode_object_url(&session.actor, &id);
        let last_modified = self.storage.next_seq();
        debug!(actor = %session.actor, %url, "post");

        let doc = Object {
            url,
            actor: session.actor.clone(),
            value: partial.value,
            channels: partial.channels,
            allowed: partial.allowed,
            last_modified,
            tombstone: false,
        };
        Ok(self.storage.put(doc))
    }

    /// Read the object at `url`, masked and schema-checked for `session`.
    pub async fn get(
        &self,
        url: &str,
        schema: &serde_json::Value,
        session: Option<&Session>,
    ) -> Result<Object> {
        let doc = self
            .storage
            .get(url)
            .filter(|doc| !doc.tombstone)
            .filter(|doc| is_visible(doc, session))
            .ok_or_else(|| Error::not_found(url))?;

        let masked = mask(doc, &BTreeSet::new(), session);

        let compiled = compile_cached(schema)?;
        if !compiled.matches(&masked) {
            return Err(Error::schema_mismatch(url));
        }
        Ok(masked)
    }

    /// Tombstone the object at `url`. Only the owning actor may delete.
    ///
    /// The only possible concurrent writer to an existing `url` is another
    /// `delete` call from the same owning actor (`post` always mints a
    /// fresh url, and only the owner may write at all), so a lost CAS race
    /// here always means a concurrent delete's tombstone won instead of
    /// ours. Per spec.md §4.4 ("retries... until they commit or observe
    /// the record in its terminal state") and §5 ("the loser is silently
    /// superseded — no error is raised"), observing that terminal
    /// tombstone is success, not `NotFound` — `NotFound` is reserved for a
    /// url that was already tombstoned (or missing) *before* this call
    /// started.
    pub async fn delete(&self, url: &str, session: &Session) -> Result<()> {
        let decoded = decode_object_url(url)?;
        if decoded.actor != session.actor {
            return Err(Error::forbidden(url));
        }

        let mut observed_live = false;

        for attempt in 0..MAX_DELETE_RETRIES {
            let Some(doc) = self.storage.get(url) else {
                return Err(Error::not_found(url));
            };

            if doc.tombstone {
                if observed_live {
                    debug!(actor = %session.actor, %url, "delete observed terminal tombstone from a concurrent writer");
                    return Ok(());
                }
                return Err(Error::not_found(url));
            }
            observed_live = true;

            let last_modified = self.storage.next_seq();
            let tombstoned = Object {
                tombstone: true,
                last_modified,
                ..doc
            };
            let winner = self.storage.put(tombstoned.clone());
            if winner.tombstone && winner.last_modified == last_modified {
                debug!(actor = %session.actor, %url, "tombstoned");
                return Ok(());
            }
            warn!(%url, attempt, "delete superseded by concurrent write, retrying");
        }

        warn!(%url, "delete exceeded retry bound");
        Err(Error::not_found(url))
    }
}
