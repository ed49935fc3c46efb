//! The persisted Graffiti object, the session token, and the partial
//! object a caller supplies to `post`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use crate::error::{Error, Result};

/// A channel tag: the unit of grouping discovery queries filter by.
/// A plain string alias, not a newtype — channels are never validated
/// or interpreted by the engine beyond equality and ordering.
pub type Channel = String;

/// The `{actor}` token handed to every engine call. Absent session
/// (`None` at the call site) means an anonymous viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The actor this session is authenticated as. Not validated by the
    /// engine — it is accepted as given from an external session layer.
    pub actor: String,
}

impl Session {
    /// Build a session for the given actor.
    pub fn new(actor: impl Into<String>) -> Self {
        Session {
            actor: actor.into(),
        }
    }
}

/// A persisted Graffiti object.
///
/// `allowed` is `None` when the object is public (readable by anyone who
/// can see the channel/url); `Some(set)` is an explicit allow-list of
/// actors in addition to the owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Object {
    /// Opaque primary key, of the form
    /// `graffiti:object/<actor>/<id>`.
    pub url: String,
    /// The owning actor. Immutable for the life of the object.
    pub actor: String,
    /// The JSON payload. Semantically absent when `tombstone` is true.
    pub value: Json,
    /// Channel membership, used by discovery. Never contains duplicates.
    pub channels: BTreeSet<Channel>,
    /// Explicit allow-list, or `None` for "public".
    pub allowed: Option<BTreeSet<String>>,
    /// Non-decreasing logical clock assigned by the backend at write time.
    pub last_modified: u64,
    /// True once this url has been deleted. `value`/`allowed` are
    /// logically absent to readers of a tombstoned record.
    pub tombstone: bool,
}

impl Object {
    /// True if `value` is semantically empty to readers, per I4.
    pub fn is_tombstone(&self) -> bool {
        self.tombstone
    }
}

/// The caller-supplied fields for `post`; everything the engine itself
/// assigns (`url`, `actor`, `lastModified`, `tombstone`) is filled in by
/// the object store.
///
/// Every field is `pub` and the type is `Default`-constructible, so this
/// constructor's `value.is_object()` check is a convenience, not the
/// authoritative enforcement point — `ObjectStore::post` re-checks
/// `value` itself, since a caller can build a `PartialObject` directly
/// (struct literal or `Default::default()`) without going through `new`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartialObject {
    /// The JSON payload. Must be a JSON object, not null or an array.
    pub value: Json,
    /// Channel membership. Duplicates are silently collapsed.
    #[serde(default)]
    pub channels: BTreeSet<Channel>,
    /// Explicit allow-list, or `None` for "public".
    #[serde(default)]
    pub allowed: Option<BTreeSet<String>>,
}

impl PartialObject {
    /// Construct a partial object, validating that `value` is a JSON
    /// object, not null or an array. See the type-level docs: this is a
    /// convenience, not the only enforcement point.
    pub fn new(value: Json) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::invalid_schema(
                "object value must be a JSON object, not null or an array",
            ));
        }
        Ok(PartialObject {
            value,
            channels: BTreeSet::new(),
            allowed: None,
        })
    }

    /// Builder method: attach channels.
    pub fn with_channels(mut self, channels: impl IntoIterator<Item = String>) -> Self {
        self.channels = channels.into_iter().collect();
        self
    }

    /// Builder method: attach an explicit allow-list.
    pub fn with_allowed(mut self, allowed: impl IntoIterator<Item = String>) -> Self {
        self.allowed = Some(allowed.into_iter().collect());
        self
    }
}
