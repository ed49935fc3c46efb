//! Size limits for actors, identifiers and object payloads
//!
//! These limits are enforced at the edges of the public API (`post`);
//! they are not part of the core Graffiti data model, but every
//! production embeddable store needs bounded inputs.

use crate::error::{Error, Result};
use crate::object::PartialObject;

/// Size limits enforced by the object store.
#[derive(Debug, Clone)]
pub struct Limits {
    /// Maximum length of an actor string, in bytes.
    pub max_actor_bytes: usize,
    /// Maximum length of a single channel name, in bytes.
    pub max_channel_bytes: usize,
    /// Maximum number of channels on a single object.
    pub max_channels: usize,
    /// Maximum encoded size of an object's `value` payload, in bytes.
    pub max_value_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_actor_bytes: 512,
            max_channel_bytes: 512,
            max_channels: 256,
            max_value_bytes: 1024 * 1024,
        }
    }
}

impl Limits {
    /// Small limits, useful for exercising limit-enforcement in tests.
    pub fn with_small_limits() -> Self {
        Limits {
            max_actor_bytes: 64,
            max_channel_bytes: 32,
            max_channels: 4,
            max_value_bytes: 256,
        }
    }

    /// Validate `actor` and `partial` against this limit set. Called at
    /// `post`'s entry point, before a url is minted, so an oversized
    /// payload never reaches the backend.
    pub fn check_post(&self, actor: &str, partial: &PartialObject) -> Result<()> {
        if actor.len() > self.max_actor_bytes {
            return Err(Error::limit_exceeded(format!(
                "actor exceeds max_actor_bytes ({} > {})",
                actor.len(),
                self.max_actor_bytes
            )));
        }
        if partial.channels.len() > self.max_channels {
            return Err(Error::limit_exceeded(format!(
                "channel count exceeds max_channels ({} > {})",
                partial.channels.len(),
                self.max_channels
            )));
        }
        if let Some(channel) = partial
            .channels
            .iter()
            .find(|c| c.len() > self.max_channel_bytes)
        {
            return Err(Error::limit_exceeded(format!(
                "channel {channel:?} exceeds max_channel_bytes ({} > {})",
                channel.len(),
                self.max_channel_bytes
            )));
        }
        let value_bytes = serde_json::to_vec(&partial.value)
            .map(|bytes| bytes.len())
            .unwrap_or(usize::MAX);
        if value_bytes > self.max_value_bytes {
            return Err(Error::limit_exceeded(format!(
                "value exceeds max_value_bytes ({value_bytes} > {})",
                self.max_value_bytes
            )));
        }
        Ok(())
    }
}
