//! Cursor wire format: `"discover:" + canonicalJSON({...})`.

use serde::{Deserialize, Serialize};

use graffiti_core::{Error, Result};

const CURSOR_PREFIX: &str = "discover:";

/// The `continueParams` carried inside a cursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinueParams {
    /// The greatest `lastModified` observed by the scan that produced
    /// this cursor (or the snapshot watermark, if nothing was observed).
    pub last_discovered: u64,
    /// The watermark the next continuation narrows its scan to.
    pub if_modified_since: u64,
}

/// The parsed contents of a `"discover:"`-prefixed cursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cursor {
    /// Channels the originating `discover` call queried.
    pub channels: Vec<String>,
    /// The schema the originating `discover` call filtered on.
    pub schema: serde_json::Value,
    /// Resume parameters.
    pub continue_params: ContinueParams,
    /// The actor the cursor is bound to, or `None` for an anonymous scan.
    pub actor: Option<String>,
}

impl Cursor {
    /// Serialize into the `"discover:" + JSON` wire format.
    pub fn encode(&self) -> String {
        format!(
            "{CURSOR_PREFIX}{}",
            serde_json::to_string(self).expect("Cursor serializes infallibly")
        )
    }

    /// Parse a cursor string. Any failure — missing prefix, malformed
    /// JSON, wrong shape — surfaces as [`Error::NotFound`]: an
    /// unrecognized cursor is a `NotFound`-kind failure.
    pub fn decode(raw: &str) -> Result<Self> {
        let body = raw
            .strip_prefix(CURSOR_PREFIX)
            .ok_or_else(|| Error::not_found("cursor unrecognized"))?;
        serde_json::from_str(body).map_err(|_| Error::not_found("cursor unrecognized"))
    }
}
