//! The streaming discovery engine and its resumable cursor.

use std::collections::{BTreeSet, HashSet};
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_stream::stream;
use serde::{Deserialize, Serialize};
use tokio_stream::Stream;
use tracing::debug;

use graffiti_access::{is_visible, mask};
use graffiti_core::{Error, Object, Result, Session, Storage};
use graffiti_schema::{compile_cached, extract_last_modified_range, CompiledSchema};
use graffiti_storage::{pad_last_modified, CHANNEL_INDEX};

use crate::cursor::{ContinueParams, Cursor};

/// An event yielded by a `discover`/`continue` stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DiscoverEvent {
    /// A live object matching the query, masked for the requesting
    /// session.
    Object {
        /// The masked, schema-matched object.
        object: Object,
    },
    /// A deletion observed since the prior scan. Only emitted by
    /// `continue`; fresh `discover` streams never surface tombstones.
    Tombstone {
        /// Always `true`; present for wire-format parity with hosts
        /// that forward this event across a process boundary.
        tombstone: bool,
        /// The url that was deleted.
        url: String,
    },
}

/// The terminal value of a `discover`/`continue` stream: an opaque
/// cursor that resumes the scan from where this one left off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Continuation {
    /// Opaque resumption token, carrying the cursor wire format.
    pub cursor: String,
}

/// Exposes the [`Continuation`] once the paired stream is exhausted.
///
/// Rust idiom for "done carries a value": rather than smuggling the
/// continuation in as a final stream item, the stream and this handle
/// share a cell that's populated the moment the scan completes.
#[derive(Clone, Default)]
pub struct ContinuationHandle(Arc<Mutex<Option<Continuation>>>);

impl ContinuationHandle {
    fn set(&self, continuation: Continuation) {
        *self.0.lock().unwrap() = Some(continuation);
    }

    /// The continuation, once the stream has been fully drained.
    /// `None` while the scan is still in progress.
    pub fn get(&self) -> Option<Continuation> {
        self.0.lock().unwrap().clone()
    }
}

/// A boxed, pinned stream of discovery events.
pub type DiscoverStream = Pin<Box<dyn Stream<Item = DiscoverEvent> + Send>>;

/// Streaming discovery over channel-indexed rows, with resumable cursors.
pub struct DiscoveryEngine {
    storage: Arc<dyn Storage>,
    continue_buffer: Duration,
    last_continue: Mutex<Option<Instant>>,
}

impl DiscoveryEngine {
    /// Build a discovery engine sharing `storage` with the object store.
    /// `continue` calls on this instance are rate-limited to at most one
    /// per `continue_buffer`.
    pub fn new(storage: Arc<dyn Storage>, continue_buffer: Duration) -> Self {
        DiscoveryEngine {
            storage,
            continue_buffer,
            last_continue: Mutex::new(None),
        }
    }

    /// Begin a fresh scan over `channels`, filtered by `schema`. Skips
    /// tombstones — a fresh `discover` never surfaces deletions.
    pub async fn discover(
        &self,
        channels: Vec<String>,
        schema: serde_json::Value,
        session: Option<Session>,
    ) -> Result<(DiscoverStream, ContinuationHandle)> {
        let compiled = compile_cached(&schema)?;
        let range = extract_last_modified_range(&schema);
        let handle = ContinuationHandle::default();
        let actor = session.as_ref().map(|s| s.actor.clone());

        let stream = self.run_scan(
            channels,
            compiled,
            range.start_suffix,
            range.end_suffix,
            true,
            session,
            schema,
            actor,
            handle.clone(),
        );
        Ok((stream, handle))
    }

    /// Resume a scan from `cursor`. Tombstones are emitted (not
    /// skipped) so consumers can reconcile deletions that happened
    /// since the cursor was produced.
    pub async fn r#continue(
        &self,
        cursor: &str,
        session: Option<Session>,
    ) -> Result<(DiscoverStream, ContinuationHandle)> {
        let parsed = Cursor::decode(cursor)?;
        if let Some(bound_actor) = &parsed.actor {
            match session.as_ref() {
                Some(s) if &s.actor == bound_actor => {}
                _ => return Err(Error::forbidden("cursor bound to a different actor")),
            }
        }

        self.wait_for_rate_limit().await;

        let compiled = compile_cached(&parsed.schema)?;
        let schema_range = extract_last_modified_range(&parsed.schema);
        let watermark_suffix = pad_last_modified(parsed.continue_params.if_modified_since);
        let start_suffix = schema_range.start_suffix.max(watermark_suffix);

        let handle = ContinuationHandle::default();
        let stream = self.run_scan(
            parsed.channels,
            compiled,
            start_suffix,
            schema_range.end_suffix,
            false,
            session,
            parsed.schema,
            parsed.actor,
            handle.clone(),
        );
        Ok((stream, handle))
    }

    async fn wait_for_rate_limit(&self) {
        let wait = {
            let mut last = self.last_continue.lock().unwrap();
            let now = Instant::now();
            let wait = last.map(|prev| self.continue_buffer.saturating_sub(now.duration_since(prev)));
            *last = Some(now);
            wait
        };
        if let Some(wait) = wait {
            if !wait.is_zero() {
                debug!(?wait, "rate-limiting continue");
                tokio::time::sleep(wait).await;
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn run_scan(
        &self,
        channels: Vec<String>,
        compiled: Arc<CompiledSchema>,
        start_suffix: String,
        end_suffix: String,
        skip_tombstones: bool,
        session: Option<Session>,
        schema_value: serde_json::Value,
        actor_binding: Option<String>,
        handle: ContinuationHandle,
    ) -> DiscoverStream {
        let storage = Arc::clone(&self.storage);
        let start_clock = storage.current_seq();

        Box::pin(stream! {
            let queried_channels: BTreeSet<String> = channels.iter().cloned().collect();
            let mut processed: HashSet<String> = HashSet::new();
            let mut max_seen = start_clock;

            for channel in &channels {
                let encoded = urlencoding::encode(channel);
                let start_key = format!("{encoded}/{start_suffix}");
                let end_key = format!("{encoded}/{end_suffix}");

                for row in storage.range(CHANNEL_INDEX, &start_key, &end_key) {
                    let Some(doc) = row.doc else { continue };
                    if !processed.insert(doc.url.clone()) {
                        continue;
                    }

                    if doc.tombstone {
                        if skip_tombstones {
                            continue;
                        }
                        max_seen = max_seen.max(doc.last_modified);
                        yield DiscoverEvent::Tombstone {
                            tombstone: true,
                            url: doc.url,
                        };
                        continue;
                    }

                    if !is_visible(&doc, session.as_ref()) {
                        continue;
                    }
                    max_seen = max_seen.max(doc.last_modified);
                    let masked = mask(doc, &queried_channels, session.as_ref());
                    if compiled.matches(&masked) {
                        yield DiscoverEvent::Object { object: masked };
                    }
                }
            }

            let watermark = max_seen.max(start_clock);
            let cursor = Cursor {
                channels,
                schema: schema_value,
                continue_params: ContinueParams {
                    last_discovered: watermark,
                    if_modified_since: watermark,
                },
                actor: actor_binding,
            };
            handle.set(Continuation { cursor: cursor.encode() });
        })
    }
}
