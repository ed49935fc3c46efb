//! The session manager collaborator.
//!
//! The engine itself never authenticates or persists sessions — it only
//! consumes `session.actor`. This is the thinnest possible stand-in for
//! an external session-lifecycle collaborator: enough to hand out a
//! [`graffiti_core::Session`] and to exercise the
//! `{kind: "login"|"logout"|"initialized"}` event contract end to end.
//! A host embedding the engine is expected to bring its own
//! authentication and swap this out.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use graffiti_core::Session;

/// An event published to `session_events()` subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SessionEvent {
    /// The manager has started and is ready to accept `login` calls.
    Initialized,
    /// `actor` logged in.
    Login {
        /// The actor that logged in.
        actor: String,
    },
    /// `actor` logged out.
    Logout {
        /// The actor that logged out.
        actor: String,
    },
}

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Minimal session lifecycle collaborator. Does not persist sessions,
/// validate credentials, or talk to the object store.
pub struct SessionManager {
    events: broadcast::Sender<SessionEvent>,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManager {
    /// Build a manager and publish `Initialized` to any immediate
    /// subscribers is not possible (broadcast has no subscribers yet at
    /// construction); callers that need `Initialized` should subscribe
    /// before the manager does anything else and call
    /// [`SessionManager::announce_initialized`].
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        SessionManager { events }
    }

    /// Publish the `Initialized` event. Separate from `new` because a
    /// `broadcast::Sender` drops events sent before any receiver
    /// subscribes.
    pub fn announce_initialized(&self) {
        let _ = self.events.send(SessionEvent::Initialized);
    }

    /// Accept `actor` as given and mint a session for it. The engine
    /// does not validate credentials — authentication is out of scope
    /// here — so any actor string is accepted.
    pub fn login(&self, actor: impl Into<String>) -> Session {
        let actor = actor.into();
        let _ = self.events.send(SessionEvent::Login {
            actor: actor.clone(),
        });
        Session::new(actor)
    }

    /// Tear down a session. A no-op beyond publishing the event, since
    /// this manager does not persist sessions to invalidate.
    pub fn logout(&self, session: &Session) {
        let _ = self.events.send(SessionEvent::Logout {
            actor: session.actor.clone(),
        });
    }

    /// Subscribe to the lifecycle event stream.
    pub fn session_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}
