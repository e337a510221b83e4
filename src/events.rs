//! Events flowing back from the embedded runtime
//!
//! The runtime reports conference progress as named events tagged with the
//! scope of the originating view. This module defines their wire form, the
//! channel carrying them from the runtime's thread, and the dispatch that
//! resolves a scope to a live view, maintains its loaded target, and
//! notifies the host-supplied listener.

use crossbeam_channel::{Receiver, Sender, unbounded};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::registry::ViewRegistry;

/// Conference progress reported by the runtime.
///
/// Serializes in the runtime's `name`/`data` event form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", content = "data")]
pub enum ExternalEventKind {
    /// A conference is about to be joined.
    #[serde(rename = "CONFERENCE_WILL_JOIN")]
    ConferenceWillJoin {
        /// URL of the conference, when already known.
        url: Option<String>,
    },
    /// A conference was joined.
    #[serde(rename = "CONFERENCE_JOINED")]
    ConferenceJoined {
        /// URL of the joined conference.
        url: String,
    },
    /// The conference is about to be left.
    #[serde(rename = "CONFERENCE_WILL_LEAVE")]
    ConferenceWillLeave {
        /// URL of the conference being left.
        url: String,
    },
    /// The conference was left.
    #[serde(rename = "CONFERENCE_LEFT")]
    ConferenceLeft {
        /// URL of the left conference.
        url: String,
    },
    /// Joining or staying in the conference failed for good. Recoverable
    /// failures never reach the host.
    #[serde(rename = "CONFERENCE_FAILED")]
    ConferenceFailed {
        /// URL of the failed conference, when known.
        url: Option<String>,
        /// Failure description.
        error: String,
    },
    /// The conference configuration could not be loaded.
    #[serde(rename = "LOAD_CONFIG_ERROR")]
    LoadConfigError {
        /// URL whose configuration failed to load, when known.
        url: Option<String>,
        /// Failure description.
        error: String,
    },
}

/// An event addressed to the view identified by `scope`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalEvent {
    /// Scope of the view this event belongs to.
    #[serde(rename = "externalAPIScope")]
    pub scope: String,
    /// What happened.
    #[serde(flatten)]
    pub kind: ExternalEventKind,
}

impl ExternalEvent {
    /// Creates an event addressed to `scope`.
    pub fn new(scope: impl Into<String>, kind: ExternalEventKind) -> Self {
        Self {
            scope: scope.into(),
            kind,
        }
    }
}

/// Callbacks for conference progress, supplied by the host.
///
/// All methods default to no-ops; implement the ones of interest. Callbacks
/// fire on whatever thread delivers the runtime's events.
pub trait MeetViewListener: Send + Sync {
    /// A conference is about to be joined.
    fn on_conference_will_join(&self, url: Option<&str>) {
        let _ = url;
    }

    /// A conference was joined.
    fn on_conference_joined(&self, url: &str) {
        let _ = url;
    }

    /// The conference is about to be left.
    fn on_conference_will_leave(&self, url: &str) {
        let _ = url;
    }

    /// The conference was left.
    fn on_conference_left(&self, url: &str) {
        let _ = url;
    }

    /// Joining or staying in the conference failed.
    fn on_conference_failed(&self, url: Option<&str>, error: &str) {
        let _ = (url, error);
    }

    /// The conference configuration could not be loaded.
    fn on_load_config_error(&self, url: Option<&str>, error: &str) {
        let _ = (url, error);
    }
}

/// Unbounded event channel between the runtime and the host.
///
/// The runtime holds the sender and queues events from its own thread; the
/// host drains the receiver and applies each event via [`dispatch_event`].
pub struct EventChannel {
    sender: Sender<ExternalEvent>,
    receiver: Receiver<ExternalEvent>,
}

impl Default for EventChannel {
    fn default() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }
}

impl EventChannel {
    /// A sender endpoint for the runtime.
    pub fn sender(&self) -> Sender<ExternalEvent> {
        self.sender.clone()
    }

    /// Receives one queued event, if any (non-blocking).
    pub fn try_recv(&self) -> Option<ExternalEvent> {
        self.receiver.try_recv().ok()
    }
}

/// Applies one event to the view it addresses.
///
/// Returns false when no live view carries the scope; the view may have
/// been disposed while the event was in flight, which is not an error.
pub fn dispatch_event(views: &ViewRegistry, event: &ExternalEvent) -> bool {
    let Some(view) = views.find_by_scope(&event.scope) else {
        warn!("dropping runtime event for unknown scope {}", event.scope);
        return false;
    };
    view.apply_external_event(&event.kind);
    true
}
