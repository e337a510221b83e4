//! Host intent model and deep-link interpretation

/// Action carried by a host [`Intent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentAction {
    /// A request to view a resource; the action deep links arrive with.
    View,
    /// Any other action, forwarded to the runtime untouched.
    Other(String),
}

/// A minimal rendition of a host platform intent: an action plus an
/// optional data URL.
///
/// Hosts whose activities are relaunched with a new intent (single-task
/// launch modes) hand it to
/// [`RuntimeHost::on_new_intent`](crate::RuntimeHost::on_new_intent), which
/// routes deep links into the live views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    action: IntentAction,
    data: Option<String>,
}

impl Intent {
    /// Creates an intent from its action and optional data URL.
    pub fn new(action: IntentAction, data: Option<String>) -> Self {
        Self { action, data }
    }

    /// Creates a view intent for the given URL.
    pub fn view(url: impl Into<String>) -> Self {
        Self {
            action: IntentAction::View,
            data: Some(url.into()),
        }
    }

    /// The intent's action.
    pub fn action(&self) -> &IntentAction {
        &self.action
    }

    /// The intent's data URL, if any.
    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    /// The URL to deep link to, when this is a view intent carrying one.
    pub fn deep_link_url(&self) -> Option<&str> {
        match (&self.action, self.data.as_deref()) {
            (IntentAction::View, Some(url)) => Some(url),
            _ => None,
        }
    }
}
