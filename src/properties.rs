//! Declarative property bundle pushed into the embedded runtime

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Last update token handed out. Tokens are strictly increasing so two
/// loads of one and the same URL never collapse into a single declarative
/// update inside the runtime's diffing layer.
static LAST_UPDATE_TOKEN: AtomicI64 = AtomicI64::new(0);

/// Returns a fresh update token.
///
/// Tokens follow wall-clock milliseconds, bumped past the previous token
/// when two calls land in the same millisecond.
pub(crate) fn next_update_token() -> i64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0);
    let prev = LAST_UPDATE_TOKEN
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last + 1))
        })
        .unwrap_or(0);
    now.max(prev + 1)
}

/// The `url` entry of a property bundle: the conference target to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlBundle {
    /// Full or partial conference URL. A bare room name resolves against the
    /// bundle's `defaultURL` inside the runtime.
    pub url: String,
}

impl UrlBundle {
    /// Bundle for the given URL string.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Property bundle consumed by the runtime's root view.
///
/// The field set is the wire contract with the embedded application; key
/// names serialize verbatim as `defaultURL`, `externalAPIScope`,
/// `addPeopleEnabled`, `dialOutEnabled`, `pictureInPictureEnabled`, `url`,
/// `welcomePageEnabled` and `timestamp`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppProperties {
    /// Base URL for resolving partial conference names; absent when unset.
    #[serde(rename = "defaultURL", skip_serializing_if = "Option::is_none")]
    pub default_url: Option<String>,

    /// Scope identifier tying runtime events back to the originating view.
    #[serde(rename = "externalAPIScope")]
    pub external_api_scope: String,

    /// Whether the invite feature may add people.
    pub add_people_enabled: bool,

    /// Whether the invite feature may dial out.
    pub dial_out_enabled: bool,

    /// Effective picture-in-picture state, platform support already folded
    /// in.
    pub picture_in_picture_enabled: bool,

    /// Conference to load; absent means show the welcome/landing screen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<UrlBundle>,

    /// Whether the welcome screen renders while no conference is loaded.
    pub welcome_page_enabled: bool,

    /// Update token, distinct for every bundle. Informative only; the value
    /// carries no meaning beyond ordering.
    pub timestamp: i64,
}

impl AppProperties {
    /// Serializes the bundle to its JSON wire form.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
