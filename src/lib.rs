//! Embeddable conference view support for native host applications
//!
//! This crate hosts a managed conference UI runtime inside a native
//! application screen. The runtime owns rendering, networking, and media;
//! this crate is the adapter in between: it marshals host-supplied
//! configuration into the runtime's declarative property model and forwards
//! activity lifecycle callbacks.
//!
//! # Architecture
//!
//! - **RuntimeHost**: explicit owner of the shared runtime handle, the view
//!   registry, and the event channel; activity lifecycle calls route
//!   through it
//! - **MeetView**: per-instance facade for loading a conference URL,
//!   toggling the welcome screen, configuring picture-in-picture, and
//!   disposing the mounted view
//! - **ViewRegistry**: scope-keyed lookup and broadcast loading across all
//!   live views
//! - **UiRuntime / RootView**: trait seam behind which the embedded runtime
//!   lives
//! - **ExternalEvent**: conference progress flowing back from the runtime

#![warn(missing_docs)]

mod events;
mod host;
mod intent;
mod invite;
mod properties;
mod registry;
mod runtime;
mod view;

#[cfg(test)]
mod testing;

pub use events::*;
pub use host::*;
pub use intent::*;
pub use invite::*;
pub use properties::*;
pub use registry::*;
pub use runtime::*;
pub use view::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        events::{ExternalEvent, ExternalEventKind, MeetViewListener},
        host::RuntimeHost,
        intent::{Intent, IntentAction},
        properties::{AppProperties, UrlBundle},
        runtime::{HostHandle, PlatformCapabilities, RootView, UiRuntime},
        view::{MeetView, PictureInPicture},
    };
}
