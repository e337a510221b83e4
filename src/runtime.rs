//! Trait seam between the view layer and the embedded UI runtime
//!
//! The runtime rendering conferences is an external collaborator: this
//! module defines the capabilities the view layer needs from it without
//! assuming anything about how it renders, networks, or schedules work.

use std::sync::Arc;

use thiserror::Error;

use crate::intent::Intent;
use crate::properties::AppProperties;

/// Error produced by best-effort platform modules.
///
/// These failures are never fatal: callers log them and carry on with the
/// feature degraded.
#[derive(Debug, Error)]
pub enum ModuleError {
    /// The module exists but the underlying platform call failed.
    #[error("platform call failed: {0}")]
    Failed(String),
    /// The module is not usable in the current platform state.
    #[error("module unavailable: {0}")]
    Unavailable(&'static str),
}

/// Identity token for a host activity (screen) driving lifecycle calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostHandle(u64);

impl HostHandle {
    /// Creates a handle with the given host-assigned id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The host-assigned id.
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Back-button capability supplied by the host at resume time.
pub trait BackButtonHandler: Send + Sync {
    /// Invoked when nothing inside the runtime consumed a back press.
    fn invoke_default_back_press(&self);
}

/// Trivial [`BackButtonHandler`] used when the host does not supply one.
#[derive(Debug, Default)]
pub struct DefaultBackButtonHandler;

impl BackButtonHandler for DefaultBackButtonHandler {
    fn invoke_default_back_press(&self) {}
}

/// Platform feature flags supplied when constructing a
/// [`RuntimeHost`](crate::RuntimeHost).
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformCapabilities {
    /// Whether the platform supports picture-in-picture natively.
    pub picture_in_picture: bool,
}

/// Best-effort picture-in-picture entry point provided by the runtime.
pub trait PictureInPictureModule: Send + Sync {
    /// Asks the platform to enter picture-in-picture mode.
    fn enter_picture_in_picture(&self) -> Result<(), ModuleError>;
}

/// Best-effort immersive/full-screen state notifications.
pub trait ImmersiveModule: Send + Sync {
    /// Tells the runtime to re-emit its immersive state, typically after the
    /// hosting window regains focus.
    fn emit_immersive_state_changed(&self) -> Result<(), ModuleError>;
}

/// A mounted root view inside the embedded runtime.
///
/// Created by [`UiRuntime::mount_root_view`] on the first load and kept for
/// the lifetime of the hosting view; later loads push property updates into
/// it instead of remounting.
pub trait RootView: Send {
    /// Pushes a fresh property bundle into the mounted view.
    fn update_properties(&mut self, props: AppProperties);

    /// Detaches the view from the runtime. Called exactly once.
    fn unmount(&mut self);
}

/// The embedded UI runtime manager.
///
/// One handle is shared by every view attached to the same
/// [`RuntimeHost`](crate::RuntimeHost); the view layer treats it as an
/// opaque capability and never inspects its internals.
pub trait UiRuntime: Send + Sync {
    /// Mounts the application root view with its initial properties.
    fn mount_root_view(&self, props: AppProperties) -> Box<dyn RootView>;

    /// Forwarded from the host activity's back-press handling.
    fn on_back_pressed(&self);

    /// Forwarded when the host activity pauses.
    fn on_host_pause(&self, host: &HostHandle);

    /// Forwarded when the host activity resumes, together with the handler
    /// invoked if nothing inside the runtime consumes a back press.
    fn on_host_resume(&self, host: &HostHandle, back_handler: Arc<dyn BackButtonHandler>);

    /// Forwarded when the host activity is destroyed.
    fn on_host_destroy(&self, host: &HostHandle);

    /// Forwarded for intents that were not consumed as deep links.
    fn on_new_intent(&self, intent: &Intent);

    /// The picture-in-picture module, when the runtime provides one.
    fn picture_in_picture_module(&self) -> Option<Arc<dyn PictureInPictureModule>> {
        None
    }

    /// The immersive-mode module, when the runtime provides one.
    fn immersive_module(&self) -> Option<Arc<dyn ImmersiveModule>> {
        None
    }
}
