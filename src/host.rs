//! Explicit host handle owning the runtime, the registry, and event plumbing

use std::sync::{Arc, Mutex};

use crossbeam_channel::Sender;
use log::{debug, info};

use crate::events::{EventChannel, ExternalEvent, dispatch_event};
use crate::intent::Intent;
use crate::registry::ViewRegistry;
use crate::runtime::{
    BackButtonHandler, DefaultBackButtonHandler, HostHandle, PlatformCapabilities, UiRuntime,
};

/// Factory producing the shared runtime handle on first use.
pub type RuntimeFactory = Box<dyn Fn() -> Arc<dyn UiRuntime> + Send + Sync>;

/// Explicit owner of everything the embedded views share: the runtime
/// manager slot (created at most once, torn down explicitly), the view
/// registry, the event channel, and platform capabilities.
///
/// The embedding application constructs one host, keeps it alive for as
/// long as embedded views exist, and routes its activity lifecycle
/// callbacks through it. An absent runtime (not yet created, or torn down)
/// is a normal state: every forwarder checks for it and no-ops.
pub struct RuntimeHost {
    platform: PlatformCapabilities,
    factory: RuntimeFactory,
    runtime: Mutex<Option<Arc<dyn UiRuntime>>>,
    views: ViewRegistry,
    events: EventChannel,
}

impl RuntimeHost {
    /// Creates a host. `factory` runs at most once per host lifetime, when
    /// the first view (or an explicit [`RuntimeHost::ensure_runtime`])
    /// needs the runtime; a later [`RuntimeHost::shutdown`] re-arms it.
    pub fn new(
        platform: PlatformCapabilities,
        factory: impl Fn() -> Arc<dyn UiRuntime> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            platform,
            factory: Box::new(factory),
            runtime: Mutex::new(None),
            views: ViewRegistry::default(),
            events: EventChannel::default(),
        })
    }

    /// Platform capabilities supplied at construction.
    pub fn platform(&self) -> PlatformCapabilities {
        self.platform
    }

    /// Registry of live views attached to this host.
    pub fn views(&self) -> &ViewRegistry {
        &self.views
    }

    /// The runtime handle, when one exists.
    pub fn runtime(&self) -> Option<Arc<dyn UiRuntime>> {
        self.runtime.lock().unwrap().clone()
    }

    /// Returns the runtime handle, creating it on first use.
    pub fn ensure_runtime(&self) -> Arc<dyn UiRuntime> {
        let mut slot = self.runtime.lock().unwrap();
        match slot.as_ref() {
            Some(runtime) => runtime.clone(),
            None => {
                info!("creating runtime manager");
                let runtime = (self.factory)();
                *slot = Some(runtime.clone());
                runtime
            }
        }
    }

    /// Tears the runtime handle down. Lifecycle forwarders no-op until a
    /// later view construction or [`RuntimeHost::ensure_runtime`] call
    /// recreates it.
    pub fn shutdown(&self) {
        if self.runtime.lock().unwrap().take().is_some() {
            info!("runtime manager torn down");
        }
    }

    // ------------------------------------------------------------------
    // Activity lifecycle forwarders
    // ------------------------------------------------------------------

    /// Forwards a back press. Returns false when no runtime exists, in
    /// which case the host should run its own back handling.
    pub fn on_back_pressed(&self) -> bool {
        match self.runtime() {
            Some(runtime) => {
                runtime.on_back_pressed();
                true
            }
            None => false,
        }
    }

    /// Forwards an activity pause.
    pub fn on_host_pause(&self, host: &HostHandle) {
        if let Some(runtime) = self.runtime() {
            runtime.on_host_pause(host);
        }
    }

    /// Forwards an activity resume with the trivial back-button handler.
    pub fn on_host_resume(&self, host: &HostHandle) {
        self.on_host_resume_with(host, Arc::new(DefaultBackButtonHandler));
    }

    /// Forwards an activity resume with a host-supplied back-button
    /// handler.
    pub fn on_host_resume_with(&self, host: &HostHandle, back_handler: Arc<dyn BackButtonHandler>) {
        if let Some(runtime) = self.runtime() {
            runtime.on_host_resume(host, back_handler);
        }
    }

    /// Forwards an activity destroy.
    pub fn on_host_destroy(&self, host: &HostHandle) {
        if let Some(runtime) = self.runtime() {
            runtime.on_host_destroy(host);
        }
    }

    /// Routes an intent. A view-action deep link that loads into at least
    /// one live view is consumed there; everything else forwards to the
    /// runtime.
    pub fn on_new_intent(&self, intent: &Intent) {
        if let Some(url) = intent.deep_link_url() {
            if self.views.broadcast_load(url) {
                debug!("deep link {url} consumed by live views");
                return;
            }
        }
        if let Some(runtime) = self.runtime() {
            runtime.on_new_intent(intent);
        }
    }

    // ------------------------------------------------------------------
    // Runtime event plumbing
    // ------------------------------------------------------------------

    /// Sender endpoint the runtime uses to queue events for the host.
    pub fn event_sender(&self) -> Sender<ExternalEvent> {
        self.events.sender()
    }

    /// Applies one event immediately. Callable from the runtime's thread.
    pub fn dispatch_event(&self, event: &ExternalEvent) -> bool {
        dispatch_event(&self.views, event)
    }

    /// Drains queued events, applying each in order. Returns how many
    /// reached a live view.
    pub fn pump_events(&self) -> usize {
        let mut delivered = 0;
        while let Some(event) = self.events.try_recv() {
            if self.dispatch_event(&event) {
                delivered += 1;
            }
        }
        delivered
    }
}
