//! Mock collaborators shared by the unit tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::events::MeetViewListener;
use crate::host::RuntimeHost;
use crate::intent::Intent;
use crate::properties::AppProperties;
use crate::runtime::{
    BackButtonHandler, HostHandle, ImmersiveModule, ModuleError, PictureInPictureModule,
    PlatformCapabilities, RootView, UiRuntime,
};

/// Everything a [`MockRuntime`] and its root views record.
#[derive(Default)]
pub struct RuntimeLog {
    pub mounts: AtomicUsize,
    pub unmounts: AtomicUsize,
    pub mounted_props: Mutex<Vec<AppProperties>>,
    pub updated_props: Mutex<Vec<AppProperties>>,
    pub lifecycle: Mutex<Vec<String>>,
}

impl RuntimeLog {
    fn record(&self, entry: impl Into<String>) {
        self.lifecycle.lock().unwrap().push(entry.into());
    }
}

/// Recording stand-in for the embedded runtime.
pub struct MockRuntime {
    pub log: Arc<RuntimeLog>,
    pip: Option<Arc<MockPipModule>>,
    immersive: Option<Arc<MockImmersiveModule>>,
}

impl MockRuntime {
    pub fn new() -> Arc<Self> {
        Self::with_modules(None, None)
    }

    pub fn with_modules(
        pip: Option<Arc<MockPipModule>>,
        immersive: Option<Arc<MockImmersiveModule>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            log: Arc::new(RuntimeLog::default()),
            pip,
            immersive,
        })
    }
}

struct MockRootView {
    log: Arc<RuntimeLog>,
}

impl RootView for MockRootView {
    fn update_properties(&mut self, props: AppProperties) {
        self.log.updated_props.lock().unwrap().push(props);
    }

    fn unmount(&mut self) {
        self.log.unmounts.fetch_add(1, Ordering::SeqCst);
    }
}

impl UiRuntime for MockRuntime {
    fn mount_root_view(&self, props: AppProperties) -> Box<dyn RootView> {
        self.log.mounts.fetch_add(1, Ordering::SeqCst);
        self.log.mounted_props.lock().unwrap().push(props);
        Box::new(MockRootView {
            log: self.log.clone(),
        })
    }

    fn on_back_pressed(&self) {
        self.log.record("back");
    }

    fn on_host_pause(&self, host: &HostHandle) {
        self.log.record(format!("pause:{}", host.id()));
    }

    fn on_host_resume(&self, host: &HostHandle, _back_handler: Arc<dyn BackButtonHandler>) {
        self.log.record(format!("resume:{}", host.id()));
    }

    fn on_host_destroy(&self, host: &HostHandle) {
        self.log.record(format!("destroy:{}", host.id()));
    }

    fn on_new_intent(&self, intent: &Intent) {
        self.log
            .record(format!("intent:{}", intent.data().unwrap_or("-")));
    }

    fn picture_in_picture_module(&self) -> Option<Arc<dyn PictureInPictureModule>> {
        self.pip
            .clone()
            .map(|module| module as Arc<dyn PictureInPictureModule>)
    }

    fn immersive_module(&self) -> Option<Arc<dyn ImmersiveModule>> {
        self.immersive
            .clone()
            .map(|module| module as Arc<dyn ImmersiveModule>)
    }
}

/// Counting picture-in-picture module, optionally failing every call.
#[derive(Default)]
pub struct MockPipModule {
    pub calls: AtomicUsize,
    fail: bool,
}

impl MockPipModule {
    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }
}

impl PictureInPictureModule for MockPipModule {
    fn enter_picture_in_picture(&self) -> Result<(), ModuleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(ModuleError::Failed("picture-in-picture rejected".into()))
        } else {
            Ok(())
        }
    }
}

/// Counting immersive module.
#[derive(Default)]
pub struct MockImmersiveModule {
    pub calls: AtomicUsize,
}

impl ImmersiveModule for MockImmersiveModule {
    fn emit_immersive_state_changed(&self) -> Result<(), ModuleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Listener collecting formatted callback records.
#[derive(Default)]
pub struct CollectingListener {
    events: Mutex<Vec<String>>,
}

impl CollectingListener {
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }

    fn record(&self, entry: String) {
        self.events.lock().unwrap().push(entry);
    }
}

impl MeetViewListener for CollectingListener {
    fn on_conference_will_join(&self, url: Option<&str>) {
        self.record(format!("will-join:{}", url.unwrap_or("-")));
    }

    fn on_conference_joined(&self, url: &str) {
        self.record(format!("joined:{url}"));
    }

    fn on_conference_will_leave(&self, url: &str) {
        self.record(format!("will-leave:{url}"));
    }

    fn on_conference_left(&self, url: &str) {
        self.record(format!("left:{url}"));
    }

    fn on_conference_failed(&self, url: Option<&str>, error: &str) {
        self.record(format!("failed:{}:{error}", url.unwrap_or("-")));
    }

    fn on_load_config_error(&self, url: Option<&str>, error: &str) {
        self.record(format!("config-error:{}:{error}", url.unwrap_or("-")));
    }
}

/// Host wired to a fresh mock runtime.
pub fn mock_host(pip_supported: bool) -> (Arc<RuntimeHost>, Arc<MockRuntime>) {
    mock_host_with_modules(pip_supported, None, None)
}

/// Host wired to a mock runtime carrying the given platform modules.
pub fn mock_host_with_modules(
    pip_supported: bool,
    pip: Option<Arc<MockPipModule>>,
    immersive: Option<Arc<MockImmersiveModule>>,
) -> (Arc<RuntimeHost>, Arc<MockRuntime>) {
    let runtime = MockRuntime::with_modules(pip, immersive);
    let shared: Arc<dyn UiRuntime> = runtime.clone();
    let host = RuntimeHost::new(
        PlatformCapabilities {
            picture_in_picture: pip_supported,
        },
        move || shared.clone(),
    );
    (host, runtime)
}
