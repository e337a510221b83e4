//! The embeddable conference view facade

use std::sync::{Arc, Mutex};

use arc_swap::ArcSwapOption;
use log::{debug, error, info};
use uuid::Uuid;

use crate::events::{ExternalEventKind, MeetViewListener};
use crate::host::RuntimeHost;
use crate::invite::InviteController;
use crate::properties::{AppProperties, UrlBundle, next_update_token};
use crate::runtime::RootView;

/// Picture-in-picture preference of a view.
///
/// `Auto` defers to platform capability, `Disabled` wins over a capable
/// platform, and `Enabled` still requires platform support.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PictureInPicture {
    /// Follow platform capability.
    #[default]
    Auto,
    /// Request picture-in-picture on capable platforms.
    Enabled,
    /// Never enter picture-in-picture.
    Disabled,
}

/// Host-facing mutable state. Touched by host-facing calls and, briefly, by
/// event dispatch when it fetches the listener.
struct ViewState {
    default_url: Option<String>,
    picture_in_picture: PictureInPicture,
    welcome_page_enabled: bool,
    listener: Option<Arc<dyn MeetViewListener>>,
    root: Option<Box<dyn RootView>>,
}

/// State shared between the facade, the registry, and event dispatch.
pub(crate) struct ViewInner {
    scope: String,
    host: Arc<RuntimeHost>,
    invite: InviteController,
    /// Conference currently loaded, as confirmed by the runtime. Written by
    /// event dispatch on the runtime's thread, read from the UI thread; a
    /// lock here could stall the UI thread behind a slow runtime callback,
    /// hence the swap cell.
    loaded_url: ArcSwapOption<String>,
    state: Mutex<ViewState>,
}

impl ViewInner {
    pub(crate) fn scope(&self) -> &str {
        &self.scope
    }

    pub(crate) fn load_url(&self, url: Option<&str>) {
        self.load_url_bundle(url.map(UrlBundle::new));
    }

    pub(crate) fn load_url_bundle(&self, url: Option<UrlBundle>) {
        let mut state = self.state.lock().unwrap();
        let props = self.build_properties(&state, url);
        match state.root.as_mut() {
            Some(root) => {
                debug!("{}: updating root view properties", self.scope);
                root.update_properties(props);
            }
            None => {
                info!("{}: mounting root view", self.scope);
                let runtime = self.host.ensure_runtime();
                state.root = Some(runtime.mount_root_view(props));
            }
        }
    }

    fn build_properties(&self, state: &ViewState, url: Option<UrlBundle>) -> AppProperties {
        AppProperties {
            default_url: state.default_url.clone(),
            external_api_scope: self.scope.clone(),
            add_people_enabled: self.invite.add_people_enabled(),
            dial_out_enabled: self.invite.dial_out_enabled(),
            picture_in_picture_enabled: effective_picture_in_picture(
                state.picture_in_picture,
                self.host.platform().picture_in_picture,
            ),
            url,
            welcome_page_enabled: state.welcome_page_enabled,
            timestamp: next_update_token(),
        }
    }

    pub(crate) fn apply_event(&self, kind: &ExternalEventKind) {
        match kind {
            ExternalEventKind::ConferenceWillJoin { url: Some(url) }
            | ExternalEventKind::ConferenceJoined { url } => {
                self.loaded_url.store(Some(Arc::new(url.clone())));
            }
            ExternalEventKind::ConferenceWillJoin { url: None }
            | ExternalEventKind::ConferenceWillLeave { .. } => {}
            ExternalEventKind::ConferenceLeft { .. }
            | ExternalEventKind::ConferenceFailed { .. }
            | ExternalEventKind::LoadConfigError { .. } => {
                self.loaded_url.store(None);
            }
        }

        let listener = self.state.lock().unwrap().listener.clone();
        let Some(listener) = listener else { return };
        match kind {
            ExternalEventKind::ConferenceWillJoin { url } => {
                listener.on_conference_will_join(url.as_deref());
            }
            ExternalEventKind::ConferenceJoined { url } => {
                listener.on_conference_joined(url);
            }
            ExternalEventKind::ConferenceWillLeave { url } => {
                listener.on_conference_will_leave(url);
            }
            ExternalEventKind::ConferenceLeft { url } => {
                listener.on_conference_left(url);
            }
            ExternalEventKind::ConferenceFailed { url, error } => {
                listener.on_conference_failed(url.as_deref(), error);
            }
            ExternalEventKind::LoadConfigError { url, error } => {
                listener.on_load_config_error(url.as_deref(), error);
            }
        }
    }

    fn dispose(&self) {
        let root = self.state.lock().unwrap().root.take();
        if let Some(mut root) = root {
            info!("{}: unmounting root view", self.scope);
            root.unmount();
        }
        self.host.views().unregister(&self.scope);
    }
}

/// An embeddable conference view.
///
/// Cloning yields another handle to the same view. [`MeetView::dispose`]
/// must run on the teardown path of whichever host screen owns the view;
/// the registry prunes views that skipped it, but the mounted root view is
/// only released by disposal.
#[derive(Clone)]
pub struct MeetView {
    inner: Arc<ViewInner>,
}

impl MeetView {
    /// Creates a view attached to `host`, mints its scope identifier, and
    /// registers it for scope lookup and broadcast loading.
    ///
    /// The host's runtime handle is created on first use and shared by every
    /// view attached to the same host.
    pub fn new(host: Arc<RuntimeHost>) -> Self {
        let scope = Uuid::new_v4().to_string();
        host.ensure_runtime();
        let inner = Arc::new(ViewInner {
            invite: InviteController::new(scope.clone()),
            scope,
            host,
            loaded_url: ArcSwapOption::from(None),
            state: Mutex::new(ViewState {
                default_url: None,
                picture_in_picture: PictureInPicture::default(),
                welcome_page_enabled: false,
                listener: None,
                root: None,
            }),
        });
        inner.host.views().register(&inner);
        Self { inner }
    }

    pub(crate) fn from_inner(inner: Arc<ViewInner>) -> Self {
        Self { inner }
    }

    pub(crate) fn apply_external_event(&self, kind: &ExternalEventKind) {
        self.inner.apply_event(kind);
    }

    /// Scope identifier of this view, unique within the process.
    pub fn scope(&self) -> &str {
        self.inner.scope()
    }

    /// The host this view is attached to.
    pub fn host(&self) -> &Arc<RuntimeHost> {
        &self.inner.host
    }

    /// Invite sub-controller of this view.
    pub fn invite(&self) -> &InviteController {
        &self.inner.invite
    }

    /// Base URL used to resolve partial conference names.
    pub fn default_url(&self) -> Option<String> {
        self.inner.state.lock().unwrap().default_url.clone()
    }

    /// Sets the base URL used to resolve partial conference names; takes
    /// effect on the next load.
    pub fn set_default_url(&self, url: Option<String>) {
        self.inner.state.lock().unwrap().default_url = url;
    }

    /// Current picture-in-picture preference.
    pub fn picture_in_picture(&self) -> PictureInPicture {
        self.inner.state.lock().unwrap().picture_in_picture
    }

    /// Sets the picture-in-picture preference.
    pub fn set_picture_in_picture(&self, preference: PictureInPicture) {
        self.inner.state.lock().unwrap().picture_in_picture = preference;
    }

    /// Resolves the picture-in-picture preference against the platform:
    /// true only on a capable platform with a preference other than
    /// [`PictureInPicture::Disabled`].
    pub fn effective_picture_in_picture_enabled(&self) -> bool {
        effective_picture_in_picture(
            self.picture_in_picture(),
            self.inner.host.platform().picture_in_picture,
        )
    }

    /// Whether the welcome screen renders while no conference is loaded.
    pub fn welcome_page_enabled(&self) -> bool {
        self.inner.state.lock().unwrap().welcome_page_enabled
    }

    /// Enables or disables the welcome screen; takes effect on the next
    /// load.
    pub fn set_welcome_page_enabled(&self, enabled: bool) {
        self.inner.state.lock().unwrap().welcome_page_enabled = enabled;
    }

    /// Registers the listener receiving conference callbacks. At most one
    /// listener is kept; `None` clears it.
    pub fn set_listener(&self, listener: Option<Arc<dyn MeetViewListener>>) {
        self.inner.state.lock().unwrap().listener = listener;
    }

    /// URL of the conference currently loaded, as confirmed by the runtime.
    /// This reflects runtime events, not load requests.
    pub fn loaded_url(&self) -> Option<String> {
        self.inner.loaded_url.load_full().map(|url| (*url).clone())
    }

    /// Loads a conference URL. `None` shows the welcome/landing screen.
    ///
    /// The first load mounts the runtime's root view; later loads push
    /// updated properties into it. Every load carries a fresh update token,
    /// so loading the same URL twice is observable as two updates.
    pub fn load_url(&self, url: Option<&str>) {
        self.inner.load_url(url);
    }

    /// Loads a conference described by a URL bundle. `None` shows the
    /// welcome/landing screen.
    pub fn load_url_bundle(&self, url: Option<UrlBundle>) {
        self.inner.load_url_bundle(url);
    }

    /// Host backgrounding hint. Enters picture-in-picture when it is
    /// effectively enabled and a conference is loaded; entry is best-effort
    /// and failures are logged, never propagated.
    pub fn on_user_leave_hint(&self) {
        if !self.effective_picture_in_picture_enabled()
            || self.inner.loaded_url.load().is_none()
        {
            return;
        }
        let Some(runtime) = self.inner.host.runtime() else {
            return;
        };
        let Some(pip) = runtime.picture_in_picture_module() else {
            debug!("{}: no picture-in-picture module", self.scope());
            return;
        };
        if let Err(err) = pip.enter_picture_in_picture() {
            error!("{}: failed to enter picture-in-picture: {err}", self.scope());
        }
    }

    /// Window focus change. On focus gain the runtime's immersive module is
    /// asked to re-emit its state; the call is best-effort and failures are
    /// logged, never propagated.
    pub fn on_window_focus_changed(&self, has_focus: bool) {
        if !has_focus {
            return;
        }
        let Some(runtime) = self.inner.host.runtime() else {
            return;
        };
        let Some(immersive) = runtime.immersive_module() else {
            return;
        };
        if let Err(err) = immersive.emit_immersive_state_changed() {
            error!(
                "{}: immersive state notification failed: {err}",
                self.scope()
            );
        }
    }

    /// Releases the mounted root view and unregisters the scope.
    ///
    /// Must be called from the teardown path of the owning host screen.
    /// Safe when nothing was mounted and safe to call repeatedly; only the
    /// first call unmounts.
    pub fn dispose(&self) {
        self.inner.dispose();
    }
}

fn effective_picture_in_picture(preference: PictureInPicture, supported: bool) -> bool {
    supported && preference != PictureInPicture::Disabled
}
