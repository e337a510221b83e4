//! Per-view entry point into the invite feature

use std::sync::atomic::{AtomicBool, Ordering};

/// Handle into the invite subsystem, scoped to one view.
///
/// The invite feature itself lives outside this crate; the controller only
/// tracks which invite capabilities the host enabled so the property bundle
/// can advertise them to the runtime. Both capabilities start disabled.
#[derive(Debug)]
pub struct InviteController {
    scope: String,
    add_people_enabled: AtomicBool,
    dial_out_enabled: AtomicBool,
}

impl InviteController {
    pub(crate) fn new(scope: String) -> Self {
        Self {
            scope,
            add_people_enabled: AtomicBool::new(false),
            dial_out_enabled: AtomicBool::new(false),
        }
    }

    /// Scope of the owning view.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Whether "add people" is advertised to the runtime.
    pub fn add_people_enabled(&self) -> bool {
        self.add_people_enabled.load(Ordering::Relaxed)
    }

    /// Enables or disables "add people"; takes effect on the next load.
    pub fn set_add_people_enabled(&self, enabled: bool) {
        self.add_people_enabled.store(enabled, Ordering::Relaxed);
    }

    /// Whether dialing out is advertised to the runtime.
    pub fn dial_out_enabled(&self) -> bool {
        self.dial_out_enabled.load(Ordering::Relaxed)
    }

    /// Enables or disables dialing out; takes effect on the next load.
    pub fn set_dial_out_enabled(&self, enabled: bool) {
        self.dial_out_enabled.store(enabled, Ordering::Relaxed);
    }
}
