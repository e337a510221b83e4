//! Registry of live embedded views

use std::sync::{Arc, Mutex, Weak};

use crate::view::{MeetView, ViewInner};

/// Set of live views, searchable by scope identifier.
///
/// Entries are weak references: a view dropped without
/// [`MeetView::dispose`] is pruned the next time the registry is scanned,
/// while disposal unregisters explicitly. One mutex guards all membership
/// operations; it is never held while a view performs load work, since that
/// work may re-enter the registry.
#[derive(Default)]
pub struct ViewRegistry {
    views: Mutex<Vec<Weak<ViewInner>>>,
}

impl ViewRegistry {
    pub(crate) fn register(&self, view: &Arc<ViewInner>) {
        let mut views = self.views.lock().unwrap();
        views.retain(|entry| entry.strong_count() > 0);
        views.push(Arc::downgrade(view));
    }

    pub(crate) fn unregister(&self, scope: &str) {
        self.views
            .lock()
            .unwrap()
            .retain(|entry| match entry.upgrade() {
                Some(view) => view.scope() != scope,
                None => false,
            });
    }

    /// Finds the live view carrying the given scope.
    pub fn find_by_scope(&self, scope: &str) -> Option<MeetView> {
        let mut views = self.views.lock().unwrap();
        views.retain(|entry| entry.strong_count() > 0);
        views
            .iter()
            .filter_map(Weak::upgrade)
            .find(|view| view.scope() == scope)
            .map(MeetView::from_inner)
    }

    /// Loads `url` in every live view.
    ///
    /// Returns true iff at least one view received the load. Each live view
    /// is invoked exactly once, after the membership lock has been released.
    pub fn broadcast_load(&self, url: &str) -> bool {
        let live: Vec<Arc<ViewInner>> = {
            let mut views = self.views.lock().unwrap();
            views.retain(|entry| entry.strong_count() > 0);
            views.iter().filter_map(Weak::upgrade).collect()
        };
        for view in &live {
            view.load_url(Some(url));
        }
        !live.is_empty()
    }

    /// Number of live views; dead entries are pruned in passing.
    pub fn len(&self) -> usize {
        let mut views = self.views.lock().unwrap();
        views.retain(|entry| entry.strong_count() > 0);
        views.len()
    }

    /// Whether no live view is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::mock_host;
    use crate::view::MeetView;

    #[test]
    fn find_by_scope_misses_unknown_scopes() {
        let (host, _runtime) = mock_host(true);
        let _view = MeetView::new(host.clone());
        assert!(host.views().find_by_scope("no-such-scope").is_none());
    }

    #[test]
    fn find_by_scope_returns_the_matching_view() {
        let (host, _runtime) = mock_host(true);
        let a = MeetView::new(host.clone());
        let b = MeetView::new(host.clone());
        assert_ne!(a.scope(), b.scope());

        let found = host.views().find_by_scope(a.scope()).unwrap();
        assert_eq!(found.scope(), a.scope());
        assert_eq!(host.views().len(), 2);
    }

    #[test]
    fn broadcast_load_reports_empty_registries() {
        let (host, runtime) = mock_host(true);
        assert!(!host.views().broadcast_load("room1"));
        assert_eq!(runtime.log.mounted_props.lock().unwrap().len(), 0);
    }

    #[test]
    fn broadcast_load_hits_every_live_view_once() {
        let (host, runtime) = mock_host(true);
        let _a = MeetView::new(host.clone());
        let _b = MeetView::new(host.clone());

        assert!(host.views().broadcast_load("room1"));

        let mounted = runtime.log.mounted_props.lock().unwrap();
        assert_eq!(mounted.len(), 2);
        for props in mounted.iter() {
            assert_eq!(props.url.as_ref().unwrap().url, "room1");
        }
        assert!(runtime.log.updated_props.lock().unwrap().is_empty());
    }

    #[test]
    fn dropped_views_are_pruned_without_dispose() {
        let (host, _runtime) = mock_host(true);
        let scope = {
            let view = MeetView::new(host.clone());
            view.scope().to_owned()
        };
        assert!(host.views().find_by_scope(&scope).is_none());
        assert!(host.views().is_empty());
    }
}
