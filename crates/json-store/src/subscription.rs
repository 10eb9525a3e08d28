use crate::listeners::{ChannelKey, ListenerRegistry};
use std::cell::RefCell;
use std::rc::Weak;
use tracing::trace;

/// Handle for the registrations made by one `subscribe` call.
///
/// Dropping it unsubscribes; call [`detach`](Self::detach) to keep the
/// listener registered for the lifetime of the store.
#[must_use = "dropping a Subscription unsubscribes its listener immediately"]
pub struct Subscription {
    registry: Weak<RefCell<ListenerRegistry>>,
    handles: Vec<(ChannelKey, u64)>,
}

impl Subscription {
    pub(crate) fn new(registry: Weak<RefCell<ListenerRegistry>>, handles: Vec<(ChannelKey, u64)>) -> Self {
        Subscription { registry, handles }
    }

    /// Removes every registration this subscription made.
    pub fn unsubscribe(self) {
        drop(self);
    }

    /// Keeps the registrations alive without holding the handle.
    pub fn detach(mut self) {
        self.handles.clear();
    }

    /// The channels this subscription holds a reference to.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.handles.iter().map(|(key, _)| key.path.as_str())
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if self.handles.is_empty() {
            return;
        }
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        // Released listeners are dropped after the registry borrow ends,
        // since a listener may own subscriptions of its own.
        let released: Vec<_> = {
            let mut registry = registry.borrow_mut();
            self.handles
                .drain(..)
                .filter_map(|(key, id)| {
                    trace!(path = %key.path, children_activity = key.children_activity, "unsubscribing");
                    registry.remove(&key, id)
                })
                .collect()
        };
        drop(released);
    }
}
