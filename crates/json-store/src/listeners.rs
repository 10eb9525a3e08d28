//! Listener registry: notification channels keyed by registered path.

use indexmap::IndexMap;
use json_store_path::Value;
use std::fmt;
use std::rc::Rc;

/// A change callback. Receives the registered path and the value currently
/// stored there.
pub type Listener = Rc<dyn Fn(&str, &Value)>;

/// Wraps a closure as a [`Listener`].
pub fn listener(f: impl Fn(&str, &Value) + 'static) -> Listener {
    Rc::new(f)
}

/// Identity of a listener: the address of its allocation.
pub(crate) fn listener_id(listener: &Listener) -> usize {
    Rc::as_ptr(listener) as *const () as usize
}

/// Identifies one notification channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelKey {
    /// Registered path, trimmed but otherwise verbatim.
    pub path: String,
    pub children_activity: bool,
}

impl ChannelKey {
    pub fn new(path: impl Into<String>, children_activity: bool) -> Self {
        ChannelKey {
            path: path.into(),
            children_activity,
        }
    }

    /// Whether a write to `written` concerns this channel.
    pub fn matches(&self, written: &str) -> bool {
        self.path == written
            || is_descendant(&self.path, written)
            || (self.children_activity && is_descendant(written, &self.path))
    }
}

/// Check if `path` lies strictly below `ancestor`, i.e. continues it with
/// `.` or `[`.
pub fn is_descendant(path: &str, ancestor: &str) -> bool {
    match path.strip_prefix(ancestor) {
        Some(rest) => rest.starts_with('.') || rest.starts_with('['),
        None => false,
    }
}

/// Listeners subscribed to one channel, each under its own registration id.
/// The number of entries is the channel's reference count.
struct Channel {
    listeners: Vec<(u64, Listener)>,
}

/// All live channels, in order of first registration.
#[derive(Default)]
pub struct ListenerRegistry {
    channels: IndexMap<ChannelKey, Channel>,
    next_id: u64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a reference to the channel for `key`, opening it if needed.
    /// Returns the registration id to pass to [`remove`](Self::remove).
    pub fn add(&mut self, key: ChannelKey, listener: Listener) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.channels
            .entry(key)
            .or_insert_with(|| Channel {
                listeners: Vec::new(),
            })
            .listeners
            .push((id, listener));
        id
    }

    /// Drops one reference, handing back the removed listener. The channel
    /// is closed once none are left.
    pub fn remove(&mut self, key: &ChannelKey, id: u64) -> Option<Listener> {
        let channel = self.channels.get_mut(key)?;
        let position = channel.listeners.iter().position(|(entry, _)| *entry == id)?;
        let (_, listener) = channel.listeners.remove(position);
        if channel.listeners.is_empty() {
            self.channels.shift_remove(key);
        }
        Some(listener)
    }

    pub fn contains(&self, key: &ChannelKey, id: u64) -> bool {
        self.channels
            .get(key)
            .is_some_and(|channel| channel.listeners.iter().any(|(entry, _)| *entry == id))
    }

    /// Number of live registrations on the channel for `key`.
    pub fn reference_count(&self, key: &ChannelKey) -> usize {
        self.channels.get(key).map_or(0, |channel| channel.listeners.len())
    }

    /// Number of open channels.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Snapshot of the channels a write to `written` concerns, with their
    /// current listeners.
    pub fn matching(&self, written: &str) -> Vec<(ChannelKey, Vec<(u64, Listener)>)> {
        self.channels
            .iter()
            .filter(|(key, _)| key.matches(written))
            .map(|(key, channel)| (key.clone(), channel.listeners.clone()))
            .collect()
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.channels
                    .iter()
                    .map(|(key, channel)| (key, channel.listeners.len())),
            )
            .finish()
    }
}
