//! The store session: owns the data root and the listener registry.

use crate::error::StoreError;
use crate::listeners::{listener_id, ChannelKey, Listener, ListenerRegistry};
use crate::options::{StoreOptions, SubscribeOptions};
use crate::subscription::Subscription;
use json_store_expression::{evaluate_str, resolve_dynamic_path, ObjectSource, SourceRegistry, ValueSource};
use json_store_path::{parse_path, set, PathError, Value};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::{Rc, Weak};
use tracing::{debug, trace, warn};

/// A path-addressed data store with change notification.
///
/// Cloning is cheap and yields another handle to the same session, so
/// listeners can capture a store and write to it.
///
/// # Example
///
/// ```
/// use json_store::{listener, Store};
/// use json_store_path::Value;
/// use serde_json::json;
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let store = Store::new(Value::from(json!({"user": {"name": "ann"}})), "Store");
/// let seen = Rc::new(RefCell::new(Vec::new()));
///
/// let sink = Rc::clone(&seen);
/// let sub = store.add_listener(
///     listener(move |path, value| sink.borrow_mut().push((path.to_string(), value.clone()))),
///     &["Store.user.name"],
/// );
///
/// store.write("Store.user", Value::from(json!({"name": "bob"}))).unwrap();
/// assert_eq!(*seen.borrow(), vec![("Store.user.name".to_string(), Value::from("bob"))]);
///
/// sub.unsubscribe();
/// store.write("Store.user.name", Value::from("cid")).unwrap();
/// assert_eq!(seen.borrow().len(), 1);
/// ```
#[derive(Clone)]
pub struct Store {
    inner: Rc<StoreInner>,
}

/// Weak handle to a [`Store`], for listeners that should not keep the
/// session alive.
#[derive(Clone)]
pub struct WeakStore {
    inner: Weak<StoreInner>,
}

struct StoreInner {
    /// Without the trailing dot.
    prefix: String,
    data: Rc<RefCell<Value>>,
    /// External sources followed by this store's own.
    sources: SourceRegistry,
    options: StoreOptions,
    listeners: Rc<RefCell<ListenerRegistry>>,
}

impl Store {
    /// Creates a store over `init` whose paths start with `prefix`
    /// (e.g. `"Store"`). A `Null`/`Undefined` init starts an empty object.
    pub fn new(init: Value, prefix: &str) -> Self {
        Self::build(init, prefix, SourceRegistry::new(), StoreOptions::default())
    }

    /// Like [`new`](Self::new), with named sources for cross-store
    /// references.
    pub fn with_sources(init: Value, prefix: &str, sources: SourceRegistry) -> Self {
        Self::build(init, prefix, sources, StoreOptions::default())
    }

    pub fn with_options(init: Value, prefix: &str, sources: SourceRegistry, options: StoreOptions) -> Self {
        Self::build(init, prefix, sources, options)
    }

    fn build(init: Value, prefix: &str, mut sources: SourceRegistry, options: StoreOptions) -> Self {
        let prefix = prefix.trim().trim_end_matches('.').to_string();
        let init = if init.is_nullish() { Value::object() } else { init };
        let data = Rc::new(RefCell::new(init));
        let own = ObjectSource::shared(prefix.clone(), Rc::clone(&data))
            .with_max_passes(options.max_resolve_passes);
        sources.register(Rc::new(own));
        debug!(prefix = %prefix, sources = ?sources, "store created");
        Store {
            inner: Rc::new(StoreInner {
                prefix,
                data,
                sources,
                options,
                listeners: Rc::new(RefCell::new(ListenerRegistry::new())),
            }),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.inner.prefix
    }

    pub fn options(&self) -> &StoreOptions {
        &self.inner.options
    }

    /// The named sources references are resolved against, this store's own
    /// included.
    pub fn sources(&self) -> &SourceRegistry {
        &self.inner.sources
    }

    /// This store's data as a named source, for other stores to reference.
    /// Reads through it observe later writes.
    pub fn source(&self) -> Rc<dyn ValueSource> {
        Rc::new(
            ObjectSource::shared(self.inner.prefix.clone(), Rc::clone(&self.inner.data))
                .with_max_passes(self.inner.options.max_resolve_passes),
        )
    }

    /// A copy of the whole data root.
    pub fn snapshot(&self) -> Value {
        self.inner.data.borrow().clone()
    }

    pub fn downgrade(&self) -> WeakStore {
        WeakStore {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Sets the value at `path` and notifies listeners.
    pub fn write(&self, path: &str, value: Value) -> Result<(), StoreError> {
        self.write_with(path, value, false)
    }

    /// Removes the key at `path` (or clears the array slot) and notifies
    /// listeners.
    pub fn delete(&self, path: &str) -> Result<(), StoreError> {
        self.write_with(path, Value::Undefined, true)
    }

    /// Sets the value at `path`; with `delete_key`, a `Null`/`Undefined`
    /// value removes the key instead. Listeners are notified once the
    /// mutation is complete.
    pub fn write_with(&self, path: &str, value: Value, delete_key: bool) -> Result<(), StoreError> {
        let path = path.trim();
        debug!(path, delete_key, "write");
        let resolved = resolve_dynamic_path(path, &self.inner.sources, self.inner.options.max_resolve_passes);
        let segments = parse_path(&resolved, &self.inner.prefix)?;
        set(&mut self.inner.data.borrow_mut(), &segments, value, delete_key)?;
        self.notify(path);
        Ok(())
    }

    /// Reads the value at `path`. Paths under another registered source's
    /// prefix are read from that source. Absent values read as
    /// [`Value::Undefined`].
    pub fn read(&self, path: &str) -> Result<Value, StoreError> {
        self.read_in(path, &self.inner.sources)
    }

    /// Like [`read`](Self::read), with `extra` sources registered on top of
    /// the store's own for this call.
    pub fn read_with(&self, path: &str, extra: &SourceRegistry) -> Result<Value, StoreError> {
        self.read_in(path, &self.inner.sources.merged(extra))
    }

    fn read_in(&self, path: &str, sources: &SourceRegistry) -> Result<Value, StoreError> {
        let path = path.trim();
        debug!(path, "read");
        let source = sources.find(path).ok_or_else(|| PathError::PrefixMismatch {
            prefix: self.inner.prefix.clone(),
            path: path.to_string(),
        })?;
        Ok(source.resolve(path, sources)?)
    }

    /// Evaluates an expression such as `Store.count + 1` against the store
    /// and its sources.
    pub fn evaluate(&self, expression: &str) -> Result<Value, StoreError> {
        Ok(evaluate_str(expression, &self.inner.sources)?)
    }

    /// Registers `callback` on each of `paths`. Blank paths are skipped.
    pub fn subscribe<I, S>(&self, callback: Listener, paths: I, options: SubscribeOptions) -> Subscription
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys: Vec<ChannelKey> = paths
            .into_iter()
            .map(|p| p.as_ref().trim().to_string())
            .filter(|p| !p.is_empty())
            .map(|p| ChannelKey::new(p, options.children_activity))
            .collect();

        let handles: Vec<(ChannelKey, u64)> = {
            let mut registry = self.inner.listeners.borrow_mut();
            keys.into_iter()
                .map(|key| {
                    let id = registry.add(key.clone(), Rc::clone(&callback));
                    (key, id)
                })
                .collect()
        };
        debug!(
            paths = ?handles.iter().map(|(key, _)| key.path.as_str()).collect::<Vec<_>>(),
            immediate = options.immediate,
            children_activity = options.children_activity,
            "subscribed"
        );

        if options.immediate {
            for (key, _) in &handles {
                self.invoke(&key.path, &callback, &mut HashSet::new());
            }
        }

        Subscription::new(Rc::downgrade(&self.inner.listeners), handles)
    }

    pub fn add_listener<I, S>(&self, callback: Listener, paths: I) -> Subscription
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.subscribe(callback, paths, SubscribeOptions::new())
    }

    pub fn add_listener_and_call_immediately<I, S>(
        &self,
        call_immediately: bool,
        callback: Listener,
        paths: I,
    ) -> Subscription
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.subscribe(callback, paths, SubscribeOptions::new().immediate(call_immediately))
    }

    pub fn add_listener_with_children_activity<I, S>(&self, callback: Listener, paths: I) -> Subscription
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.subscribe(callback, paths, SubscribeOptions::new().children_activity(true))
    }

    pub fn add_listener_and_call_immediately_with_children_activity<I, S>(
        &self,
        call_immediately: bool,
        callback: Listener,
        paths: I,
    ) -> Subscription
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.subscribe(
            callback,
            paths,
            SubscribeOptions::new()
                .immediate(call_immediately)
                .children_activity(true),
        )
    }

    /// Number of open notification channels.
    pub fn channel_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Fans a write to `written` out to every concerned channel. Each
    /// callback runs at most once per call.
    fn notify(&self, written: &str) {
        let channels = self.inner.listeners.borrow().matching(written);
        if channels.is_empty() {
            return;
        }
        debug!(path = written, channels = channels.len(), "notifying listeners");
        let mut called = HashSet::new();
        for (key, listeners) in channels {
            trace!(channel = %key.path, children_activity = key.children_activity, "dispatching");
            for (id, listener) in listeners {
                // Unsubscribed by an earlier callback of this pass.
                if !self.inner.listeners.borrow().contains(&key, id) {
                    continue;
                }
                self.invoke(&key.path, &listener, &mut called);
            }
        }
    }

    /// Calls `listener` with the current value at `path`, unless it is
    /// already in `called`.
    fn invoke(&self, path: &str, listener: &Listener, called: &mut HashSet<usize>) {
        if !called.insert(listener_id(listener)) {
            return;
        }
        let value = self.read_for_listener(path);
        listener(path, &value);
    }

    fn read_for_listener(&self, path: &str) -> Value {
        self.read(path).unwrap_or_else(|err| {
            warn!(path, error = %err, "listener path could not be read");
            Value::Undefined
        })
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("prefix", &self.inner.prefix)
            .field("data", &self.inner.data.borrow())
            .field("sources", &self.inner.sources)
            .field("listeners", &self.inner.listeners.borrow())
            .finish()
    }
}

impl WeakStore {
    /// The store, if it is still alive.
    pub fn upgrade(&self) -> Option<Store> {
        self.inner.upgrade().map(|inner| Store { inner })
    }
}
