//! In-memory, path-addressed data store with change notification.
//!
//! A [`Store`] owns one JSON-like root. Values are read and written through
//! string paths (`Store.users[0]["first.name"]`, `Store.items[Idx.current]`)
//! and every write notifies the listeners whose registered path is the
//! written path, lies below it, or (for children-activity listeners) lies
//! above it.
//!
//! # Example
//!
//! ```
//! use json_store::{listener, Store, SubscribeOptions};
//! use json_store_path::Value;
//! use serde_json::json;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let store = Store::new(Value::from(json!({"list": []})), "Store");
//! let calls = Rc::new(Cell::new(0));
//!
//! let counter = Rc::clone(&calls);
//! let _sub = store.subscribe(
//!     listener(move |_, _| counter.set(counter.get() + 1)),
//!     ["Store.list"],
//!     SubscribeOptions::new().children_activity(true),
//! );
//!
//! store.write("Store.list[0].name", Value::from("first")).unwrap();
//! assert_eq!(calls.get(), 1);
//! assert_eq!(store.read("Store.list[0].name").unwrap(), Value::from("first"));
//! ```

pub mod error;
pub mod listeners;
pub mod options;
pub mod store;
pub mod subscription;

pub use error::StoreError;
pub use listeners::{is_descendant, listener, ChannelKey, Listener, ListenerRegistry};
pub use options::{StoreOptions, SubscribeOptions};
pub use store::{Store, WeakStore};
pub use subscription::Subscription;
