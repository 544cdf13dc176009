//! A reactive value bound to one storage key.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use super::{PreferenceStore, StorageEvent};
use crate::config::LogConfig;
use crate::log::ModuleLog;
use crate::observer::{Listener, ListenerId, Listeners};

struct Shared {
    key: String,
    initial: String,
    store: Rc<dyn PreferenceStore>,
    value: RefCell<String>,
    watchers: Listeners<String>,
    subscription: Cell<Option<ListenerId>>,
    log: ModuleLog,
}

impl Shared {
    fn on_storage_event(&self, event: &StorageEvent) {
        if event.key != self.key {
            return;
        }
        // Removals leave the current value in place
        let Some(new_value) = event.new_value.as_ref() else {
            return;
        };
        self.log.debug(format_args!(
            "external write to '{}': {}",
            self.key, new_value
        ));
        self.value.replace(new_value.clone());
        self.watchers.notify(new_value);
    }
}

/// A string value stored under one key.
///
/// Reads come from a local copy initialised from the store (or from the
/// initial value when the key is absent). [`set`](StoredValue::set) updates
/// the copy and writes through. After [`attach`](StoredValue::attach), writes
/// made by other contexts update the copy and are passed on to
/// [`watch`](StoredValue::watch) listeners.
///
/// Cloning yields another handle to the same value.
#[derive(Clone)]
pub struct StoredValue {
    shared: Rc<Shared>,
}

impl StoredValue {
    pub fn new(store: Rc<dyn PreferenceStore>, key: impl Into<String>, initial: &str) -> Self {
        Self::with_log(store, key, initial, ModuleLog::disabled("storage"))
    }

    pub(crate) fn with_log(
        store: Rc<dyn PreferenceStore>,
        key: impl Into<String>,
        initial: &str,
        log: ModuleLog,
    ) -> Self {
        let key = key.into();
        let value = store.read(&key).unwrap_or_else(|| initial.to_string());
        Self {
            shared: Rc::new(Shared {
                key,
                initial: initial.to_string(),
                store,
                value: RefCell::new(value),
                watchers: Listeners::new(),
                subscription: Cell::new(None),
                log,
            }),
        }
    }

    /// Creates a value that logs through `tracing` when enabled.
    pub fn logged(
        store: Rc<dyn PreferenceStore>,
        key: impl Into<String>,
        initial: &str,
        global: &LogConfig,
    ) -> Self {
        Self::with_log(store, key, initial, ModuleLog::new("storage", global, true))
    }

    pub fn key(&self) -> &str {
        &self.shared.key
    }

    pub fn get(&self) -> String {
        self.shared.value.borrow().clone()
    }

    /// Re-reads the key, falling back to the initial value when it is absent.
    ///
    /// Picks up writes made while the value was detached.
    pub fn reload(&self) -> String {
        let value = self
            .shared
            .store
            .read(&self.shared.key)
            .unwrap_or_else(|| self.shared.initial.clone());
        self.shared.value.replace(value.clone());
        value
    }

    /// Updates the value and writes it to the store.
    ///
    /// A failed write is logged; the local value changes regardless.
    pub fn set(&self, value: &str) {
        self.shared.value.replace(value.to_string());
        if let Err(e) = self.shared.store.write(&self.shared.key, value) {
            self.shared.log.warn(format_args!(
                "could not persist '{}': {}",
                self.shared.key, e
            ));
        }
    }

    /// Starts following writes made by other contexts. No-op if attached.
    pub fn attach(&self) {
        if self.is_attached() {
            return;
        }
        let weak: Weak<Shared> = Rc::downgrade(&self.shared);
        let id = self.shared.store.subscribe(Rc::new(move |event: &StorageEvent| {
            if let Some(shared) = weak.upgrade() {
                shared.on_storage_event(event);
            }
        }));
        self.shared.subscription.set(Some(id));
    }

    /// Stops following external writes. No-op if not attached.
    pub fn detach(&self) {
        if let Some(id) = self.shared.subscription.take() {
            self.shared.store.unsubscribe(id);
        }
    }

    pub fn is_attached(&self) -> bool {
        self.shared.subscription.get().is_some()
    }

    /// Registers a listener for values written by other contexts.
    pub fn watch(&self, listener: Listener<String>) -> ListenerId {
        self.shared.watchers.add(listener)
    }

    pub fn unwatch(&self, id: ListenerId) {
        self.shared.watchers.remove(id);
    }
}

impl fmt::Debug for StoredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredValue")
            .field("key", &self.shared.key)
            .field("value", &self.shared.value.borrow())
            .field("attached", &self.is_attached())
            .finish()
    }
}
