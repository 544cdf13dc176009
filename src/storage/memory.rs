//! In-process preference store with sibling contexts.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use super::{PreferenceStore, StorageEvent};
use crate::error::StoreError;
use crate::observer::{Listener, ListenerId, Listeners};

#[derive(Default)]
struct Backend {
    values: RefCell<HashMap<String, String>>,
    contexts: RefCell<Vec<(u64, Weak<Listeners<StorageEvent>>)>>,
    next_context: Cell<u64>,
}

impl Backend {
    fn register(&self, listeners: &Rc<Listeners<StorageEvent>>) -> u64 {
        let id = self.next_context.get();
        self.next_context.set(id + 1);
        self.contexts
            .borrow_mut()
            .push((id, Rc::downgrade(listeners)));
        id
    }

    /// Live listener lists of every context except `writer`.
    fn others(&self, writer: u64) -> Vec<Rc<Listeners<StorageEvent>>> {
        let mut contexts = self.contexts.borrow_mut();
        contexts.retain(|(_, weak)| weak.strong_count() > 0);
        contexts
            .iter()
            .filter(|(id, _)| *id != writer)
            .filter_map(|(_, weak)| weak.upgrade())
            .collect()
    }
}

/// A store kept in memory.
///
/// Each `MemoryStore` is one context. Contexts opened with
/// [`sibling`](MemoryStore::sibling) share the data, and a write in one
/// context is announced to all the others.
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use themekeeper::{MemoryStore, PreferenceStore, StorageEvent};
///
/// let tab_a = MemoryStore::new();
/// let tab_b = tab_a.sibling();
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = seen.clone();
/// tab_b.subscribe(Rc::new(move |event: &StorageEvent| sink.borrow_mut().push(event.clone())));
///
/// tab_a.write("theme", "dark").unwrap();
/// assert_eq!(tab_b.read("theme").as_deref(), Some("dark"));
/// assert_eq!(seen.borrow()[0], StorageEvent::new("theme", Some("dark".into())));
/// ```
pub struct MemoryStore {
    backend: Rc<Backend>,
    context: u64,
    listeners: Rc<Listeners<StorageEvent>>,
}

impl MemoryStore {
    /// Creates an empty store with a single context.
    pub fn new() -> Self {
        Self::attach(Rc::new(Backend::default()))
    }

    /// Opens another context on the same data.
    pub fn sibling(&self) -> Self {
        Self::attach(Rc::clone(&self.backend))
    }

    fn attach(backend: Rc<Backend>) -> Self {
        let listeners = Rc::new(Listeners::new());
        let context = backend.register(&listeners);
        Self {
            backend,
            context,
            listeners,
        }
    }

    /// Removes a key, announcing the removal to other contexts.
    pub fn remove(&self, key: &str) {
        let removed = self.backend.values.borrow_mut().remove(key).is_some();
        if removed {
            self.announce(StorageEvent::new(key, None));
        }
    }

    fn announce(&self, event: StorageEvent) {
        for listeners in self.backend.others(self.context) {
            listeners.notify(&event);
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("context", &self.context)
            .field("values", &self.backend.values.borrow())
            .finish()
    }
}

impl PreferenceStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.backend.values.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let previous = self
            .backend
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());

        // Web storage only fires when the value actually changes
        if previous.as_deref() != Some(value) {
            self.announce(StorageEvent::new(key, Some(value.to_string())));
        }
        Ok(())
    }

    fn subscribe(&self, listener: Listener<StorageEvent>) -> ListenerId {
        self.listeners.add(listener)
    }

    fn unsubscribe(&self, id: ListenerId) {
        self.listeners.remove(id);
    }
}
