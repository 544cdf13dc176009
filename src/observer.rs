//! Listener lists for synchronous change notification.
//!
//! Every component that emits notifications (probes, stores, the resolver)
//! keeps a [`Listeners`] list. Registration hands back a [`ListenerId`] that
//! is later used to unregister; removing an id twice is a no-op.
//!
//! Notification snapshots the registered listeners before calling them, so a
//! listener may subscribe, unsubscribe or trigger another notification on the
//! same list without tripping a `RefCell` borrow.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// A callback invoked with a reference to the notification payload.
pub type Listener<T> = Rc<dyn Fn(&T)>;

/// Handle identifying a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

/// An ordered list of listeners for payloads of type `T`.
pub struct Listeners<T> {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(ListenerId, Listener<T>)>>,
}

impl<T> Listeners<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(0),
            entries: RefCell::new(Vec::new()),
        }
    }

    /// Registers a listener, returning the id used to remove it.
    pub fn add(&self, listener: Listener<T>) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.entries.borrow_mut().push((id, listener));
        id
    }

    /// Removes a listener. Returns `false` if the id was not registered.
    pub fn remove(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    /// Calls every registered listener, in registration order.
    pub fn notify(&self, payload: &T) {
        let snapshot: Vec<Listener<T>> = self
            .entries
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in snapshot {
            listener(payload);
        }
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_in_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let listeners: Listeners<u32> = Listeners::new();

        let a = Rc::clone(&seen);
        listeners.add(Rc::new(move |v: &u32| a.borrow_mut().push(("a", *v))));
        let b = Rc::clone(&seen);
        listeners.add(Rc::new(move |v: &u32| b.borrow_mut().push(("b", *v))));

        listeners.notify(&7);
        assert_eq!(*seen.borrow(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn test_remove_twice_is_noop() {
        let listeners: Listeners<()> = Listeners::new();
        let id = listeners.add(Rc::new(|_: &()| {}));

        assert!(listeners.remove(id));
        assert!(!listeners.remove(id));
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_ids_are_not_reused() {
        let listeners: Listeners<()> = Listeners::new();
        let first = listeners.add(Rc::new(|_: &()| {}));
        listeners.remove(first);
        let second = listeners.add(Rc::new(|_: &()| {}));
        assert_ne!(first, second);
    }

    #[test]
    fn test_listener_can_unsubscribe_itself() {
        let listeners: Rc<Listeners<u32>> = Rc::new(Listeners::new());
        let own_id = Rc::new(Cell::new(None));
        let calls = Rc::new(Cell::new(0));

        let list = Rc::clone(&listeners);
        let id_slot = Rc::clone(&own_id);
        let counter = Rc::clone(&calls);
        let id = listeners.add(Rc::new(move |_: &u32| {
            counter.set(counter.get() + 1);
            if let Some(id) = id_slot.get() {
                list.remove(id);
            }
        }));
        own_id.set(Some(id));

        listeners.notify(&1);
        listeners.notify(&2);
        assert_eq!(calls.get(), 1);
        assert!(listeners.is_empty());
    }
}
