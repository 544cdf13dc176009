//! Persistent preference storage.
//!
//! This module provides:
//!
//! - [`PreferenceStore`]: String key-value storage with cross-context change
//!   notifications
//! - [`MemoryStore`]: In-process store; [`MemoryStore::sibling`] opens
//!   another context (a second "tab") on the same data
//! - [`FileStore`]: JSON file that survives restarts
//! - [`StoredValue`]: A value bound to one key that writes through to the
//!   store and follows writes made elsewhere
//!
//! Change notifications follow web storage semantics: a context is told
//! about writes made by *other* contexts, never about its own.

mod file;
mod memory;
mod value;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use value::StoredValue;

use crate::error::StoreError;
use crate::observer::{Listener, ListenerId};

/// A write made by another context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: String,
    /// The new value, or `None` if the key was removed
    pub new_value: Option<String>,
}

impl StorageEvent {
    pub fn new(key: impl Into<String>, new_value: Option<String>) -> Self {
        Self {
            key: key.into(),
            new_value,
        }
    }
}

/// Synchronous string key-value storage.
pub trait PreferenceStore {
    /// Returns the last written value, or `None` if the key is absent.
    fn read(&self, key: &str) -> Option<String>;

    /// Persists a value.
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Registers a listener for writes made by other contexts.
    fn subscribe(&self, listener: Listener<StorageEvent>) -> ListenerId;

    /// Unregisters a listener. Unknown ids are ignored.
    fn unsubscribe(&self, id: ListenerId);
}
