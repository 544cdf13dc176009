//! JSON file backed preference store.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{PreferenceStore, StorageEvent};
use crate::error::StoreError;
use crate::observer::{Listener, ListenerId, Listeners};

/// A store persisted as a JSON object of strings.
///
/// Values are cached after [`open`](FileStore::open). Another process
/// writing the same file plays the role of another context: call
/// [`refresh`](FileStore::refresh) to pick up its writes and notify
/// subscribers.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: RefCell<BTreeMap<String, String>>,
    listeners: Listeners<StorageEvent>,
}

impl FileStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = load(&path)?;
        Ok(Self {
            path,
            values: RefCell::new(values),
            listeners: Listeners::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-reads the file and notifies subscribers of every key that changed
    /// since the last load or write.
    ///
    /// Returns the number of change events delivered.
    pub fn refresh(&self) -> Result<usize, StoreError> {
        let fresh = load(&self.path)?;
        let previous = self.values.replace(fresh.clone());

        let mut events = Vec::new();
        for (key, value) in &fresh {
            if previous.get(key) != Some(value) {
                events.push(StorageEvent::new(key.clone(), Some(value.clone())));
            }
        }
        for key in previous.keys() {
            if !fresh.contains_key(key) {
                events.push(StorageEvent::new(key.clone(), None));
            }
        }

        for event in &events {
            self.listeners.notify(event);
        }
        Ok(events.len())
    }

    fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&*self.values.borrow()).map_err(|source| {
            StoreError::Json {
                path: self.path.clone(),
                source,
            }
        })?;

        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)
    }
}

fn load(path: &Path) -> Result<BTreeMap<String, String>, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    serde_json::from_str(&content).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

impl PreferenceStore for FileStore {
    fn read(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.persist()
    }

    fn subscribe(&self, listener: Listener<StorageEvent>) -> ListenerId {
        self.listeners.add(listener)
    }

    fn unsubscribe(&self, id: ListenerId) {
        self.listeners.remove(id);
    }
}
