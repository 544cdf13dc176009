//! # Themekeeper - light, dark and auto themes that stay in sync
//!
//! Themekeeper resolves a user's theme preference (`dark`, `light` or `auto`)
//! against the system color-scheme preference and applies the result as a
//! marker class on a document root.
//!
//! ## Core Concepts
//!
//! - [`ThemeResolver`]: Reconciles the stored preference, the system probe and
//!   manual overrides into one effective theme
//! - [`PreferenceStore`]: Key-value storage for the preference, with
//!   notifications for writes made by other contexts
//! - [`SystemThemeProbe`]: Reports whether the system prefers a dark theme
//! - [`ClassList`]: The root element the marker classes are applied to
//!
//! ## Quick Start
//!
//! ```rust
//! use std::rc::Rc;
//! use themekeeper::{ClassList, ManualProbe, MemoryStore, ResolverConfig, RootElement, ThemeMode, ThemeResolver};
//!
//! let store = Rc::new(MemoryStore::new());
//! let probe = Rc::new(ManualProbe::new(false));
//! let root = Rc::new(RootElement::new());
//!
//! let resolver = ThemeResolver::new(ResolverConfig::default(), store, probe.clone(), root.clone());
//! resolver.start();
//! assert!(root.contains("light"));
//!
//! resolver.set(ThemeMode::Dark);
//! assert!(root.contains("dark"));
//! assert!(!root.contains("light"));
//!
//! // Manual preference wins over the system
//! probe.set_dark(false);
//! assert!(root.contains("dark"));
//!
//! // Back to auto: follow the system again
//! resolver.set(None);
//! assert!(root.contains("light"));
//! ```
//!
//! ## Threading
//!
//! Everything here is single-threaded and event-driven: shared state lives in
//! `Rc`/`RefCell`, and notifications are delivered synchronously by whoever
//! owns the event loop.

pub mod config;
pub mod debounce;
pub mod device;
pub mod dom;
mod error;
mod log;
pub mod observer;
pub mod probe;
pub mod storage;
pub mod theme;

pub use config::{Config, DeviceConfig, LogConfig, ResolverConfig};
pub use debounce::Debouncer;
pub use device::{DeviceClass, DeviceClassifier, ElementWidth};
pub use dom::{ClassList, HtmlClass, RootElement};
pub use error::{ConfigError, ParseThemeModeError, StoreError};
pub use log::ModuleLog;
pub use observer::{Listener, ListenerId, Listeners};
pub use probe::{ManualProbe, OsProbe, SystemThemeProbe};
pub use storage::{FileStore, MemoryStore, PreferenceStore, StorageEvent, StoredValue};
pub use theme::{ChangeCause, ColorMode, ThemeChange, ThemeMode, ThemeResolver};
