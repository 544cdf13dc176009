//! System color-scheme probes.
//!
//! A probe answers one question, "does the system prefer a dark theme?", and
//! notifies subscribers when the answer changes.
//!
//! - [`ManualProbe`]: Driven by the host (for example a bridge forwarding
//!   `prefers-color-scheme` media query events)
//! - [`OsProbe`]: Asks the operating system via `dark-light`; call
//!   [`OsProbe::poll`] to pick up changes
//!
//! A probe that cannot determine the system preference reports light.

use std::cell::Cell;
use std::fmt;

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};

use crate::observer::{Listener, ListenerId, Listeners};
use crate::theme::ColorMode;

/// Reports the system's dark-mode preference.
pub trait SystemThemeProbe {
    /// Synchronous snapshot of the current preference.
    fn currently_dark(&self) -> bool;

    /// Registers a listener receiving the new "is dark" value on change.
    fn subscribe(&self, listener: Listener<bool>) -> ListenerId;

    /// Unregisters a listener. Unknown or already removed ids are ignored.
    fn unsubscribe(&self, id: ListenerId);
}

/// A probe whose value is set by the host.
///
/// Every call to [`set_dark`](ManualProbe::set_dark) notifies subscribers,
/// even if the value did not change.
#[derive(Debug, Default)]
pub struct ManualProbe {
    dark: Cell<Option<bool>>,
    listeners: Listeners<bool>,
}

impl ManualProbe {
    pub fn new(dark: bool) -> Self {
        Self {
            dark: Cell::new(Some(dark)),
            listeners: Listeners::new(),
        }
    }

    /// A probe with no reading yet. Reports light until a value is set.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Records a new system preference and notifies subscribers.
    pub fn set_dark(&self, dark: bool) {
        self.dark.set(Some(dark));
        self.listeners.notify(&dark);
    }

    /// Returns true once a reading has been provided.
    pub fn is_available(&self) -> bool {
        self.dark.get().is_some()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl SystemThemeProbe for ManualProbe {
    fn currently_dark(&self) -> bool {
        self.dark.get().unwrap_or(false)
    }

    fn subscribe(&self, listener: Listener<bool>) -> ListenerId {
        self.listeners.add(listener)
    }

    fn unsubscribe(&self, id: ListenerId) {
        self.listeners.remove(id);
    }
}

/// Function used by [`OsProbe`] to read the system color mode.
pub type ThemeDetector = fn() -> ColorMode;

/// A probe backed by the operating system's appearance setting.
///
/// The OS does not push changes to us, so the owner calls [`poll`](OsProbe::poll)
/// periodically; subscribers hear about a change only when the detected value
/// differs from the previous reading.
pub struct OsProbe {
    detector: ThemeDetector,
    last: Cell<bool>,
    listeners: Listeners<bool>,
}

impl OsProbe {
    /// Creates a probe using the operating system detector.
    pub fn new() -> Self {
        Self::with_detector(os_theme_detector)
    }

    /// Creates a probe with a custom detector.
    ///
    /// This is useful for testing or when you want to force a specific color mode.
    pub fn with_detector(detector: ThemeDetector) -> Self {
        Self {
            detector,
            last: Cell::new(detector().is_dark()),
            listeners: Listeners::new(),
        }
    }

    /// Re-reads the system preference, notifying subscribers if it changed.
    ///
    /// Returns true when a change was detected.
    pub fn poll(&self) -> bool {
        let dark = (self.detector)().is_dark();
        if dark == self.last.replace(dark) {
            return false;
        }
        self.listeners.notify(&dark);
        true
    }
}

impl Default for OsProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OsProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OsProbe")
            .field("last", &self.last.get())
            .field("listeners", &self.listeners)
            .finish()
    }
}

impl SystemThemeProbe for OsProbe {
    fn currently_dark(&self) -> bool {
        (self.detector)().is_dark()
    }

    fn subscribe(&self, listener: Listener<bool>) -> ListenerId {
        self.listeners.add(listener)
    }

    fn unsubscribe(&self, id: ListenerId) {
        self.listeners.remove(id);
    }
}

fn os_theme_detector() -> ColorMode {
    match detect_os_theme() {
        OsThemeMode::Dark => ColorMode::Dark,
        OsThemeMode::Light => ColorMode::Light,
    }
}
