//! Mobile / desktop classification from the viewport width.
//!
//! The classifier marks the root element with exactly one of the
//! `mobile` / `desktop` classes. Resize events are debounced; the owner
//! forwards them with [`DeviceClassifier::resize`] and drives
//! [`DeviceClassifier::poll`] from its event loop.
//!
//! [`ElementWidth`] tracks the width of a single element from the batches
//! a host resize observer reports.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::Instant;

use crate::config::DeviceConfig;
use crate::debounce::Debouncer;
use crate::dom::{ClassList, HtmlClass};
use crate::log::ModuleLog;
use crate::observer::{Listener, ListenerId, Listeners};

/// Layout class derived from the viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    Mobile,
    Desktop,
}

impl DeviceClass {
    /// Widths strictly below `breakpoint` are mobile.
    pub fn for_width(width: u32, breakpoint: u32) -> Self {
        if width < breakpoint {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceClass::Mobile => f.write_str("Mobile"),
            DeviceClass::Desktop => f.write_str("Desktop"),
        }
    }
}

pub struct DeviceClassifier {
    breakpoint: u32,
    mobile: HtmlClass,
    desktop: HtmlClass,
    width: u32,
    device: DeviceClass,
    pending: Debouncer<u32>,
    log: ModuleLog,
}

impl DeviceClassifier {
    /// Classifies `width` and applies the marker immediately.
    pub fn new(config: DeviceConfig, root: Rc<dyn ClassList>, width: u32) -> Self {
        let device = DeviceClass::for_width(width, config.breakpoint);
        let classifier = Self {
            breakpoint: config.breakpoint,
            pending: Debouncer::new(config.debounce()),
            log: ModuleLog::new("device", &config.global_log, config.log),
            mobile: HtmlClass::new(config.mobile_marker, Rc::clone(&root)),
            desktop: HtmlClass::new(config.desktop_marker, root),
            width,
            device,
        };
        classifier.apply();
        classifier
    }

    /// Records a resize; it takes effect once resizing settles.
    pub fn resize(&mut self, width: u32, now: Instant) {
        self.pending.call(width, now);
    }

    /// Applies a settled resize. Returns the new class if it changed.
    pub fn poll(&mut self, now: Instant) -> Option<DeviceClass> {
        let width = self.pending.poll(now)?;
        self.update(width)
    }

    /// Applies `width` immediately, skipping the debounce.
    pub fn update(&mut self, width: u32) -> Option<DeviceClass> {
        self.pending.cancel();
        self.width = width;
        let device = DeviceClass::for_width(width, self.breakpoint);
        let changed = device != self.device;
        self.device = device;
        self.apply();

        self.log.debug(format_args!("window width: {}", width));
        self.log.debug(format_args!("device: {}", device));
        changed.then_some(device)
    }

    pub fn device(&self) -> DeviceClass {
        self.device
    }

    pub fn is_mobile(&self) -> bool {
        self.device == DeviceClass::Mobile
    }

    /// The last applied width.
    pub fn width(&self) -> u32 {
        self.width
    }

    fn apply(&self) {
        match self.device {
            DeviceClass::Mobile => self.mobile.take_over(&self.desktop),
            DeviceClass::Desktop => self.desktop.take_over(&self.mobile),
        }
    }
}

impl fmt::Debug for DeviceClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceClassifier")
            .field("width", &self.width)
            .field("device", &self.device)
            .field("pending", &self.pending.is_pending())
            .finish()
    }
}

/// The width of one observed element, in CSS pixels.
///
/// Starts at zero. Reports are ignored until [`observe`](ElementWidth::observe)
/// and after [`disconnect`](ElementWidth::disconnect).
#[derive(Default)]
pub struct ElementWidth {
    width: Cell<f64>,
    observing: Cell<bool>,
    listeners: Listeners<f64>,
}

impl ElementWidth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&self) {
        self.observing.set(true);
    }

    pub fn disconnect(&self) {
        self.observing.set(false);
    }

    pub fn is_observing(&self) -> bool {
        self.observing.get()
    }

    /// Takes the first entry of a resize batch; an empty batch reads as zero.
    ///
    /// Listeners hear the new width only when it changed.
    pub fn report(&self, entries: &[f64]) {
        if !self.is_observing() {
            return;
        }
        let width = entries.first().copied().unwrap_or(0.0);
        if self.width.replace(width) != width {
            self.listeners.notify(&width);
        }
    }

    pub fn width(&self) -> f64 {
        self.width.get()
    }

    pub fn subscribe(&self, listener: Listener<f64>) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn unsubscribe(&self, id: ListenerId) {
        self.listeners.remove(id);
    }
}

impl fmt::Debug for ElementWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementWidth")
            .field("width", &self.width.get())
            .field("observing", &self.observing.get())
            .finish()
    }
}
