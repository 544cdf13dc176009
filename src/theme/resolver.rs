//! The theme resolver: stored preference + system probe -> rendered theme.
//!
//! # Resolution
//!
//! | Stored preference | Effective theme                      |
//! |-------------------|--------------------------------------|
//! | `dark`            | dark                                 |
//! | `light`           | light                                |
//! | `auto` / absent   | dark if the probe reports dark, else light |
//!
//! The effective theme is applied to the root element as exactly one of the
//! two marker classes. It is recomputed when:
//!
//! - [`ThemeResolver::set`] is called
//! - the probe reports a change while the preference is `auto`
//! - another context writes the storage key
//!
//! # Lifecycle
//!
//! [`ThemeResolver::new`] reads the preference and applies the initial theme.
//! [`ThemeResolver::start`] subscribes to the probe and the store;
//! [`ThemeResolver::stop`] (or dropping the resolver) releases both
//! subscriptions exactly once.

use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::mode::{ColorMode, ThemeMode};
use crate::config::ResolverConfig;
use crate::dom::{ClassList, HtmlClass};
use crate::log::ModuleLog;
use crate::observer::{Listener, ListenerId, Listeners};
use crate::probe::SystemThemeProbe;
use crate::storage::{PreferenceStore, StoredValue};

/// What triggered a [`ThemeChange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCause {
    /// [`ThemeResolver::set`]
    Manual,
    /// The system probe reported a new preference
    System,
    /// Another context wrote the stored preference
    External,
}

/// Delivered to resolver observers after a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeChange {
    pub preference: ThemeMode,
    pub effective: ColorMode,
    pub cause: ChangeCause,
}

struct Core {
    preference: StoredValue,
    probe: Rc<dyn SystemThemeProbe>,
    /// Parsed form of `preference`, as of the last transition
    mode: Cell<ThemeMode>,
    effective: Cell<ColorMode>,
    dark: HtmlClass,
    light: HtmlClass,
    observers: Listeners<ThemeChange>,
    probe_subscription: Cell<Option<ListenerId>>,
    store_subscription: Cell<Option<ListenerId>>,
    log: ModuleLog,
}

impl Core {
    fn apply(&self, mode: ColorMode) {
        match mode {
            ColorMode::Dark => self.dark.take_over(&self.light),
            ColorMode::Light => self.light.take_over(&self.dark),
        }
    }

    /// Records and applies a new state, then tells observers if anything
    /// changed.
    fn transition(&self, mode: ThemeMode, next: ColorMode, cause: ChangeCause) {
        let previous_mode = self.mode.replace(mode);
        let previous = self.effective.replace(next);
        self.apply(next);

        if previous == next && previous_mode == mode {
            return;
        }
        self.log.debug(format_args!(
            "theme {} -> {} (preference {}, {:?})",
            previous, next, mode, cause
        ));
        self.observers.notify(&ThemeChange {
            preference: mode,
            effective: next,
            cause,
        });
    }

    fn on_system_change(&self, dark: bool) {
        let mode = self.mode.get();
        if mode.is_manual() {
            self.log.debug(format_args!(
                "ignoring system change (dark={}), preference is {}",
                dark, mode
            ));
            return;
        }
        self.transition(mode, ColorMode::from_dark(dark), ChangeCause::System);
    }

    fn on_external_change(&self, raw: &str) {
        let mode = parse_mode(raw, &self.log);
        let next = mode.resolve(self.probe.currently_dark());
        self.transition(mode, next, ChangeCause::External);
    }
}

/// Unknown stored values count as auto.
fn parse_mode(raw: &str, log: &ModuleLog) -> ThemeMode {
    raw.parse::<ThemeMode>().unwrap_or_else(|e| {
        log.warn(format_args!("{}; treating stored preference as auto", e));
        ThemeMode::Auto
    })
}

/// Keeps the rendered theme in sync with the stored preference and the
/// system color scheme.
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use themekeeper::{ClassList, ManualProbe, MemoryStore, ResolverConfig, RootElement, ThemeMode, ThemeResolver};
///
/// let probe = Rc::new(ManualProbe::new(true));
/// let root = Rc::new(RootElement::new());
/// let resolver = ThemeResolver::new(
///     ResolverConfig::default(),
///     Rc::new(MemoryStore::new()),
///     probe.clone(),
///     root.clone(),
/// );
/// resolver.start();
///
/// assert_eq!(resolver.preference(), ThemeMode::Auto);
/// assert!(root.contains("dark"));
///
/// probe.set_dark(false);
/// assert!(root.contains("light"));
/// ```
pub struct ThemeResolver {
    core: Rc<Core>,
}

impl ThemeResolver {
    /// Reads the stored preference and applies the initial theme.
    ///
    /// Subscriptions are not set up until [`start`](ThemeResolver::start).
    pub fn new(
        config: ResolverConfig,
        store: Rc<dyn PreferenceStore>,
        probe: Rc<dyn SystemThemeProbe>,
        root: Rc<dyn ClassList>,
    ) -> Self {
        let log = ModuleLog::new("theme", &config.global_log, config.log);
        let preference = StoredValue::with_log(
            store,
            config.storage_key,
            ThemeMode::Auto.as_str(),
            log,
        );

        let mode = parse_mode(&preference.get(), &log);
        let core = Core {
            preference,
            mode: Cell::new(mode),
            effective: Cell::new(ColorMode::Light),
            dark: HtmlClass::new(config.dark_marker, Rc::clone(&root)),
            light: HtmlClass::new(config.light_marker, root),
            probe,
            observers: Listeners::new(),
            probe_subscription: Cell::new(None),
            store_subscription: Cell::new(None),
            log,
        };

        let initial = mode.resolve(core.probe.currently_dark());
        core.effective.set(initial);
        core.apply(initial);
        core.log.debug(format_args!(
            "initial theme {} (preference {})",
            initial, mode
        ));

        Self {
            core: Rc::new(core),
        }
    }

    /// Subscribes to probe and store notifications. No-op once started.
    pub fn start(&self) {
        if self.is_started() {
            return;
        }

        let weak: Weak<Core> = Rc::downgrade(&self.core);
        let id = self.core.probe.subscribe(Rc::new(move |dark: &bool| {
            if let Some(core) = weak.upgrade() {
                core.on_system_change(*dark);
            }
        }));
        self.core.probe_subscription.set(Some(id));

        let weak: Weak<Core> = Rc::downgrade(&self.core);
        let id = self.core.preference.watch(Rc::new(move |raw: &String| {
            if let Some(core) = weak.upgrade() {
                core.on_external_change(raw);
            }
        }));
        self.core.store_subscription.set(Some(id));
        self.core.preference.attach();

        // Writes made while stopped were never delivered
        let mode = parse_mode(&self.core.preference.reload(), &self.core.log);
        let next = mode.resolve(self.core.probe.currently_dark());
        self.core.transition(mode, next, ChangeCause::External);
        self.core.log.debug(format_args!("resolver started"));
    }

    /// Releases the probe and store subscriptions. Safe to call repeatedly.
    pub fn stop(&self) {
        if let Some(id) = self.core.probe_subscription.take() {
            self.core.probe.unsubscribe(id);
            self.core.log.debug(format_args!("resolver stopped"));
        }
        if let Some(id) = self.core.store_subscription.take() {
            self.core.preference.unwatch(id);
            self.core.preference.detach();
        }
    }

    pub fn is_started(&self) -> bool {
        self.core.probe_subscription.get().is_some()
    }

    /// Changes the stored preference and applies the resulting theme.
    ///
    /// `None` and `Some(ThemeMode::Auto)` both select auto mode, which
    /// resolves against the probe's current reading.
    pub fn set<M: Into<Option<ThemeMode>>>(&self, mode: M) {
        let mode = mode.into().unwrap_or(ThemeMode::Auto);
        let next = match mode {
            ThemeMode::Dark => ColorMode::Dark,
            ThemeMode::Light => ColorMode::Light,
            ThemeMode::Auto => ColorMode::from_dark(self.core.probe.currently_dark()),
        };
        self.core.transition(mode, next, ChangeCause::Manual);

        // An observer may have re-entered `set` with a newer choice
        if self.core.mode.get() != mode {
            return;
        }
        // Siblings may answer synchronously; their writes land after ours
        self.core.preference.set(mode.as_str());
    }

    /// The stored preference.
    pub fn preference(&self) -> ThemeMode {
        self.core.mode.get()
    }

    /// Registers an observer called after every state transition.
    pub fn subscribe(&self, listener: Listener<ThemeChange>) -> ListenerId {
        self.core.observers.add(listener)
    }

    pub fn unsubscribe(&self, id: ListenerId) {
        self.core.observers.remove(id);
    }
}

impl Drop for ThemeResolver {
    fn drop(&mut self) {
        self.stop();
    }
}

impl fmt::Debug for ThemeResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeResolver")
            .field("preference", &self.core.mode.get())
            .field("started", &self.is_started())
            .finish()
    }
}
