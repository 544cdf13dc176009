//! Per-component log switch on top of `tracing`.

use std::fmt;

use crate::config::LogConfig;

/// Emits `tracing` events for one component when logging is enabled.
///
/// A component logs only when both the global [`LogConfig`] switch and its
/// own flag are on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleLog {
    component: &'static str,
    enabled: bool,
}

impl ModuleLog {
    pub fn new(component: &'static str, global: &LogConfig, module_enabled: bool) -> Self {
        Self {
            component,
            enabled: global.enabled && module_enabled,
        }
    }

    /// A log that never emits.
    pub fn disabled(component: &'static str) -> Self {
        Self {
            component,
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        if self.enabled {
            tracing::debug!(target: "themekeeper", component = self.component, "{}", args);
        }
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        if self.enabled {
            tracing::warn!(target: "themekeeper", component = self.component, "{}", args);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_both_switches() {
        let on = LogConfig { enabled: true };
        let off = LogConfig { enabled: false };

        assert!(ModuleLog::new("theme", &on, true).is_enabled());
        assert!(!ModuleLog::new("theme", &on, false).is_enabled());
        assert!(!ModuleLog::new("theme", &off, true).is_enabled());
        assert!(!ModuleLog::disabled("theme").is_enabled());
    }
}
