//! Explicit configuration handed to each component at construction.
//!
//! There is no process-wide state: a [`LogConfig`] is passed alongside each
//! component's own config, and a component logs only when both the global
//! switch and its own `log` flag are on.
//!
//! All structs deserialize from JSON with every field optional:
//!
//! ```rust
//! use themekeeper::Config;
//!
//! let config = Config::from_json_str(r#"{ "theme": { "storage_key": "site-theme" } }"#).unwrap();
//! assert_eq!(config.theme.storage_key, "site-theme");
//! assert_eq!(config.theme.dark_marker, "dark");
//! assert_eq!(config.device.breakpoint, 720);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Storage key used for the theme preference when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "theme";

/// Viewport width below which a device is classified as mobile.
pub const DEFAULT_BREAKPOINT: u32 = 720;

/// Global logging switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub enabled: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Settings for [`ThemeResolver`](crate::ThemeResolver).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Key the preference is stored under
    pub storage_key: String,
    /// Class applied to the root when the effective theme is dark
    pub dark_marker: String,
    /// Class applied to the root when the effective theme is light
    pub light_marker: String,
    /// Per-component log switch
    pub log: bool,
    /// Global log switch
    #[serde(skip)]
    pub global_log: LogConfig,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            dark_marker: "dark".to_string(),
            light_marker: "light".to_string(),
            log: true,
            global_log: LogConfig::default(),
        }
    }
}

/// Settings for [`DeviceClassifier`](crate::DeviceClassifier).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    pub breakpoint: u32,
    pub mobile_marker: String,
    pub desktop_marker: String,
    /// Delay before a resize is applied, in milliseconds
    pub debounce_ms: u64,
    pub log: bool,
    #[serde(skip)]
    pub global_log: LogConfig,
}

impl DeviceConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            breakpoint: DEFAULT_BREAKPOINT,
            mobile_marker: "mobile".to_string(),
            desktop_marker: "desktop".to_string(),
            debounce_ms: 10,
            log: false,
            global_log: LogConfig::default(),
        }
    }
}

/// Top-level configuration file layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log: LogConfig,
    pub theme: ResolverConfig,
    pub device: DeviceConfig,
}

impl Config {
    /// Parses a JSON configuration, filling missing fields with defaults.
    ///
    /// The global [`LogConfig`] is propagated into each component config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        Ok(config.propagate_log())
    }

    /// Loads a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    fn propagate_log(mut self) -> Self {
        self.theme.global_log = self.log.clone();
        self.device.global_log = self.log.clone();
        self
    }
}
