//! Theme modes: what the user picked versus what gets rendered.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseThemeModeError;

/// The theme actually rendered. Never `Auto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Light,
    Dark,
}

impl ColorMode {
    /// Maps a "system prefers dark" reading to a color mode.
    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark {
            ColorMode::Dark
        } else {
            ColorMode::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == ColorMode::Dark
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user's stored preference.
///
/// `Auto` means "follow the system probe"; it is the default when nothing
/// has been stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Dark,
    Light,
    #[default]
    Auto,
}

impl ThemeMode {
    /// Resolves the preference against a system reading.
    ///
    /// Manual preferences ignore `system_dark` entirely.
    ///
    /// ```rust
    /// use themekeeper::{ColorMode, ThemeMode};
    ///
    /// assert_eq!(ThemeMode::Light.resolve(true), ColorMode::Light);
    /// assert_eq!(ThemeMode::Auto.resolve(true), ColorMode::Dark);
    /// assert_eq!(ThemeMode::Auto.resolve(false), ColorMode::Light);
    /// ```
    pub fn resolve(self, system_dark: bool) -> ColorMode {
        match self {
            ThemeMode::Dark => ColorMode::Dark,
            ThemeMode::Light => ColorMode::Light,
            ThemeMode::Auto => ColorMode::from_dark(system_dark),
        }
    }

    /// Returns true for `Dark` and `Light`.
    pub fn is_manual(self) -> bool {
        self != ThemeMode::Auto
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
            ThemeMode::Auto => "auto",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = ParseThemeModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(ThemeMode::Dark),
            "light" => Ok(ThemeMode::Light),
            "auto" => Ok(ThemeMode::Auto),
            _ => Err(ParseThemeModeError {
                value: s.to_string(),
            }),
        }
    }
}

impl From<ColorMode> for ThemeMode {
    fn from(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Dark => ThemeMode::Dark,
            ColorMode::Light => ThemeMode::Light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_modes() {
        assert_eq!("dark".parse::<ThemeMode>().unwrap(), ThemeMode::Dark);
        assert_eq!("Light".parse::<ThemeMode>().unwrap(), ThemeMode::Light);
        assert_eq!(" auto ".parse::<ThemeMode>().unwrap(), ThemeMode::Auto);
    }

    #[test]
    fn test_parse_unknown_mode() {
        let err = "sepia".parse::<ThemeMode>().unwrap_err();
        assert_eq!(err.value, "sepia");
    }

    #[test]
    fn test_display_matches_stored_form() {
        for mode in [ThemeMode::Dark, ThemeMode::Light, ThemeMode::Auto] {
            assert_eq!(mode.to_string().parse::<ThemeMode>().unwrap(), mode);
        }
        assert_eq!(ColorMode::Dark.to_string(), "dark");
    }

    #[test]
    fn test_default_is_auto() {
        assert_eq!(ThemeMode::default(), ThemeMode::Auto);
        assert!(!ThemeMode::Auto.is_manual());
        assert!(ThemeMode::Dark.is_manual());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&ThemeMode::Auto).unwrap();
        assert_eq!(json, "\"auto\"");
        let mode: ColorMode = serde_json::from_str("\"dark\"").unwrap();
        assert_eq!(mode, ColorMode::Dark);
    }

    #[test]
    fn test_color_mode_into_theme_mode() {
        assert_eq!(ThemeMode::from(ColorMode::Light), ThemeMode::Light);
    }
}
