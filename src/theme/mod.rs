//! Theme resolution.
//!
//! This module provides:
//!
//! - [`ThemeMode`]: The stored preference (dark, light or auto)
//! - [`ColorMode`]: The effective, rendered theme (dark or light)
//! - [`ThemeResolver`]: Keeps the effective theme in sync with the stored
//!   preference and the system probe, and applies it to the root element
//! - [`ThemeChange`]: Payload delivered to resolver observers

mod mode;
mod resolver;

pub use mode::{ColorMode, ThemeMode};
pub use resolver::{ChangeCause, ThemeChange, ThemeResolver};
