//! Theme registration, light/dark selection and the engine that applies it.
//!
//! This module provides:
//!
//! - [`ThemeEngine`]: the stateful service that owns the selection and
//!   mutates the root element
//! - [`ThemeInitOptions`]: startup configuration
//! - [`RegisteredTheme`] / [`ThemeRegistry`]: the set of known theme ids
//! - [`ColorMode`]: light or dark

mod engine;
mod mode;
mod options;
mod registry;

use std::time::Duration;

pub use engine::{ActiveThemeIds, SubscriptionId, ThemeChange, ThemeEngine};
pub use mode::ColorMode;
pub use options::ThemeInitOptions;
pub use registry::{RegisteredTheme, ThemeRegistry};

/// Light theme assumed to be present in the global styles.
pub const DEFAULT_LIGHT_THEME: &str = "novix-default-light";

/// Dark theme assumed to be present in the global styles.
pub const DEFAULT_DARK_THEME: &str = "novix-default-dark";

/// Custom property every theme stylesheet defines on the root element.
pub const MARKER_PROPERTY: &str = "--primary";

/// Lifetime of persisted selections.
pub const PERSIST_MAX_AGE: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Names of the persisted entries.
#[derive(Debug, Clone, Copy)]
pub struct StorageKeys {
    pub light: &'static str,
    pub dark: &'static str,
    pub mode: &'static str,
}

/// Keys shared by the engine and server-side class resolution.
pub const STORAGE_KEYS: StorageKeys = StorageKeys {
    light: "novix.theme.light",
    dark: "novix.theme.dark",
    mode: "novix.theme.mode",
};
