//! # Novix Theme
//!
//! A light/dark theme engine for documents styled by CSS theme classes.
//!
//! A theme is a CSS class on the document root that defines a set of custom
//! properties. The engine keeps one theme id per mode, applies the active
//! one to the root element, follows the system color-scheme preference when
//! asked to, and persists the selection so the next session (and the next
//! server-side render) starts with the same theme.
//!
//! ## Quick Start
//!
//! ```rust
//! use novix_theme::{
//!     CookieJar, Host, ManualPreference, MemoryRoot, StyleSheet, StyleSheets, ThemeEngine,
//!     ThemeInitOptions,
//! };
//!
//! let sheets = StyleSheets::new();
//! sheets.add(StyleSheet::parse(
//!     ".novix-default-light { --primary: #2563eb; } .novix-default-dark { --primary: #93c5fd; }",
//! ));
//!
//! let root = MemoryRoot::new(sheets.clone());
//! let jar = CookieJar::new();
//! let engine = ThemeEngine::new(
//!     Host::interactive()
//!         .with_root(root.clone())
//!         .with_store(jar.clone())
//!         .with_preference(ManualPreference::new(false))
//!         .with_stylesheets(sheets),
//! );
//!
//! // Zero-config: registers and applies the default light theme.
//! engine.initialize(ThemeInitOptions::default()).unwrap();
//! assert_eq!(root.class_attribute(), "novix-default-light");
//!
//! engine.set_light_theme("novix-default-dark").unwrap();
//! assert_eq!(jar.cookie_header(), "novix.theme.dark=novix-default-dark; novix.theme.light=novix-default-dark; novix.theme.mode=light");
//! ```
//!
//! ## Hosts
//!
//! The engine reaches the outside world only through the traits in
//! [`host`]. [`Host::server`] yields an engine on which every DOM and
//! persistence operation is a no-op, so the same startup code can run
//! during server-side rendering.
//!
//! ## Failure policy
//!
//! Applying a theme whose stylesheet is not loaded (the root element has no
//! [`MARKER_PROPERTY`]) returns [`ThemeError::StylesheetNotLoaded`] from the
//! mutator that triggered it. Everything else (unregistered ids, mode
//! switches without dual-mode, missing persistence) is logged through the
//! `log` facade and never fails the call.
//!
//! ## Server-side rendering
//!
//! [`resolve_theme_class_from_cookie_header`] and [`inject_theme_class`]
//! let a server put the persisted theme class on `<html>` before the page
//! reaches the browser.

pub mod css;
pub mod host;

mod cookies;
mod error;
mod ssr;
mod system;
mod theme;

pub use cookies::CookieJar;
pub use css::{StyleRule, StyleSheet, StyleSheets};
pub use error::ThemeError;
pub use host::{
    Host, ManualPreference, MemoryRoot, MemoryStore, NoopStore, Platform, PreferenceListener,
    RootElement, StylesheetIntrospector, SystemPreference, ThemeStore,
};
pub use ssr::{inject_theme_class, resolve_theme_class_from_cookie_header, ThemeFallback};
pub use system::{detect_color_mode, set_theme_detector, OsPreference};
pub use theme::{
    ActiveThemeIds, ColorMode, RegisteredTheme, StorageKeys, SubscriptionId, ThemeChange,
    ThemeEngine, ThemeInitOptions, ThemeRegistry, DEFAULT_DARK_THEME, DEFAULT_LIGHT_THEME,
    MARKER_PROPERTY, PERSIST_MAX_AGE, STORAGE_KEYS,
};
