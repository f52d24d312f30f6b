//! Collaborators the theme engine runs against.
//!
//! The engine never touches a document, a cookie jar or the operating
//! system directly. A hosting application hands it a [`Host`] bundling
//! implementations of the traits below:
//!
//! - [`RootElement`]: exclusive write access to the root element's class list
//! - [`SystemPreference`]: the system dark-mode preference and its changes
//! - [`ThemeStore`]: named string values with an expiry (cookie-backed in browsers)
//! - [`StylesheetIntrospector`]: answers whether loaded styles define a class
//!
//! [`Platform`] tells the engine whether it runs interactively. On
//! [`Platform::Server`] every collaborator is dropped and all DOM and
//! persistence work degrades to a no-op.

mod memory;

use std::time::Duration;

use crate::theme::ColorMode;

pub use memory::{ManualPreference, MemoryRoot, MemoryStore, NoopStore};

/// Callback registered through [`SystemPreference::subscribe`].
pub type PreferenceListener = Box<dyn FnMut(ColorMode) + Send>;

/// Mutable handle to the document root element.
pub trait RootElement: Send {
    fn add_class(&mut self, class: &str);

    fn remove_class(&mut self, class: &str);

    /// Computed value of a CSS property on the element, empty when unset.
    fn computed_property(&self, name: &str) -> String;
}

/// Source of the system color-scheme preference.
pub trait SystemPreference: Send {
    fn prefers_dark(&self) -> bool;

    /// Registers a listener called with the new mode whenever the
    /// preference changes.
    ///
    /// Implementations must not invoke the listener from inside `subscribe`.
    fn subscribe(&mut self, listener: PreferenceListener);
}

/// Persistent key-value store for theme selections.
pub trait ThemeStore: Send {
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`. A zero `max_age` deletes the entry.
    fn set(&mut self, key: &str, value: &str, max_age: Duration);
}

/// Read access to the stylesheets loaded by the host.
pub trait StylesheetIntrospector: Send {
    /// True when some accessible stylesheet has a rule whose selector
    /// references `.class_name`.
    fn class_rule_exists(&self, class_name: &str) -> bool;
}

/// Where the engine is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// A live document with persistent storage.
    Interactive,
    /// A rendering pass with no document, such as server-side rendering.
    Server,
}

impl Platform {
    pub fn is_interactive(self) -> bool {
        matches!(self, Platform::Interactive)
    }
}

/// The set of collaborators handed to [`ThemeEngine::new`](crate::ThemeEngine::new).
///
/// # Example
///
/// ```rust
/// use novix_theme::{Host, ManualPreference, MemoryRoot, MemoryStore, StyleSheets};
///
/// let sheets = StyleSheets::new();
/// let host = Host::interactive()
///     .with_root(MemoryRoot::new(sheets.clone()))
///     .with_store(MemoryStore::new())
///     .with_preference(ManualPreference::new(false))
///     .with_stylesheets(sheets);
/// assert!(host.platform().is_interactive());
/// ```
pub struct Host {
    pub(crate) platform: Platform,
    pub(crate) root: Option<Box<dyn RootElement>>,
    pub(crate) preference: Option<Box<dyn SystemPreference>>,
    pub(crate) store: Option<Box<dyn ThemeStore>>,
    pub(crate) stylesheets: Option<Box<dyn StylesheetIntrospector>>,
}

impl Host {
    /// An interactive host with no collaborators attached yet.
    pub fn interactive() -> Self {
        Self::for_platform(Platform::Interactive)
    }

    /// A non-interactive host. Collaborators attached to it are ignored.
    pub fn server() -> Self {
        Self::for_platform(Platform::Server)
    }

    pub fn for_platform(platform: Platform) -> Self {
        Self {
            platform,
            root: None,
            preference: None,
            store: None,
            stylesheets: None,
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn with_root(mut self, root: impl RootElement + 'static) -> Self {
        self.root = Some(Box::new(root));
        self
    }

    pub fn with_preference(mut self, preference: impl SystemPreference + 'static) -> Self {
        self.preference = Some(Box::new(preference));
        self
    }

    pub fn with_store(mut self, store: impl ThemeStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    pub fn with_stylesheets(mut self, stylesheets: impl StylesheetIntrospector + 'static) -> Self {
        self.stylesheets = Some(Box::new(stylesheets));
        self
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("platform", &self.platform)
            .field("root", &self.root.is_some())
            .field("preference", &self.preference.is_some())
            .field("store", &self.store.is_some())
            .field("stylesheets", &self.stylesheets.is_some())
            .finish()
    }
}
