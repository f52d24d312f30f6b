//! In-process collaborator implementations.
//!
//! These back headless hosts (the CLI, tests) and double as reference
//! implementations of the host traits. Each type is a cheap handle over
//! shared state, so a clone kept by the caller observes what the engine does.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use super::{PreferenceListener, RootElement, SystemPreference, ThemeStore};
use crate::css::StyleSheets;
use crate::theme::ColorMode;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A root element whose computed style comes from a [`StyleSheets`] set.
#[derive(Debug, Clone)]
pub struct MemoryRoot {
    classes: Arc<Mutex<Vec<String>>>,
    stylesheets: StyleSheets,
}

impl MemoryRoot {
    pub fn new(stylesheets: StyleSheets) -> Self {
        Self {
            classes: Arc::new(Mutex::new(Vec::new())),
            stylesheets,
        }
    }

    /// Current class list in insertion order.
    pub fn classes(&self) -> Vec<String> {
        lock(&self.classes).clone()
    }

    pub fn has_class(&self, class: &str) -> bool {
        lock(&self.classes).iter().any(|c| c == class)
    }

    /// Renders the class list as an HTML `class` attribute value.
    pub fn class_attribute(&self) -> String {
        lock(&self.classes).join(" ")
    }
}

impl RootElement for MemoryRoot {
    fn add_class(&mut self, class: &str) {
        let mut classes = lock(&self.classes);
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, class: &str) {
        lock(&self.classes).retain(|c| c != class);
    }

    fn computed_property(&self, name: &str) -> String {
        let classes = self.classes();
        self.stylesheets.computed_custom_property(&classes, name)
    }
}

/// A [`ThemeStore`] kept in memory for the life of the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an entry, as if written by an earlier session.
    pub fn insert(&self, key: &str, value: &str) {
        lock(&self.entries).insert(key.to_string(), value.to_string());
    }

    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.entries).is_empty()
    }
}

impl ThemeStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str, max_age: Duration) {
        let mut entries = lock(&self.entries);
        if max_age.is_zero() {
            entries.remove(key);
        } else {
            entries.insert(key.to_string(), value.to_string());
        }
    }
}

/// Store used when the host supplies none. Reads nothing, keeps nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStore;

impl ThemeStore for NoopStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&mut self, _key: &str, _value: &str, _max_age: Duration) {}
}

#[derive(Default)]
struct PreferenceState {
    prefers_dark: bool,
    listeners: Vec<PreferenceListener>,
}

/// A system preference driven by the host program.
///
/// Calling [`set_prefers_dark`](Self::set_prefers_dark) with a new value
/// notifies every subscriber, in subscription order.
#[derive(Clone, Default)]
pub struct ManualPreference {
    state: Arc<Mutex<PreferenceState>>,
}

impl ManualPreference {
    pub fn new(prefers_dark: bool) -> Self {
        Self {
            state: Arc::new(Mutex::new(PreferenceState {
                prefers_dark,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.state).listeners.len()
    }

    /// Updates the preference and notifies subscribers if it changed.
    pub fn set_prefers_dark(&self, prefers_dark: bool) {
        let mut listeners = {
            let mut state = lock(&self.state);
            if state.prefers_dark == prefers_dark {
                return;
            }
            state.prefers_dark = prefers_dark;
            std::mem::take(&mut state.listeners)
        };

        // Listeners run unlocked so they may read the preference.
        let mode = ColorMode::from_prefers_dark(prefers_dark);
        for listener in listeners.iter_mut() {
            listener(mode);
        }

        let mut state = lock(&self.state);
        listeners.append(&mut state.listeners);
        state.listeners = listeners;
    }
}

impl SystemPreference for ManualPreference {
    fn prefers_dark(&self) -> bool {
        lock(&self.state).prefers_dark
    }

    fn subscribe(&mut self, listener: PreferenceListener) {
        lock(&self.state).listeners.push(listener);
    }
}

impl std::fmt::Debug for ManualPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = lock(&self.state);
        f.debug_struct("ManualPreference")
            .field("prefers_dark", &state.prefers_dark)
            .field("listeners", &state.listeners.len())
            .finish()
    }
}
