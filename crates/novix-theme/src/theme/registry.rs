//! Registry of known theme ids.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// A theme known to the engine.
///
/// The id doubles as the CSS class that selects the theme on the root
/// element. `tokens` optionally carries the theme's design tokens for
/// hosts that generate styles dynamically; the engine itself never reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredTheme {
    pub id: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty", alias = "map")]
    pub tokens: BTreeMap<String, String>,
}

impl RegisteredTheme {
    /// Creates a theme entry with no tokens.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tokens: BTreeMap::new(),
        }
    }

    /// Adds a design token, returning the updated entry for chaining.
    pub fn token(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.tokens.insert(name.into(), value.into());
        self
    }
}

/// Mapping from theme id to [`RegisteredTheme`].
///
/// Registering an id twice replaces the earlier entry. Iteration order is
/// unspecified.
#[derive(Debug, Clone, Default)]
pub struct ThemeRegistry {
    themes: HashMap<String, RegisteredTheme>,
}

impl ThemeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the entry for `theme.id`.
    pub fn register(&mut self, theme: RegisteredTheme) {
        self.themes.insert(theme.id.clone(), theme);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.themes.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&RegisteredTheme> {
        self.themes.get(id)
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Snapshot of all registered themes.
    pub fn to_vec(&self) -> Vec<RegisteredTheme> {
        self.themes.values().cloned().collect()
    }
}
