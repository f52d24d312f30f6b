//! Startup configuration for [`ThemeEngine::initialize`](super::ThemeEngine::initialize).

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::registry::RegisteredTheme;
use crate::error::ThemeError;

/// Options accepted by [`ThemeEngine::initialize`](super::ThemeEngine::initialize).
///
/// By default the engine assumes single-theme usage in light mode. Supplying
/// both `initial_light_theme` and `initial_dark_theme` opts into picking the
/// initial mode from the system preference; `watch_system_mode` enables mode
/// switching and follows later preference changes.
///
/// Options can be built in code or loaded from YAML/JSON:
///
/// ```rust
/// use novix_theme::ThemeInitOptions;
///
/// let yaml = r#"
/// register_themes:
///   - id: rose-theme
///   - id: midnight-theme
/// initial_light_theme: rose-theme
/// initial_dark_theme: midnight-theme
/// watch_system_mode: true
/// "#;
/// let options = ThemeInitOptions::from_yaml_str(yaml).unwrap();
/// assert_eq!(options.register_themes.len(), 2);
/// assert!(options.watch_system_mode);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeInitOptions {
    #[serde(alias = "registerThemes")]
    pub register_themes: Vec<RegisteredTheme>,
    #[serde(alias = "initialLightTheme")]
    pub initial_light_theme: Option<String>,
    #[serde(alias = "initialDarkTheme")]
    pub initial_dark_theme: Option<String>,
    #[serde(alias = "watchSystemMode")]
    pub watch_system_mode: bool,
}

impl ThemeInitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a theme to register during initialization.
    pub fn register(mut self, theme: impl Into<RegisteredTheme>) -> Self {
        self.register_themes.push(theme.into());
        self
    }

    pub fn initial_light_theme(mut self, id: impl Into<String>) -> Self {
        self.initial_light_theme = Some(id.into());
        self
    }

    pub fn initial_dark_theme(mut self, id: impl Into<String>) -> Self {
        self.initial_dark_theme = Some(id.into());
        self
    }

    pub fn watch_system_mode(mut self, watch: bool) -> Self {
        self.watch_system_mode = watch;
        self
    }

    /// True when the caller named both a light and a dark theme.
    pub(crate) fn names_both_slots(&self) -> bool {
        self.initial_light_theme.is_some() && self.initial_dark_theme.is_some()
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, ThemeError> {
        serde_yaml::from_str(source).map_err(|e| ThemeError::Config {
            path: "<inline yaml>".into(),
            message: e.to_string(),
        })
    }

    pub fn from_json_str(source: &str) -> Result<Self, ThemeError> {
        serde_json::from_str(source).map_err(|e| ThemeError::Config {
            path: "<inline json>".into(),
            message: e.to_string(),
        })
    }

    /// Loads options from a `.yaml`, `.yml` or `.json` file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ThemeError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let parsed = match extension.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&source).map_err(|e| e.to_string()),
            "json" => serde_json::from_str(&source).map_err(|e| e.to_string()),
            other => Err(format!("unsupported options format '.{}'", other)),
        };

        parsed.map_err(|message| ThemeError::Config {
            path: path.to_path_buf(),
            message,
        })
    }
}

impl From<&str> for RegisteredTheme {
    fn from(id: &str) -> Self {
        RegisteredTheme::new(id)
    }
}

impl From<String> for RegisteredTheme {
    fn from(id: String) -> Self {
        RegisteredTheme::new(id)
    }
}
