//! The theme engine service.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use log::{debug, error, warn};
use serde::Serialize;

use super::mode::ColorMode;
use super::options::ThemeInitOptions;
use super::registry::{RegisteredTheme, ThemeRegistry};
use super::{
    DEFAULT_DARK_THEME, DEFAULT_LIGHT_THEME, MARKER_PROPERTY, PERSIST_MAX_AGE, STORAGE_KEYS,
};
use crate::error::ThemeError;
use crate::host::{
    Host, NoopStore, PreferenceListener, RootElement, StylesheetIntrospector, SystemPreference,
    ThemeStore,
};
use crate::system::OsPreference;

/// The light and dark theme ids currently configured. Empty when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveThemeIds {
    pub light: String,
    pub dark: String,
}

/// Published to observers after each successful application of a theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeChange {
    pub mode: ColorMode,
    pub theme_id: String,
}

/// Handle returned by [`ThemeEngine::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type ChangeListener = Arc<dyn Fn(&ThemeChange) + Send + Sync>;

#[derive(Default)]
struct Observers {
    next_id: u64,
    listeners: Vec<(SubscriptionId, ChangeListener)>,
}

struct Shared {
    state: Mutex<EngineState>,
    observers: Mutex<Observers>,
}

/// Registers themes, tracks the light/dark selection and applies the
/// active theme as a class on the root element.
///
/// A `ThemeEngine` is a handle: clones share one state. Construct it once
/// when the host application starts, call [`initialize`](Self::initialize),
/// then pass clones to whatever needs to read or change the theme.
///
/// Every mutator re-applies the active theme and persists the selection.
/// Re-applying fails with [`ThemeError::StylesheetNotLoaded`] when the
/// root element ends up without the [`MARKER_PROPERTY`] custom property,
/// meaning the theme's stylesheet was never loaded.
///
/// # Example
///
/// ```rust
/// use novix_theme::{
///     ColorMode, Host, ManualPreference, MemoryRoot, MemoryStore, StyleSheet, StyleSheets,
///     ThemeEngine, ThemeInitOptions,
/// };
///
/// let sheets = StyleSheets::new();
/// sheets.add(StyleSheet::parse(
///     ".rose-theme { --primary: #e11d48; } .midnight-theme { --primary: #818cf8; }",
/// ));
/// let root = MemoryRoot::new(sheets.clone());
/// let engine = ThemeEngine::new(
///     Host::interactive()
///         .with_root(root.clone())
///         .with_store(MemoryStore::new())
///         .with_preference(ManualPreference::new(false))
///         .with_stylesheets(sheets),
/// );
///
/// engine
///     .initialize(
///         ThemeInitOptions::new()
///             .register("rose-theme")
///             .register("midnight-theme")
///             .initial_light_theme("rose-theme")
///             .initial_dark_theme("midnight-theme")
///             .watch_system_mode(true),
///     )
///     .unwrap();
/// assert_eq!(engine.current_theme_id(), "rose-theme");
///
/// engine.toggle_mode().unwrap();
/// assert_eq!(engine.current_mode(), ColorMode::Dark);
/// assert_eq!(root.classes(), vec!["midnight-theme"]);
/// ```
#[derive(Clone)]
pub struct ThemeEngine {
    shared: Arc<Shared>,
}

impl ThemeEngine {
    /// Creates the engine for `host`.
    ///
    /// On an interactive host the engine keeps the root element, the
    /// stylesheets and the preference source (falling back to
    /// [`OsPreference`]). A host without a store still works but forgets
    /// selections on restart; a warning is logged. On a server host all
    /// collaborators are dropped.
    pub fn new(host: Host) -> Self {
        let Host {
            platform,
            root,
            preference,
            store,
            stylesheets,
        } = host;

        let state = if platform.is_interactive() {
            let store = store.unwrap_or_else(|| {
                warn!(
                    "no persistent theme store was supplied; \
                     theme selections will not survive a restart"
                );
                Box::new(NoopStore) as Box<dyn ThemeStore>
            });
            let preference =
                preference.unwrap_or_else(|| Box::new(OsPreference::new()) as Box<dyn SystemPreference>);
            EngineState::new(true, root, Some(preference), store, stylesheets)
        } else {
            EngineState::new(false, None, None, Box::new(NoopStore), None)
        };

        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                observers: Mutex::new(Observers::default()),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, EngineState> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` under the state lock, then notifies observers of the change
    /// it reports once the lock is released.
    fn mutate<F>(&self, f: F) -> Result<(), ThemeError>
    where
        F: FnOnce(&mut EngineState) -> Result<Option<ThemeChange>, ThemeError>,
    {
        let change = {
            let mut state = self.state();
            f(&mut state)?
        };
        if let Some(change) = change {
            self.notify(&change);
        }
        Ok(())
    }

    fn notify(&self, change: &ThemeChange) {
        let listeners: Vec<ChangeListener> = self
            .shared
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(change);
        }
    }

    /// Whether the engine runs against a live document.
    pub fn is_interactive(&self) -> bool {
        self.state().interactive
    }

    /// Whether [`toggle_mode`](Self::toggle_mode) and [`set_mode`](Self::set_mode) are allowed.
    pub fn is_dual_mode_enabled(&self) -> bool {
        self.state().dual_mode_enabled
    }

    /// Adds a theme to the registry, replacing any entry with the same id.
    pub fn register_theme(&self, theme: impl Into<RegisteredTheme>) {
        self.state().registry.register(theme.into());
    }

    /// All registered themes, in no particular order.
    pub fn registered_themes(&self) -> Vec<RegisteredTheme> {
        self.state().registry.to_vec()
    }

    /// Sets the theme used in light mode, re-applies and persists.
    ///
    /// The id does not have to be registered; activating an unregistered id
    /// only logs a warning.
    pub fn set_light_theme(&self, id: impl Into<String>) -> Result<(), ThemeError> {
        let id = id.into();
        self.mutate(|state| {
            state.light_theme_id = Some(id);
            state.reapply_and_persist()
        })
    }

    /// Sets the theme used in dark mode, re-applies and persists.
    pub fn set_dark_theme(&self, id: impl Into<String>) -> Result<(), ThemeError> {
        let id = id.into();
        self.mutate(|state| {
            state.dark_theme_id = Some(id);
            state.reapply_and_persist()
        })
    }

    /// Sets the theme for whichever mode is active.
    pub fn set_current_mode_theme(&self, id: impl Into<String>) -> Result<(), ThemeError> {
        let id = id.into();
        self.mutate(|state| {
            match state.current_mode.unwrap_or_default() {
                ColorMode::Dark => state.dark_theme_id = Some(id),
                ColorMode::Light => state.light_theme_id = Some(id),
            }
            state.reapply_and_persist()
        })
    }

    /// The active mode; light until one has been resolved.
    pub fn current_mode(&self) -> ColorMode {
        self.state().current_mode.unwrap_or_default()
    }

    /// The id of the last successfully applied theme.
    pub fn current_theme_id(&self) -> String {
        self.state().current_theme_id.clone()
    }

    /// The configured light and dark ids; a slot that was never set is empty.
    pub fn active_theme_ids(&self) -> ActiveThemeIds {
        let state = self.state();
        ActiveThemeIds {
            light: state.light_theme_id.clone().unwrap_or_default(),
            dark: state.dark_theme_id.clone().unwrap_or_default(),
        }
    }

    /// Switches between light and dark. Ignored unless dual-mode is enabled.
    pub fn toggle_mode(&self) -> Result<(), ThemeError> {
        self.mutate(|state| {
            if !state.dual_mode_enabled {
                warn!("toggle_mode() ignored - dual-mode is not enabled.");
                return Ok(None);
            }
            state.current_mode = Some(state.current_mode.unwrap_or_default().toggled());
            state.reapply_and_persist()
        })
    }

    /// Switches to `mode`. Ignored unless dual-mode is enabled.
    pub fn set_mode(&self, mode: ColorMode) -> Result<(), ThemeError> {
        self.mutate(|state| {
            if !state.dual_mode_enabled {
                warn!("set_mode() ignored - dual-mode is not enabled.");
                return Ok(None);
            }
            state.current_mode = Some(mode);
            state.reapply_and_persist()
        })
    }

    /// Registers themes, restores the persisted selection, resolves the
    /// light/dark ids and the mode, then applies the result.
    ///
    /// - Without `register_themes` the two default themes are registered,
    ///   assuming their styles are loaded globally.
    /// - Persisted ids are only restored when registered, and are replaced by
    ///   the initial (or default) ids when no loaded stylesheet defines them.
    /// - The mode comes from storage; failing that, from the system
    ///   preference when both initial themes were named; failing that, light.
    /// - With `watch_system_mode`, mode switching is enabled and later
    ///   system preference changes are followed.
    ///
    /// Meant to run once at startup; later calls are ignored with a warning.
    pub fn initialize(&self, options: ThemeInitOptions) -> Result<(), ThemeError> {
        let change = {
            let mut state = self.state();
            if state.initialized {
                warn!("initialize() ignored - the theme engine is already initialized.");
                return Ok(());
            }
            state.initialized = true;
            state.dual_mode_enabled = options.watch_system_mode;

            if options.register_themes.is_empty() {
                state.registry.register(RegisteredTheme::new(DEFAULT_LIGHT_THEME));
                state.registry.register(RegisteredTheme::new(DEFAULT_DARK_THEME));
            } else {
                for theme in &options.register_themes {
                    state.registry.register(theme.clone());
                }
            }

            state.restore();

            let initial_light = options
                .initial_light_theme
                .clone()
                .unwrap_or_else(|| DEFAULT_LIGHT_THEME.to_string());
            let initial_dark = options
                .initial_dark_theme
                .clone()
                .unwrap_or_else(|| DEFAULT_DARK_THEME.to_string());

            // A persisted id from an older build may have lost its CSS.
            if !state.slot_has_css(state.light_theme_id.as_deref()) {
                state.light_theme_id = Some(initial_light);
            }
            if !state.slot_has_css(state.dark_theme_id.as_deref()) {
                state.dark_theme_id = Some(initial_dark);
            }

            if state.current_mode.is_none() {
                let mode = if options.names_both_slots() && state.interactive {
                    ColorMode::from_prefers_dark(state.system_prefers_dark())
                } else {
                    ColorMode::Light
                };
                state.current_mode = Some(mode);
            }

            state.last_applied_theme_id = state.target_theme_id().map(str::to_string);
            debug!(
                "theme engine initialized: mode={}, light={:?}, dark={:?}",
                state.current_mode.unwrap_or_default(),
                state.light_theme_id,
                state.dark_theme_id
            );

            let change = state.apply_current_mode()?;
            if options.watch_system_mode && state.interactive {
                let listener = self.system_mode_listener();
                if let Some(preference) = state.preference.as_mut() {
                    preference.subscribe(listener);
                }
            }
            change
        };

        if let Some(change) = change {
            self.notify(&change);
        }
        Ok(())
    }

    fn system_mode_listener(&self) -> PreferenceListener {
        let weak: Weak<Shared> = Arc::downgrade(&self.shared);
        Box::new(move |mode| {
            let Some(shared) = weak.upgrade() else { return };
            let engine = ThemeEngine { shared };
            if let Err(err) = engine.follow_system_mode(mode) {
                error!("failed to apply system color mode '{}': {}", mode, err);
            }
        })
    }

    fn follow_system_mode(&self, mode: ColorMode) -> Result<(), ThemeError> {
        debug!("system color mode changed to {}", mode);
        self.mutate(|state| {
            state.current_mode = Some(mode);
            state.reapply_and_persist()
        })
    }

    /// Registers `listener` to run after every successful theme application.
    ///
    /// Listeners run after the engine's lock is released and may call back
    /// into the engine.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&ThemeChange) + Send + Sync + 'static,
    {
        let mut observers = self
            .shared
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        observers.next_id += 1;
        let id = SubscriptionId(observers.next_id);
        observers.listeners.push((id, Arc::new(listener)));
        id
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self
            .shared
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let before = observers.listeners.len();
        observers.listeners.retain(|(existing, _)| *existing != id);
        observers.listeners.len() != before
    }
}

impl fmt::Debug for ThemeEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("ThemeEngine")
            .field("interactive", &state.interactive)
            .field("current_mode", &state.current_mode)
            .field("current_theme_id", &state.current_theme_id)
            .field("light_theme_id", &state.light_theme_id)
            .field("dark_theme_id", &state.dark_theme_id)
            .field("dual_mode_enabled", &state.dual_mode_enabled)
            .finish()
    }
}

struct EngineState {
    interactive: bool,
    root: Option<Box<dyn RootElement>>,
    preference: Option<Box<dyn SystemPreference>>,
    store: Box<dyn ThemeStore>,
    stylesheets: Option<Box<dyn StylesheetIntrospector>>,
    registry: ThemeRegistry,
    light_theme_id: Option<String>,
    dark_theme_id: Option<String>,
    current_mode: Option<ColorMode>,
    current_theme_id: String,
    dual_mode_enabled: bool,
    last_applied_theme_id: Option<String>,
    initialized: bool,
}

impl EngineState {
    fn new(
        interactive: bool,
        root: Option<Box<dyn RootElement>>,
        preference: Option<Box<dyn SystemPreference>>,
        store: Box<dyn ThemeStore>,
        stylesheets: Option<Box<dyn StylesheetIntrospector>>,
    ) -> Self {
        Self {
            interactive,
            root,
            preference,
            store,
            stylesheets,
            registry: ThemeRegistry::new(),
            light_theme_id: None,
            dark_theme_id: None,
            current_mode: None,
            current_theme_id: DEFAULT_LIGHT_THEME.to_string(),
            dual_mode_enabled: false,
            last_applied_theme_id: None,
            initialized: false,
        }
    }

    /// Theme id for the active mode, if configured.
    fn target_theme_id(&self) -> Option<&str> {
        let id = match self.current_mode {
            Some(ColorMode::Dark) => self.dark_theme_id.as_deref(),
            _ => self.light_theme_id.as_deref(),
        };
        id.filter(|id| !id.is_empty())
    }

    fn reapply_and_persist(&mut self) -> Result<Option<ThemeChange>, ThemeError> {
        let change = self.apply_current_mode()?;
        self.persist();
        Ok(change)
    }

    /// Swaps the root element's theme class for the active one.
    ///
    /// The previous class is removed before the new one is added, so at most
    /// one engine class is on the root at a time.
    fn apply_current_mode(&mut self) -> Result<Option<ThemeChange>, ThemeError> {
        if !self.interactive {
            return Ok(None);
        }
        let Some(target) = self.target_theme_id().map(str::to_string) else {
            return Ok(None);
        };
        let Some(root) = self.root.as_mut() else {
            return Ok(None);
        };

        if let Some(previous) = self.last_applied_theme_id.as_deref() {
            if previous != target {
                root.remove_class(previous);
            }
        }
        root.add_class(&target);
        self.last_applied_theme_id = Some(target.clone());

        if root.computed_property(MARKER_PROPERTY).trim().is_empty() {
            return Err(ThemeError::StylesheetNotLoaded { theme_id: target });
        }

        if !self.registry.contains(&target) {
            warn!(
                "theme \"{}\" is not registered - did you forget to register it?",
                target
            );
        }

        self.current_theme_id = target.clone();
        let mode = self.current_mode.unwrap_or_default();
        debug!("applied theme \"{}\" ({} mode)", target, mode);
        Ok(Some(ThemeChange {
            mode,
            theme_id: target,
        }))
    }

    fn system_prefers_dark(&self) -> bool {
        self.preference
            .as_ref()
            .is_some_and(|preference| preference.prefers_dark())
    }

    fn slot_has_css(&self, id: Option<&str>) -> bool {
        id.is_some_and(|id| self.css_class_exists(id))
    }

    fn css_class_exists(&self, class_name: &str) -> bool {
        if !self.interactive || class_name.is_empty() {
            return false;
        }
        self.stylesheets
            .as_ref()
            .is_some_and(|sheets| sheets.class_rule_exists(class_name))
    }

    fn restore(&mut self) {
        if !self.interactive {
            return;
        }

        let light = self.store.get(STORAGE_KEYS.light).filter(|id| self.registry.contains(id));
        let dark = self.store.get(STORAGE_KEYS.dark).filter(|id| self.registry.contains(id));
        let mode = self
            .store
            .get(STORAGE_KEYS.mode)
            .and_then(|mode| mode.parse::<ColorMode>().ok());

        if light.is_some() {
            self.light_theme_id = light;
        }
        if dark.is_some() {
            self.dark_theme_id = dark;
        }
        if mode.is_some() {
            self.current_mode = mode;
        }
    }

    fn persist(&mut self) {
        if !self.interactive {
            return;
        }

        let mode = self.current_mode.map(ColorMode::as_str);
        write_entry(&mut *self.store, STORAGE_KEYS.light, self.light_theme_id.as_deref());
        write_entry(&mut *self.store, STORAGE_KEYS.dark, self.dark_theme_id.as_deref());
        write_entry(&mut *self.store, STORAGE_KEYS.mode, mode);
    }
}

/// Writes `value` for a year, or clears the entry when there is none.
fn write_entry(store: &mut dyn ThemeStore, key: &str, value: Option<&str>) {
    match value.filter(|value| !value.is_empty()) {
        Some(value) => store.set(key, value, PERSIST_MAX_AGE),
        None => store.set(key, "", Duration::ZERO),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::{StyleSheet, StyleSheets};
    use crate::host::{ManualPreference, MemoryRoot, MemoryStore};

    fn themed_sheets(ids: &[&str]) -> StyleSheets {
        let sheets = StyleSheets::new();
        let css: String = ids
            .iter()
            .map(|id| format!(".{} {{ --primary: #336699; }}\n", id))
            .collect();
        sheets.add(StyleSheet::parse(&css));
        sheets
    }

    fn interactive(sheets: &StyleSheets) -> (ThemeEngine, MemoryRoot, MemoryStore) {
        let root = MemoryRoot::new(sheets.clone());
        let store = MemoryStore::new();
        let engine = ThemeEngine::new(
            Host::interactive()
                .with_root(root.clone())
                .with_store(store.clone())
                .with_preference(ManualPreference::new(false))
                .with_stylesheets(sheets.clone()),
        );
        (engine, root, store)
    }

    #[test]
    fn test_reads_before_initialize() {
        let (engine, root, _) = interactive(&StyleSheets::new());
        assert_eq!(engine.current_mode(), ColorMode::Light);
        assert_eq!(engine.current_theme_id(), DEFAULT_LIGHT_THEME);
        assert_eq!(
            engine.active_theme_ids(),
            ActiveThemeIds {
                light: String::new(),
                dark: String::new(),
            }
        );
        assert!(root.classes().is_empty());
    }

    #[test]
    fn test_apply_removes_previous_class_before_adding() {
        let sheets = themed_sheets(&["a", "b", "c"]);
        let (engine, root, _) = interactive(&sheets);

        engine.set_light_theme("a").unwrap();
        engine.set_light_theme("b").unwrap();
        engine.set_light_theme("c").unwrap();

        assert_eq!(root.classes(), vec!["c"]);
        assert_eq!(engine.current_theme_id(), "c");
    }

    #[test]
    fn test_missing_marker_fails_but_keeps_class() {
        let sheets = StyleSheets::new();
        sheets.add(StyleSheet::parse(".bare { color: red; }"));
        let (engine, root, store) = interactive(&sheets);

        let err = engine.set_light_theme("bare").unwrap_err();
        assert!(matches!(err, ThemeError::StylesheetNotLoaded { ref theme_id } if theme_id == "bare"));
        assert!(root.has_class("bare"));
        assert_eq!(engine.current_theme_id(), DEFAULT_LIGHT_THEME);
        assert!(store.is_empty(), "a failed apply must not persist");
    }

    #[test]
    fn test_persist_writes_year_long_entries_and_clears_unset() {
        let sheets = themed_sheets(&["a"]);
        let (engine, _, store) = interactive(&sheets);

        engine.set_light_theme("a").unwrap();

        assert_eq!(store.get(STORAGE_KEYS.light).as_deref(), Some("a"));
        assert_eq!(store.get(STORAGE_KEYS.dark), None);
        assert_eq!(store.get(STORAGE_KEYS.mode), None);
    }

    #[test]
    fn test_set_current_mode_theme_follows_system_switch() {
        let sheets = themed_sheets(&["a", "b", "c"]);
        let root = MemoryRoot::new(sheets.clone());
        let preference = ManualPreference::new(false);
        let engine = ThemeEngine::new(
            Host::interactive()
                .with_root(root.clone())
                .with_store(MemoryStore::new())
                .with_preference(preference.clone())
                .with_stylesheets(sheets),
        );
        engine
            .initialize(
                ThemeInitOptions::new()
                    .register("a")
                    .register("b")
                    .register("c")
                    .initial_light_theme("a")
                    .initial_dark_theme("b")
                    .watch_system_mode(true),
            )
            .unwrap();

        preference.set_prefers_dark(true);
        engine.set_current_mode_theme("c").unwrap();

        let ids = engine.active_theme_ids();
        assert_eq!(ids.light, "a");
        assert_eq!(ids.dark, "c");
        assert_eq!(root.classes(), vec!["c"]);
    }

    #[test]
    fn test_toggle_from_unresolved_mode_goes_dark() {
        let sheets = themed_sheets(&["a", "b"]);
        let (engine, root, _) = interactive(&sheets);
        engine.set_light_theme("a").unwrap();
        engine.set_dark_theme("b").unwrap();
        engine.shared.state.lock().unwrap().dual_mode_enabled = true;

        engine.toggle_mode().unwrap();

        assert_eq!(engine.current_mode(), ColorMode::Dark);
        assert_eq!(root.classes(), vec!["b"]);
    }

    #[test]
    fn test_server_host_is_inert() {
        let sheets = themed_sheets(&["a"]);
        let root = MemoryRoot::new(sheets.clone());
        let store = MemoryStore::new();
        let engine = ThemeEngine::new(
            Host::server()
                .with_root(root.clone())
                .with_store(store.clone())
                .with_stylesheets(sheets),
        );

        engine.initialize(ThemeInitOptions::default()).unwrap();
        engine.set_light_theme("a").unwrap();

        assert!(!engine.is_interactive());
        assert!(root.classes().is_empty());
        assert!(store.is_empty());
        assert_eq!(engine.current_theme_id(), DEFAULT_LIGHT_THEME);
        assert_eq!(engine.active_theme_ids().light, "a");
    }

    #[test]
    fn test_second_initialize_is_ignored() {
        let sheets = themed_sheets(&[DEFAULT_LIGHT_THEME, DEFAULT_DARK_THEME, "x"]);
        let (engine, _, _) = interactive(&sheets);

        engine.initialize(ThemeInitOptions::default()).unwrap();
        engine
            .initialize(ThemeInitOptions::new().register("x").initial_light_theme("x"))
            .unwrap();

        assert_eq!(engine.registered_themes().len(), 2);
        assert_eq!(engine.current_theme_id(), DEFAULT_LIGHT_THEME);
    }

    #[test]
    fn test_observers_receive_changes_until_unsubscribed() {
        let sheets = themed_sheets(&["a", "b"]);
        let (engine, _, _) = interactive(&sheets);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        let id = engine.subscribe(move |change| sink.lock().unwrap().push(change.theme_id.clone()));

        engine.set_light_theme("a").unwrap();
        assert!(engine.unsubscribe(id));
        assert!(!engine.unsubscribe(id));
        engine.set_light_theme("b").unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["a".to_string()]);
    }

    #[test]
    fn test_observer_may_read_engine() {
        let sheets = themed_sheets(&["a"]);
        let (engine, _, _) = interactive(&sheets);
        let seen = Arc::new(Mutex::new(None));

        let reader = engine.clone();
        let sink = Arc::clone(&seen);
        engine.subscribe(move |_| *sink.lock().unwrap() = Some(reader.current_theme_id()));

        engine.set_light_theme("a").unwrap();
        assert_eq!(seen.lock().unwrap().as_deref(), Some("a"));
    }
}
