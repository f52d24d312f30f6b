//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::sync::Once;

use log::{LevelFilter, Log, Metadata, Record};
use novix_theme::{
    CookieJar, Host, ManualPreference, MemoryRoot, StyleSheet, StyleSheets, ThemeEngine,
};

/// CSS defining a marker custom property for each theme id.
pub fn theme_css(ids: &[&str]) -> String {
    ids.iter()
        .map(|id| format!(".{} {{\n  --primary: #336699;\n  --surface: #fff;\n}}\n", id))
        .collect()
}

/// Collaborators of an interactive host, kept so tests can inspect them.
pub struct Fixture {
    pub sheets: StyleSheets,
    pub root: MemoryRoot,
    pub jar: CookieJar,
    pub preference: ManualPreference,
}

impl Fixture {
    pub fn new(css: &str) -> Self {
        Self::with_jar(css, CookieJar::new())
    }

    pub fn with_jar(css: &str, jar: CookieJar) -> Self {
        let sheets = StyleSheets::new();
        sheets.add(StyleSheet::parse(css));
        Self {
            root: MemoryRoot::new(sheets.clone()),
            sheets,
            jar,
            preference: ManualPreference::new(false),
        }
    }

    pub fn prefers_dark(self, prefers_dark: bool) -> Self {
        Self {
            preference: ManualPreference::new(prefers_dark),
            ..self
        }
    }

    pub fn host(&self) -> Host {
        Host::interactive()
            .with_root(self.root.clone())
            .with_store(self.jar.clone())
            .with_preference(self.preference.clone())
            .with_stylesheets(self.sheets.clone())
    }

    pub fn engine(&self) -> ThemeEngine {
        ThemeEngine::new(self.host())
    }
}

thread_local! {
    static CAPTURED: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let line = format!("{} {}", record.level(), record.args());
        CAPTURED.with(|captured| captured.borrow_mut().push(line));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

/// Starts capturing log lines emitted on the current test thread.
pub fn capture_logs() {
    INIT.call_once(|| {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(LevelFilter::Trace);
    });
    CAPTURED.with(|captured| captured.borrow_mut().clear());
}

/// Log lines captured on the current thread since [`capture_logs`].
pub fn captured_logs() -> Vec<String> {
    CAPTURED.with(|captured| captured.borrow().clone())
}

pub fn warnings_containing(needle: &str) -> usize {
    captured_logs()
        .iter()
        .filter(|line| line.starts_with("WARN") && line.contains(needle))
        .count()
}
