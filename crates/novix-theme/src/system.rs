//! System color-scheme preference backed by OS detection.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};
use once_cell::sync::Lazy;

use crate::host::{PreferenceListener, SystemPreference};
use crate::theme::ColorMode;

type ThemeDetector = fn() -> ColorMode;

static THEME_DETECTOR: Lazy<Mutex<ThemeDetector>> = Lazy::new(|| Mutex::new(os_theme_detector));

/// Overrides the detector used to determine whether the user prefers a light or dark theme.
///
/// This is useful for testing or when you want to force a specific color mode.
pub fn set_theme_detector(detector: ThemeDetector) {
    let mut guard = THEME_DETECTOR.lock().unwrap_or_else(PoisonError::into_inner);
    *guard = detector;
}

/// Runs the current detector.
pub fn detect_color_mode() -> ColorMode {
    let detector = *THEME_DETECTOR.lock().unwrap_or_else(PoisonError::into_inner);
    detector()
}

fn os_theme_detector() -> ColorMode {
    match detect_os_theme() {
        OsThemeMode::Dark => ColorMode::Dark,
        _ => ColorMode::Light,
    }
}

/// [`SystemPreference`] that asks the operating system.
///
/// The OS offers no change notification here, so each subscription starts a
/// watcher thread that polls the detector and reports changes. Watchers stop
/// when the `OsPreference` is dropped.
#[derive(Debug)]
pub struct OsPreference {
    poll_interval: Duration,
    stopped: Arc<AtomicBool>,
}

impl OsPreference {
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

    pub fn new() -> Self {
        Self::with_poll_interval(Self::DEFAULT_POLL_INTERVAL)
    }

    pub fn with_poll_interval(poll_interval: Duration) -> Self {
        Self {
            poll_interval,
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl Default for OsPreference {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemPreference for OsPreference {
    fn prefers_dark(&self) -> bool {
        detect_color_mode() == ColorMode::Dark
    }

    fn subscribe(&mut self, mut listener: PreferenceListener) {
        let stopped = Arc::clone(&self.stopped);
        let interval = self.poll_interval;
        let mut last = detect_color_mode();

        let spawned = thread::Builder::new()
            .name("novix-theme-watch".to_string())
            .spawn(move || {
                while !stopped.load(Ordering::Relaxed) {
                    thread::sleep(interval);
                    if stopped.load(Ordering::Relaxed) {
                        break;
                    }
                    let mode = detect_color_mode();
                    if mode != last {
                        last = mode;
                        listener(mode);
                    }
                }
            });

        if let Err(err) = spawned {
            log::warn!("could not start system color mode watcher: {}", err);
        }
    }
}

impl Drop for OsPreference {
    fn drop(&mut self) {
        self.stopped.store(true, Ordering::Relaxed);
    }
}
