//! Server-side rendering against cookies written by an interactive engine.

mod common;

use common::{theme_css, Fixture};
use novix_theme::{
    inject_theme_class, resolve_theme_class_from_cookie_header, ColorMode, Host, ThemeEngine,
    ThemeFallback, ThemeInitOptions, DEFAULT_LIGHT_THEME,
};

const PAGE: &str = "<!doctype html>\n<html lang=\"en\"><head></head><body></body></html>";

#[test]
fn test_server_renders_class_persisted_by_browser() {
    let fixture = Fixture::new(&theme_css(&["rose-theme", "midnight-theme"]));
    let engine = fixture.engine();
    engine
        .initialize(
            ThemeInitOptions::new()
                .register("rose-theme")
                .register("midnight-theme")
                .initial_light_theme("rose-theme")
                .initial_dark_theme("midnight-theme")
                .watch_system_mode(true),
        )
        .unwrap();
    engine.set_mode(ColorMode::Dark).unwrap();

    let header = fixture.jar.cookie_header();
    let class = resolve_theme_class_from_cookie_header(Some(&header), &ThemeFallback::default());
    assert_eq!(class, engine.current_theme_id());

    let html = inject_theme_class(PAGE, &class);
    assert!(html.contains("<html class=\"midnight-theme\" lang=\"en\">"));
}

#[test]
fn test_first_visit_uses_fallback() {
    let fallback = ThemeFallback::new("rose-theme", "midnight-theme");
    let class = resolve_theme_class_from_cookie_header(None, &fallback);
    assert_eq!(class, "rose-theme");
}

#[test]
fn test_engine_on_server_host_never_fails_render() {
    let engine = ThemeEngine::new(Host::server());

    engine
        .initialize(ThemeInitOptions::new().watch_system_mode(true))
        .unwrap();
    engine.toggle_mode().unwrap();
    engine.set_light_theme("anything").unwrap();

    assert!(!engine.is_interactive());
    assert_eq!(engine.current_theme_id(), DEFAULT_LIGHT_THEME);
    assert_eq!(engine.current_mode(), ColorMode::Dark);
}
