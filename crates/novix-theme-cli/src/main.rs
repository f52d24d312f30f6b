//! `novix-theme`: a headless host for the novix theme engine.

mod args;

use std::fmt;

use anyhow::{Context, Result};
use clap::Parser;
use novix_theme::{
    inject_theme_class, resolve_theme_class_from_cookie_header, ColorMode, CookieJar, Host,
    ManualPreference, MemoryRoot, OsPreference, StyleSheet, StyleSheets, ThemeEngine,
    ThemeFallback, ThemeInitOptions,
};

use args::{ApplyArgs, Cli, Command, SsrArgs};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Apply(args) => {
            let report = apply(&args)?;
            print!("{}", report);
        }
        Command::Ssr(args) => println!("{}", ssr(&args)?),
    }
    Ok(())
}

/// State of the engine after `apply` ran.
#[derive(Debug, PartialEq, Eq)]
struct Report {
    mode: ColorMode,
    light: String,
    dark: String,
    theme: String,
    root_class: String,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "mode:       {}", self.mode)?;
        writeln!(f, "light:      {}", self.light)?;
        writeln!(f, "dark:       {}", self.dark)?;
        writeln!(f, "theme:      {}", self.theme)?;
        writeln!(f, "root class: {}", self.root_class)
    }
}

fn apply(args: &ApplyArgs) -> Result<Report> {
    let sheets = StyleSheets::new();
    for path in &args.css {
        let sheet = StyleSheet::from_path(path)
            .with_context(|| format!("failed to read stylesheet {}", path.display()))?;
        sheets.add(sheet);
    }
    log::debug!("loaded {} stylesheet(s)", sheets.len());

    let jar = match &args.jar {
        Some(path) => CookieJar::load(path)
            .with_context(|| format!("failed to read cookie jar {}", path.display()))?,
        None => CookieJar::new(),
    };

    let options = match &args.config {
        Some(path) => ThemeInitOptions::from_path(path)?,
        None => ThemeInitOptions::default(),
    };

    let root = MemoryRoot::new(sheets.clone());
    let host = Host::interactive()
        .with_root(root.clone())
        .with_store(jar.clone())
        .with_stylesheets(sheets);
    let host = match args.prefers_dark {
        Some(prefers_dark) => host.with_preference(ManualPreference::new(prefers_dark)),
        None => host.with_preference(OsPreference::new()),
    };

    let engine = ThemeEngine::new(host);
    engine.initialize(options)?;

    if let Some(light) = &args.light {
        engine.set_light_theme(light.as_str())?;
    }
    if let Some(dark) = &args.dark {
        engine.set_dark_theme(dark.as_str())?;
    }
    if let Some(mode) = args.mode {
        engine.set_mode(mode)?;
    }
    if args.toggle {
        engine.toggle_mode()?;
    }

    if let Some(path) = &args.jar {
        jar.save(path)
            .with_context(|| format!("failed to write cookie jar {}", path.display()))?;
    }

    let ids = engine.active_theme_ids();
    Ok(Report {
        mode: engine.current_mode(),
        light: ids.light,
        dark: ids.dark,
        theme: engine.current_theme_id(),
        root_class: root.class_attribute(),
    })
}

fn ssr(args: &SsrArgs) -> Result<String> {
    let fallback = ThemeFallback {
        light: args.fallback_light.clone(),
        dark: args.fallback_dark.clone(),
    };
    let class = resolve_theme_class_from_cookie_header(args.cookie.as_deref(), &fallback);

    match &args.html {
        Some(path) => {
            let html = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok(inject_theme_class(&html, &class))
        }
        None => Ok(class),
    }
}
