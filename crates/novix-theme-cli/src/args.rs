//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use novix_theme::ColorMode;

/// Drive the novix theme engine from the command line.
#[derive(Debug, Parser)]
#[command(name = "novix-theme", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Initialize the engine against CSS files and apply theme changes.
    Apply(ApplyArgs),
    /// Resolve the theme class a server should render for a cookie header.
    Ssr(SsrArgs),
}

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Stylesheet to load; repeat for several.
    #[arg(long = "css", value_name = "FILE", required = true)]
    pub css: Vec<PathBuf>,

    /// Initialization options (.yaml, .yml or .json).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Cookie jar file read at start and written back at the end.
    #[arg(long, value_name = "FILE")]
    pub jar: Option<PathBuf>,

    /// Theme to use in light mode.
    #[arg(long, value_name = "ID")]
    pub light: Option<String>,

    /// Theme to use in dark mode.
    #[arg(long, value_name = "ID")]
    pub dark: Option<String>,

    /// Switch to this mode (requires watch_system_mode in the options).
    #[arg(long)]
    pub mode: Option<ColorMode>,

    /// Flip between light and dark (requires watch_system_mode in the options).
    #[arg(long)]
    pub toggle: bool,

    /// Use this system preference instead of asking the OS.
    #[arg(long, value_name = "BOOL")]
    pub prefers_dark: Option<bool>,
}

#[derive(Debug, Args)]
pub struct SsrArgs {
    /// Raw `Cookie` request header.
    #[arg(long)]
    pub cookie: Option<String>,

    /// Theme when the cookies name no light theme.
    #[arg(long, value_name = "ID")]
    pub fallback_light: Option<String>,

    /// Theme when the cookies name no dark theme.
    #[arg(long, value_name = "ID")]
    pub fallback_dark: Option<String>,

    /// Rendered page to inject the class into; prints the page instead of the class.
    #[arg(long, value_name = "FILE")]
    pub html: Option<PathBuf>,
}
