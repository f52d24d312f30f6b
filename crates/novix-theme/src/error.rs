//! Theme engine errors.

use std::path::PathBuf;

/// Error returned by theme engine operations.
///
/// Only [`ThemeError::StylesheetNotLoaded`] can come out of the engine's
/// mutators. The remaining variants are produced by the loaders around it
/// (options files, cookie jars, stylesheet access).
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    /// A theme class was applied but the root element has no marker custom property.
    #[error(
        "theme \"{theme_id}\" is active but no CSS variables were found; \
         this usually means its stylesheet was not imported into the global styles"
    )]
    StylesheetNotLoaded { theme_id: String },

    /// A mode string other than `light` or `dark`.
    #[error("invalid color mode '{0}', expected 'light' or 'dark'")]
    InvalidMode(String),

    /// The rules of a foreign-origin stylesheet cannot be read.
    #[error("stylesheet from '{origin}' is not accessible")]
    StylesheetInaccessible { origin: String },

    /// An options file could not be parsed.
    #[error("invalid theme configuration in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// Reading or writing a file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stylesheet_not_loaded_display() {
        let err = ThemeError::StylesheetNotLoaded {
            theme_id: "rose-theme".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("rose-theme"));
        assert!(msg.contains("no CSS variables were found"));
    }

    #[test]
    fn test_invalid_mode_display() {
        let msg = ThemeError::InvalidMode("sepia".to_string()).to_string();
        assert!(msg.contains("sepia"));
    }

    #[test]
    fn test_config_display_includes_path() {
        let err = ThemeError::Config {
            path: PathBuf::from("/etc/novix/theme.yaml"),
            message: "unexpected key".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("theme.yaml"));
        assert!(msg.contains("unexpected key"));
    }
}
