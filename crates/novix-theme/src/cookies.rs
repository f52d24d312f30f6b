//! Cookie-backed [`ThemeStore`].

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use cookie::Cookie;

use crate::error::ThemeError;
use crate::host::ThemeStore;

/// A cookie jar holding theme selections.
///
/// Entries are kept as cookies with `Path=/` and a `Max-Age`, the same
/// shape a browser stores them in, so the jar can be rendered as a request
/// `Cookie` header for server-side resolution or as `Set-Cookie` lines.
/// Writing an entry with a zero max-age removes it.
///
/// The jar does not age its entries; `Max-Age` is carried as written.
///
/// # Example
///
/// ```rust
/// use novix_theme::{CookieJar, ThemeStore, PERSIST_MAX_AGE};
///
/// let mut jar = CookieJar::new();
/// jar.set("novix.theme.mode", "dark", PERSIST_MAX_AGE);
/// assert_eq!(jar.cookie_header(), "novix.theme.mode=dark");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CookieJar {
    cookies: Arc<Mutex<BTreeMap<String, Cookie<'static>>>>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    fn cookies(&self) -> MutexGuard<'_, BTreeMap<String, Cookie<'static>>> {
        self.cookies.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Builds a jar from a request `Cookie` header. Malformed pairs are skipped.
    pub fn from_cookie_header(header: &str) -> Self {
        let jar = Self::new();
        {
            let mut cookies = jar.cookies();
            for cookie in Cookie::split_parse(header.to_string()).flatten() {
                let cookie = cookie.into_owned();
                cookies.insert(cookie.name().to_string(), cookie);
            }
        }
        jar
    }

    /// Loads a jar saved by [`save`](Self::save): one `Set-Cookie` value per line.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ThemeError> {
        let path = path.as_ref();
        let jar = Self::new();
        if !path.exists() {
            return Ok(jar);
        }

        let content = std::fs::read_to_string(path)?;
        {
            let mut cookies = jar.cookies();
            for line in content.lines().map(str::trim).filter(|line| !line.is_empty()) {
                match Cookie::parse(line.to_string()) {
                    Ok(cookie) => {
                        cookies.insert(cookie.name().to_string(), cookie.into_owned());
                    }
                    Err(err) => log::warn!("skipping malformed cookie in {}: {}", path.display(), err),
                }
            }
        }
        Ok(jar)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ThemeError> {
        let mut content = self.set_cookie_headers().join("\n");
        content.push('\n');
        std::fs::write(path, content)?;
        Ok(())
    }

    /// The jar as a request `Cookie` header: `name=value` pairs joined by `; `.
    pub fn cookie_header(&self) -> String {
        self.cookies()
            .values()
            .map(|cookie| cookie.stripped().to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// One `Set-Cookie` value per entry, with path and max-age attributes.
    pub fn set_cookie_headers(&self) -> Vec<String> {
        self.cookies().values().map(|cookie| cookie.to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.cookies().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies().is_empty()
    }
}

impl ThemeStore for CookieJar {
    fn get(&self, key: &str) -> Option<String> {
        self.cookies().get(key).map(|cookie| cookie.value().to_string())
    }

    fn set(&mut self, key: &str, value: &str, max_age: Duration) {
        let mut cookies = self.cookies();
        if max_age.is_zero() {
            cookies.remove(key);
            return;
        }

        let seconds = i64::try_from(max_age.as_secs()).unwrap_or(i64::MAX);
        let cookie = Cookie::build((key.to_string(), value.to_string()))
            .path("/")
            .max_age(cookie::time::Duration::seconds(seconds))
            .build();
        cookies.insert(key.to_string(), cookie);
    }
}
