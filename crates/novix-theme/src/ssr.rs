//! Server-side theme class resolution.
//!
//! A server rendering the page has no engine state, only the cookies the
//! browser sent. [`resolve_theme_class_from_cookie_header`] reads the same
//! entries the engine persists and picks the class to put on `<html>` so
//! the first paint already carries the right theme. Framework middleware
//! only needs to forward the request's `Cookie` header and pass the
//! rendered markup through [`inject_theme_class`].

use cookie::Cookie;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::theme::{DEFAULT_LIGHT_THEME, STORAGE_KEYS};

/// Theme ids used when the cookies name none for the active mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeFallback {
    pub light: Option<String>,
    pub dark: Option<String>,
}

impl ThemeFallback {
    pub fn new(light: impl Into<String>, dark: impl Into<String>) -> Self {
        Self {
            light: Some(light.into()),
            dark: Some(dark.into()),
        }
    }
}

/// Picks the theme class for a request.
///
/// The mode cookie selects the dark slot only when it is exactly `dark`.
/// The slot's cookie wins, then the matching fallback, then
/// [`DEFAULT_LIGHT_THEME`]. Empty values count as missing, and so do values
/// that are not plain class names (`[A-Za-z0-9_-]`), since the result is
/// written into the page.
///
/// # Example
///
/// ```rust
/// use novix_theme::{resolve_theme_class_from_cookie_header, ThemeFallback};
///
/// let header = "novix.theme.mode=dark; novix.theme.dark=midnight-theme";
/// let class = resolve_theme_class_from_cookie_header(Some(header), &ThemeFallback::default());
/// assert_eq!(class, "midnight-theme");
///
/// let class = resolve_theme_class_from_cookie_header(None, &ThemeFallback::default());
/// assert_eq!(class, "novix-default-light");
/// ```
pub fn resolve_theme_class_from_cookie_header(
    cookie_header: Option<&str>,
    fallback: &ThemeFallback,
) -> String {
    let mut light = None;
    let mut dark = None;
    let mut mode = None;

    for cookie in Cookie::split_parse(cookie_header.unwrap_or_default()).flatten() {
        let value = cookie.value().to_string();
        match cookie.name() {
            name if name == STORAGE_KEYS.light => light = Some(value),
            name if name == STORAGE_KEYS.dark => dark = Some(value),
            name if name == STORAGE_KEYS.mode => mode = Some(value),
            _ => {}
        }
    }

    let dark_mode = mode.as_deref() == Some("dark");
    let (from_cookie, from_fallback) = if dark_mode {
        (dark, fallback.dark.clone())
    } else {
        (light, fallback.light.clone())
    };

    from_cookie
        .filter(|id| {
            let usable = is_class_name(id);
            if !usable && !id.is_empty() {
                warn!("ignoring theme cookie with unusable class name {:?}", id);
            }
            usable
        })
        .or_else(|| from_fallback.filter(|id| is_class_name(id)))
        .unwrap_or_else(|| DEFAULT_LIGHT_THEME.to_string())
}

/// Whether `id` is non-empty and made only of `[A-Za-z0-9_-]`.
fn is_class_name(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Adds `theme_class` to the class list of the first `<html>` tag in `html`.
///
/// An existing `class` attribute is extended rather than duplicated, and a
/// class already present is not added twice. The class is escaped for use
/// inside a quoted attribute. Markup without an `<html>` tag is returned
/// unchanged.
///
/// ```rust
/// use novix_theme::inject_theme_class;
///
/// let html = inject_theme_class("<!doctype html><html lang=\"en\"><body></body></html>", "rose-theme");
/// assert_eq!(html, "<!doctype html><html class=\"rose-theme\" lang=\"en\"><body></body></html>");
///
/// let html = inject_theme_class("<html class=\"app-shell\">", "rose-theme");
/// assert_eq!(html, "<html class=\"app-shell rose-theme\">");
/// ```
pub fn inject_theme_class(html: &str, theme_class: &str) -> String {
    let Some(attrs_start) = find_html_tag(html) else {
        return html.to_string();
    };
    let theme_class = escape_attribute(theme_class);
    let attrs_end = find_tag_end(html, attrs_start);

    let Some(value) = find_class_attribute(&html[attrs_start..attrs_end]) else {
        let mut out = String::with_capacity(html.len() + theme_class.len() + 9);
        out.push_str(&html[..attrs_start]);
        out.push_str(" class=\"");
        out.push_str(&theme_class);
        out.push('"');
        out.push_str(&html[attrs_start..]);
        return out;
    };

    let start = attrs_start + value.start;
    let end = attrs_start + value.end;
    let existing = &html[start..end];
    if existing.split_whitespace().any(|class| class == theme_class) {
        return html.to_string();
    }

    let mut out = String::with_capacity(html.len() + theme_class.len() + 3);
    if value.quoted {
        out.push_str(&html[..end]);
        if !existing.trim_end().is_empty() && !existing.ends_with(char::is_whitespace) {
            out.push(' ');
        }
        out.push_str(&theme_class);
    } else {
        out.push_str(&html[..start]);
        out.push('"');
        out.push_str(existing);
        out.push(' ');
        out.push_str(&theme_class);
        out.push('"');
    }
    out.push_str(&html[end..]);
    out
}

/// Byte offset just past `<html` for the first real `<html` tag.
fn find_html_tag(html: &str) -> Option<usize> {
    let mut offset = 0;
    while let Some(found) = html[offset..].find("<html") {
        let end = offset + found + "<html".len();
        match html[end..].chars().next() {
            Some(c) if c.is_whitespace() || c == '>' || c == '/' => return Some(end),
            None => return Some(end),
            _ => offset = end,
        }
    }
    None
}

/// Offset of the `>` closing the tag whose attributes start at `from`.
fn find_tag_end(html: &str, from: usize) -> usize {
    let mut quote = None;
    for (i, c) in html[from..].char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '>' => return from + i,
            None => {}
        }
    }
    html.len()
}

/// Span of an attribute value, relative to the attribute list.
struct AttributeValue {
    start: usize,
    end: usize,
    quoted: bool,
}

fn find_class_attribute(attrs: &str) -> Option<AttributeValue> {
    let bytes = attrs.as_bytes();
    let len = bytes.len();
    let mut i = 0;
    while i < len {
        if bytes[i].is_ascii_whitespace() || bytes[i] == b'/' {
            i += 1;
            continue;
        }

        let name_start = i;
        while i < len && !bytes[i].is_ascii_whitespace() && bytes[i] != b'=' && bytes[i] != b'/' {
            i += 1;
        }
        let name = &attrs[name_start..i];
        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= len || bytes[i] != b'=' {
            continue;
        }

        i += 1;
        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let value = if i < len && (bytes[i] == b'"' || bytes[i] == b'\'') {
            let quote = bytes[i] as char;
            let start = i + 1;
            let end = attrs[start..].find(quote).map_or(len, |pos| start + pos);
            i = (end + 1).min(len);
            AttributeValue {
                start,
                end,
                quoted: true,
            }
        } else {
            let start = i;
            while i < len && !bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            AttributeValue {
                start,
                end: i,
                quoted: false,
            }
        };
        if name.eq_ignore_ascii_case("class") {
            return Some(value);
        }
    }
    None
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c => escaped.push(c),
        }
    }
    escaped
}
