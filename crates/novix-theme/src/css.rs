//! Stylesheet model used for class lookups and computed custom properties.
//!
//! Stylesheets are parsed with `cssparser` into a flat list of
//! [`StyleRule`]s. Grouping at-rules (`@media`, `@supports`, `@layer`,
//! `@container`) contribute their nested rules; other at-rules are skipped.
//!
//! Only the parts of selector matching the engine needs are modelled:
//! whether a selector mentions a class, and whether a compound selector made
//! of `html`, `:root` and class selectors matches the root element. Later
//! declarations win; specificity is not considered.

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use cssparser::{ParseError, Parser, ParserInput, Token};

use crate::error::ThemeError;
use crate::host::StylesheetIntrospector;

const GROUPING_AT_RULES: &[&str] = &["media", "supports", "layer", "container", "document"];

#[derive(Debug, Clone, PartialEq, Eq)]
enum SimpleSelector {
    Root,
    Html,
    Class(String),
    Other,
}

/// A qualified rule: a selector list and its declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    selector_text: String,
    selectors: Vec<Vec<SimpleSelector>>,
    declarations: Vec<(String, String)>,
}

impl StyleRule {
    fn new(selector_text: &str, declarations: Vec<(String, String)>) -> Self {
        let selector_text = selector_text.trim().to_string();
        let selectors = parse_selector_list(&selector_text);
        Self {
            selector_text,
            selectors,
            declarations,
        }
    }

    pub fn selector_text(&self) -> &str {
        &self.selector_text
    }

    /// Declarations as `(property, value)` pairs in source order.
    pub fn declarations(&self) -> &[(String, String)] {
        &self.declarations
    }

    pub fn references_class(&self, class_name: &str) -> bool {
        self.selectors
            .iter()
            .flatten()
            .any(|s| matches!(s, SimpleSelector::Class(c) if c == class_name))
    }

    /// True when one selector in the list matches a root element carrying `classes`.
    fn matches_root(&self, classes: &[String]) -> bool {
        self.selectors.iter().any(|compound| {
            !compound.is_empty()
                && compound.iter().all(|simple| match simple {
                    SimpleSelector::Root | SimpleSelector::Html => true,
                    SimpleSelector::Class(c) => classes.iter().any(|have| have == c),
                    SimpleSelector::Other => false,
                })
        })
    }
}

/// A loaded stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleSheet {
    /// A stylesheet whose rules can be read.
    Local { rules: Vec<StyleRule> },
    /// A foreign-origin stylesheet; reading its rules fails.
    Foreign { origin: String },
}

impl StyleSheet {
    /// Parses CSS source. Malformed rules are dropped, never reported.
    pub fn parse(css: &str) -> Self {
        let mut input = ParserInput::new(css);
        let mut parser = Parser::new(&mut input);
        let mut rules = Vec::new();
        collect_rules(&mut parser, &mut rules);
        StyleSheet::Local { rules }
    }

    pub fn foreign(origin: impl Into<String>) -> Self {
        StyleSheet::Foreign {
            origin: origin.into(),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ThemeError> {
        let css = std::fs::read_to_string(path)?;
        Ok(Self::parse(&css))
    }

    pub fn rules(&self) -> Result<&[StyleRule], ThemeError> {
        match self {
            StyleSheet::Local { rules } => Ok(rules),
            StyleSheet::Foreign { origin } => Err(ThemeError::StylesheetInaccessible {
                origin: origin.clone(),
            }),
        }
    }
}

/// The stylesheets loaded by a host, shared between the root element and
/// the engine's class lookups.
#[derive(Debug, Clone, Default)]
pub struct StyleSheets {
    sheets: Arc<RwLock<Vec<StyleSheet>>>,
}

impl StyleSheets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, sheet: StyleSheet) {
        self.sheets
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sheet);
    }

    pub fn len(&self) -> usize {
        self.sheets.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value of custom property `name` on a root element carrying `classes`,
    /// or an empty string.
    pub fn computed_custom_property(&self, classes: &[String], name: &str) -> String {
        let sheets = self.sheets.read().unwrap_or_else(PoisonError::into_inner);
        let mut value = String::new();
        for sheet in sheets.iter() {
            let Ok(rules) = sheet.rules() else { continue };
            for rule in rules.iter().filter(|rule| rule.matches_root(classes)) {
                if let Some((_, v)) = rule.declarations.iter().rev().find(|(prop, _)| prop == name) {
                    value = v.clone();
                }
            }
        }
        value
    }
}

impl StylesheetIntrospector for StyleSheets {
    fn class_rule_exists(&self, class_name: &str) -> bool {
        if class_name.is_empty() {
            return false;
        }
        let sheets = self.sheets.read().unwrap_or_else(PoisonError::into_inner);
        sheets.iter().any(|sheet| match sheet.rules() {
            Ok(rules) => rules.iter().any(|rule| rule.references_class(class_name)),
            Err(err) => {
                log::debug!("skipping stylesheet during class lookup: {}", err);
                false
            }
        })
    }
}

fn collect_rules<'i>(input: &mut Parser<'i, '_>, rules: &mut Vec<StyleRule>) {
    loop {
        input.skip_whitespace();
        let start = input.position();
        let first = match input.next() {
            Ok(token) => token.clone(),
            Err(_) => return,
        };

        match first {
            Token::CDO | Token::CDC | Token::Semicolon => {}
            Token::AtKeyword(name) => {
                let name = name.to_ascii_lowercase();
                loop {
                    let token = match input.next() {
                        Ok(token) => token.clone(),
                        Err(_) => return,
                    };
                    match token {
                        Token::Semicolon => break,
                        Token::CurlyBracketBlock => {
                            if GROUPING_AT_RULES.contains(&name.as_str()) {
                                let _ = input.parse_nested_block(|block| {
                                    collect_rules(block, rules);
                                    Ok::<_, ParseError<'i, ()>>(())
                                });
                            }
                            break;
                        }
                        _ => {}
                    }
                }
            }
            mut token => {
                let mut prelude_end = start;
                loop {
                    match token {
                        Token::CurlyBracketBlock => {
                            let prelude = input.slice(start..prelude_end);
                            let declarations = input
                                .parse_nested_block(|block| {
                                    Ok::<_, ParseError<'i, ()>>(parse_declarations(block))
                                })
                                .unwrap_or_default();
                            rules.push(StyleRule::new(prelude, declarations));
                            break;
                        }
                        Token::Semicolon => break,
                        _ => {}
                    }
                    prelude_end = input.position();
                    token = match input.next() {
                        Ok(token) => token.clone(),
                        Err(_) => return,
                    };
                }
            }
        }
    }
}

fn parse_declarations(input: &mut Parser<'_, '_>) -> Vec<(String, String)> {
    let mut declarations = Vec::new();
    loop {
        let token = match input.next() {
            Ok(token) => token.clone(),
            Err(_) => return declarations,
        };
        let name = match token {
            Token::Ident(name) => name.to_string(),
            Token::Semicolon => continue,
            _ => {
                if !skip_declaration(input) {
                    return declarations;
                }
                continue;
            }
        };
        if !matches!(input.next(), Ok(Token::Colon)) {
            if !skip_declaration(input) {
                return declarations;
            }
            continue;
        }

        let value_start = input.position();
        let mut value_end = value_start;
        let mut at_end = false;
        loop {
            match input.next().map(|token| matches!(token, Token::Semicolon)) {
                Ok(true) => break,
                Ok(false) => value_end = input.position(),
                Err(_) => {
                    at_end = true;
                    break;
                }
            }
        }

        let value = input.slice(value_start..value_end).trim();
        let value = value.strip_suffix("!important").unwrap_or(value).trim_end();
        declarations.push((name, value.to_string()));
        if at_end {
            return declarations;
        }
    }
}

/// Consumes tokens through the next `;`. Returns false at the end of input.
fn skip_declaration(input: &mut Parser<'_, '_>) -> bool {
    loop {
        match input.next() {
            Ok(Token::Semicolon) => return true,
            Ok(_) => {}
            Err(_) => return false,
        }
    }
}

fn parse_selector_list(text: &str) -> Vec<Vec<SimpleSelector>> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);

    let mut selectors = Vec::new();
    let mut compound = Vec::new();
    let mut pending_space = false;
    let mut prefix: Option<char> = None;

    loop {
        let token = match parser.next_including_whitespace() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };

        match token {
            Token::WhiteSpace(_) => {
                pending_space = !compound.is_empty();
                continue;
            }
            Token::Comma => {
                selectors.push(std::mem::take(&mut compound));
                pending_space = false;
                prefix = None;
                continue;
            }
            _ => {}
        }

        // Descendant combinator: the subject is no longer the root.
        if pending_space {
            compound.push(SimpleSelector::Other);
            pending_space = false;
        }

        let simple = match (prefix.take(), &token) {
            (Some('.'), Token::Ident(name)) => Some(SimpleSelector::Class(name.to_string())),
            (Some(':'), Token::Ident(name)) if name.eq_ignore_ascii_case("root") => {
                Some(SimpleSelector::Root)
            }
            (Some(_), _) => Some(SimpleSelector::Other),
            (None, Token::Delim('.')) => {
                prefix = Some('.');
                None
            }
            (None, Token::Colon) => {
                prefix = Some(':');
                None
            }
            (None, Token::Ident(name)) if name.eq_ignore_ascii_case("html") => {
                Some(SimpleSelector::Html)
            }
            (None, _) => Some(SimpleSelector::Other),
        };
        if let Some(simple) = simple {
            compound.push(simple);
        }
    }

    if prefix.is_some() {
        compound.push(SimpleSelector::Other);
    }
    selectors.push(compound);
    selectors.retain(|compound| !compound.is_empty());
    selectors
}
