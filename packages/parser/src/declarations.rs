//! Inline `style` attribute declarations

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered CSS declaration list (`prop: value; prop2: value2;`)
///
/// Property names are stored lower-cased. Setting an existing property
/// replaces its value in place; new properties are appended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleDeclarations {
    entries: IndexMap<String, String>,
}

impl StyleDeclarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an inline style string. Segments without a `:` or with an
    /// empty property or value are dropped.
    pub fn parse(css_text: &str) -> Self {
        let mut decls = Self::new();
        for segment in split_declarations(css_text) {
            let Some((prop, value)) = segment.split_once(':') else {
                continue;
            };
            let prop = prop.trim();
            let value = value.trim();
            if prop.is_empty() || value.is_empty() {
                continue;
            }
            decls.set(prop, value);
        }
        decls
    }

    pub fn get(&self, prop: &str) -> Option<&str> {
        self.entries
            .get(&prop.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn set(&mut self, prop: impl AsRef<str>, value: impl Into<String>) {
        self.entries
            .insert(prop.as_ref().trim().to_ascii_lowercase(), value.into());
    }

    pub fn remove(&mut self, prop: &str) -> Option<String> {
        self.entries.shift_remove(&prop.to_ascii_lowercase())
    }

    pub fn contains(&self, prop: &str) -> bool {
        self.entries.contains_key(&prop.to_ascii_lowercase())
    }

    /// Apply every declaration of `other` on top of `self`
    pub fn extend(&mut self, other: &StyleDeclarations) {
        for (prop, value) in other.iter() {
            self.set(prop, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_css_text(&self) -> String {
        self.iter()
            .map(|(prop, value)| format!("{}: {};", prop, value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for StyleDeclarations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css_text())
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for StyleDeclarations {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut decls = Self::new();
        for (prop, value) in iter {
            decls.set(prop, value);
        }
        decls
    }
}

/// Split on `;` outside quotes and parentheses (`url("a;b")` stays whole)
fn split_declarations(css_text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, ch) in css_text.char_indices() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                segments.push(&css_text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    segments.push(&css_text[start..]);
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_serialize() {
        let decls = StyleDeclarations::parse("Color: red;  display:block ; ");
        assert_eq!(decls.get("color"), Some("red"));
        assert_eq!(decls.to_css_text(), "color: red; display: block;");
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut decls = StyleDeclarations::parse("color: red; display: block");
        decls.set("color", "blue");
        decls.set("flex-shrink", "0");
        assert_eq!(
            decls.to_css_text(),
            "color: blue; display: block; flex-shrink: 0;"
        );
    }

    #[test]
    fn test_malformed_segments_dropped() {
        let decls = StyleDeclarations::parse("nonsense; : red; color:; fill: none");
        assert_eq!(decls.len(), 1);
        assert_eq!(decls.get("fill"), Some("none"));
    }

    #[test]
    fn test_semicolons_inside_url_kept() {
        let decls = StyleDeclarations::parse(
            r#"background: url("data:image/png;base64,AA"); color: red"#,
        );
        assert_eq!(
            decls.get("background"),
            Some(r#"url("data:image/png;base64,AA")"#)
        );
        assert_eq!(decls.get("color"), Some("red"));
    }

    #[test]
    fn test_empty_renders_empty() {
        assert_eq!(StyleDeclarations::parse("").to_css_text(), "");
    }
}
