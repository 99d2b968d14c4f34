//! The transform table behind directive keys.
//!
//! A [`TransformTable`] is an ordered list of `(key, transform)` entries.
//! Lookup returns the first entry whose key matches, so a later entry with a
//! duplicate key is never used.
//!
//! Two built-in tables are provided:
//!
//! | Key | [`markup`](TransformTable::markup) | [`ansi`](TransformTable::ansi) |
//! |-----|------------------------------------|--------------------------------|
//! | `b` | `<b>text</b>` | bold |
//! | `i` | `<i>text</i>` | italic |
//! | `u` | `<u>text</u>` | underlined |
//! | `s` | `<s>text</s>` | strikethrough |
//!
//! Color keys are added with [`TransformTable::color`].

use std::fmt;
use std::sync::Arc;

use console::Style;

use crate::color::ColorDef;

/// A text transform applied by a directive key.
pub type Transform = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Markup transforms producing rich-text tags.
pub mod markup {
    pub fn bold(text: &str) -> String {
        format!("<b>{}</b>", text)
    }

    pub fn italic(text: &str) -> String {
        format!("<i>{}</i>", text)
    }

    pub fn underline(text: &str) -> String {
        format!("<u>{}</u>", text)
    }

    pub fn strikethrough(text: &str) -> String {
        format!("<s>{}</s>", text)
    }

    /// Wraps text in a color tag; `color_id` is a color name or `#RRGGBB`.
    pub fn colorize(text: &str, color_id: &str) -> String {
        format!("<color={}>{}</color>", color_id, text)
    }
}

/// Which family of built-in transforms to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Output {
    /// Rich-text tags such as `<b>…</b>`.
    #[default]
    Markup,
    /// Terminal escape codes.
    Ansi,
}

/// Names of the keys bound to the built-in style transforms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleKeys {
    pub bold: String,
    pub italic: String,
    pub underline: String,
    pub strikethrough: String,
}

impl Default for StyleKeys {
    fn default() -> Self {
        Self {
            bold: "b".to_string(),
            italic: "i".to_string(),
            underline: "u".to_string(),
            strikethrough: "s".to_string(),
        }
    }
}

/// Ordered key → transform mapping.
#[derive(Clone, Default)]
pub struct TransformTable {
    entries: Vec<(String, Transform)>,
    output: Output,
}

impl TransformTable {
    /// Creates an empty markup table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table whose color keys produce the given output.
    pub fn for_output(output: Output) -> Self {
        Self {
            entries: Vec::new(),
            output,
        }
    }

    /// The default markup table: `b`, `i`, `u` and `s`.
    pub fn markup() -> Self {
        Self::with_style_keys(Output::Markup, &StyleKeys::default())
    }

    /// The default terminal table: `b`, `i`, `u` and `s` as ANSI styles.
    pub fn ansi() -> Self {
        Self::with_style_keys(Output::Ansi, &StyleKeys::default())
    }

    /// Builds the built-in style transforms under custom key names.
    pub fn with_style_keys(output: Output, keys: &StyleKeys) -> Self {
        let table = Self::for_output(output);
        match output {
            Output::Markup => table
                .with(&keys.bold, markup::bold)
                .with(&keys.italic, markup::italic)
                .with(&keys.underline, markup::underline)
                .with(&keys.strikethrough, markup::strikethrough),
            Output::Ansi => table
                .with_style(&keys.bold, Style::new().bold())
                .with_style(&keys.italic, Style::new().italic())
                .with_style(&keys.underline, Style::new().underlined())
                .with_style(&keys.strikethrough, Style::new().strikethrough()),
        }
    }

    /// Appends an entry. Entries added later never shadow earlier ones.
    pub fn push<F>(&mut self, key: impl Into<String>, transform: F)
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.entries.push((key.into(), Arc::new(transform)));
    }

    /// Builder form of [`push`](Self::push).
    pub fn with<F>(mut self, key: impl Into<String>, transform: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.push(key, transform);
        self
    }

    /// Appends a terminal style transform.
    pub fn with_style(self, key: impl Into<String>, style: Style) -> Self {
        let style = style.force_styling(true);
        self.with(key, move |text| style.apply_to(text).to_string())
    }

    /// Appends a colorize transform, rendered for this table's output.
    pub fn color(self, key: impl Into<String>, color: ColorDef) -> Self {
        match self.output {
            Output::Markup => {
                let id = color.markup_id();
                self.with(key, move |text| markup::colorize(text, &id))
            }
            Output::Ansi => {
                let style = Style::new().fg(color.to_console_color());
                self.with_style(key, style)
            }
        }
    }

    /// Returns the first transform registered under `key`.
    pub fn get(&self, key: &str) -> Option<&Transform> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, transform)| transform)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn output(&self) -> Output {
        self.output
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for TransformTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformTable")
            .field("keys", &self.keys().collect::<Vec<_>>())
            .field("output", &self.output)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(table: &TransformTable, key: &str, text: &str) -> Option<String> {
        table.get(key).map(|transform| transform(text))
    }

    #[test]
    fn markup_builtins() {
        let table = TransformTable::markup();
        assert_eq!(apply(&table, "b", "x").as_deref(), Some("<b>x</b>"));
        assert_eq!(apply(&table, "i", "x").as_deref(), Some("<i>x</i>"));
        assert_eq!(apply(&table, "u", "x").as_deref(), Some("<u>x</u>"));
        assert_eq!(apply(&table, "s", "x").as_deref(), Some("<s>x</s>"));
        assert!(table.get("bold").is_none());
    }

    #[test]
    fn first_matching_key_wins() {
        let table = TransformTable::new()
            .with("x", |t| format!("first({t})"))
            .with("x", |t| format!("second({t})"));
        assert_eq!(apply(&table, "x", "a").as_deref(), Some("first(a)"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn color_keys_in_markup() {
        let table = TransformTable::markup()
            .color("warn", ColorDef::parse("orange").unwrap())
            .color("brand", ColorDef::parse("#ff6b35").unwrap());
        assert_eq!(
            apply(&table, "warn", "hot").as_deref(),
            Some("<color=orange>hot</color>")
        );
        assert_eq!(
            apply(&table, "brand", "hot").as_deref(),
            Some("<color=#FF6B35>hot</color>")
        );
    }

    #[test]
    fn ansi_builtins_emit_escape_codes() {
        let table = TransformTable::ansi().color("red", ColorDef::parse("red").unwrap());
        let bold = apply(&table, "b", "hello").unwrap();
        assert!(bold.contains("\x1b[1m"));
        assert!(bold.contains("hello"));
        let red = apply(&table, "red", "hello").unwrap();
        assert!(red.contains("\x1b[31m"));
    }

    #[test]
    fn custom_style_keys() {
        let keys = StyleKeys {
            bold: "strong".to_string(),
            ..StyleKeys::default()
        };
        let table = TransformTable::with_style_keys(Output::Markup, &keys);
        assert_eq!(apply(&table, "strong", "x").as_deref(), Some("<b>x</b>"));
        assert!(table.get("b").is_none());
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["strong", "i", "u", "s"]);
    }

    #[test]
    fn table_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TransformTable>();
    }
}
