//! Engine configuration.
//!
//! A [`Config`] bundles the delimiters of both micro-languages, the
//! transform table and the error policy. Build it once and share it as an
//! `Arc<Config>` between every template that uses it.
//!
//! ```rust
//! use richstring::{Config, ErrorPolicy, TransformTable};
//!
//! let config = Config::builder()
//!     .policy(ErrorPolicy::Lenient)
//!     .transforms(TransformTable::markup())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.delimiters().chain, ".");
//! ```
//!
//! Configuration can also be loaded from a YAML settings document, see
//! [`Settings`].

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::color::ColorDef;
use crate::error::ConfigError;
use crate::transform::{Output, StyleKeys, TransformTable};

/// Opening and closing delimiter of a span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanDelimiters {
    pub open: String,
    pub close: String,
}

impl SpanDelimiters {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// Wraps `inner` in these delimiters.
    pub fn wrap(&self, inner: &str) -> String {
        format!("{}{}{}", self.open, inner, self.close)
    }
}

/// Every delimiter the engine recognizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Delimiters {
    /// Separates links of a reference chain (`weapon.damage`).
    pub chain: String,
    /// Separates a member name from its index (`items->2`).
    pub index: String,
    /// Encloses a reference (`{name}`).
    pub reference: SpanDelimiters,
    /// Encloses a directive (`[text:b]`).
    pub directive: SpanDelimiters,
    /// Separates directive base text from its keys (`text:b:i`).
    pub directive_key: String,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            chain: ".".to_string(),
            index: "->".to_string(),
            reference: SpanDelimiters::new("{", "}"),
            directive: SpanDelimiters::new("[", "]"),
            directive_key: ":".to_string(),
        }
    }
}

impl Delimiters {
    /// Checks that no delimiter is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("chain", &self.chain),
            ("index", &self.index),
            ("reference.open", &self.reference.open),
            ("reference.close", &self.reference.close),
            ("directive.open", &self.directive.open),
            ("directive.close", &self.directive.close),
            ("directive_key", &self.directive_key),
        ];

        match checks.iter().find(|(_, value)| value.is_empty()) {
            Some((name, _)) => Err(ConfigError::EmptyDelimiter(*name)),
            None => Ok(()),
        }
    }
}

/// What to do when binding or rendering hits an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Abort the call and return the first error.
    #[default]
    Strict,
    /// Record a diagnostic, substitute empty text and keep going.
    Lenient,
}

/// Immutable engine configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    delimiters: Delimiters,
    transforms: TransformTable,
    policy: ErrorPolicy,
}

impl Config {
    /// Creates a configuration, rejecting empty delimiters.
    pub fn new(
        delimiters: Delimiters,
        transforms: TransformTable,
        policy: ErrorPolicy,
    ) -> Result<Arc<Self>, ConfigError> {
        delimiters.validate()?;
        Ok(Arc::new(Self {
            delimiters,
            transforms,
            policy,
        }))
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Default delimiters, the markup table and the strict policy.
    pub fn markup() -> Arc<Self> {
        Arc::new(Self {
            delimiters: Delimiters::default(),
            transforms: TransformTable::markup(),
            policy: ErrorPolicy::Strict,
        })
    }

    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    pub fn transforms(&self) -> &TransformTable {
        &self.transforms
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }
}

/// Builder for [`Config`].
///
/// Starts from the default delimiters, the markup transform table and the
/// strict policy.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    delimiters: Delimiters,
    transforms: TransformTable,
    policy: ErrorPolicy,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            delimiters: Delimiters::default(),
            transforms: TransformTable::markup(),
            policy: ErrorPolicy::Strict,
        }
    }
}

impl ConfigBuilder {
    pub fn delimiters(mut self, delimiters: Delimiters) -> Self {
        self.delimiters = delimiters;
        self
    }

    pub fn transforms(mut self, transforms: TransformTable) -> Self {
        self.transforms = transforms;
        self
    }

    pub fn policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn build(self) -> Result<Arc<Config>, ConfigError> {
        Config::new(self.delimiters, self.transforms, self.policy)
    }
}

/// A color key entry in a settings document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorKey {
    pub key: String,
    pub color: String,
}

/// Serializable engine settings.
///
/// ```yaml
/// policy: lenient
/// delimiters:
///   chain: "."
///   index: "->"
///   reference: { open: "{", close: "}" }
///   directive: { open: "[", close: "]" }
///   directive_key: ":"
/// keys:
///   bold: b
///   italic: i
/// colors:
///   - { key: warn, color: orange }
///   - { key: brand, color: "#ff6b35" }
/// ```
///
/// Every section is optional; missing values fall back to the defaults.
/// The style keys come first in the resulting table, followed by the color
/// keys in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub policy: ErrorPolicy,
    pub delimiters: Delimiters,
    pub keys: KeySettings,
    pub colors: Vec<ColorKey>,
}

/// Key names of the built-in style transforms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeySettings {
    pub bold: String,
    pub italic: String,
    pub underline: String,
    pub strikethrough: String,
}

impl Default for KeySettings {
    fn default() -> Self {
        let keys = StyleKeys::default();
        Self {
            bold: keys.bold,
            italic: keys.italic,
            underline: keys.underline,
            strikethrough: keys.strikethrough,
        }
    }
}

impl From<KeySettings> for StyleKeys {
    fn from(keys: KeySettings) -> Self {
        StyleKeys {
            bold: keys.bold,
            italic: keys.italic,
            underline: keys.underline,
            strikethrough: keys.strikethrough,
        }
    }
}

impl Settings {
    /// Parses settings from YAML content.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads settings from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Builds the transform table these settings describe.
    pub fn transform_table(&self, output: Output) -> Result<TransformTable, ConfigError> {
        let keys: StyleKeys = self.keys.clone().into();
        let mut table = TransformTable::with_style_keys(output, &keys);

        for entry in &self.colors {
            let color =
                ColorDef::parse(&entry.color).map_err(|message| ConfigError::InvalidColor {
                    key: entry.key.clone(),
                    message,
                })?;
            table = table.color(entry.key.clone(), color);
        }

        Ok(table)
    }

    /// Builds a shared configuration for the given output family.
    pub fn into_config(self, output: Output) -> Result<Arc<Config>, ConfigError> {
        let transforms = self.transform_table(output)?;
        Config::new(self.delimiters, transforms, self.policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_delimiters() {
        let d = Delimiters::default();
        assert_eq!(d.chain, ".");
        assert_eq!(d.index, "->");
        assert_eq!(d.reference.wrap("x"), "{x}");
        assert_eq!(d.directive.wrap("x"), "[x]");
        assert_eq!(d.directive_key, ":");
    }

    #[test]
    fn empty_delimiter_rejected() {
        let delimiters = Delimiters {
            index: String::new(),
            ..Delimiters::default()
        };
        let err = Config::builder().delimiters(delimiters).build().unwrap_err();
        assert!(matches!(err, ConfigError::EmptyDelimiter("index")));
    }

    #[test]
    fn builder_defaults() {
        let config = Config::builder().build().unwrap();
        assert_eq!(config.policy(), ErrorPolicy::Strict);
        assert!(config.transforms().get("b").is_some());
        assert_eq!(config.delimiters(), &Delimiters::default());
    }

    #[test]
    fn settings_partial_document() {
        let settings = Settings::from_yaml(
            r##"
policy: lenient
delimiters:
  index: "#"
keys:
  bold: strong
colors:
  - { key: warn, color: orange }
"##,
        )
        .unwrap();

        assert_eq!(settings.policy, ErrorPolicy::Lenient);
        assert_eq!(settings.delimiters.index, "#");
        assert_eq!(settings.delimiters.chain, ".");
        assert_eq!(settings.keys.bold, "strong");
        assert_eq!(settings.keys.italic, "i");

        let config = settings.into_config(Output::Markup).unwrap();
        let keys: Vec<_> = config.transforms().keys().collect();
        assert_eq!(keys, vec!["strong", "i", "u", "s", "warn"]);
    }

    #[test]
    fn settings_empty_document_is_default() {
        let settings = Settings::from_yaml("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn settings_invalid_color() {
        let settings = Settings::from_yaml("colors:\n  - { key: x, color: \"#12\" }\n").unwrap();
        let err = settings.into_config(Output::Markup).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidColor { ref key, .. } if key == "x"));
    }

    #[test]
    fn settings_unknown_policy() {
        assert!(Settings::from_yaml("policy: sometimes").is_err());
    }

    #[test]
    fn config_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Config>();
        assert_send_sync::<Arc<Config>>();
    }
}
