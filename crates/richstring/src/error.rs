//! Error types for the richstring crate.
//!
//! [`RichStringError`] covers everything that can go wrong while binding or
//! rendering a template. [`ConfigError`] covers building a [`Config`] or
//! loading [`Settings`].
//!
//! [`Config`]: crate::Config
//! [`Settings`]: crate::Settings

use std::fmt;

use thiserror::Error;

/// Errors raised while resolving references or composing directives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RichStringError {
    /// Empty or unparsable reference token.
    #[error("malformed reference '{token}': {reason}")]
    MalformedReference { token: String, reason: &'static str },

    /// No field or property with this name exists on the declaring type.
    #[error("there is no member named '{member}' in {type_name}")]
    MemberNotFound {
        member: String,
        type_name: &'static str,
    },

    /// More than one member answers to this name.
    #[error("member '{member}' in {type_name} is ambiguous ({candidates} candidates)")]
    AmbiguousMember {
        member: String,
        type_name: &'static str,
        candidates: usize,
    },

    /// An index was supplied on a member that is not a sequence.
    #[error("member '{member}' is not a sequence, but index {index} was requested")]
    NotIndexable { member: String, index: usize },

    /// The sequence ran out before the requested index was reached.
    #[error("index {index} is out of range for '{member}' ({len} items)")]
    IndexOutOfRange {
        member: String,
        index: usize,
        len: usize,
    },

    /// A link in the middle of a chain produced something without members.
    #[error("member '{member}' produced {found}, which has no members to look up")]
    NotNavigable { member: String, found: &'static str },

    /// A directive span without any transform key.
    #[error("there is no rich text key in '{span}'")]
    MissingDirective { span: String },

    /// A directive key with no entry in the transform table.
    #[error("unknown rich text key '{key}' in '{span}'")]
    UnknownActionKey { key: String, span: String },

    /// The template was rendered before being bound to an object.
    #[error("template is not bound to an object")]
    Unbound,
}

/// Result type for binding and rendering.
pub type Result<T> = std::result::Result<T, RichStringError>;

/// When an error was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Bind,
    Render,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Bind => f.write_str("bind"),
            Phase::Render => f.write_str("render"),
        }
    }
}

/// An error that was recovered from under [`ErrorPolicy::Lenient`].
///
/// [`ErrorPolicy::Lenient`]: crate::ErrorPolicy::Lenient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub phase: Phase,
    pub error: RichStringError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.phase, self.error)
    }
}

/// Errors raised while building a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A delimiter was configured as the empty string.
    #[error("delimiter '{0}' must not be empty")]
    EmptyDelimiter(&'static str),

    /// A color entry could not be parsed.
    #[error("invalid color for key '{key}': {message}")]
    InvalidColor { key: String, message: String },

    /// The settings document is not valid YAML for [`Settings`](crate::Settings).
    #[error("invalid settings: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The settings file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
