//! RichString - runtime string templates over live object graphs.
//!
//! A template mixes two small languages:
//!
//! - **References** `{weapon.damage}`, `{items->2.name}`: member paths
//!   resolved by name against a root object, following chains and indexing
//!   into sequences.
//! - **Directives** `[text:b:u]`: base text followed by transform keys,
//!   applied left to right (`<u><b>text</b></u>`).
//!
//! # Quick Start
//!
//! ```rust
//! use richstring::{Config, Reflect, RichFormat, Template};
//!
//! #[derive(Reflect)]
//! #[reflect(rich_format)]
//! struct Weapon {
//!     damage: f32,
//!     fire_rate: f32,
//! }
//!
//! impl RichFormat for Weapon {
//!     fn normal_form(&self) -> String {
//!         format!("Damage: {}", self.damage)
//!     }
//!
//!     fn alternate_form(&self) -> String {
//!         format!("Damage: {}, Fire Rate: {}", self.damage, self.fire_rate)
//!     }
//! }
//!
//! #[derive(Reflect)]
//! struct Inventory {
//!     max_slots: u32,
//!     weapons: Vec<Weapon>,
//! }
//!
//! let inventory = Inventory {
//!     max_slots: 10,
//!     weapons: vec![
//!         Weapon { damage: 12.0, fire_rate: 1.5 },
//!         Weapon { damage: 40.0, fire_rate: 0.5 },
//!     ],
//! };
//!
//! let config = Config::markup();
//! let template = Template::bound(
//!     "[Slots:b] {max_slots} | {weapons->1}",
//!     &inventory,
//!     &config,
//! )
//! .unwrap();
//!
//! assert_eq!(template.render(false).unwrap(), "<b>Slots</b> 10 | Damage: 40");
//! assert_eq!(
//!     template.render(true).unwrap(),
//!     "<b>Slots</b> 10 | Damage: 40, Fire Rate: 0.5"
//! );
//! ```
//!
//! # Rendering Pipeline
//!
//! 1. `bind` extracts every reference span and resolves its member path
//!    once. Only the last member's value is left unfetched.
//! 2. `render` fetches the current value of each reference, formats it and
//!    replaces every occurrence of the token.
//! 3. The substituted string is scanned for directive spans, and each span
//!    is replaced by its composed text. Directive output is not scanned
//!    again.
//!
//! # Errors
//!
//! With [`ErrorPolicy::Strict`] the first error aborts the call. With
//! [`ErrorPolicy::Lenient`] errors become [`Diagnostic`]s, are logged through
//! `tracing`, and the failing piece renders as empty text (unknown directive
//! keys are skipped instead).

extern crate self as richstring;

mod access;
pub mod chain;
mod color;
mod compose;
mod config;
mod error;
mod format;
mod policy;
pub mod resolve;
mod template;
pub mod token;
mod transform;
mod value;

// Re-export public API
pub use access::{AsValue, Getter, MemberInfo, MemberKind, MemberTable, Reflect, RichFormat, Sequence};
pub use color::{rgb_to_ansi256, ColorDef};
pub use compose::split_directive;
pub use config::{
    ColorKey, Config, ConfigBuilder, Delimiters, ErrorPolicy, KeySettings, Settings, SpanDelimiters,
};
pub use error::{ConfigError, Diagnostic, Phase, Result, RichStringError};
pub use format::{format, value_text};
pub use resolve::ResolvedReference;
pub use template::{Rendered, Template};
pub use transform::{markup, Output, StyleKeys, Transform, TransformTable};
pub use value::{Number, Value};

/// Derives [`Reflect`] and [`AsValue`] for a struct.
///
/// See the `richstring-macros` crate for the supported attributes.
pub use richstring_macros::Reflect;
