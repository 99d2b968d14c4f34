//! Proc macros for RichString.
//!
//! # Available Macros
//!
//! - [`Reflect`] - Generate the member registry that lets templates refer to
//!   struct members by name
//!
//! The generated code refers to the `richstring` crate by absolute path, so
//! use the derive through its re-export: `use richstring::Reflect;`.

mod reflect;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `Reflect` and `AsValue` for a struct with named fields.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `skip` | Do not expose this field to templates |
/// | `rename = "..."` | Use a custom name in templates |
///
/// # Container Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `rich_format` | The type implements `RichFormat`; use it when formatting |
/// | `name = "..."` | Type name reported in errors and default text |
/// | `property(name = "...", with = "...")` | Computed member read through a `fn(&Self) -> Value<'_>` |
/// | `property(..., sequence)` | The computed member can be indexed |
///
/// Every field type must implement `AsValue`. Whether a field accepts an
/// index is taken from `AsValue::SEQUENCE`, so `Vec<T>` fields are indexable
/// without any annotation.
///
/// # Generated Code
///
/// 1. Implementation of `Reflect` with a constant member table
/// 2. Implementation of `AsValue` returning the object itself
///
/// # Example
///
/// ```ignore
/// use richstring::{Reflect, Value, AsValue};
///
/// #[derive(Reflect)]
/// #[reflect(property(name = "label", with = "Weapon::label"))]
/// struct Weapon {
///     damage: f32,
///
///     #[reflect(rename = "fireRate")]
///     fire_rate: f32,
///
///     #[reflect(skip)]
///     serial: u64,
/// }
///
/// impl Weapon {
///     fn label(&self) -> Value<'_> {
///         Value::from(format!("{} dmg", self.damage))
///     }
/// }
/// ```
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn reflect_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    reflect::reflect_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
