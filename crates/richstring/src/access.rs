//! The member-accessor capability.
//!
//! Templates name members at runtime (`{weapon.damage}`), so every type that
//! takes part in a template exposes a small registry: the list of its members
//! and a getter per name. The resolver only ever talks to these traits.
//!
//! There are two ways to build the registry:
//!
//! - `#[derive(Reflect)]`, which generates everything from the struct fields;
//! - by hand, typically with a [`MemberTable`] kept in a lazy static.
//!
//! # Manual Implementation
//!
//! ```
//! use once_cell::sync::Lazy;
//! use richstring::{AsValue, MemberInfo, MemberTable, Reflect, Value};
//!
//! struct Weapon {
//!     name: String,
//!     damage: u32,
//! }
//!
//! static WEAPON: Lazy<MemberTable<Weapon>> = Lazy::new(|| {
//!     MemberTable::<Weapon>::new("Weapon")
//!         .field("name", |w| w.name.as_value())
//!         .field("damage", |w| w.damage.as_value())
//! });
//!
//! impl Reflect for Weapon {
//!     fn type_name(&self) -> &'static str {
//!         WEAPON.type_name()
//!     }
//!
//!     fn members(&self) -> &'static [MemberInfo] {
//!         WEAPON.members()
//!     }
//!
//!     fn member_value(&self, name: &str) -> Value<'_> {
//!         WEAPON.get(self, name)
//!     }
//! }
//!
//! let sword = Weapon { name: "Sword".into(), damage: 10 };
//! assert_eq!(sword.member_value("name").as_str(), Some("Sword"));
//! ```

use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use crate::format::value_text;
use crate::value::{Number, Value};

/// Whether a member is stored data or computed on access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    Property,
}

/// Registry entry describing one member of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberInfo {
    /// The name templates use to refer to the member.
    pub name: &'static str,
    pub kind: MemberKind,
    /// Whether the member holds a sequence that accepts an index.
    pub sequence: bool,
}

impl MemberInfo {
    /// Describes a stored field.
    pub const fn field(name: &'static str, sequence: bool) -> Self {
        Self {
            name,
            kind: MemberKind::Field,
            sequence,
        }
    }

    /// Describes a computed property.
    pub const fn property(name: &'static str, sequence: bool) -> Self {
        Self {
            name,
            kind: MemberKind::Property,
            sequence,
        }
    }
}

/// Types whose members can be referenced by name from a template.
///
/// Usually derived with `#[derive(Reflect)]`; see the module docs for a
/// hand-written implementation.
pub trait Reflect {
    /// Name of the type, used in error messages and as the default text.
    fn type_name(&self) -> &'static str;

    /// Every member this type exposes, in declaration order.
    ///
    /// Names should be unique. When two entries share a name, references to
    /// that name fail with `AmbiguousMember`.
    fn members(&self) -> &'static [MemberInfo];

    /// Returns the current value of a member, or [`Value::None`] if the
    /// member doesn't exist.
    fn member_value(&self, name: &str) -> Value<'_>;

    /// The custom rich-format capability of this object, if it has one.
    fn rich_format(&self) -> Option<&dyn RichFormat> {
        None
    }

    /// Default text for the object when it has no custom format.
    fn display_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.type_name())
    }
}

/// Types that provide their own normal and alternate textual forms.
///
/// A template renders the alternate form only when rendering is asked for it
/// explicitly.
///
/// ```
/// use richstring::RichFormat;
///
/// struct Weapon { damage: f32, fire_rate: f32 }
///
/// impl RichFormat for Weapon {
///     fn normal_form(&self) -> String {
///         format!("Damage: {}", self.damage)
///     }
///
///     fn alternate_form(&self) -> String {
///         format!("Damage: {}, Fire Rate: {}", self.damage, self.fire_rate)
///     }
/// }
/// ```
pub trait RichFormat {
    fn normal_form(&self) -> String;
    fn alternate_form(&self) -> String;
}

/// A sequence member that can be indexed.
///
/// Indexing walks [`items`](Sequence::items) from the start, so any iterable
/// collection qualifies.
pub trait Sequence {
    fn items(&self) -> Box<dyn Iterator<Item = Value<'_>> + '_>;

    /// Default text for the whole sequence: `[a, b, c]`.
    fn display_text(&self) -> String {
        let items: Vec<String> = self
            .items()
            .map(|item| value_text(&item, false))
            .collect();
        format!("[{}]", items.join(", "))
    }
}

/// Conversion of member types into [`Value`].
///
/// Implemented for strings, numbers, booleans, options, boxes, the common
/// sequence types and the interior-mutability cells that make live updates
/// visible between renders. `#[derive(Reflect)]` also implements it for the
/// derived type.
pub trait AsValue {
    /// Whether values of this type can be indexed.
    const SEQUENCE: bool = false;

    fn as_value(&self) -> Value<'_>;
}

impl AsValue for str {
    fn as_value(&self) -> Value<'_> {
        Value::Text(Cow::Borrowed(self))
    }
}

impl AsValue for String {
    fn as_value(&self) -> Value<'_> {
        Value::Text(Cow::Borrowed(self.as_str()))
    }
}

impl AsValue for Cow<'_, str> {
    fn as_value(&self) -> Value<'_> {
        Value::Text(Cow::Borrowed(self.as_ref()))
    }
}

impl AsValue for char {
    fn as_value(&self) -> Value<'_> {
        Value::Text(Cow::Owned(self.to_string()))
    }
}

impl AsValue for bool {
    fn as_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

macro_rules! number_as_value {
    ($($t:ty),*) => {
        $(
            impl AsValue for $t {
                fn as_value(&self) -> Value<'_> {
                    Value::Number(Number::from(*self))
                }
            }
        )*
    };
}

number_as_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl<T: AsValue + ?Sized> AsValue for &T {
    const SEQUENCE: bool = T::SEQUENCE;

    fn as_value(&self) -> Value<'_> {
        (**self).as_value()
    }
}

impl<T: AsValue + ?Sized> AsValue for Box<T> {
    const SEQUENCE: bool = T::SEQUENCE;

    fn as_value(&self) -> Value<'_> {
        (**self).as_value()
    }
}

impl<T: AsValue> AsValue for Option<T> {
    const SEQUENCE: bool = T::SEQUENCE;

    fn as_value(&self) -> Value<'_> {
        match self {
            Some(value) => value.as_value(),
            None => Value::None,
        }
    }
}

macro_rules! number_cell_as_value {
    ($($t:ty),*) => {
        $(
            impl AsValue for Cell<$t> {
                fn as_value(&self) -> Value<'_> {
                    Value::Number(Number::from(self.get()))
                }
            }
        )*
    };
}

number_cell_as_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl AsValue for Cell<bool> {
    fn as_value(&self) -> Value<'_> {
        Value::Bool(self.get())
    }
}

impl AsValue for Cell<char> {
    fn as_value(&self) -> Value<'_> {
        Value::Text(Cow::Owned(self.get().to_string()))
    }
}

impl AsValue for RefCell<String> {
    fn as_value(&self) -> Value<'_> {
        Value::Text(Cow::Owned(self.borrow().clone()))
    }
}

impl<T: AsValue> Sequence for Vec<T> {
    fn items(&self) -> Box<dyn Iterator<Item = Value<'_>> + '_> {
        Box::new(self.iter().map(|item| item.as_value()))
    }
}

impl<T: AsValue> AsValue for Vec<T> {
    const SEQUENCE: bool = true;

    fn as_value(&self) -> Value<'_> {
        Value::Sequence(self)
    }
}

impl<T: AsValue> Sequence for VecDeque<T> {
    fn items(&self) -> Box<dyn Iterator<Item = Value<'_>> + '_> {
        Box::new(self.iter().map(|item| item.as_value()))
    }
}

impl<T: AsValue> AsValue for VecDeque<T> {
    const SEQUENCE: bool = true;

    fn as_value(&self) -> Value<'_> {
        Value::Sequence(self)
    }
}

impl<T: AsValue, const N: usize> Sequence for [T; N] {
    fn items(&self) -> Box<dyn Iterator<Item = Value<'_>> + '_> {
        Box::new(self.iter().map(|item| item.as_value()))
    }
}

impl<T: AsValue, const N: usize> AsValue for [T; N] {
    const SEQUENCE: bool = true;

    fn as_value(&self) -> Value<'_> {
        Value::Sequence(self)
    }
}

/// Getter stored in a [`MemberTable`].
pub type Getter<T> = for<'a> fn(&'a T) -> Value<'a>;

/// A hand-built member registry for one type.
///
/// Build it once, usually in a `once_cell::sync::Lazy` static, and delegate
/// the [`Reflect`] methods to it.
pub struct MemberTable<T> {
    type_name: &'static str,
    members: Vec<MemberInfo>,
    getters: Vec<Getter<T>>,
}

impl<T> MemberTable<T> {
    /// Creates an empty table for the named type.
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            members: Vec::new(),
            getters: Vec::new(),
        }
    }

    /// Registers a stored field.
    pub fn field(self, name: &'static str, getter: Getter<T>) -> Self {
        self.member(MemberInfo::field(name, false), getter)
    }

    /// Registers a stored field holding a sequence.
    pub fn sequence(self, name: &'static str, getter: Getter<T>) -> Self {
        self.member(MemberInfo::field(name, true), getter)
    }

    /// Registers a computed property.
    pub fn property(self, name: &'static str, getter: Getter<T>) -> Self {
        self.member(MemberInfo::property(name, false), getter)
    }

    /// Registers a member with a fully specified descriptor.
    pub fn member(mut self, info: MemberInfo, getter: Getter<T>) -> Self {
        self.members.push(info);
        self.getters.push(getter);
        self
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn members(&self) -> &[MemberInfo] {
        &self.members
    }

    /// Reads a member through the first getter registered under `name`.
    pub fn get<'a>(&self, item: &'a T, name: &str) -> Value<'a> {
        self.members
            .iter()
            .position(|info| info.name == name)
            .map(|i| (self.getters[i])(item))
            .unwrap_or(Value::None)
    }
}
