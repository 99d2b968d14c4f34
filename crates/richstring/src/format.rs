//! Value formatting.
//!
//! Turning a value into text is the engine's one extension point: types
//! that implement [`RichFormat`](crate::RichFormat) supply their own normal
//! and alternate text. Everything else falls back to a default conversion.

use crate::error::Result;
use crate::resolve::ResolvedReference;
use crate::value::Value;

/// Converts a value to its display text.
///
/// | Value | Text |
/// |-------|------|
/// | `None` | empty string |
/// | object or custom value with a rich format | normal or alternate form |
/// | object without a rich format | [`Reflect::display_text`](crate::Reflect::display_text) |
/// | text | the text |
/// | number | `Display` (`10`, `-3`, `2.5`) |
/// | boolean | `true` / `false` |
/// | sequence | `[a, b, c]` |
pub fn value_text(value: &Value<'_>, alternate: bool) -> String {
    match value {
        Value::None => String::new(),
        Value::Text(text) => text.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Sequence(sequence) => sequence.display_text(),
        Value::Custom(custom) => {
            if alternate {
                custom.alternate_form()
            } else {
                custom.normal_form()
            }
        }
        Value::Object(object) => match object.rich_format() {
            Some(custom) if alternate => custom.alternate_form(),
            Some(custom) => custom.normal_form(),
            None => object.display_text().into_owned(),
        },
    }
}

/// Fetches the live value of a resolved reference and formats it.
pub fn format(resolved: &ResolvedReference<'_>, alternate: bool) -> Result<String> {
    let value = resolved.value()?;
    Ok(value_text(&value, alternate))
}
