//! Rich-text directive composition.
//!
//! A directive's inner text is `base:key1:key2…`. Each key is looked up in
//! the transform table and applied to the output of the previous one, so
//! `[Hi:b:u]` yields `<u><b>Hi</b></u>`.

use crate::config::Config;
use crate::error::{Result, RichStringError};
use crate::policy::Recovery;

/// Splits a directive into its base text and keys.
///
/// Returns `None` when there is no key separator at all.
pub fn split_directive<'s>(inner: &'s str, key_separator: &str) -> Option<(&'s str, Vec<&'s str>)> {
    let mut parts = inner.split(key_separator);
    let base = parts.next()?;
    let keys: Vec<&str> = parts.collect();
    if keys.is_empty() {
        return None;
    }
    Some((base, keys))
}

/// Applies the keys of a directive to its base text.
///
/// Unknown keys go through `recovery`: under the lenient policy they are
/// skipped and the text is left as it was.
pub(crate) fn compose(inner: &str, config: &Config, recovery: &mut Recovery<'_>) -> Result<String> {
    let delimiters = config.delimiters();
    let span = || delimiters.directive.wrap(inner);

    let Some((base, keys)) = split_directive(inner, &delimiters.directive_key) else {
        return Err(RichStringError::MissingDirective { span: span() });
    };

    let mut text = base.to_string();
    for key in keys {
        let lookup = config
            .transforms()
            .get(key)
            .ok_or_else(|| RichStringError::UnknownActionKey {
                key: key.to_string(),
                span: span(),
            });

        if let Some(transform) = recovery.recover(lookup.map(Some), || None)? {
            text = transform(&text);
        }
    }

    Ok(text)
}
