//! Span extraction for both micro-languages.
//!
//! [`Spans`] walks a string and yields every substring enclosed by a
//! [`SpanDelimiters`] pair. Matching is shortest-first: an opening delimiter
//! pairs with the nearest closing delimiter after it, and spans never nest.
//!
//! ```
//! use richstring::token::Spans;
//! use richstring::SpanDelimiters;
//!
//! let braces = SpanDelimiters::new("{", "}");
//! let inner: Vec<_> = Spans::new("{a} and {b.c}", &braces).map(|s| s.inner).collect();
//! assert_eq!(inner, vec!["a", "b.c"]);
//! ```

use crate::config::SpanDelimiters;

/// One delimited span found in a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    /// Text between the delimiters.
    pub inner: &'a str,
    /// The span including its delimiters, as it appears in the source.
    pub outer: &'a str,
    /// Byte offset of the opening delimiter.
    pub start: usize,
}

/// Lazy iterator over the spans of a string.
///
/// Building a new iterator scans the same string again from the start.
///
/// A span never crosses a line break: if a newline comes before the
/// closing delimiter, the opening delimiter is literal text and scanning
/// continues right after it.
#[derive(Debug, Clone)]
pub struct Spans<'a> {
    input: &'a str,
    open: &'a str,
    close: &'a str,
    pos: usize,
}

impl<'a> Spans<'a> {
    pub fn new(input: &'a str, delimiters: &'a SpanDelimiters) -> Self {
        Self {
            input,
            open: &delimiters.open,
            close: &delimiters.close,
            pos: 0,
        }
    }
}

impl<'a> Iterator for Spans<'a> {
    type Item = Span<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        // Empty delimiters would never advance
        if self.open.is_empty() || self.close.is_empty() {
            return None;
        }

        while self.pos < self.input.len() {
            let remaining = &self.input[self.pos..];
            let open_at = remaining.find(self.open)?;
            let start = self.pos + open_at;
            let content_start = start + self.open.len();
            let after_open = &self.input[content_start..];

            let Some(close_at) = after_open.find(self.close) else {
                // No closing delimiter anywhere after this point
                self.pos = self.input.len();
                return None;
            };

            let inner = &after_open[..close_at];
            if inner.contains('\n') {
                self.pos = content_start;
                continue;
            }

            let end = content_start + close_at + self.close.len();
            self.pos = end;
            return Some(Span {
                inner,
                outer: &self.input[start..end],
                start,
            });
        }

        None
    }
}
