//! Reference chains: the member paths inside reference spans.
//!
//! A token such as `items->2.name` becomes two [`Link`]s: `items` at index
//! `2`, then `name`. The separators come from [`Delimiters`].

use std::fmt;

use crate::config::Delimiters;
use crate::error::{Result, RichStringError};

/// One segment of a member path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Member name looked up on the declaring object.
    pub name: String,
    /// Sequence index, when the link indexes into a sequence.
    pub index: Option<usize>,
}

impl Link {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index: None,
        }
    }

    pub fn indexed(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index: Some(index),
        }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}[{}]", self.name, index),
            None => f.write_str(&self.name),
        }
    }
}

/// An ordered, non-empty list of links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceChain {
    links: Vec<Link>,
}

impl ReferenceChain {
    /// Parses the inner text of a reference span.
    ///
    /// Fails with `MalformedReference` when the token is empty, when a link
    /// is empty or has no member name, when a link carries more than one
    /// index separator, or when an index is not a non-negative integer.
    ///
    /// ```
    /// use richstring::chain::{Link, ReferenceChain};
    /// use richstring::Delimiters;
    ///
    /// let chain = ReferenceChain::parse("items->2.name", &Delimiters::default()).unwrap();
    /// assert_eq!(chain.links(), &[Link::indexed("items", 2), Link::new("name")]);
    /// ```
    pub fn parse(token: &str, delimiters: &Delimiters) -> Result<Self> {
        let malformed = |reason: &'static str| RichStringError::MalformedReference {
            token: token.to_string(),
            reason,
        };

        if token.is_empty() {
            return Err(malformed("empty reference"));
        }

        let links = token
            .split(delimiters.chain.as_str())
            .map(|segment| {
                if segment.is_empty() {
                    return Err(malformed("empty link in chain"));
                }

                let mut parts = segment.split(delimiters.index.as_str());
                let name = parts.next().unwrap_or_default();
                let index = parts.next();
                if parts.next().is_some() {
                    return Err(malformed("more than one index in a link"));
                }
                if name.is_empty() {
                    return Err(malformed("missing member name"));
                }

                let index = match index {
                    Some(raw) => Some(
                        raw.parse::<usize>()
                            .map_err(|_| malformed("index is not a non-negative integer"))?,
                    ),
                    None => None,
                };

                Ok(Link {
                    name: name.to_string(),
                    index,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { links })
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Always `false`; parsing never yields an empty chain.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
