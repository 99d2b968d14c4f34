//! Reference resolution.
//!
//! Resolving walks a [`ReferenceChain`] from the root object, fetching the
//! value of every link except the last and using it as the declaring object
//! of the next link. The last link is only looked up: its value is fetched
//! each time the reference is formatted, so repeated renders see the current
//! state of the object graph without walking the chain again.

use std::fmt;

use crate::access::{MemberInfo, Reflect};
use crate::chain::ReferenceChain;
use crate::error::{Result, RichStringError};
use crate::value::Value;

/// Finds the unique member called `name` on `target`.
pub fn lookup(target: &dyn Reflect, name: &str) -> Result<MemberInfo> {
    let mut candidates = target.members().iter().filter(|m| m.name == name);

    match (candidates.next(), candidates.next()) {
        (Some(info), None) => Ok(*info),
        (None, _) => Err(RichStringError::MemberNotFound {
            member: name.to_string(),
            type_name: target.type_name(),
        }),
        (Some(_), Some(_)) => Err(RichStringError::AmbiguousMember {
            member: name.to_string(),
            type_name: target.type_name(),
            candidates: 2 + candidates.count(),
        }),
    }
}

/// Reads a member from its declaring object, applying an index if given.
pub fn fetch<'a>(
    declaring: &'a dyn Reflect,
    member: &MemberInfo,
    index: Option<usize>,
) -> Result<Value<'a>> {
    let value = declaring.member_value(member.name);

    let Some(index) = index else {
        return Ok(value);
    };

    let Value::Sequence(sequence) = value else {
        return Err(RichStringError::NotIndexable {
            member: member.name.to_string(),
            index,
        });
    };

    let mut len = 0;
    for item in sequence.items() {
        if len == index {
            return Ok(item);
        }
        len += 1;
    }

    Err(RichStringError::IndexOutOfRange {
        member: member.name.to_string(),
        index,
        len,
    })
}

/// The last link of a chain, bound to the object that declares it.
#[derive(Clone, Copy)]
pub struct Target<'a> {
    pub member: MemberInfo,
    pub declaring: &'a dyn Reflect,
    pub index: Option<usize>,
}

impl fmt::Debug for Target<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("member", &self.member)
            .field("declaring", &self.declaring.type_name())
            .field("index", &self.index)
            .finish()
    }
}

/// A reference whose member path has been resolved against an object graph.
///
/// The declaring object is borrowed for `'a`, the lifetime of the bound
/// root, so a resolved reference can never outlive the graph it points into.
#[derive(Debug, Clone)]
pub struct ResolvedReference<'a> {
    token: String,
    target: Option<Target<'a>>,
}

impl<'a> ResolvedReference<'a> {
    /// A placeholder for a reference that failed to resolve. It always
    /// formats to the empty string.
    pub fn unresolved(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            target: None,
        }
    }

    /// The bracketed token as it appears in the template.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn target(&self) -> Option<&Target<'a>> {
        self.target.as_ref()
    }

    pub fn is_resolved(&self) -> bool {
        self.target.is_some()
    }

    pub fn member(&self) -> Option<&MemberInfo> {
        self.target.as_ref().map(|t| &t.member)
    }

    pub fn is_indexed(&self) -> bool {
        self.target.is_some_and(|t| t.index.is_some())
    }

    pub fn index(&self) -> Option<usize> {
        self.target.and_then(|t| t.index)
    }

    /// Fetches the current value of the referenced member.
    pub fn value(&self) -> Result<Value<'a>> {
        match &self.target {
            Some(target) => fetch(target.declaring, &target.member, target.index),
            None => Ok(Value::None),
        }
    }
}

/// Resolves `chain` against `root`.
///
/// `token` is the bracketed text the reference was extracted from; it is
/// kept on the result for substitution.
pub fn resolve<'a>(
    token: impl Into<String>,
    chain: &ReferenceChain,
    root: &'a dyn Reflect,
) -> Result<ResolvedReference<'a>> {
    let links = chain.links();
    let mut declaring = root;

    for (i, link) in links.iter().enumerate() {
        let member = lookup(declaring, &link.name)?;

        if let Some(index) = link.index {
            if !member.sequence {
                return Err(RichStringError::NotIndexable {
                    member: member.name.to_string(),
                    index,
                });
            }
        }

        if i + 1 == links.len() {
            return Ok(ResolvedReference {
                token: token.into(),
                target: Some(Target {
                    member,
                    declaring,
                    index: link.index,
                }),
            });
        }

        declaring = match fetch(declaring, &member, link.index)? {
            Value::Object(next) => next,
            other => {
                return Err(RichStringError::NotNavigable {
                    member: link.to_string(),
                    found: other.kind(),
                })
            }
        };
    }

    Err(RichStringError::MalformedReference {
        token: token.into(),
        reason: "empty reference",
    })
}
