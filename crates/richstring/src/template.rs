//! Template binding and rendering.
//!
//! A [`Template`] pairs a raw template string with a shared [`Config`].
//! Binding it to a root object resolves every reference once; rendering then
//! only fetches the current values and substitutes them, so a bound template
//! can be rendered as often as needed.
//!
//! # Example
//!
//! ```rust
//! use richstring::{Config, Reflect, Template};
//!
//! #[derive(Reflect)]
//! struct Weapon {
//!     name: String,
//!     damage: u32,
//! }
//!
//! let sword = Weapon { name: "Sword".into(), damage: 10 };
//! let config = Config::markup();
//!
//! let template = Template::bound("[{name}:b] deals {damage}", &sword, &config).unwrap();
//! assert_eq!(template.render(false).unwrap(), "<b>Sword</b> deals 10");
//! assert_eq!(template.raw_text(), "[{name}:b] deals {damage}");
//! ```

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::access::Reflect;
use crate::chain::ReferenceChain;
use crate::compose::compose;
use crate::config::Config;
use crate::error::{Diagnostic, Phase, Result, RichStringError};
use crate::format::format;
use crate::policy::Recovery;
use crate::resolve::{resolve, ResolvedReference};
use crate::token::Spans;

/// Output of [`Template::render_report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    /// Errors recovered from during this render (lenient policy only).
    pub diagnostics: Vec<Diagnostic>,
}

/// A template string, optionally bound to a root object.
///
/// The template borrows its root and every object reached while resolving
/// for `'a`, so the object graph must outlive it. Values read through
/// `Cell`/`RefCell` members are fetched again on every render; changes to
/// the shape of the graph need a new [`bind`](Template::bind).
pub struct Template<'a> {
    raw: String,
    config: Arc<Config>,
    root: Option<&'a dyn Reflect>,
    references: Vec<ResolvedReference<'a>>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Template<'a> {
    /// Creates an unbound template.
    pub fn new(raw: impl Into<String>, config: &Arc<Config>) -> Self {
        Self {
            raw: raw.into(),
            config: Arc::clone(config),
            root: None,
            references: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Creates a template and binds it to `root`.
    pub fn bound(raw: impl Into<String>, root: &'a dyn Reflect, config: &Arc<Config>) -> Result<Self> {
        let mut template = Self::new(raw, config);
        template.bind(root)?;
        Ok(template)
    }

    /// Binds the template to `root`, resolving every reference.
    ///
    /// Any previous binding is discarded first. Identical reference tokens
    /// are resolved once. Under the strict policy the first failure aborts
    /// the bind and leaves the template unbound; under the lenient policy
    /// failing references are recorded in [`diagnostics`](Self::diagnostics)
    /// and render as empty text.
    pub fn bind(&mut self, root: &'a dyn Reflect) -> Result<()> {
        self.root = None;
        self.references.clear();
        self.diagnostics.clear();

        let config = Arc::clone(&self.config);
        let delimiters = config.delimiters();
        let mut references = Vec::new();
        let mut diagnostics = Vec::new();
        let mut recovery = Recovery::new(config.policy(), Phase::Bind, &mut diagnostics);
        let mut seen = HashSet::new();

        for span in Spans::new(&self.raw, &delimiters.reference) {
            if !seen.insert(span.outer) {
                continue;
            }

            let resolved = ReferenceChain::parse(span.inner, delimiters)
                .and_then(|chain| resolve(span.outer, &chain, root));
            let resolved = recovery.recover(resolved, || ResolvedReference::unresolved(span.outer))?;
            references.push(resolved);
        }

        tracing::debug!(
            root = root.type_name(),
            references = references.len(),
            diagnostics = diagnostics.len(),
            "bound template"
        );

        self.root = Some(root);
        self.references = references;
        self.diagnostics = diagnostics;
        Ok(())
    }

    pub fn is_bound(&self) -> bool {
        self.root.is_some()
    }

    /// The template exactly as written, never affected by rendering.
    pub fn raw_text(&self) -> &str {
        &self.raw
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// The resolved references, in extraction order.
    pub fn references(&self) -> &[ResolvedReference<'a>] {
        &self.references
    }

    /// Errors recovered from during the last bind.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Produces the resolved string.
    ///
    /// `alternate` selects the alternate form of values that have a custom
    /// rich format.
    pub fn render(&self, alternate: bool) -> Result<String> {
        self.render_report(alternate).map(|rendered| rendered.text)
    }

    /// Like [`render`](Self::render), also returning the diagnostics
    /// recorded while rendering.
    pub fn render_report(&self, alternate: bool) -> Result<Rendered> {
        if self.root.is_none() {
            return Err(RichStringError::Unbound);
        }

        let config = &*self.config;
        let delimiters = config.delimiters();
        let mut diagnostics = Vec::new();
        let mut recovery = Recovery::new(config.policy(), Phase::Render, &mut diagnostics);

        let mut substituted = self.raw.clone();
        for reference in &self.references {
            let text = recovery.recover(format(reference, alternate), String::new)?;
            substituted = substituted.replace(reference.token(), &text);
        }

        let mut seen = HashSet::new();
        let directives: Vec<(String, String)> = Spans::new(&substituted, &delimiters.directive)
            .filter(|span| seen.insert(span.outer))
            .map(|span| (span.outer.to_string(), span.inner.to_string()))
            .collect();

        let mut text = substituted.clone();
        for (outer, inner) in directives {
            let composed = compose(&inner, config, &mut recovery);
            let composed = recovery.recover(composed, String::new)?;
            text = text.replace(&outer, &composed);
        }

        Ok(Rendered { text, diagnostics })
    }
}

impl fmt::Debug for Template<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("raw", &self.raw)
            .field("root", &self.root.map(|root| root.type_name()))
            .field("references", &self.references)
            .field("diagnostics", &self.diagnostics)
            .finish()
    }
}
