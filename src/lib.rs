//! A template tree expansion engine.
//!
//! # Features
//!
//! ### Templates
//!
//! - Templates are trees: markup [`Element`]s interleaved with placeholders
//! - Variable references: `{{ user.name }}`, and raw references:
//!   `{{{ user.bio }}}`
//! - Block helpers: `{{#each items}} ... {{/each}}`
//! - Parent references that always reach the top-level context:
//!   `{{ ../title }}`
//! - A plain data form, so templates can be written as JSON or any other
//!   [`serde`] format
//!
//! ### Engine
//!
//! - Expand a template against a context into a resolved tree
//! - Render the same template to `{{ }}` placeholder syntax for a client-side
//!   renderer
//! - Custom block helpers alongside `with`, `each`, `if`, `unless` and `else`
//! - Serialize the resolved tree to markup text, to a [`String`] or any
//!   [`std::io::Write`] implementor
//! - Convenient macro for contexts: `arbor::value!{ name: "John", age: 42 }`
//!
//! # Getting started
//!
//! Your entry point is the [`Engine`] struct. The engine stores the block
//! helpers and named templates. Generally, you only need to construct one
//! engine during the lifetime of a program.
//!
//! ```
//! let engine = arbor::Engine::new();
//! ```
//!
//! Templates are built from nodes. Placeholders are created through the
//! validating builders on [`Node`].
//!
//! ```
//! use arbor::{Element, Node};
//!
//! let template = Element::new("p")?
//!     .child("Hello ")
//!     .child(Node::var("user.name")?);
//! # Ok::<(), arbor::Error>(())
//! ```
//!
//! [`.add_template`][Engine::add_template] stores a template in the engine
//! under a name, [`.get_template`][Engine::get_template] fetches it again.
//!
//! ```
//! # use arbor::{Element, Node};
//! # let template = Element::new("p")?.child("Hello ").child(Node::var("user.name")?);
//! let mut engine = arbor::Engine::new();
//! engine.add_template("hello", template)?;
//!
//! let result = engine
//!     .get_template("hello")
//!     .unwrap()
//!     .expand(arbor::value! { user: { name: "John Smith" } })?;
//! assert_eq!(arbor::to_text(&result)?, "<p>Hello John Smith</p>");
//! # Ok::<(), arbor::Error>(())
//! ```
//!
//! The same template can instead be rendered to placeholder syntax. No context
//! is needed and no helper is called.
//!
//! ```
//! # use arbor::{Element, Node};
//! # let template = Element::new("p")?.child("Hello ").child(Node::var("user.name")?);
//! # let mut engine = arbor::Engine::new();
//! # engine.add_template("hello", template)?;
//! let result = engine.to_syntax("hello")?;
//! assert_eq!(arbor::to_text(&result)?, "<p>Hello {{user.name}}</p>");
//! # Ok::<(), arbor::Error>(())
//! ```
//!
//! # Examples
//!
//! ### Iterate over a list
//!
//! ```
//! use arbor::{Element, Node};
//!
//! let list = Element::new("ul")?.child(Node::block(
//!     "each",
//!     "users",
//!     [Element::new("li")?.child(Node::var("name")?)],
//! )?);
//!
//! let ctx = arbor::value! { users: [{ name: "Ann" }, { name: "Bob" }] };
//! let result = arbor::Engine::new().expand(&Node::from(list), ctx)?;
//! assert_eq!(arbor::to_text(&result)?, "<ul><li>Ann</li><li>Bob</li></ul>");
//! # Ok::<(), arbor::Error>(())
//! ```
//!
//! ### Expand using structured data
//!
//! ```
//! #[derive(serde::Serialize)]
//! struct Context { user: User }
//!
//! #[derive(serde::Serialize)]
//! struct User { name: String }
//!
//! let ctx = Context { user: User { name: "John Smith".into() } };
//! let template = arbor::Node::var("user.name")?;
//!
//! let result = arbor::Engine::new().expand(&template, &ctx)?;
//! assert_eq!(result, arbor::Node::literal("John Smith"));
//! # Ok::<(), arbor::Error>(())
//! ```
//!
//! ### Write a template as data
//!
//! ```
//! let data = serde_json::json!(["p", { "class": ["::var", "kind"] }, "Hi"]);
//! let template = arbor::Template::from_serde(&data)?;
//!
//! let result = arbor::Engine::new().expand(&template, arbor::value! { kind: "note" })?;
//! assert_eq!(arbor::to_text(&result)?, r#"<p class="note">Hi</p>"#);
//! # Ok::<(), arbor::Error>(())
//! ```
//!
//! ### Serialize to an `impl io::Write`
//!
//! ```
//! use std::io;
//!
//! let stdout = io::BufWriter::new(io::stdout());
//! let result = arbor::Engine::new()
//!     .expand(&arbor::Node::var("greeting")?, arbor::value! { greeting: "Hello" })?;
//! arbor::to_writer(stdout, &result)?;
//! # Ok::<(), arbor::Error>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
mod macros;

mod error;
mod fmt;
pub mod form;
pub mod helpers;
mod markup;
mod render;
mod types;
mod value;

use std::borrow::Cow;
use std::collections::BTreeMap;

pub use crate::error::{Error, ErrorKind, Result};
pub use crate::helpers::{Body, HelperFn};
pub use crate::markup::{to_text, to_writer};
pub use crate::render::resolve;
pub use crate::types::path::Path;
pub use crate::types::tree::{Attrs, Block, Element, Node, Template};
#[cfg(feature = "serde")]
pub use crate::value::to_value;
pub use crate::value::{List, Map, Value};

/// The default limit on nested blocks.
const DEFAULT_MAX_DEPTH: usize = 64;

/// The expansion engine.
///
/// Holds the block helpers and the named templates. Engines are independent
/// of each other.
pub struct Engine {
    helpers: BTreeMap<String, Box<HelperFn>>,
    templates: BTreeMap<String, Template>,
    max_depth: usize,
}

/// A template to evaluate.
///
/// Usually constructed implicitly through one of the [`From`]
/// implementations when calling an [`Engine`] method.
pub enum Source<'a> {
    /// A tree, used as is.
    Node(&'a Node),
    /// The name of a template registered with [`Engine::add_template`].
    Name(&'a str),
    /// A function producing the template, called once before evaluation.
    Fn(Box<dyn FnOnce() -> Template + 'a>),
}

/// A reference to a template stored in an [`Engine`].
#[derive(Clone, Copy)]
pub struct TemplateRef<'engine> {
    engine: &'engine Engine,
    name: &'engine str,
    template: &'engine Template,
}

impl Default for Engine {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Construct a new engine with the builtin helpers registered.
    #[inline]
    pub fn new() -> Self {
        #[allow(unused_mut)]
        let mut engine = Self::empty();
        #[cfg(feature = "builtins")]
        {
            use crate::helpers::builtins;
            engine.add_helper("with", builtins::with);
            engine.add_helper("each", builtins::each);
            engine.add_helper("if", builtins::when);
            engine.add_helper("unless", builtins::unless);
            engine.add_helper("else", builtins::unless);
        }
        engine
    }

    /// Construct a new engine without any helpers.
    #[inline]
    pub fn empty() -> Self {
        Self {
            helpers: BTreeMap::new(),
            templates: BTreeMap::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the maximum nesting depth of blocks.
    ///
    /// Defaults to 64. Expansion fails with [`ErrorKind::MaxDepth`] once a
    /// block would be dispatched at this depth.
    #[inline]
    pub fn set_max_depth(&mut self, depth: usize) {
        self.max_depth = depth;
    }

    /// Add a block helper to the engine, replacing any helper of the same
    /// name.
    ///
    /// See the [`helpers`] module for more information.
    #[inline]
    pub fn add_helper<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&Value, &Body<'_>) -> Result<Node> + Send + Sync + 'static,
    {
        let name = name.into();
        tracing::debug!(helper = %name, "adding helper");
        self.helpers.insert(name, Box::new(f));
    }

    /// Add a template to the engine under the given name, replacing any
    /// template of the same name.
    ///
    /// # Errors
    ///
    /// If the name is empty.
    pub fn add_template(
        &mut self,
        name: impl Into<String>,
        template: impl Into<Template>,
    ) -> Result<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::invalid_argument("template name must not be empty"));
        }
        tracing::debug!(template = %name, "adding template");
        self.templates.insert(name, template.into());
        Ok(())
    }

    /// Lookup a template by name.
    #[inline]
    pub fn get_template(&self, name: &str) -> Option<TemplateRef<'_>> {
        self.templates
            .get_key_value(name)
            .map(|(name, template)| TemplateRef {
                engine: self,
                name,
                template,
            })
    }

    /// Evaluate a template.
    ///
    /// With a context the template is expanded against it. Without one it is
    /// rendered to placeholder syntax.
    ///
    /// # Errors
    ///
    /// If a named source is not registered, or expansion fails.
    pub fn apply<'a, S>(&self, source: S, ctx: Option<&Value>) -> Result<Node>
    where
        S: Into<Source<'a>>,
    {
        let (root, name) = source.into().resolve(self)?;
        let result = match ctx {
            Some(ctx) => render::expand(self, &root, ctx),
            None => Ok(render::syntax(&root)),
        };
        match name {
            Some(name) => result.map_err(|e| e.with_template_name(name)),
            None => result,
        }
    }

    /// Expand a template against any serializable context.
    ///
    /// # Errors
    ///
    /// If the context cannot be converted to a [`Value`], or
    /// [`apply`][Engine::apply] fails.
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    pub fn expand<'a, S, C>(&self, source: S, ctx: C) -> Result<Node>
    where
        S: Into<Source<'a>>,
        C: serde::Serialize,
    {
        let ctx = to_value(ctx)?;
        self.apply(source, Some(&ctx))
    }

    /// Expand a template against a [`Value`].
    #[inline]
    pub fn expand_from<'a, S>(&self, source: S, ctx: &Value) -> Result<Node>
    where
        S: Into<Source<'a>>,
    {
        self.apply(source, Some(ctx))
    }

    /// Render a template to placeholder syntax.
    #[inline]
    pub fn to_syntax<'a, S>(&self, source: S) -> Result<Node>
    where
        S: Into<Source<'a>>,
    {
        self.apply(source, None)
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("helpers", &self.helpers.keys())
            .field("templates", &self.templates.keys())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

impl<'a> Source<'a> {
    /// A source that calls `f` to produce the template.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnOnce() -> Template + 'a,
    {
        Self::Fn(Box::new(f))
    }

    /// Resolves the source to a tree and, for named sources, the name.
    fn resolve<'e>(self, engine: &'e Engine) -> Result<(Cow<'e, Node>, Option<&'e str>)>
    where
        'a: 'e,
    {
        match self {
            Self::Node(node) => Ok((Cow::Borrowed(node), None)),
            Self::Name(name) => {
                tracing::trace!(template = name, "looking up template");
                let (name, template) = engine
                    .templates
                    .get_key_value(name)
                    .ok_or_else(|| Error::unknown_template(name))?;
                Ok((Cow::Borrowed(template.root()), Some(name.as_str())))
            }
            Self::Fn(f) => Ok((Cow::Owned(f().into_root()), None)),
        }
    }
}

impl std::fmt::Debug for Source<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Node(node) => f.debug_tuple("Node").field(node).finish(),
            Self::Name(name) => f.debug_tuple("Name").field(name).finish(),
            Self::Fn(_) => f.debug_tuple("Fn").finish_non_exhaustive(),
        }
    }
}

impl<'a> From<&'a Node> for Source<'a> {
    fn from(node: &'a Node) -> Self {
        Self::Node(node)
    }
}

impl<'a> From<&'a Template> for Source<'a> {
    fn from(template: &'a Template) -> Self {
        Self::Node(template.root())
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl<'a> From<&'a String> for Source<'a> {
    fn from(name: &'a String) -> Self {
        Self::Name(name)
    }
}

impl<'engine> TemplateRef<'engine> {
    /// Expand the template against any serializable context.
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    #[inline]
    pub fn expand<C>(&self, ctx: C) -> Result<Node>
    where
        C: serde::Serialize,
    {
        self.engine.expand(self.name, ctx)
    }

    /// Expand the template against a [`Value`].
    #[inline]
    pub fn expand_from(&self, ctx: &Value) -> Result<Node> {
        self.engine.expand_from(self.name, ctx)
    }

    /// Render the template to placeholder syntax.
    #[inline]
    pub fn to_syntax(&self) -> Result<Node> {
        self.engine.to_syntax(self.name)
    }

    /// Returns the name the template is stored under.
    #[inline]
    pub fn name(&self) -> &'engine str {
        self.name
    }

    /// Returns the template.
    #[inline]
    pub fn template(&self) -> &'engine Template {
        self.template
    }
}

impl std::fmt::Debug for TemplateRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateRef")
            .field("name", &self.name)
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}
