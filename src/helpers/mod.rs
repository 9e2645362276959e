//! Block helpers.
//!
//! A helper gives a [`Node::Block`] its meaning. It receives the value the
//! block's argument path resolved to and a [`Body`] it can render any number
//! of times, each time against a context of its choosing. Whatever node it
//! returns replaces the block.
//!
//! # Examples
//!
//! A helper that renders its body once per repetition count.
//!
//! ```
//! use arbor::{value, Body, Engine, Node, Result, Value};
//!
//! fn repeat(value: &Value, body: &Body<'_>) -> Result<Node> {
//!     let n = match value {
//!         Value::Integer(n) => *n,
//!         _ => 0,
//!     };
//!     let rendered = (0..n)
//!         .map(|_| body.render(body.context()))
//!         .collect::<Result<Vec<_>>>()?;
//!     Ok(Node::Concat(rendered))
//! }
//!
//! let mut engine = Engine::new();
//! engine.add_helper("repeat", repeat);
//!
//! let template = Node::block("repeat", "times", [Node::literal("ho")])?;
//! let result = engine.expand(&template, value! { times: 3 })?;
//! assert_eq!(arbor::to_text(&result)?, "hohoho");
//! # Ok::<(), arbor::Error>(())
//! ```
//!
//! [`Node::Block`]: crate::Node::Block

#[cfg(feature = "builtins")]
pub mod builtins;

use crate::render::Expander;
use crate::{Node, Result, Value};

/// A helper function or closure.
pub type HelperFn = dyn Fn(&Value, &Body<'_>) -> Result<Node> + Send + Sync + 'static;

/// The body of the block a helper was invoked for.
pub struct Body<'a> {
    expander: &'a Expander<'a>,
    nodes: &'a [Node],
    current: &'a Value,
    depth: usize,
}

impl<'a> Body<'a> {
    pub(crate) fn new(
        expander: &'a Expander<'a>,
        nodes: &'a [Node],
        current: &'a Value,
        depth: usize,
    ) -> Self {
        Self {
            expander,
            nodes,
            current,
            depth,
        }
    }

    /// Expands the body with `ctx` as the current context.
    ///
    /// The top-level context seen by `../` paths stays the same. The result is
    /// a [`Node::Concat`] of the expanded body nodes, ready to be returned
    /// from the helper or combined with other renders.
    pub fn render(&self, ctx: &Value) -> Result<Node> {
        self.expander
            .expand_all(self.nodes, ctx, self.depth)
            .map(Node::Concat)
    }

    /// Returns the current context at the block.
    pub fn context(&self) -> &'a Value {
        self.current
    }

    /// Returns the unexpanded body nodes.
    pub fn nodes(&self) -> &'a [Node] {
        self.nodes
    }
}
