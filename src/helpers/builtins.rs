//! Builtin block helpers.
//!
//! [`Engine::new`][crate::Engine::new] registers these as `with`, `each`,
//! `if`, `unless` and `else`.

use crate::helpers::Body;
use crate::{Node, Result, Value};

/// Renders the body once with the argument as the current context.
#[cfg_attr(docsrs, doc(cfg(feature = "builtins")))]
pub fn with(value: &Value, body: &Body<'_>) -> Result<Node> {
    body.render(value)
}

/// Renders the body once per list item, or once per map value in key order,
/// with the item as the current context.
///
/// Any other value renders nothing.
#[cfg_attr(docsrs, doc(cfg(feature = "builtins")))]
pub fn each(value: &Value, body: &Body<'_>) -> Result<Node> {
    let rendered = match value {
        Value::List(list) => list.iter().map(|item| body.render(item)).collect(),
        Value::Map(map) => map.values().map(|item| body.render(item)).collect(),
        _ => Ok(Vec::new()),
    };
    rendered.map(Node::Concat)
}

/// Renders the body once in the current context if the argument is truthy.
///
/// See [`Value::is_truthy`].
#[cfg_attr(docsrs, doc(cfg(feature = "builtins")))]
pub fn when(value: &Value, body: &Body<'_>) -> Result<Node> {
    if value.is_truthy() {
        body.render(body.context())
    } else {
        Ok(Node::Concat(Vec::new()))
    }
}

/// Renders the body once in the current context if the argument is falsy.
///
/// Registered both as `unless` and as `else`.
#[cfg_attr(docsrs, doc(cfg(feature = "builtins")))]
pub fn unless(value: &Value, body: &Body<'_>) -> Result<Node> {
    if value.is_truthy() {
        Ok(Node::Concat(Vec::new()))
    } else {
        body.render(body.context())
    }
}
