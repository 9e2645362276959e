//! The two ways a template tree can be turned into output: data expansion
//! against a context and rendering to placeholder syntax.

mod expand;
mod resolve;
mod syntax;

pub(crate) use crate::render::expand::{expand, Expander};
pub use crate::render::resolve::resolve;
pub(crate) use crate::render::syntax::{raw_token, render as syntax, var_token};

use crate::{Node, Value};

/// The nodes a single node turns into, spliced into the parent's sequence.
type Fragment = Vec<Node>;

/// Turns the fragment produced by the root node into the result tree.
fn into_root(mut fragment: Fragment) -> Node {
    if fragment.len() == 1 {
        fragment.remove(0)
    } else {
        Node::Group(fragment)
    }
}

/// Turns the fragment produced by an attribute value into a single node.
fn collapse(mut fragment: Fragment) -> Node {
    match fragment.len() {
        0 => Node::Literal(Value::None),
        1 => fragment.remove(0),
        _ => Node::Concat(fragment),
    }
}

fn space() -> Node {
    Node::Literal(Value::from(" "))
}
