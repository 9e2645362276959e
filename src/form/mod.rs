//! The data form of a template tree.
//!
//! Templates can be written as plain data, for example loaded from JSON, where
//! each node is classified by its shape:
//!
//! | shape                                   | node                  |
//! |-----------------------------------------|-----------------------|
//! | `["::var", path]`                       | [`Node::Var`]         |
//! | `["::raw", path]`                       | [`Node::Raw`]         |
//! | `["::block", helper, path, body...]`    | [`Node::Block`]       |
//! | `["::join", children...]`               | [`Node::Join`]        |
//! | `["::concat", children...]`             | [`Node::Concat`]      |
//! | `["::group", templates...]`             | [`Node::Group`]       |
//! | `["::unescaped", value]`                | [`Node::Unescaped`]   |
//! | `[tag, {attrs}?, children...]`          | [`Node::Element`]     |
//! | `[[...], ...]`                          | [`Node::Concat`]      |
//! | anything else                           | [`Node::Literal`]     |
//!
//! There is no separate type field, so a literal list that starts with one of
//! the markers above, or with a string that looks like a tag, is read as that
//! node. Build trees with the [`Node`] constructors when that matters.
//!
//! [`Node`]: crate::Node
//! [`Node::Var`]: crate::Node::Var
//! [`Node::Raw`]: crate::Node::Raw
//! [`Node::Block`]: crate::Node::Block
//! [`Node::Join`]: crate::Node::Join
//! [`Node::Concat`]: crate::Node::Concat
//! [`Node::Group`]: crate::Node::Group
//! [`Node::Unescaped`]: crate::Node::Unescaped
//! [`Node::Element`]: crate::Node::Element
//! [`Node::Literal`]: crate::Node::Literal

mod decode;
mod encode;

pub use crate::form::decode::decode;

use crate::types::tree::is_tag;
use crate::Value;

/// Leads a variable reference, `["::var", path]`.
pub const VAR: &str = "::var";
/// Leads a raw reference, `["::raw", path]`.
pub const RAW: &str = "::raw";
/// Leads a block, `["::block", helper, path, body...]`.
pub const BLOCK: &str = "::block";
/// Leads children separated by single spaces.
pub const JOIN: &str = "::join";
/// Leads children flattened with no separation.
pub const CONCAT: &str = "::concat";
/// Leads independent templates treated as one.
pub const GROUP: &str = "::group";
/// Leads a single value written without escaping.
pub const UNESCAPED: &str = "::unescaped";

const MARKERS: [&str; 7] = [VAR, RAW, BLOCK, JOIN, CONCAT, GROUP, UNESCAPED];

/// Returns the marker a list starts with, if it starts with a known one.
pub fn marker(value: &Value) -> Option<&'static str> {
    match head(value) {
        Some(Value::String(s)) => known_marker(s),
        _ => None,
    }
}

fn known_marker(s: &str) -> Option<&'static str> {
    MARKERS.iter().copied().find(|m| *m == s)
}

/// Whether the value is a variable reference.
pub fn is_var(value: &Value) -> bool {
    marker(value) == Some(VAR)
}

/// Whether the value is a raw reference.
pub fn is_raw(value: &Value) -> bool {
    marker(value) == Some(RAW)
}

/// Whether the value is a block.
pub fn is_block(value: &Value) -> bool {
    marker(value) == Some(BLOCK)
}

/// Whether the value is a join.
pub fn is_join(value: &Value) -> bool {
    marker(value) == Some(JOIN)
}

/// Whether the value is a concat.
pub fn is_concat(value: &Value) -> bool {
    marker(value) == Some(CONCAT)
}

/// Whether the value is a group.
pub fn is_group(value: &Value) -> bool {
    marker(value) == Some(GROUP)
}

/// Whether the value is a list led by a tag identifier, optionally followed by
/// an attribute map.
pub fn is_element(value: &Value) -> bool {
    matches!(head(value), Some(Value::String(tag)) if is_tag(tag))
}

fn head(value: &Value) -> Option<&Value> {
    match value {
        Value::List(list) => list.first(),
        _ => None,
    }
}
