//! Serializes an expanded tree to markup text.

use std::fmt::Write;
use std::io;

use crate::fmt::{self, Formatter, Writer};
use crate::render::{raw_token, var_token};
use crate::types::tree::Element;
use crate::{Error, Node, Result, Value};

/// Serializes an expanded tree to a string.
///
/// Elements become tags with their attributes in key order. Literal values
/// are HTML escaped, [`Node::Unescaped`] values are written as is.
///
/// # Errors
///
/// If the tree still contains placeholders or a value is a map.
///
/// # Examples
///
/// ```
/// use arbor::{Element, Node};
///
/// let link = Element::new("a")?
///     .attr("href", "/about")?
///     .child("Fish & Chips");
/// let text = arbor::to_text(&Node::from(link))?;
/// assert_eq!(text, r#"<a href="/about">Fish &amp; Chips</a>"#);
/// # Ok::<(), arbor::Error>(())
/// ```
pub fn to_text(node: &Node) -> Result<String> {
    let mut s = String::new();
    write_node(&mut Formatter::with_string(&mut s), node)?;
    Ok(s)
}

/// Serializes an expanded tree to the given writer.
///
/// # Errors
///
/// Like [`to_text`], and with [`ErrorKind::Io`][crate::ErrorKind::Io] if
/// writing fails.
pub fn to_writer<W>(writer: W, node: &Node) -> Result<()>
where
    W: io::Write,
{
    let mut w = Writer::new(writer);
    let result = write_node(&mut Formatter::with_writer(&mut w), node);
    result.map_err(|err| w.take_err().map(Error::from).unwrap_or(err))
}

fn write_node(f: &mut Formatter<'_>, node: &Node) -> Result<()> {
    match node {
        Node::Element(el) => write_element(f, el).map_err(|e| e.within(el.tag())),
        Node::Literal(value) => fmt::escape(f, value),
        Node::Unescaped(value) => fmt::default(f, value),
        Node::Join(children) => {
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    f.write_char(' ')?;
                }
                write_node(f, child)?;
            }
            Ok(())
        }
        Node::Concat(children) | Node::Group(children) => {
            for child in children {
                write_node(f, child)?;
            }
            Ok(())
        }
        Node::Var(path) => Err(unexpanded(var_token(path))),
        Node::Raw(path) => Err(unexpanded(raw_token(path))),
        Node::Block(block) => Err(unexpanded(block.to_string())),
    }
}

fn write_element(f: &mut Formatter<'_>, el: &Element) -> Result<()> {
    write!(f, "<{}", el.tag())?;
    for (name, value) in el.attrs().into_iter().flatten() {
        write_attr(f, name, value)?;
    }
    f.write_char('>')?;
    for child in el.child_nodes() {
        write_node(f, child)?;
    }
    write!(f, "</{}>", el.tag())?;
    Ok(())
}

fn write_attr(f: &mut Formatter<'_>, name: &str, value: &Node) -> Result<()> {
    match value {
        Node::Literal(Value::None | Value::Bool(false))
        | Node::Unescaped(Value::None | Value::Bool(false)) => Ok(()),
        Node::Literal(Value::Bool(true)) | Node::Unescaped(Value::Bool(true)) => {
            write!(f, " {name}")?;
            Ok(())
        }
        value => {
            write!(f, " {name}=\"")?;
            write_node(f, value).map_err(|e| e.within(format!("@{name}")))?;
            f.write_char('"')?;
            Ok(())
        }
    }
}

fn unexpanded(token: String) -> Error {
    Error::format(format!("cannot serialize unexpanded placeholder `{token}`"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_attributes() {
        let el = Element::new("input")
            .unwrap()
            .attr("checked", Value::Bool(true))
            .unwrap()
            .attr("disabled", Value::Bool(false))
            .unwrap()
            .attr("name", Value::None)
            .unwrap()
            .attr("type", "checkbox")
            .unwrap();
        assert_eq!(
            to_text(&Node::from(el)).unwrap(),
            r#"<input checked type="checkbox"></input>"#
        );
    }

    #[test]
    fn unexpanded_placeholder_is_error() {
        let node = Node::concat([Node::literal("a"), Node::var("user.name").unwrap()]);
        let err = to_text(&node).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Format);
        assert_eq!(
            err.message(),
            "cannot serialize unexpanded placeholder `{{user.name}}`"
        );
    }
}
