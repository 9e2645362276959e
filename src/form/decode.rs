use std::iter;
use std::vec;

use crate::form::{known_marker, BLOCK, CONCAT, GROUP, JOIN, RAW, UNESCAPED, VAR};
use crate::types::path::Path;
use crate::types::tree::{check_attr_name, is_tag, Attrs, Block, Element, Node, Template};
use crate::{Error, Result, Value};

/// Classifies a value by its shape and builds the corresponding node.
///
/// # Errors
///
/// If a placeholder is malformed, for example `["::var"]` without a path or a
/// block without a helper, or if an attribute name is not valid.
pub fn decode(value: Value) -> Result<Node> {
    let list = match value {
        Value::List(list) => list,
        value => return Ok(Node::Literal(value)),
    };
    let mut items = list.into_iter();
    match items.next() {
        Some(Value::String(head)) => {
            if let Some(marker) = known_marker(&head) {
                decode_placeholder(marker, items.collect())
            } else if is_tag(&head) {
                decode_element(head, items)
            } else {
                Ok(literal(Value::String(head), items))
            }
        }
        Some(head @ Value::List(_)) => decode_all(iter::once(head).chain(items)).map(Node::Concat),
        Some(head) => Ok(literal(head, items)),
        None => Ok(Node::Literal(Value::List(Vec::new()))),
    }
}

fn literal(head: Value, rest: vec::IntoIter<Value>) -> Node {
    Node::Literal(iter::once(head).chain(rest).collect())
}

fn decode_all<I>(values: I) -> Result<Vec<Node>>
where
    I: IntoIterator<Item = Value>,
{
    values.into_iter().map(decode).collect()
}

fn decode_placeholder(marker: &str, args: Vec<Value>) -> Result<Node> {
    match marker {
        VAR => decode_path(marker, args).map(Node::Var),
        RAW => decode_path(marker, args).map(Node::Raw),
        BLOCK => decode_block(args),
        JOIN => decode_all(args).map(Node::Join),
        CONCAT => decode_all(args).map(Node::Concat),
        GROUP => decode_all(args).map(Node::Group),
        UNESCAPED => match <[Value; 1]>::try_from(args) {
            Ok([value]) => Ok(Node::Unescaped(value)),
            Err(args) => Err(Error::invalid_argument(format!(
                "`{marker}` expects exactly one value, found {}",
                args.len()
            ))),
        },
        _ => Err(Error::invalid_argument(format!(
            "unsupported marker `{marker}`"
        ))),
    }
}

fn decode_path(marker: &str, args: Vec<Value>) -> Result<Path> {
    match <[Value; 1]>::try_from(args) {
        Ok([Value::String(path)]) => Path::new(path),
        Ok([other]) => Err(Error::invalid_argument(format!(
            "`{marker}` path must be a string, found {}",
            other.human()
        ))),
        Err(args) => Err(Error::invalid_argument(format!(
            "`{marker}` expects exactly one path argument, found {}",
            args.len()
        ))),
    }
}

fn decode_block(args: Vec<Value>) -> Result<Node> {
    let mut args = args.into_iter();
    let (helper, path) = match (args.next(), args.next()) {
        (Some(Value::String(helper)), Some(Value::String(path))) => (helper, path),
        (Some(_), Some(_)) => {
            return Err(Error::invalid_argument(format!(
                "`{BLOCK}` helper and path must be strings"
            )))
        }
        _ => {
            return Err(Error::invalid_argument(format!(
                "`{BLOCK}` expects a helper and an argument path"
            )))
        }
    };
    let body = decode_all(args)?;
    let block = Block::new(&helper, &path, body)?;
    Ok(Node::Block(block))
}

fn decode_element(tag: String, items: vec::IntoIter<Value>) -> Result<Node> {
    let mut items = items.peekable();
    let attrs = match items.next_if(|v| matches!(v, Value::Map(_))) {
        Some(Value::Map(map)) => Some(
            map.into_iter()
                .map(|(name, value)| {
                    check_attr_name(&name)?;
                    Ok((name, decode(value)?))
                })
                .collect::<Result<Attrs>>()
                .map_err(|e| e.within(tag.as_str()))?,
        ),
        _ => None,
    };
    let children = decode_all(items).map_err(|e| e.within(tag.as_str()))?;
    Ok(Node::Element(Element::from_parts(tag, attrs, children)))
}

impl Template {
    /// Builds a template from its data form.
    ///
    /// See the [`form`][crate::form] module for how values are classified.
    ///
    /// # Errors
    ///
    /// If a placeholder in the data is malformed.
    pub fn from_value(value: Value) -> Result<Self> {
        decode(value).map(Template::new)
    }

    /// Builds a template from anything that serializes to its data form, for
    /// example a `serde_json::Value`.
    ///
    /// # Errors
    ///
    /// If the data cannot be serialized or a placeholder in it is malformed.
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    pub fn from_serde<S>(data: S) -> Result<Self>
    where
        S: serde::Serialize,
    {
        Self::from_value(crate::to_value(data)?)
    }
}
