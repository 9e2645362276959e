use std::iter;

use crate::form::{BLOCK, CONCAT, GROUP, JOIN, RAW, UNESCAPED, VAR};
use crate::types::tree::{Node, Template};
use crate::Value;

impl Node {
    /// Converts the node into its data form.
    ///
    /// Expanded trees only contain elements and values, so their data form is
    /// ready to hand to any tag/attributes/children serializer.
    pub fn to_value(&self) -> Value {
        match self {
            Node::Element(el) => {
                let mut list = vec![Value::from(el.tag())];
                if let Some(attrs) = el.attrs() {
                    list.push(
                        attrs
                            .iter()
                            .map(|(name, value)| (name.as_str(), value.to_value()))
                            .collect(),
                    );
                }
                list.extend(el.child_nodes().iter().map(Node::to_value));
                Value::List(list)
            }
            Node::Var(path) => marked(VAR, [Value::from(path.as_str())]),
            Node::Raw(path) => marked(RAW, [Value::from(path.as_str())]),
            Node::Block(block) => marked(
                BLOCK,
                [Value::from(block.helper()), Value::from(block.arg().as_str())]
                    .into_iter()
                    .chain(block.body().iter().map(Node::to_value)),
            ),
            Node::Join(children) => marked(JOIN, children.iter().map(Node::to_value)),
            Node::Concat(children) => marked(CONCAT, children.iter().map(Node::to_value)),
            Node::Group(children) => marked(GROUP, children.iter().map(Node::to_value)),
            Node::Literal(value) => value.clone(),
            Node::Unescaped(value) => marked(UNESCAPED, [value.clone()]),
        }
    }
}

fn marked<I>(marker: &str, rest: I) -> Value
where
    I: IntoIterator<Item = Value>,
{
    iter::once(Value::from(marker)).chain(rest).collect()
}

impl Template {
    /// Converts the template into its data form.
    pub fn to_value(&self) -> Value {
        self.root().to_value()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_value().serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Template {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.root().serialize(serializer)
    }
}
