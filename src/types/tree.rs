//! The template tree.
//!
//! Every node kind is its own [`Node`] variant. Placeholder nodes can only be
//! created through the validating builders on [`Node`], [`Element`] and
//! [`Block`], so a tree that exists is structurally well formed.

use std::collections::BTreeMap;
use std::fmt;

use crate::types::path::Path;
use crate::{Error, Result, Value};

/// The attributes of an [`Element`]. Values may be placeholders.
pub type Attrs = BTreeMap<String, Node>;

/// A node in a template tree, or in the tree produced from one.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A markup element with a tag, optional attributes and children.
    Element(Element),
    /// A reference to a context value that is escaped on output, `{{path}}`.
    Var(Path),
    /// A reference to a context value that is written verbatim, `{{{path}}}`.
    Raw(Path),
    /// A helper invocation with an argument and a body, `{{#helper path}}`.
    Block(Block),
    /// Children separated by single spaces.
    Join(Vec<Node>),
    /// Children flattened into the surrounding sequence.
    Concat(Vec<Node>),
    /// Several independent templates treated as one.
    Group(Vec<Node>),
    /// Any value, passed through unchanged.
    Literal(Value),
    /// A resolved raw reference. Serializers must not escape it.
    Unescaped(Value),
}

/// A markup element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attrs: Option<Attrs>,
    children: Vec<Node>,
}

/// A helper invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    helper: String,
    arg: Path,
    body: Vec<Node>,
}

/// A template tree ready to be expanded or rendered to syntax.
///
/// Templates are immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    root: Node,
}

impl Node {
    /// A variable reference, escaped on output.
    ///
    /// # Errors
    ///
    /// If the path is not valid, see [`Path::new`].
    pub fn var(path: &str) -> Result<Self> {
        Path::new(path).map(Self::Var)
    }

    /// A raw reference, written verbatim on output.
    ///
    /// # Errors
    ///
    /// If the path is not valid, see [`Path::new`].
    pub fn raw(path: &str) -> Result<Self> {
        Path::new(path).map(Self::Raw)
    }

    /// A block invoking `helper` with the value at `arg`.
    ///
    /// # Errors
    ///
    /// If the helper is not an identifier or the path is not valid.
    pub fn block<I>(helper: &str, arg: &str, body: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        Block::new(helper, arg, body).map(Self::Block)
    }

    /// Children separated by single spaces.
    pub fn join<I>(children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        Self::Join(children.into_iter().map(Into::into).collect())
    }

    /// Children flattened with no separation.
    pub fn concat<I>(children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        Self::Concat(children.into_iter().map(Into::into).collect())
    }

    /// A literal value.
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    /// Whether this node is resolved at expansion time.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Var(_) | Self::Raw(_) | Self::Block(_))
    }

    /// Returns the literal value, if this node is one.
    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            Self::Literal(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the element, if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Self::Element(el)
    }
}

impl From<Block> for Node {
    fn from(block: Block) -> Self {
        Self::Block(block)
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Self::Literal(Value::from(s))
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Self::Literal(Value::String(s))
    }
}

impl Element {
    /// An element with no attributes and no children.
    ///
    /// # Errors
    ///
    /// If the tag is not a tag identifier.
    pub fn new(tag: &str) -> Result<Self> {
        if !is_tag(tag) {
            return Err(Error::invalid_argument(format!(
                "`{tag}` is not a valid tag"
            )));
        }
        Ok(Self::from_parts(tag.to_owned(), None, Vec::new()))
    }

    pub(crate) fn from_parts(tag: String, attrs: Option<Attrs>, children: Vec<Node>) -> Self {
        Self {
            tag,
            attrs,
            children,
        }
    }

    /// Sets an attribute.
    ///
    /// # Errors
    ///
    /// If the name is not an attribute name. Attribute names follow the same
    /// rules as tags.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<Node>) -> Result<Self> {
        let name = name.into();
        check_attr_name(&name)?;
        self.attrs
            .get_or_insert_with(Attrs::new)
            .insert(name, value.into());
        Ok(self)
    }

    /// Appends a child.
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Appends several children.
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Returns the tag.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the attributes, or `None` if the element has none.
    pub fn attrs(&self) -> Option<&Attrs> {
        self.attrs.as_ref()
    }

    /// Returns the children in order.
    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }
}

impl Block {
    /// A block invoking `helper` with the value at `arg`.
    ///
    /// # Errors
    ///
    /// If the helper is not an identifier or the path is not valid.
    pub fn new<I>(helper: &str, arg: &str, body: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        if !is_ident(helper) {
            return Err(Error::invalid_argument(format!(
                "`{helper}` is not a valid helper name"
            )));
        }
        Ok(Self {
            helper: helper.to_owned(),
            arg: Path::new(arg)?,
            body: body.into_iter().map(Into::into).collect(),
        })
    }

    /// Returns the name of the helper this block invokes.
    pub fn helper(&self) -> &str {
        &self.helper
    }

    /// Returns the path whose value is passed to the helper.
    pub fn arg(&self) -> &Path {
        &self.arg
    }

    /// Returns the body handed to the helper.
    pub fn body(&self) -> &[Node] {
        &self.body
    }
}

/// Formats the opening token, `{{#helper arg}}`.
impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{{#{} {}}}}}", self.helper, self.arg)
    }
}

impl Template {
    /// Wraps a root node.
    pub fn new(root: impl Into<Node>) -> Self {
        Self { root: root.into() }
    }

    /// Combines several templates into one whose members are expanded or
    /// rendered independently and concatenated.
    pub fn group<I>(templates: I) -> Self
    where
        I: IntoIterator<Item = Template>,
    {
        Self::new(Node::Group(
            templates.into_iter().map(Template::into_root).collect(),
        ))
    }

    /// Returns the root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Consumes the template, returning the root node.
    pub fn into_root(self) -> Node {
        self.root
    }
}

impl From<Node> for Template {
    fn from(root: Node) -> Self {
        Self::new(root)
    }
}

impl From<Element> for Template {
    fn from(el: Element) -> Self {
        Self::new(el)
    }
}

/// Whether `s` is a helper identifier.
pub(crate) fn is_ident(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if is_ident_start(c) => chars.all(is_ident_continue),
        _ => false,
    }
}

/// Whether `s` is a tag identifier. Tags may also contain `-` and `:` after
/// the first character, as in `my-widget` and `svg:rect`.
pub(crate) fn is_tag(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if is_ident_start(c) => {
            chars.all(|c| is_ident_continue(c) || matches!(c, '-' | ':'))
        }
        _ => false,
    }
}

pub(crate) fn check_attr_name(name: &str) -> Result<()> {
    if is_tag(name) {
        Ok(())
    } else {
        Err(Error::invalid_argument(format!(
            "`{name}` is not a valid attribute name"
        )))
    }
}

#[cfg(feature = "unicode")]
fn is_ident_start(c: char) -> bool {
    c == '_' || unicode_ident::is_xid_start(c)
}

#[cfg(feature = "unicode")]
fn is_ident_continue(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}

#[cfg(not(feature = "unicode"))]
fn is_ident_start(c: char) -> bool {
    matches!(c, 'A'..='Z' | 'a'..='z' | '_')
}

#[cfg(not(feature = "unicode"))]
fn is_ident_continue(c: char) -> bool {
    matches!(c, '0'..='9' | 'A'..='Z' | 'a'..='z' | '_')
}
