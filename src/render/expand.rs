use crate::helpers::Body;
use crate::render::{collapse, into_root, resolve, space, Fragment};
use crate::types::path::Path;
use crate::types::tree::{Attrs, Block, Element};
use crate::{Engine, Error, Node, Result, Value};

/// Expands `root` against `ctx`, which also becomes the fixed parent context.
pub(crate) fn expand(engine: &Engine, root: &Node, ctx: &Value) -> Result<Node> {
    let expander = Expander {
        engine,
        parent: ctx,
    };
    let mut fragment = Fragment::new();
    expander.expand_into(&mut fragment, root, ctx, 0)?;
    Ok(into_root(fragment))
}

/// Walks a template tree top-down, replacing placeholders with values.
///
/// The current context is threaded through every call and changes when a
/// helper renders a block body. The parent context is bound once, to the
/// context the expansion started with, and `../` paths resolve against it no
/// matter how deeply blocks are nested.
pub(crate) struct Expander<'render> {
    engine: &'render Engine,
    parent: &'render Value,
}

impl Expander<'_> {
    /// Expands a sequence of nodes, flattening each node's fragment.
    pub(crate) fn expand_all(
        &self,
        nodes: &[Node],
        current: &Value,
        depth: usize,
    ) -> Result<Fragment> {
        let mut out = Fragment::with_capacity(nodes.len());
        for node in nodes {
            self.expand_into(&mut out, node, current, depth)?;
        }
        Ok(out)
    }

    fn expand_into(
        &self,
        out: &mut Fragment,
        node: &Node,
        current: &Value,
        depth: usize,
    ) -> Result<()> {
        match node {
            Node::Var(path) => out.push(Node::Literal(self.lookup(path, current))),
            Node::Raw(path) => out.push(Node::Unescaped(self.lookup(path, current))),
            Node::Block(block) => {
                let result = self
                    .dispatch(block, current, depth)
                    .map_err(|e| e.within(block.to_string()))?;
                // Whatever the helper returned is visited again, so a helper
                // may return placeholders and have them expanded here.
                self.expand_into(out, &result, current, depth + 1)
                    .map_err(|e| e.within(block.to_string()))?;
            }
            Node::Join(children) => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        out.push(space());
                    }
                    self.expand_into(out, child, current, depth)?;
                }
            }
            Node::Concat(children) | Node::Group(children) => {
                for child in children {
                    self.expand_into(out, child, current, depth)?;
                }
            }
            Node::Element(el) => {
                let el = self
                    .expand_element(el, current, depth)
                    .map_err(|e| e.within(el.tag()))?;
                out.push(Node::Element(el));
            }
            Node::Literal(_) | Node::Unescaped(_) => out.push(node.clone()),
        }
        Ok(())
    }

    fn expand_element(&self, el: &Element, current: &Value, depth: usize) -> Result<Element> {
        let attrs = match el.attrs() {
            Some(attrs) => {
                let mut expanded = Attrs::new();
                for (name, value) in attrs {
                    let mut fragment = Fragment::new();
                    self.expand_into(&mut fragment, value, current, depth)?;
                    expanded.insert(name.clone(), collapse(fragment));
                }
                Some(expanded)
            }
            None => None,
        };
        let children = self.expand_all(el.child_nodes(), current, depth)?;
        Ok(Element::from_parts(el.tag().to_owned(), attrs, children))
    }

    fn dispatch(&self, block: &Block, current: &Value, depth: usize) -> Result<Node> {
        let none = Value::None;
        let arg = resolve(block.arg(), current, self.parent).unwrap_or(&none);

        if depth >= self.engine.max_depth {
            return Err(Error::max_depth(self.engine.max_depth));
        }
        let helper = self
            .engine
            .helpers
            .get(block.helper())
            .ok_or_else(|| Error::helper_not_found(block.helper()))?;

        tracing::trace!(helper = block.helper(), arg = %block.arg(), depth, "dispatching block");
        let body = Body::new(self, block.body(), current, depth + 1);
        helper(arg, &body)
    }

    fn lookup(&self, path: &Path, current: &Value) -> Value {
        resolve(path, current, self.parent)
            .cloned()
            .unwrap_or(Value::None)
    }
}
