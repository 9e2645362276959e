use crate::render::{collapse, into_root, space, Fragment};
use crate::types::path::Path;
use crate::types::tree::{Attrs, Block, Element};
use crate::{Node, Value};

/// Renders `root` to handlebars placeholder syntax.
///
/// No context is consulted and no helper is invoked: every placeholder is
/// replaced by its textual token and the markup around it is kept.
pub(crate) fn render(root: &Node) -> Node {
    let mut fragment = Fragment::new();
    render_into(&mut fragment, root);
    into_root(fragment)
}

pub(crate) fn var_token(path: &Path) -> String {
    format!("{{{{{path}}}}}")
}

pub(crate) fn raw_token(path: &Path) -> String {
    format!("{{{{{{{path}}}}}}}")
}

fn close_token(block: &Block) -> String {
    format!("{{{{/{}}}}}", block.helper())
}

/// Tokens are markup for the client renderer, so they are never escaped.
fn token(s: String) -> Node {
    Node::Unescaped(Value::String(s))
}

fn render_into(out: &mut Fragment, node: &Node) {
    match node {
        Node::Var(path) => out.push(token(var_token(path))),
        Node::Raw(path) => out.push(token(raw_token(path))),
        Node::Block(block) => {
            out.push(token(block.to_string()));
            for child in block.body() {
                render_into(out, child);
            }
            out.push(token(close_token(block)));
        }
        Node::Join(children) => {
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    out.push(space());
                }
                render_into(out, child);
            }
        }
        Node::Concat(children) | Node::Group(children) => {
            for child in children {
                render_into(out, child);
            }
        }
        Node::Element(el) => out.push(Node::Element(render_element(el))),
        Node::Literal(_) | Node::Unescaped(_) => out.push(node.clone()),
    }
}

fn render_element(el: &Element) -> Element {
    let attrs = el.attrs().map(|attrs| {
        attrs
            .iter()
            .map(|(name, value)| {
                let mut fragment = Fragment::new();
                render_into(&mut fragment, value);
                (name.clone(), collapse(fragment))
            })
            .collect::<Attrs>()
    });
    let mut children = Fragment::new();
    for child in el.child_nodes() {
        render_into(&mut children, child);
    }
    Element::from_parts(el.tag().to_owned(), attrs, children)
}
