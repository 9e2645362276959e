use serde_json::json;

use arbor::form;
use arbor::{value, Element, Engine, ErrorKind, Node, Template, Value};

fn from_json(data: serde_json::Value) -> arbor::Result<Node> {
    Template::from_serde(data).map(Template::into_root)
}

#[test]
fn form_classify() {
    let var = arbor::to_value(json!(["::var", "a"])).unwrap();
    assert!(form::is_var(&var));
    assert!(!form::is_raw(&var));
    assert!(!form::is_element(&var));
    assert_eq!(form::marker(&var), Some(form::VAR));

    let raw = arbor::to_value(json!(["::raw", "a"])).unwrap();
    assert!(form::is_raw(&raw));

    let block = arbor::to_value(json!(["::block", "each", "items"])).unwrap();
    assert!(form::is_block(&block));

    let join = arbor::to_value(json!(["::join", "a", "b"])).unwrap();
    assert!(form::is_join(&join));

    let concat = arbor::to_value(json!(["::concat"])).unwrap();
    assert!(form::is_concat(&concat));

    let group = arbor::to_value(json!(["::group", ["p"]])).unwrap();
    assert!(form::is_group(&group));

    let element = arbor::to_value(json!(["div", { "id": "x" }])).unwrap();
    assert!(form::is_element(&element));
    assert_eq!(form::marker(&element), None);

    for other in [json!("::var"), json!(5), json!([]), json!(["::nope", "a"])] {
        let value = arbor::to_value(other).unwrap();
        assert_eq!(form::marker(&value), None);
        assert!(!form::is_element(&value));
    }
}

#[test]
fn form_decode_placeholders() {
    assert_eq!(
        from_json(json!(["::var", "user.name"])).unwrap(),
        Node::var("user.name").unwrap()
    );
    assert_eq!(
        from_json(json!(["::raw", "bio"])).unwrap(),
        Node::raw("bio").unwrap()
    );
    assert_eq!(
        from_json(json!(["::block", "each", "items", ["::var", "name"], "!"])).unwrap(),
        Node::block(
            "each",
            "items",
            [Node::var("name").unwrap(), Node::literal("!")]
        )
        .unwrap()
    );
    assert_eq!(
        from_json(json!(["::join", "a", ["::var", "b"]])).unwrap(),
        Node::join([Node::literal("a"), Node::var("b").unwrap()])
    );
    assert_eq!(
        from_json(json!(["::unescaped", "<b>"])).unwrap(),
        Node::Unescaped(Value::from("<b>"))
    );
}

#[test]
fn form_decode_element() {
    let node = from_json(json!([
        "a",
        { "href": ["::var", "url"], "rel": "nofollow" },
        "Go to ",
        ["::var", "name"]
    ]))
    .unwrap();
    let expected = Element::new("a")
        .unwrap()
        .attr("href", Node::var("url").unwrap())
        .unwrap()
        .attr("rel", "nofollow")
        .unwrap()
        .child("Go to ")
        .child(Node::var("name").unwrap());
    assert_eq!(node, Node::from(expected));
}

#[test]
fn form_decode_list_of_lists_is_concat() {
    let node = from_json(json!([["br"], ["::var", "x"]])).unwrap();
    assert_eq!(
        node,
        Node::concat([
            Node::from(Element::new("br").unwrap()),
            Node::var("x").unwrap()
        ])
    );
}

#[test]
fn form_decode_literals() {
    assert_eq!(from_json(json!(5)).unwrap(), Node::literal(5));
    assert_eq!(from_json(json!(null)).unwrap(), Node::Literal(Value::None));
    assert_eq!(
        from_json(json!({ "a": 1 })).unwrap(),
        Node::Literal(value! { a: 1 })
    );
    assert_eq!(
        from_json(json!([1, "a"])).unwrap(),
        Node::Literal(Value::from(vec![Value::from(1), Value::from("a")]))
    );
    assert_eq!(
        from_json(json!(["not a tag", 1])).unwrap(),
        Node::Literal(Value::from(vec![Value::from("not a tag"), Value::from(1)]))
    );
    assert_eq!(
        from_json(json!(["::unknown", 1])).unwrap(),
        Node::Literal(Value::from(vec![Value::from("::unknown"), Value::from(1)]))
    );
}

#[test]
fn form_decode_malformed_var() {
    let err = from_json(json!(["::var"])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(
        err.message(),
        "`::var` expects exactly one path argument, found 0"
    );

    let err = from_json(json!(["::raw", "a", "b"])).unwrap_err();
    assert_eq!(
        err.message(),
        "`::raw` expects exactly one path argument, found 2"
    );

    let err = from_json(json!(["::var", 1])).unwrap_err();
    assert_eq!(err.message(), "`::var` path must be a string, found integer");

    let err = from_json(json!(["::var", ""])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn form_decode_malformed_block() {
    let err = from_json(json!(["::block", "each"])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(
        err.message(),
        "`::block` expects a helper and an argument path"
    );

    let err = from_json(json!(["::block", 1, "items"])).unwrap_err();
    assert_eq!(err.message(), "`::block` helper and path must be strings");

    let err = from_json(json!(["::block", "not an ident", "items"])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn form_decode_invalid_attribute_name() {
    let err = from_json(json!([
        "section",
        ["a", { "x\" onclick=\"evil()": "1" }, "link"]
    ]))
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(
        err.message(),
        r#"`x" onclick="evil()` is not a valid attribute name"#
    );
    assert_eq!(err.trail().collect::<Vec<_>>(), ["section", "a"]);
}

#[test]
fn form_decode_tag_shorthand_is_literal() {
    let node = from_json(json!(["div.card", "x"])).unwrap();
    assert_eq!(
        node,
        Node::Literal(Value::from(vec![Value::from("div.card"), Value::from("x")]))
    );
}

#[test]
fn form_decode_invalid_path() {
    let err = from_json(json!(["p", ["::var", "a b"]])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(err.message(), "`a b` is not a valid path");
}

#[test]
fn form_decode_error_trail() {
    let err = from_json(json!(["ul", ["li", ["::var"]]])).unwrap_err();
    assert_eq!(err.trail().collect::<Vec<_>>(), ["ul", "li"]);
}

#[test]
fn form_encode_matches_json() {
    let template = Element::new("ul").unwrap().child(
        Node::block(
            "each",
            "items",
            [Element::new("li")
                .unwrap()
                .attr("class", Node::raw("kind").unwrap())
                .unwrap()
                .child(Node::var("name").unwrap())],
        )
        .unwrap(),
    );
    let value = serde_json::to_value(Node::from(template)).unwrap();
    assert_eq!(
        value,
        json!([
            "ul",
            [
                "::block",
                "each",
                "items",
                ["li", { "class": ["::raw", "kind"] }, ["::var", "name"]]
            ]
        ])
    );
}

#[test]
fn form_encode_decode_placeholder_tree() {
    let node = Node::concat([
        Node::join([Node::var("a").unwrap(), Node::raw("b").unwrap()]),
        Node::block("if", "../c", [Node::var("this").unwrap()]).unwrap(),
    ]);
    assert_eq!(form::decode(node.to_value()).unwrap(), node);
}

#[test]
fn form_expand_from_json() {
    let data = json!([
        "table",
        ["::block", "each", "rows",
            ["tr", ["td", ["::var", "name"]], ["td", ["::raw", "note"]]]
        ]
    ]);
    let template = Template::from_serde(&data).unwrap();
    let result = Engine::new()
        .expand(
            &template,
            value! { rows: [{ name: "a&b", note: "<i>x</i>" }] },
        )
        .unwrap();
    assert_eq!(
        arbor::to_text(&result).unwrap(),
        "<table><tr><td>a&amp;b</td><td><i>x</i></td></tr></table>"
    );
}
