use std::thread;

use arbor::{value, Element, Engine, ErrorKind, Node, Source, Template, Value};

fn page() -> Template {
    Template::new(
        Element::new("h1")
            .unwrap()
            .child(Node::var("title").unwrap()),
    )
}

#[test]
fn engine_debug() {
    let mut engine = Engine::new();
    engine.add_template("page", page()).unwrap();
    let debug = format!("{engine:?}");
    assert_eq!(
        debug,
        r#"Engine { helpers: ["each", "else", "if", "unless", "with"], templates: ["page"], max_depth: 64 }"#
    );
}

#[test]
fn engine_empty_has_no_helpers() {
    assert_eq!(
        format!("{:?}", Engine::empty()),
        "Engine { helpers: [], templates: [], max_depth: 64 }"
    );
}

#[test]
fn engine_send_and_sync() {
    let mut engine = Engine::new();
    engine.add_template("page", page()).unwrap();
    thread::spawn(move || {
        let result = engine
            .get_template("page")
            .unwrap()
            .expand(value! { title: "Hello" })
            .unwrap();
        assert_eq!(arbor::to_text(&result).unwrap(), "<h1>Hello</h1>");
    })
    .join()
    .unwrap();
}

#[test]
fn engine_add_template_and_get() {
    let mut engine = Engine::new();
    engine.add_template(String::from("page"), page()).unwrap();
    let template = engine.get_template("page").unwrap();
    assert_eq!(template.name(), "page");
    assert_eq!(template.template(), &page());
    assert!(engine.get_template("other").is_none());
}

#[test]
fn engine_add_template_replaces() {
    let mut engine = Engine::new();
    engine.add_template("page", page()).unwrap();
    engine.add_template("page", Node::literal("replaced")).unwrap();
    let result = engine.expand("page", value! {}).unwrap();
    assert_eq!(result, Node::literal("replaced"));
}

#[test]
fn engine_add_template_empty_name() {
    let mut engine = Engine::new();
    let err = engine.add_template("", page()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(err.to_string(), "template name must not be empty");
    assert!(engine.get_template("").is_none());
}

#[test]
fn engine_apply_with_and_without_context() {
    let mut engine = Engine::new();
    engine.add_template("page", page()).unwrap();

    let ctx = value! { title: "Hello" };
    let expanded = engine.apply("page", Some(&ctx)).unwrap();
    assert_eq!(arbor::to_text(&expanded).unwrap(), "<h1>Hello</h1>");

    let syntax = engine.apply("page", None).unwrap();
    assert_eq!(arbor::to_text(&syntax).unwrap(), "<h1>{{title}}</h1>");
}

#[test]
fn engine_source_kinds() {
    let mut engine = Engine::new();
    engine.add_template("page", page()).unwrap();
    let ctx = value! { title: "Hi" };
    let expected = Node::from(Element::new("h1").unwrap().child(Node::literal("Hi")));

    let template = page();
    assert_eq!(engine.expand(&template, &ctx).unwrap(), expected);
    assert_eq!(engine.expand(template.root(), &ctx).unwrap(), expected);
    assert_eq!(engine.expand("page", &ctx).unwrap(), expected);
    assert_eq!(engine.expand(&String::from("page"), &ctx).unwrap(), expected);
    assert_eq!(engine.expand(Source::from_fn(page), &ctx).unwrap(), expected);
}

#[test]
fn engine_source_fn_called_once() {
    let engine = Engine::new();
    let mut calls = 0;
    let result = engine
        .to_syntax(Source::from_fn(|| {
            calls += 1;
            page()
        }))
        .unwrap();
    assert_eq!(calls, 1);
    assert_eq!(arbor::to_text(&result).unwrap(), "<h1>{{title}}</h1>");
}

#[test]
fn engine_unknown_template() {
    let engine = Engine::new();
    let err = engine.expand("missing", value! {}).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownTemplate);
    assert_eq!(err.to_string(), "unknown template `missing`");

    let err = engine.to_syntax("missing").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownTemplate);
}

#[test]
fn engine_helper_not_found_leaves_registry_unchanged() {
    let mut engine = Engine::new();
    engine.add_template("page", page()).unwrap();
    engine
        .add_template("broken", Node::block("nope", "x", [Node::literal("y")]).unwrap())
        .unwrap();
    let before = format!("{engine:?}");

    let err = engine.expand("broken", value! { x: 1 }).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::HelperNotFound);
    assert_eq!(err.template_name(), Some("broken"));
    assert_eq!(
        err.to_string(),
        "unknown helper `nope` at `{{#nope x}}` in template `broken`"
    );

    assert_eq!(format!("{engine:?}"), before);
    let result = engine.expand("page", value! { title: "ok" }).unwrap();
    assert_eq!(arbor::to_text(&result).unwrap(), "<h1>ok</h1>");
}

#[test]
fn engine_error_pretty_display() {
    let mut engine = Engine::new();
    let template = Element::new("main").unwrap().child(
        Element::new("p")
            .unwrap()
            .child(Node::block("nope", "x", Vec::<Node>::new()).unwrap()),
    );
    engine.add_template("page", template).unwrap();
    let err = engine.expand("page", value! {}).unwrap_err();
    assert_eq!(
        format!("{err:#}"),
        "
  --> page
   |
   | main > p > {{#nope x}}
   |            ^^^^^^^^^^^ unknown helper `nope`
"
    );
}

#[test]
fn engine_template_ref_methods() {
    let mut engine = Engine::new();
    engine.add_template("page", page()).unwrap();
    let template = engine.get_template("page").unwrap();

    let result = template
        .expand_from(&Value::from([("title", "Hey")]))
        .unwrap();
    assert_eq!(arbor::to_text(&result).unwrap(), "<h1>Hey</h1>");

    let result = template.to_syntax().unwrap();
    assert_eq!(arbor::to_text(&result).unwrap(), "<h1>{{title}}</h1>");
}

#[test]
fn engine_instances_are_isolated() {
    let mut a = Engine::new();
    a.add_helper("shout", |_: &Value, _: &arbor::Body<'_>| Ok(Node::literal("!")));
    let b = Engine::new();

    let node = Node::block("shout", "this", Vec::<Node>::new()).unwrap();
    assert_eq!(a.expand(&node, value! {}).unwrap(), Node::literal("!"));
    assert_eq!(
        b.expand(&node, value! {}).unwrap_err().kind(),
        ErrorKind::HelperNotFound
    );
}

#[test]
fn engine_logs_with_subscriber() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        let mut engine = Engine::new();
        engine.add_template("page", page()).unwrap();
        let result = engine.expand("page", value! { title: "traced" }).unwrap();
        assert_eq!(arbor::to_text(&result).unwrap(), "<h1>traced</h1>");
    });
}
