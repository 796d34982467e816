//! Unit tests for placeholder discovery.

use rstest::{fixture, rstest};
use serde_json::json;

use super::{PlaceholderKind, discover, discover_with, is_default_placeholder};
use crate::{Callable, PathSegment, Value};

fn key(name: &str) -> PathSegment {
    PathSegment::key(name)
}

#[fixture]
fn nested_template() -> Value {
    Value::from(json!({
        "id": "userId",
        "info": {"name": "userName", "age": 2},
        "flags": [true, null],
    }))
}

#[rstest]
fn reports_every_leaf_in_enumeration_order(nested_template: Value) {
    let found = discover(&nested_template);
    let paths: Vec<Vec<PathSegment>> = found.iter().map(|d| d.path.clone()).collect();
    assert_eq!(
        paths,
        vec![
            vec![key("id")],
            vec![key("info"), key("name")],
            vec![key("info"), key("age")],
            vec![key("flags"), PathSegment::Index(0)],
            vec![key("flags"), PathSegment::Index(1)],
        ]
    );
    let placeholders: Vec<Value> = found.into_iter().map(|d| d.placeholder).collect();
    assert_eq!(
        placeholders,
        vec![
            Value::from("userId"),
            Value::from("userName"),
            Value::from(2),
            Value::from(true),
            Value::Null,
        ]
    );
}

#[rstest]
#[case::text(Value::from("x"))]
#[case::number(Value::from(3))]
#[case::null(Value::Null)]
#[case::callable(Value::from(Callable::unary(Value::clone)))]
fn scalar_root_is_a_single_placeholder(#[case] template: Value) {
    let found = discover(&template);
    assert_eq!(found.len(), 1);
    assert!(found.iter().all(|d| d.path.is_empty()));
}

#[rstest]
#[case::empty_object(Value::empty_object())]
#[case::empty_array(Value::empty_array())]
#[case::nested_empties(Value::from(json!({"a": {}, "b": [[], {}]})))]
fn empty_scaffolding_has_no_placeholders(#[case] template: Value) {
    assert!(discover(&template).is_empty());
}

#[test]
fn direct_self_reference_is_skipped() {
    let template = Value::object([("name", "userName")]);
    template.set(&key("me"), template.clone());
    let found = discover(&template);
    assert_eq!(found.len(), 1);
    assert!(found.iter().all(|d| d.path == vec![key("name")]));
}

#[test]
fn transitive_cycle_terminates() {
    let outer = Value::object([("a", "first")]);
    let inner = Value::array([Value::from("second")]);
    outer.set(&key("inner"), inner.clone());
    inner.set(&PathSegment::Index(1), outer.clone());

    let found = discover(&outer);
    let paths: Vec<Vec<PathSegment>> = found.into_iter().map(|d| d.path).collect();
    assert_eq!(
        paths,
        vec![vec![key("a")], vec![key("inner"), PathSegment::Index(0)]]
    );
}

#[test]
fn shared_non_ancestor_containers_are_visited_each_time() {
    let shared = Value::object([("v", "value")]);
    let template = Value::object([("left", shared.clone()), ("right", shared)]);
    let paths: Vec<Vec<PathSegment>> = discover(&template).into_iter().map(|d| d.path).collect();
    assert_eq!(
        paths,
        vec![vec![key("left"), key("v")], vec![key("right"), key("v")]]
    );
}

#[test]
fn custom_classifier_rejecting_scalars_yields_nothing_for_them() {
    let template = Value::from(json!({"keep": "name", "skip": 4}));
    let found = discover_with(&template, |value| value.as_str().is_some());
    assert_eq!(found.len(), 1);
    assert!(found.iter().all(|d| d.path == vec![key("keep")]));

    let scalar = Value::from(4);
    assert!(discover_with(&scalar, |value| value.as_str().is_some()).is_empty());
}

#[test]
fn custom_classifier_may_accept_containers_whole() {
    let template = Value::from(json!({"ref": {"$ref": "id"}, "plain": {"x": "y"}}));
    let is_reference = |value: &Value| value.get(&key("$ref")).as_str().is_some();
    let found = discover_with(&template, is_reference);
    assert_eq!(found.len(), 1);
    assert!(found.iter().all(|d| d.path == vec![key("ref")]));
}

#[test]
fn deep_templates_do_not_exhaust_the_stack() {
    let mut template = Value::from("leaf");
    for _ in 0..50_000 {
        template = Value::object([("next", template)]);
    }
    let found = discover(&template);
    assert_eq!(found.len(), 1);
    assert!(found.iter().all(|d| d.path.len() == 50_000));
    // Unwind iteratively so dropping the chain does not recurse.
    while let Value::Object(map) = template.clone() {
        let next = map.borrow_mut().shift_remove("next").unwrap_or_default();
        template = next;
    }
}

#[rstest]
#[case(Value::from("n"), "name")]
#[case(Value::from(1), "position")]
#[case(Value::from(Callable::unary(Value::clone)), "function")]
#[case(Value::Bool(false), "inert")]
#[case(Value::Null, "inert")]
fn descriptors_classify_their_placeholder(#[case] placeholder: Value, #[case] expected: &str) {
    let found = discover(&placeholder);
    let kinds: Vec<&str> = found
        .iter()
        .map(|d| match d.kind() {
            PlaceholderKind::Name(_) => "name",
            PlaceholderKind::Position(_) => "position",
            PlaceholderKind::Function(_) => "function",
            PlaceholderKind::Inert => "inert",
        })
        .collect();
    assert_eq!(kinds, vec![expected]);
}

#[test]
fn default_classifier_accepts_scalars_and_null_only() {
    assert!(is_default_placeholder(&Value::Null));
    assert!(is_default_placeholder(&Value::from("x")));
    assert!(!is_default_placeholder(&Value::empty_object()));
    assert!(!is_default_placeholder(&Value::empty_array()));
}
