//! Integration tests for placeholder discovery.
use anyhow::{Result, ensure};
use rstest::rstest;
use serde_json::json;
use shapecast::{
    PathSegment, PlaceholderKind, Value, discover, discover_with, display_path,
    is_default_placeholder,
};

fn rendered_paths(template: &Value) -> Vec<String> {
    discover(template)
        .iter()
        .map(|descriptor| display_path(&descriptor.path))
        .collect()
}

#[rstest]
fn paths_are_reported_depth_first_in_order() -> Result<()> {
    let template = Value::from(json!({
        "b": {"y": 1, "x": [null, "n"]},
        "a": "name",
    }));
    let paths = rendered_paths(&template);
    ensure!(
        paths == ["b.y", "b.x.0", "b.x.1", "a"],
        "unexpected discovery order {paths:?}"
    );
    Ok(())
}

#[rstest]
fn self_referential_templates_terminate() -> Result<()> {
    let template = Value::from(json!({"list": ["first"]}));
    let list = template.get(&PathSegment::key("list"));
    list.set(&PathSegment::Index(1), template.clone());
    list.set(&PathSegment::Index(2), list.clone());
    let paths = rendered_paths(&template);
    ensure!(paths == ["list.0"], "unexpected paths {paths:?}");
    Ok(())
}

#[rstest]
fn classifiers_select_placeholders() -> Result<()> {
    let template = Value::from(json!({"keep": "a", "num": 3, "nested": {"skip": false}}));
    let text_only = discover_with(&template, |value| value.as_str().is_some());
    ensure!(text_only.len() == 1, "expected one text placeholder");
    let all = discover_with(&template, is_default_placeholder);
    ensure!(all.len() == 3, "expected every leaf, got {}", all.len());
    let names: Vec<&str> = all
        .iter()
        .filter_map(|descriptor| match descriptor.kind() {
            PlaceholderKind::Name(name) => Some(name),
            _ => None,
        })
        .collect();
    ensure!(names == ["a"], "unexpected names {names:?}");
    Ok(())
}
