//! Step definitions for extraction and pipe scenarios.

use crate::fixtures::MappingState;
use anyhow::{Result, anyhow, ensure};
use rstest_bdd_macros::{given, then, when};
use shapecast::{Callable, PathSegment, Value, extract, pipe};
use test_helpers::json::{compact, parse_json};
use test_helpers::text::captured_key;

fn template_of(state: &MappingState) -> Result<Value> {
    state
        .template
        .get()
        .ok_or_else(|| anyhow!("a template must be given first"))
}

#[given("an extraction template {template_json}")]
fn extraction_template(mapping_state: &MappingState, template_json: String) -> Result<()> {
    let template = Value::from(parse_json(&template_json)?);
    mapping_state.pristine.set(template.deep_clone());
    mapping_state.template.set(template);
    Ok(())
}

#[given("an output template {output_json}")]
fn output_template(mapping_state: &MappingState, output_json: String) -> Result<()> {
    mapping_state.output.set(Value::from(parse_json(&output_json)?));
    Ok(())
}

#[given("a doubling function placeholder at {field}")]
fn doubling_placeholder(mapping_state: &MappingState, field: String) -> Result<()> {
    let mut template = template_of(mapping_state)?;
    let double = Callable::unary(|value| Value::from(value.as_i64().unwrap_or_default() * 2));
    template.set_path(&[PathSegment::key(captured_key(&field))], Value::from(double));
    mapping_state.pristine.set(template.deep_clone());
    mapping_state.template.set(template);
    Ok(())
}

#[given("the template refers to itself under {field}")]
fn self_reference(mapping_state: &MappingState, field: String) -> Result<()> {
    let template = template_of(mapping_state)?;
    ensure!(
        template.set(&PathSegment::key(captured_key(&field)), template.clone()),
        "the template must be a mapping"
    );
    Ok(())
}

#[when("values are extracted from {source_json}")]
fn run_extraction(mapping_state: &MappingState, source_json: String) -> Result<()> {
    let template = template_of(mapping_state)?;
    let source = Value::from(parse_json(&source_json)?);
    mapping_state.result.set(extract(&template, &source));
    Ok(())
}

#[when("the source {source_json} is piped")]
fn run_pipe(mapping_state: &MappingState, source_json: String) -> Result<()> {
    let input = template_of(mapping_state)?;
    let output = mapping_state
        .output
        .get()
        .ok_or_else(|| anyhow!("an output template must be given first"))?;
    let source = Value::from(parse_json(&source_json)?);
    mapping_state.result.set(pipe(&input, &output, &source));
    Ok(())
}

#[then("the result is {expected_json}")]
fn result_matches(mapping_state: &MappingState, expected_json: String) -> Result<()> {
    let expected = parse_json(&expected_json)?;
    let actual = mapping_state
        .result
        .with_ref(Value::to_json)
        .ok_or_else(|| anyhow!("no extraction or pipe has run"))??;
    ensure!(
        actual == expected,
        "expected {} but got {}",
        compact(&expected),
        compact(&actual)
    );
    Ok(())
}

#[then("the template is left unchanged")]
fn template_unchanged(mapping_state: &MappingState) -> Result<()> {
    let template = template_of(mapping_state)?;
    let pristine = mapping_state
        .pristine
        .get()
        .ok_or_else(|| anyhow!("no template snapshot was taken"))?;
    ensure!(template == pristine, "template was modified: {template:?}");
    Ok(())
}
