//! Conversions between [`Value`] and [`serde_json::Value`].
//!
//! JSON trees convert into values infallibly. The reverse direction fails for
//! callables and for cyclic containers, which JSON cannot express.

use serde_json::{Map, Value as Json};

use super::{PathSegment, Value, display_path};
use crate::{ShapeError, ShapeResult};

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        match json {
            Json::Null => Self::Null,
            Json::Bool(flag) => Self::Bool(flag),
            Json::Number(number) => Self::Number(number),
            Json::String(text) => Self::String(text),
            Json::Array(items) => items.into_iter().map(Self::from).collect(),
            Json::Object(map) => Self::object(map),
        }
    }
}

impl TryFrom<&Value> for Json {
    type Error = ShapeError;

    fn try_from(value: &Value) -> ShapeResult<Self> {
        value.to_json()
    }
}

impl TryFrom<Value> for Json {
    type Error = ShapeError;

    fn try_from(value: Value) -> ShapeResult<Self> {
        value.to_json()
    }
}

impl Value {
    /// Convert this value into a JSON tree.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::Unrepresentable`] when a callable is reachable and
    /// [`ShapeError::Cycle`] when a container contains itself.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shapecast::{Callable, ShapeError, Value};
    /// use serde_json::json;
    ///
    /// let value = Value::object([("id", Value::from(7))]);
    /// assert_eq!(value.to_json()?, json!({"id": 7}));
    ///
    /// let with_fn = Value::object([("f", Callable::unary(Value::clone))]);
    /// assert!(matches!(with_fn.to_json(), Err(ShapeError::Unrepresentable { .. })));
    /// # Ok::<_, ShapeError>(())
    /// ```
    pub fn to_json(&self) -> ShapeResult<Json> {
        let mut path = Vec::new();
        let mut ancestors = Vec::new();
        to_json_at(self, &mut path, &mut ancestors)
    }
}

fn to_json_at(
    value: &Value,
    path: &mut Vec<PathSegment>,
    ancestors: &mut Vec<*const ()>,
) -> ShapeResult<Json> {
    if let Some(id) = value.container_id() {
        if ancestors.contains(&id) {
            return Err(ShapeError::Cycle {
                path: display_path(path),
            });
        }
        ancestors.push(id);
    }
    let converted = match value {
        Value::Null => Ok(Json::Null),
        Value::Bool(flag) => Ok(Json::Bool(*flag)),
        Value::Number(number) => Ok(Json::Number(number.clone())),
        Value::String(text) => Ok(Json::String(text.clone())),
        Value::Callable(_) => Err(ShapeError::Unrepresentable {
            path: display_path(path),
            kind: value.kind(),
        }),
        Value::Array(_) => value
            .entries()
            .into_iter()
            .map(|(segment, item)| child_to_json(&item, segment, path, ancestors))
            .collect::<ShapeResult<Vec<_>>>()
            .map(Json::Array),
        Value::Object(_) => value
            .entries()
            .into_iter()
            .map(|(segment, item)| {
                let key = segment.to_key().into_owned();
                child_to_json(&item, segment, path, ancestors).map(|json| (key, json))
            })
            .collect::<ShapeResult<Map<_, _>>>()
            .map(Json::Object),
    };
    if value.is_container() {
        ancestors.pop();
    }
    converted
}

fn child_to_json(
    item: &Value,
    segment: PathSegment,
    path: &mut Vec<PathSegment>,
    ancestors: &mut Vec<*const ()>,
) -> ShapeResult<Json> {
    path.push(segment);
    let converted = to_json_at(item, path, ancestors);
    path.pop();
    converted
}
