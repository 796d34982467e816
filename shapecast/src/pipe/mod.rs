//! Template-to-template piping.
//!
//! A pipe extracts a binding set from the source with an input template, then
//! fills a deep copy of an output template: text and numeric placeholders are
//! replaced by the binding they name, and callables are invoked with the
//! bindings and the source. Output scaffolding that holds no placeholder is
//! carried over unchanged.

use crate::discover::{PlaceholderKind, discover};
use crate::extract::bindings_with_config;
use crate::{Invocation, MapperConfig, PathSegment, Value, display_path};

/// A pipe with both templates already supplied.
///
/// # Examples
///
/// ```rust
/// use shapecast::{Pipe, Value};
/// use serde_json::json;
///
/// let pipe = Pipe::new(
///     Value::from(json!({"a": "x"})),
///     Value::from(json!({"y": "x", "kind": true})),
/// );
/// let result = pipe.apply(&Value::from(json!({"a": 7})));
/// assert_eq!(result.to_json()?, json!({"y": 7, "kind": true}));
/// # Ok::<_, shapecast::ShapeError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Pipe {
    input: Value,
    output: Value,
    config: MapperConfig,
}

impl Pipe {
    /// Prepare a pipe from `input` to `output` with the default configuration.
    #[must_use]
    pub fn new(input: Value, output: Value) -> Self {
        Self {
            input,
            output,
            config: MapperConfig::default(),
        }
    }

    /// Replace the configuration used by the extraction stage.
    #[must_use]
    pub fn with_config(mut self, config: MapperConfig) -> Self {
        self.config = config;
        self
    }

    /// The input (extraction) template.
    #[must_use]
    pub const fn input(&self) -> &Value {
        &self.input
    }

    /// The output template.
    #[must_use]
    pub const fn output(&self) -> &Value {
        &self.output
    }

    /// Run the pipe over `source`.
    #[must_use]
    pub fn apply(&self, source: &Value) -> Value {
        pipe_with_config(&self.input, &self.output, source, self.config)
    }
}

/// Extract bindings from `source` with `input`, then fill `output` with them.
///
/// The output template is deep-cloned before filling, so neither template nor
/// the source is modified. A placeholder at the root of `output` replaces the
/// whole result with its value.
///
/// Text placeholders in `output` can name every binding `input` declares,
/// including text bindings of an input template that also holds numeric
/// placeholders and therefore extracts to a sequence. Callables receive the
/// extracted value itself, as [`crate::extract`] would return it.
///
/// Filling is iterative, so output templates as deep as discovery accepts
/// are handled; converting or comparing such results with
/// [`Value::to_json`] or `==` recurses once per level.
///
/// # Examples
///
/// ```rust
/// use shapecast::{Callable, Value, pipe};
/// use serde_json::json;
///
/// let input = Value::from(json!({"first": "f", "last": "l"}));
/// let full_name = Callable::unary(|bindings| {
///     let part = |key: &str| bindings.get(&key.into()).as_str().unwrap_or_default().to_owned();
///     Value::from(format!("{} {}", part("f"), part("l")))
/// });
/// let output = Value::object([("name", Value::from(full_name)), ("first", Value::from("f"))]);
/// let source = Value::from(json!({"first": "Ada", "last": "Lovelace"}));
/// assert_eq!(
///     pipe(&input, &output, &source).to_json()?,
///     json!({"name": "Ada Lovelace", "first": "Ada"})
/// );
/// # Ok::<_, shapecast::ShapeError>(())
/// ```
#[must_use]
pub fn pipe(input: &Value, output: &Value, source: &Value) -> Value {
    pipe_with_config(input, output, source, MapperConfig::default())
}

fn pipe_with_config(input: &Value, output: &Value, source: &Value, config: MapperConfig) -> Value {
    let bindings = bindings_with_config(input, source, config);
    let extracted = bindings.to_value();
    let mut result = output.deep_clone();
    for descriptor in discover(output) {
        let value = match descriptor.kind() {
            PlaceholderKind::Function(callable) => callable.call(&Invocation::Pipe {
                bindings: &extracted,
                source,
            }),
            PlaceholderKind::Name(name) => bindings.get(&PathSegment::key(name)),
            PlaceholderKind::Position(number) => bindings.get(&PathSegment::from_number(number)),
            PlaceholderKind::Inert => continue,
        };
        tracing::trace!(path = %display_path(&descriptor.path), "filling output placeholder");
        result.set_path(&descriptor.path, value);
    }
    result
}
