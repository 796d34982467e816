//! Structure-guided extraction.
//!
//! An extraction template mirrors the shape of the source it reads from. Each
//! placeholder names where the value found at its location should go:
//!
//! - a text placeholder binds the value under that name;
//! - a numeric placeholder binds it at that sequence position;
//! - a [`Callable`](crate::Callable) computes a value, or a whole container of
//!   entries, from the looked-up value, its path, and the source.
//!
//! The per-placeholder results are merged in discovery order, later entries
//! winning, into a fresh mapping, or into a fresh sequence as soon as any
//! placeholder is positional. Positions above
//! [`MapperConfig::max_position`] are skipped; the free function uses the
//! default bound.

use indexmap::IndexMap;

use crate::discover::{PlaceholderDescriptor, PlaceholderKind, discover};
use crate::value::number_to_index;
use crate::{Invocation, MapperConfig, PathSegment, Value, display_path};

/// Extraction with its template already supplied.
///
/// # Examples
///
/// ```rust
/// use shapecast::{Extractor, Value};
/// use serde_json::json;
///
/// let users = Extractor::new(Value::from(json!({"id": "userId"})));
/// let ann = users.apply(&Value::from(json!({"id": 1})));
/// let bob = users.apply(&Value::from(json!({"id": 2})));
/// assert_eq!(ann.to_json()?, json!({"userId": 1}));
/// assert_eq!(bob.to_json()?, json!({"userId": 2}));
/// # Ok::<_, shapecast::ShapeError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Extractor {
    template: Value,
    config: MapperConfig,
}

impl Extractor {
    /// Prepare extraction with `template` and the default configuration.
    #[must_use]
    pub fn new(template: Value) -> Self {
        Self {
            template,
            config: MapperConfig::default(),
        }
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: MapperConfig) -> Self {
        self.config = config;
        self
    }

    /// The extraction template.
    #[must_use]
    pub const fn template(&self) -> &Value {
        &self.template
    }

    /// Extract from `source`.
    #[must_use]
    pub fn apply(&self, source: &Value) -> Value {
        extract_with_config(&self.template, source, self.config)
    }
}

/// Extract values from `source` following the shape of `template`.
///
/// Never fails: missing source data degrades to `Null`, and the result is
/// always a freshly allocated container.
///
/// # Examples
///
/// ```rust
/// use shapecast::{Value, extract};
/// use serde_json::json;
///
/// let template = Value::from(json!({"id": "userId", "info": {"name": "userName"}}));
/// let source = Value::from(json!({"id": 42, "info": {"name": "Ann"}}));
/// assert_eq!(
///     extract(&template, &source).to_json()?,
///     json!({"userId": 42, "userName": "Ann"})
/// );
///
/// let positional = Value::from(json!({"first": 0, "second": 1}));
/// let source = Value::from(json!({"first": "x", "second": "y"}));
/// assert_eq!(extract(&positional, &source).to_json()?, json!(["x", "y"]));
/// # Ok::<_, shapecast::ShapeError>(())
/// ```
#[must_use]
pub fn extract(template: &Value, source: &Value) -> Value {
    extract_with_config(template, source, MapperConfig::default())
}

fn extract_with_config(template: &Value, source: &Value, config: MapperConfig) -> Value {
    bindings_with_config(template, source, config).into_value()
}

/// Run extraction but keep named entries that a sequence result cannot hold.
pub(crate) fn bindings_with_config(
    template: &Value,
    source: &Value,
    config: MapperConfig,
) -> Bindings {
    let partials: Vec<Partial> = discover(template)
        .iter()
        .map(|descriptor| Partial::for_descriptor(descriptor, source))
        .collect();
    let mut bindings = Bindings::for_partials(&partials);
    for partial in partials {
        bindings.merge(partial, config);
    }
    bindings
}

/// Contribution of a single placeholder to the extraction result.
#[derive(Debug)]
enum Partial {
    Keyed(Vec<(String, Value)>),
    /// Sparse positions; holes are simply absent and never overwrite.
    Positional(Vec<(usize, Value)>),
}

impl Partial {
    fn for_descriptor(descriptor: &PlaceholderDescriptor, source: &Value) -> Self {
        let path = descriptor.path.as_slice();
        match descriptor.kind() {
            PlaceholderKind::Name(name) => {
                Self::Keyed(vec![(name.to_owned(), source.get_path(path))])
            }
            PlaceholderKind::Position(number) => {
                let Some(position) = number_to_index(number) else {
                    tracing::debug!(
                        path = %display_path(path),
                        number = %number,
                        "numeric placeholder is not a sequence position"
                    );
                    return Self::Positional(Vec::new());
                };
                Self::Positional(vec![(position, source.get_path(path))])
            }
            PlaceholderKind::Function(callable) => {
                let value = source.get_path(path);
                let outcome = callable.call(&Invocation::Extract {
                    value: &value,
                    path,
                    source,
                });
                Self::from_outcome(outcome, descriptor)
            }
            PlaceholderKind::Inert => {
                tracing::debug!(
                    path = %display_path(path),
                    kind = %descriptor.placeholder.kind(),
                    "ignoring unsupported placeholder"
                );
                Self::Keyed(Vec::new())
            }
        }
    }

    /// Containers returned by a callable are merged entry by entry; anything
    /// else lands under the last key of the placeholder's path.
    fn from_outcome(outcome: Value, descriptor: &PlaceholderDescriptor) -> Self {
        match outcome {
            Value::Array(items) => {
                let entries: Vec<(usize, Value)> =
                    items.borrow().iter().cloned().enumerate().collect();
                Self::Positional(entries)
            }
            Value::Object(map) => {
                let entries: Vec<(String, Value)> = map
                    .borrow()
                    .iter()
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect();
                Self::Keyed(entries)
            }
            scalar => Self::Keyed(vec![(descriptor.last_key(), scalar)]),
        }
    }

    const fn is_positional(&self) -> bool {
        matches!(self, Self::Positional(_))
    }
}

/// The extraction result under construction.
///
/// A sequence result may also collect named entries from text placeholders.
/// They are not part of the extracted value but stay addressable, so a pipe
/// can still read every binding its input template declared.
pub(crate) enum Bindings {
    Sequence {
        items: Vec<Value>,
        named: IndexMap<String, Value>,
    },
    Mapping(IndexMap<String, Value>),
}

impl Bindings {
    fn for_partials(partials: &[Partial]) -> Self {
        if partials.iter().any(Partial::is_positional) {
            Self::Sequence {
                items: Vec::new(),
                named: IndexMap::new(),
            }
        } else {
            Self::Mapping(IndexMap::new())
        }
    }

    fn merge(&mut self, partial: Partial, config: MapperConfig) {
        match (self, partial) {
            (Self::Mapping(map), Partial::Keyed(entries)) => map.extend(entries),
            (Self::Sequence { items, .. }, Partial::Positional(entries)) => {
                for (position, value) in entries {
                    place(items, position, value, config);
                }
            }
            (Self::Sequence { items, named }, Partial::Keyed(entries)) => {
                for (key, value) in entries {
                    let segment = PathSegment::Key(key);
                    match segment.as_index() {
                        Some(position) => place(items, position, value, config),
                        None => {
                            tracing::debug!(
                                key = %segment,
                                "keeping named entry beside sequence positions"
                            );
                            named.insert(segment.to_key().into_owned(), value);
                        }
                    }
                }
            }
            (Self::Mapping(map), Partial::Positional(entries)) => {
                // A positional partial always selects a sequence accumulator.
                map.extend(
                    entries
                        .into_iter()
                        .map(|(position, value)| (position.to_string(), value)),
                );
            }
        }
    }

    /// Looks up a binding; canonical indices address sequence positions and
    /// any other key addresses the named entries.
    pub(crate) fn get(&self, segment: &PathSegment) -> Value {
        match self {
            Self::Sequence { items, named } => match segment.as_index() {
                Some(index) => items.get(index).cloned(),
                None => named.get(segment.to_key().as_ref()).cloned(),
            },
            Self::Mapping(map) => map.get(segment.to_key().as_ref()).cloned(),
        }
        .unwrap_or_default()
    }

    /// The extracted value as a fresh container, without shared storage.
    pub(crate) fn to_value(&self) -> Value {
        match self {
            Self::Sequence { items, .. } => Value::from(items.clone()),
            Self::Mapping(map) => Value::from(map.clone()),
        }
    }

    fn into_value(self) -> Value {
        match self {
            Self::Sequence { items, .. } => Value::from(items),
            Self::Mapping(map) => Value::from(map),
        }
    }
}

/// Write `value` at `position`, padding earlier holes with `Null`.
fn place(items: &mut Vec<Value>, position: usize, value: Value, config: MapperConfig) {
    let Some(len) = position
        .checked_add(1)
        .filter(|_| config.allows_position(position))
    else {
        tracing::debug!(
            position,
            max_position = ?config.max_position,
            "skipping position beyond configured limit"
        );
        return;
    };
    if len > items.len() {
        items.resize(len, Value::Null);
    }
    if let Some(slot) = items.get_mut(position) {
        *slot = value;
    }
}
