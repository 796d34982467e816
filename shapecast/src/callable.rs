//! Function placeholders and the named-result combinator.
//!
//! A [`Callable`] sits in a template wherever a computed value is wanted. The
//! engine invokes it with an [`Invocation`] describing where it was reached:
//! during extraction it sees the looked-up value, its path, and the source;
//! during a pipe it sees the binding set and the source.

use std::fmt;
use std::rc::Rc;

use crate::{PathSegment, Value};

/// Arguments handed to a [`Callable`] by the engine.
#[derive(Clone, Copy, Debug)]
pub enum Invocation<'a> {
    /// Reached while extracting from a source.
    Extract {
        /// Value found in the source at `path`, `Null` when missing.
        value: &'a Value,
        /// Location of the placeholder inside the extraction template.
        path: &'a [PathSegment],
        /// Whole source value.
        source: &'a Value,
    },
    /// Reached while filling an output template.
    Pipe {
        /// Binding set extracted by the input template.
        bindings: &'a Value,
        /// Whole source value.
        source: &'a Value,
    },
}

impl<'a> Invocation<'a> {
    /// First argument: the looked-up value or the binding set.
    #[must_use]
    pub const fn primary(&self) -> &'a Value {
        match *self {
            Self::Extract { value, .. } => value,
            Self::Pipe { bindings, .. } => bindings,
        }
    }

    /// The source value of the current call.
    #[must_use]
    pub const fn source(&self) -> &'a Value {
        match *self {
            Self::Extract { source, .. } | Self::Pipe { source, .. } => source,
        }
    }

    /// Template path of the placeholder; empty for pipe invocations.
    #[must_use]
    pub const fn path(&self) -> &'a [PathSegment] {
        match *self {
            Self::Extract { path, .. } => path,
            Self::Pipe { .. } => &[],
        }
    }
}

type CallableFn = dyn Fn(&Invocation<'_>) -> Value;

/// Shared function placeholder.
///
/// Cloning shares the underlying closure; two callables are equal only when
/// they share it.
///
/// # Examples
///
/// ```rust
/// use shapecast::{Callable, Value, extract};
/// use serde_json::json;
///
/// let double = Callable::unary(|value| Value::from(value.as_i64().unwrap_or_default() * 2));
/// let template = Value::object([("a", double)]);
/// let result = extract(&template, &Value::from(json!({"a": 5})));
/// assert_eq!(result.to_json()?, json!({"a": 10}));
/// # Ok::<_, shapecast::ShapeError>(())
/// ```
#[derive(Clone)]
pub struct Callable(Rc<CallableFn>);

impl Callable {
    /// Wrap a closure that receives the full [`Invocation`].
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Invocation<'_>) -> Value + 'static,
    {
        Self(Rc::new(f))
    }

    /// Wrap a closure over the primary argument only.
    pub fn unary<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Value + 'static,
    {
        Self::new(move |invocation| f(invocation.primary()))
    }

    /// Invoke the placeholder.
    #[must_use]
    pub fn call(&self, invocation: &Invocation<'_>) -> Value {
        (self.0)(invocation)
    }

    /// Wrap the result of this callable under `key`.
    ///
    /// Method form of [`named`].
    #[must_use]
    pub fn named(&self, key: impl Into<String>) -> Self {
        named(self.clone(), key)
    }

    /// Whether both handles share one closure.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callable(<fn>)")
    }
}

/// Build a callable returning `{key: f(invocation)}`.
///
/// An extraction placeholder normally merges a scalar result under the last
/// segment of its path; wrapping it with `named` chooses the key instead.
///
/// ```rust
/// use shapecast::{Callable, Value, extract, named};
/// use serde_json::json;
///
/// let upper = Callable::unary(|value| {
///     Value::from(value.as_str().unwrap_or_default().to_uppercase())
/// });
/// let template = Value::object([("name", named(upper, "shout"))]);
/// let result = extract(&template, &Value::from(json!({"name": "ann"})));
/// assert_eq!(result.to_json()?, json!({"shout": "ANN"}));
/// # Ok::<_, shapecast::ShapeError>(())
/// ```
#[must_use]
pub fn named(f: Callable, key: impl Into<String>) -> Callable {
    let key = key.into();
    Callable::new(move |invocation| Value::object([(key.clone(), f.call(invocation))]))
}

/// Curried form of [`named`]: supply the callable now and the key later.
///
/// ```rust
/// use shapecast::{Callable, Value, named_by};
///
/// let identity = named_by(Callable::unary(Value::clone));
/// let as_id = identity("id");
/// let as_name = identity("name");
/// assert!(!as_id.ptr_eq(&as_name));
/// ```
pub fn named_by(f: Callable) -> impl Fn(&str) -> Callable {
    move |key: &str| named(f.clone(), key)
}
