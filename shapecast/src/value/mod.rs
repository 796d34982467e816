//! Dynamic values used as templates, sources, and results.
//!
//! A [`Value`] is either a scalar (`Null`, boolean, number, text, or a
//! [`Callable`]) or a container (an ordered sequence or an insertion-ordered
//! keyed mapping). Containers are shared handles: cloning a [`Value`] clones
//! the handle, so a container may hold itself and two values can be checked
//! for container identity with [`Value::same_container`]. Use
//! [`Value::deep_clone`] to obtain an independent tree.
//!
//! Lookup, assignment and [`Value::deep_clone`] work level by level without
//! recursion. Equality, [`Value::to_json`], `Debug` and dropping the last
//! handle to a tree recurse once per nesting level, so trees nested tens of
//! thousands of levels deep should be taken apart level by level instead.
//!
//! # Examples
//!
//! ```rust
//! use shapecast::{PathSegment, Value};
//! use serde_json::json;
//!
//! let source = Value::from(json!({"info": {"tags": ["a", "b"]}}));
//! let path = [PathSegment::key("info"), PathSegment::key("tags"), PathSegment::Index(1)];
//! assert_eq!(source.get_path(&path), Value::from("b"));
//! assert!(source.get_path(&[PathSegment::key("missing")]).is_null());
//! ```

mod clone;
mod fmt;
mod json;
mod path;

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use serde_json::Number;

use crate::Callable;

pub use path::{PathSegment, display_path};

pub(crate) use path::number_to_index;

/// Shared handle to an ordered sequence.
pub type SharedArray = Rc<RefCell<Vec<Value>>>;

/// Shared handle to an insertion-ordered keyed mapping.
pub type SharedObject = Rc<RefCell<IndexMap<String, Value>>>;

/// Universal unit of data handled by the engine.
#[derive(Clone, Default)]
pub enum Value {
    /// The absence-value.
    #[default]
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Numeric scalar.
    Number(Number),
    /// Text scalar.
    String(String),
    /// Function placeholder.
    Callable(Callable),
    /// Ordered sequence.
    Array(SharedArray),
    /// Keyed mapping, enumerated in insertion order.
    Object(SharedObject),
}

/// Coarse classification of a [`Value`], used in diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    /// [`Value::Null`].
    Null,
    /// [`Value::Bool`].
    Bool,
    /// [`Value::Number`].
    Number,
    /// [`Value::String`].
    String,
    /// [`Value::Callable`].
    Callable,
    /// [`Value::Array`].
    Array,
    /// [`Value::Object`].
    Object,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Callable => "callable",
            Self::Array => "array",
            Self::Object => "object",
        };
        f.write_str(name)
    }
}

impl Value {
    /// Build a sequence from `items`.
    #[must_use]
    pub fn array<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Self>,
    {
        Self::Array(Rc::new(RefCell::new(
            items.into_iter().map(Into::into).collect(),
        )))
    }

    /// Build a mapping from `entries`, keeping their order.
    ///
    /// A repeated key keeps its first position and its last value.
    #[must_use]
    pub fn object<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Self>,
    {
        Self::Object(Rc::new(RefCell::new(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )))
    }

    /// An empty keyed mapping.
    #[must_use]
    pub fn empty_object() -> Self {
        Self::Object(SharedObject::default())
    }

    /// An empty ordered sequence.
    #[must_use]
    pub fn empty_array() -> Self {
        Self::Array(SharedArray::default())
    }

    /// Returns the coarse kind of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Number(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
            Self::Callable(_) => ValueKind::Callable,
            Self::Array(_) => ValueKind::Array,
            Self::Object(_) => ValueKind::Object,
        }
    }

    /// Whether this is the absence-value.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether this is a sequence or a mapping.
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::Array(_) | Self::Object(_))
    }

    /// Whether this is an ordered sequence.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Whether this is a keyed mapping.
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Returns the boolean payload.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Returns the text payload.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the numeric payload.
    #[must_use]
    pub const fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(number) => Some(number),
            _ => None,
        }
    }

    /// Returns the number as an `i64` when it fits.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    /// Returns the number as an `f64`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().and_then(Number::as_f64)
    }

    /// Returns the callable payload.
    #[must_use]
    pub const fn as_callable(&self) -> Option<&Callable> {
        match self {
            Self::Callable(callable) => Some(callable),
            _ => None,
        }
    }

    /// Whether `self` and `other` are handles to the very same container.
    ///
    /// Scalars never share identity.
    ///
    /// ```rust
    /// use shapecast::Value;
    ///
    /// let list = Value::array([1, 2]);
    /// assert!(list.same_container(&list.clone()));
    /// assert!(!list.same_container(&list.deep_clone()));
    /// ```
    #[must_use]
    pub fn same_container(&self, other: &Self) -> bool {
        match (self.container_id(), other.container_id()) {
            (Some(lhs), Some(rhs)) => lhs == rhs,
            _ => false,
        }
    }

    /// Identity of the container behind this handle.
    pub(crate) fn container_id(&self) -> Option<*const ()> {
        match self {
            Self::Array(items) => Some(Rc::as_ptr(items).cast::<()>()),
            Self::Object(map) => Some(Rc::as_ptr(map).cast::<()>()),
            _ => None,
        }
    }

    /// Snapshot of the container's own entries.
    ///
    /// Mappings enumerate in insertion order and sequences in index order;
    /// scalars have no entries.
    #[must_use]
    pub fn entries(&self) -> Vec<(PathSegment, Self)> {
        match self {
            Self::Array(items) => items
                .borrow()
                .iter()
                .enumerate()
                .map(|(index, item)| (PathSegment::Index(index), item.clone()))
                .collect(),
            Self::Object(map) => map
                .borrow()
                .iter()
                .map(|(key, item)| (PathSegment::Key(key.clone()), item.clone()))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Number of own entries; zero for scalars.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Array(items) => items.borrow().len(),
            Self::Object(map) => map.borrow().len(),
            _ => 0,
        }
    }

    /// Whether the value has no own entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads the entry addressed by `segment`, `Null` when there is none.
    #[must_use]
    pub fn get(&self, segment: &PathSegment) -> Self {
        match self {
            Self::Array(items) => segment
                .as_index()
                .and_then(|index| items.borrow().get(index).cloned())
                .unwrap_or_default(),
            Self::Object(map) => map
                .borrow()
                .get(segment.to_key().as_ref())
                .cloned()
                .unwrap_or_default(),
            _ => Self::Null,
        }
    }

    /// Reads the value at `path`.
    ///
    /// The lookup is total: a missing segment, or a segment applied to a
    /// scalar, yields `Null`.
    #[must_use]
    pub fn get_path(&self, path: &[PathSegment]) -> Self {
        let mut current = self.clone();
        for segment in path {
            if !current.is_container() {
                return Self::Null;
            }
            current = current.get(segment);
        }
        current
    }

    /// Writes `value` into this container at `segment`.
    ///
    /// Writing past the end of a sequence pads it with `Null`, so the caller
    /// chooses how far a sequence may grow. Returns `false`, leaving
    /// everything untouched, when `self` is a scalar, when a sequence is
    /// addressed by a key that is not a canonical index, or when the index is
    /// `usize::MAX`.
    pub fn set(&self, segment: &PathSegment, value: Self) -> bool {
        match self {
            Self::Array(items) => {
                let Some(index) = segment.as_index() else {
                    tracing::debug!(segment = %segment, "sequence cannot hold a named entry");
                    return false;
                };
                let Some(len) = index.checked_add(1) else {
                    tracing::debug!(index, "sequence position out of range");
                    return false;
                };
                let mut items = items.borrow_mut();
                if len > items.len() {
                    items.resize(len, Self::Null);
                }
                if let Some(slot) = items.get_mut(index) {
                    *slot = value;
                }
                true
            }
            Self::Object(map) => {
                map.borrow_mut().insert(segment.to_key().into_owned(), value);
                true
            }
            _ => false,
        }
    }

    /// Assigns `value` at `path`.
    ///
    /// An empty path replaces `self` entirely. Otherwise every missing or
    /// scalar intermediate becomes an empty mapping before the final segment
    /// is written.
    ///
    /// ```rust
    /// use shapecast::{PathSegment, Value};
    /// use serde_json::json;
    ///
    /// let mut target = Value::from(json!({"keep": true}));
    /// target.set_path(&[PathSegment::key("a"), PathSegment::key("b")], Value::from(1));
    /// assert_eq!(target, Value::from(json!({"keep": true, "a": {"b": 1}})));
    /// ```
    pub fn set_path(&mut self, path: &[PathSegment], value: Self) {
        let Some((last, parents)) = path.split_last() else {
            *self = value;
            return;
        };
        if !self.is_container() {
            *self = Self::empty_object();
        }
        let mut cursor = self.clone();
        for segment in parents {
            cursor = cursor.child_container(segment);
        }
        cursor.set(last, value);
    }

    /// Returns the container at `segment`, creating an empty mapping there
    /// when the slot is missing or holds a scalar.
    fn child_container(&self, segment: &PathSegment) -> Self {
        let existing = self.get(segment);
        if existing.is_container() {
            return existing;
        }
        let created = Self::empty_object();
        self.set(segment, created.clone());
        created
    }
}

impl PartialEq for Value {
    /// Structural equality; callables compare by identity.
    ///
    /// Containers that are the same handle compare equal without being
    /// walked. Distinct handles forming cycles are compared structurally and
    /// therefore must not be cyclic.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(lhs), Self::Bool(rhs)) => lhs == rhs,
            (Self::Number(lhs), Self::Number(rhs)) => lhs == rhs,
            (Self::String(lhs), Self::String(rhs)) => lhs == rhs,
            (Self::Callable(lhs), Self::Callable(rhs)) => lhs.ptr_eq(rhs),
            (Self::Array(lhs), Self::Array(rhs)) => {
                Rc::ptr_eq(lhs, rhs) || *lhs.borrow() == *rhs.borrow()
            }
            (Self::Object(lhs), Self::Object(rhs)) => {
                Rc::ptr_eq(lhs, rhs) || *lhs.borrow() == *rhs.borrow()
            }
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::Number(Number::from(value))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for Value {
    /// Non-finite floats have no numeric representation and become `Null`.
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Callable> for Value {
    fn from(value: Callable) -> Self {
        Self::Callable(value)
    }
}

impl From<Vec<Self>> for Value {
    fn from(value: Vec<Self>) -> Self {
        Self::Array(Rc::new(RefCell::new(value)))
    }
}

impl From<IndexMap<String, Self>> for Value {
    fn from(value: IndexMap<String, Self>) -> Self {
        Self::Object(Rc::new(RefCell::new(value)))
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl FromIterator<Self> for Value {
    fn from_iter<I: IntoIterator<Item = Self>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}
