//! Placeholder discovery over template values.
//!
//! Discovery walks a template and reports the location of every leaf the
//! classifier accepts. Containers are scaffolding and are descended into;
//! a container already on the current route from the root is skipped, so
//! self-referential templates terminate.

use std::collections::HashSet;

use serde_json::Number;

use crate::{Callable, PathSegment, Value};

/// A placeholder found in a template together with its location.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaceholderDescriptor {
    /// Route of keys from the template root to the placeholder.
    pub path: Vec<PathSegment>,
    /// The placeholder value itself.
    pub placeholder: Value,
}

/// What a placeholder asks the engine to do.
#[derive(Clone, Copy, Debug)]
pub enum PlaceholderKind<'a> {
    /// Text placeholder: binds a value under this name.
    Name(&'a str),
    /// Numeric placeholder: binds a value at this position.
    Position(&'a Number),
    /// Function placeholder: computes the value.
    Function(&'a Callable),
    /// Any other placeholder; contributes nothing.
    Inert,
}

impl PlaceholderDescriptor {
    /// Pair a path with its placeholder.
    #[must_use]
    pub const fn new(path: Vec<PathSegment>, placeholder: Value) -> Self {
        Self { path, placeholder }
    }

    /// Classify the placeholder.
    #[must_use]
    pub fn kind(&self) -> PlaceholderKind<'_> {
        match &self.placeholder {
            Value::String(name) => PlaceholderKind::Name(name.as_str()),
            Value::Number(number) => PlaceholderKind::Position(number),
            Value::Callable(callable) => PlaceholderKind::Function(callable),
            _ => PlaceholderKind::Inert,
        }
    }

    /// Last segment of the path, or the empty text for a root placeholder.
    #[must_use]
    pub fn last_key(&self) -> String {
        self.path
            .last()
            .map(|segment| segment.to_key().into_owned())
            .unwrap_or_default()
    }
}

/// The default classifier: any non-container value, `Null` included.
#[must_use]
pub const fn is_default_placeholder(value: &Value) -> bool {
    value.is_null() || !value.is_container()
}

/// Find every placeholder in `template` using [`is_default_placeholder`].
///
/// Descriptors are returned in enumeration order: mapping entries in
/// insertion order, sequence entries by index, depth first.
///
/// # Examples
///
/// ```rust
/// use shapecast::{PathSegment, Value, discover};
/// use serde_json::json;
///
/// let template = Value::from(json!({"id": "userId", "tags": ["first", "second"]}));
/// let paths: Vec<_> = discover(&template).into_iter().map(|d| d.path).collect();
/// assert_eq!(
///     paths,
///     vec![
///         vec![PathSegment::key("id")],
///         vec![PathSegment::key("tags"), PathSegment::Index(0)],
///         vec![PathSegment::key("tags"), PathSegment::Index(1)],
///     ]
/// );
/// ```
#[must_use]
pub fn discover(template: &Value) -> Vec<PlaceholderDescriptor> {
    discover_with(template, is_default_placeholder)
}

/// Find every placeholder in `template` accepted by `is_placeholder`.
///
/// A scalar rejected by the classifier yields nothing. Containers the
/// classifier accepts are reported whole instead of being descended into.
/// The walk keeps an explicit stack, so template depth is bounded by memory
/// rather than by the call stack.
pub fn discover_with<F>(template: &Value, is_placeholder: F) -> Vec<PlaceholderDescriptor>
where
    F: Fn(&Value) -> bool,
{
    if is_placeholder(template) {
        return vec![PlaceholderDescriptor::new(Vec::new(), template.clone())];
    }
    if !template.is_container() {
        return Vec::new();
    }

    let mut found = Vec::new();
    let mut route: Vec<PathSegment> = Vec::new();
    let mut ancestors: HashSet<*const ()> = HashSet::new();
    let mut frames = vec![Frame::enter(template, &mut ancestors)];
    while let Some(frame) = frames.last_mut() {
        let Some((segment, child)) = frame.entries.next() else {
            if let Some(id) = frames.pop().and_then(|done| done.container.container_id()) {
                ancestors.remove(&id);
            }
            route.pop();
            continue;
        };
        if child
            .container_id()
            .is_some_and(|id| ancestors.contains(&id))
        {
            tracing::trace!(segment = %segment, "skipping cyclic template branch");
            continue;
        }
        if is_placeholder(&child) {
            let mut path = route.clone();
            path.push(segment);
            found.push(PlaceholderDescriptor::new(path, child));
        } else if child.is_container() {
            route.push(segment);
            frames.push(Frame::enter(&child, &mut ancestors));
        }
    }
    tracing::trace!(count = found.len(), "discovered template placeholders");
    found
}

/// A container being walked and the entries still to visit.
struct Frame {
    container: Value,
    entries: std::vec::IntoIter<(PathSegment, Value)>,
}

impl Frame {
    /// Start walking `container`, recording it as an ancestor of its entries.
    fn enter(container: &Value, ancestors: &mut HashSet<*const ()>) -> Self {
        if let Some(id) = container.container_id() {
            ancestors.insert(id);
        }
        Self {
            container: container.clone(),
            entries: container.entries().into_iter(),
        }
    }
}

#[cfg(test)]
mod tests;
