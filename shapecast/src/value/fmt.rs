//! Cycle-safe `Debug` rendering for values.

use std::fmt;

use super::Value;

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Guarded {
            value: self,
            ancestors: Vec::new(),
        }
        .fmt(f)
    }
}

/// Renders a value while tracking the containers above it, so a container
/// reachable from itself prints as `<cycle>` instead of recursing forever.
struct Guarded<'a> {
    value: &'a Value,
    ancestors: Vec<*const ()>,
}

impl Guarded<'_> {
    fn child<'b>(&self, value: &'b Value, id: *const ()) -> Guarded<'b> {
        let mut ancestors = self.ancestors.clone();
        ancestors.push(id);
        Guarded { value, ancestors }
    }
}

impl fmt::Debug for Guarded<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(id) = self.value.container_id() {
            if self.ancestors.contains(&id) {
                return f.write_str("<cycle>");
            }
        }
        match self.value {
            Value::Null => f.write_str("Null"),
            Value::Bool(flag) => write!(f, "Bool({flag})"),
            Value::Number(number) => write!(f, "Number({number})"),
            Value::String(text) => write!(f, "String({text:?})"),
            Value::Callable(callable) => fmt::Debug::fmt(callable, f),
            Value::Array(items) => {
                let Ok(items) = items.try_borrow() else {
                    return f.write_str("Array <borrowed>");
                };
                let id = self.value.container_id().unwrap_or(std::ptr::null());
                f.write_str("Array ")?;
                f.debug_list()
                    .entries(items.iter().map(|item| self.child(item, id)))
                    .finish()
            }
            Value::Object(map) => {
                let Ok(map) = map.try_borrow() else {
                    return f.write_str("Object <borrowed>");
                };
                let id = self.value.container_id().unwrap_or(std::ptr::null());
                f.write_str("Object ")?;
                f.debug_map()
                    .entries(map.iter().map(|(key, item)| (key, self.child(item, id))))
                    .finish()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{PathSegment, Value};

    #[test]
    fn renders_nested_values() {
        let value = Value::object([("a", Value::array([Value::from(1), Value::Null]))]);
        assert_eq!(
            format!("{value:?}"),
            r#"Object {"a": Array [Number(1), Null]}"#
        );
    }

    #[test]
    fn self_reference_renders_as_cycle_marker() {
        let value = Value::object([("name", "loop")]);
        value.set(&PathSegment::key("me"), value.clone());
        assert_eq!(
            format!("{value:?}"),
            r#"Object {"name": String("loop"), "me": <cycle>}"#
        );
    }
}
