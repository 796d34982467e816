//! Deep copies of value trees.

use std::collections::HashMap;

use indexmap::IndexMap;

use super::{SharedArray, SharedObject, Value};

type Memo = HashMap<*const (), Value>;

impl Value {
    /// Copy this value into freshly allocated containers.
    ///
    /// Scalars and callables are shared with the original. Containers that
    /// appear several times, including self-references, are copied once, so
    /// the clone has the same sharing and cycle structure as the original
    /// without aliasing any of its containers. The copy is made with an
    /// explicit work list, so depth is bounded by memory.
    ///
    /// ```rust
    /// use shapecast::{PathSegment, Value};
    ///
    /// let original = Value::object([("list", Value::array([1]))]);
    /// let copy = original.deep_clone();
    /// copy.get(&PathSegment::key("list")).set(&PathSegment::Index(1), Value::from(2));
    /// assert_eq!(original.get(&PathSegment::key("list")).len(), 1);
    /// ```
    #[must_use]
    pub fn deep_clone(&self) -> Self {
        let mut memo = Memo::new();
        let mut pending = Vec::new();
        let root = shell_for(self, &mut memo, &mut pending);
        while let Some((original, copy)) = pending.pop() {
            match (&original, &copy) {
                (Self::Array(items), Self::Array(fresh)) => {
                    let copied: Vec<Self> = items
                        .borrow()
                        .iter()
                        .map(|item| shell_for(item, &mut memo, &mut pending))
                        .collect();
                    *fresh.borrow_mut() = copied;
                }
                (Self::Object(map), Self::Object(fresh)) => {
                    let copied: IndexMap<String, Self> = map
                        .borrow()
                        .iter()
                        .map(|(key, item)| {
                            (key.clone(), shell_for(item, &mut memo, &mut pending))
                        })
                        .collect();
                    *fresh.borrow_mut() = copied;
                }
                _ => {}
            }
        }
        root
    }
}

/// Returns the copy standing in for `value`.
///
/// A container seen for the first time gets an empty shell of the same kind,
/// queued in `pending` until its entries are copied.
fn shell_for(value: &Value, memo: &mut Memo, pending: &mut Vec<(Value, Value)>) -> Value {
    let Some(id) = value.container_id() else {
        return value.clone();
    };
    if let Some(copied) = memo.get(&id) {
        return copied.clone();
    }
    let shell = if value.is_array() {
        Value::Array(SharedArray::default())
    } else {
        Value::Object(SharedObject::default())
    };
    memo.insert(id, shell.clone());
    pending.push((value.clone(), shell.clone()));
    shell
}
