//! Path segments addressing entries inside container values.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// One step along a route from a template root to a nested value.
///
/// Mapping entries are addressed by [`PathSegment::Key`] and sequence
/// positions by [`PathSegment::Index`]. Lookups are lenient across the two: a
/// key holding a canonical decimal index addresses a sequence position, and an
/// index addresses a mapping entry by its decimal text.
///
/// # Examples
///
/// ```rust
/// use shapecast::PathSegment;
///
/// assert_eq!(PathSegment::key("7").as_index(), Some(7));
/// assert_eq!(PathSegment::key("07").as_index(), None);
/// assert_eq!(PathSegment::Index(3).to_key(), "3");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Position inside an ordered sequence.
    Index(usize),
    /// Key inside a keyed mapping.
    Key(String),
}

impl PathSegment {
    /// Build a key segment.
    #[must_use]
    pub fn key(key: impl Into<String>) -> Self {
        Self::Key(key.into())
    }

    /// Segment addressed by a numeric placeholder.
    ///
    /// Non-negative integral numbers become positions; anything else is kept
    /// as its decimal text so it can still name a mapping entry.
    #[must_use]
    pub fn from_number(number: &Number) -> Self {
        number_to_index(number).map_or_else(|| Self::Key(number.to_string()), Self::Index)
    }

    /// Returns the sequence position this segment addresses, if any.
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(*index),
            Self::Key(key) => canonical_index(key),
        }
    }

    /// Returns the mapping key this segment addresses.
    #[must_use]
    pub fn to_key(&self) -> Cow<'_, str> {
        match self {
            Self::Index(index) => Cow::Owned(index.to_string()),
            Self::Key(key) => Cow::Borrowed(key.as_str()),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Key(key) => f.write_str(key),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(value: &str) -> Self {
        Self::Key(value.to_owned())
    }
}

impl From<String> for PathSegment {
    fn from(value: String) -> Self {
        Self::Key(value)
    }
}

impl From<usize> for PathSegment {
    fn from(value: usize) -> Self {
        Self::Index(value)
    }
}

/// Render a path as dot-separated segments, `(root)` when empty.
///
/// ```rust
/// use shapecast::{PathSegment, display_path};
///
/// let path = [PathSegment::key("items"), PathSegment::Index(2)];
/// assert_eq!(display_path(&path), "items.2");
/// assert_eq!(display_path(&[]), "(root)");
/// ```
#[must_use]
pub fn display_path(path: &[PathSegment]) -> String {
    if path.is_empty() {
        return String::from("(root)");
    }
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

/// Parses `key` as a canonical decimal index (`"0"`, `"12"`, never `"012"`).
fn canonical_index(key: &str) -> Option<usize> {
    let canonical = !key.is_empty()
        && key.bytes().all(|byte| byte.is_ascii_digit())
        && (key == "0" || !key.starts_with('0'));
    if canonical { key.parse().ok() } else { None }
}

/// Converts a number to a sequence position when it is a non-negative integer.
///
/// Integral floats such as `2.0` count as positions.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "range and integrality are checked before the cast"
)]
pub(crate) fn number_to_index(number: &Number) -> Option<usize> {
    if let Some(unsigned) = number.as_u64() {
        return usize::try_from(unsigned).ok();
    }
    if number.is_i64() {
        return None;
    }
    let float = number.as_f64()?;
    let integral = float.is_finite() && float.fract() == 0.0 && float >= 0.0;
    (integral && float <= usize::MAX as f64).then(|| float as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0", Some(0))]
    #[case("42", Some(42))]
    #[case("042", None)]
    #[case("", None)]
    #[case("-1", None)]
    #[case("1.5", None)]
    #[case("name", None)]
    fn keys_parse_only_canonical_indices(#[case] key: &str, #[case] expected: Option<usize>) {
        assert_eq!(PathSegment::key(key).as_index(), expected);
    }

    #[rstest]
    #[case(Number::from(3_u64), Some(3))]
    #[case(Number::from(-1_i64), None)]
    #[case(Number::from_f64(2.0).expect("finite"), Some(2))]
    #[case(Number::from_f64(2.5).expect("finite"), None)]
    #[case(Number::from_f64(-0.5).expect("finite"), None)]
    fn numbers_convert_to_positions(#[case] number: Number, #[case] expected: Option<usize>) {
        assert_eq!(number_to_index(&number), expected);
    }

    #[test]
    fn fractional_numbers_become_keys() {
        let number = Number::from_f64(1.5).expect("finite");
        assert_eq!(PathSegment::from_number(&number), PathSegment::key("1.5"));
    }

    #[test]
    fn segments_round_trip_through_serde() {
        let path = vec![PathSegment::key("items"), PathSegment::Index(1)];
        let json = serde_json::to_value(&path).expect("serialise path");
        assert_eq!(json, serde_json::json!(["items", 1]));
        let back: Vec<PathSegment> = serde_json::from_value(json).expect("deserialise path");
        assert_eq!(back, path);
    }
}
