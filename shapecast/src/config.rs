//! Options shared by extraction and piping.

use serde::{Deserialize, Serialize};

use crate::ShapeResult;

/// Highest sequence position filled by the default configuration.
pub const DEFAULT_MAX_POSITION: usize = 1 << 16;

/// Tunables for [`crate::Extractor`] and [`crate::Pipe`].
///
/// The default is what the free functions [`crate::extract`] and
/// [`crate::pipe`] use: positions above [`DEFAULT_MAX_POSITION`] are skipped.
///
/// # Examples
///
/// ```rust
/// use shapecast::MapperConfig;
/// use serde_json::json;
///
/// let config = MapperConfig::from_value(json!({"max_position": 64}))?;
/// assert_eq!(config, MapperConfig::new().with_max_position(64));
/// assert!(config.allows_position(64));
/// assert!(!config.allows_position(65));
/// # Ok::<_, shapecast::ShapeError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapperConfig {
    /// Highest sequence position extraction will fill; `None` for no bound.
    ///
    /// Numeric placeholders, and positional entries returned by callables,
    /// beyond this bound are skipped so a stray large number in a template
    /// cannot allocate an enormous sequence of holes. Lifting the bound makes
    /// the caller responsible for keeping template positions small.
    pub max_position: Option<usize>,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl MapperConfig {
    /// The default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_position: Some(DEFAULT_MAX_POSITION),
        }
    }

    /// Configuration without a position bound.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self { max_position: None }
    }

    /// Bound the highest sequence position extraction will fill.
    #[must_use]
    pub const fn with_max_position(mut self, max_position: usize) -> Self {
        self.max_position = Some(max_position);
        self
    }

    /// Whether `position` is within the configured bound.
    #[must_use]
    pub const fn allows_position(&self, position: usize) -> bool {
        match self.max_position {
            Some(max) => position <= max,
            None => true,
        }
    }

    /// Deserialise configuration from a JSON value.
    ///
    /// Missing fields take their defaults; unknown fields are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ShapeError::Config`] when `value` does not describe a
    /// configuration.
    pub fn from_value(value: serde_json::Value) -> ShapeResult<Self> {
        Ok(serde_json::from_value(value)?)
    }
}
