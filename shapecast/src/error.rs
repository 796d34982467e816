//! Error types produced at the edges of the mapping engine.
//!
//! Extraction, piping, and discovery are total and never fail. Errors only
//! arise when values leave the engine (conversion into [`serde_json::Value`])
//! or when configuration is read from untyped data.

use thiserror::Error;

use crate::value::ValueKind;

/// Errors that can occur while converting values or reading configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ShapeError {
    /// A value has no JSON representation.
    #[error("value at '{path}' is a {kind} and has no JSON representation")]
    Unrepresentable {
        /// Dot-separated location of the offending value.
        path: String,
        /// Kind of the offending value.
        kind: ValueKind,
    },

    /// A container holds itself, so the tree is not finite.
    #[error("container at '{path}' refers back to one of its ancestors")]
    Cycle {
        /// Dot-separated location where the cycle closes.
        path: String,
    },

    /// Configuration data could not be deserialised.
    #[error("invalid mapper configuration: {source}")]
    Config {
        /// Underlying deserialisation failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Result alias used throughout the crate.
pub type ShapeResult<T> = Result<T, ShapeError>;

impl From<serde_json::Error> for ShapeError {
    fn from(source: serde_json::Error) -> Self {
        Self::Config { source }
    }
}
