//! Structure-guided extraction and reshaping of nested data.
//!
//! A *template* mirrors the shape of the data it reads. Its leaves are
//! placeholders saying where each value found at that location should go:
//! text names a binding, a number names a sequence position, and a
//! [`Callable`] computes the result. [`extract`] collects those bindings from
//! a source, and [`pipe`] feeds them into a second template to produce a new
//! shape.
//!
//! # Examples
//!
//! ```rust
//! use shapecast::{Value, extract, pipe};
//! use serde_json::json;
//!
//! let source = Value::from(json!({"id": 42, "info": {"name": "Ann"}}));
//!
//! let template = Value::from(json!({"id": "userId", "info": {"name": "userName"}}));
//! assert_eq!(
//!     extract(&template, &source).to_json()?,
//!     json!({"userId": 42, "userName": "Ann"})
//! );
//!
//! let output = Value::from(json!({"user": {"ref": "userId", "label": "userName"}}));
//! assert_eq!(
//!     pipe(&template, &output, &source).to_json()?,
//!     json!({"user": {"ref": 42, "label": "Ann"}})
//! );
//! # Ok::<_, shapecast::ShapeError>(())
//! ```

mod callable;
mod config;
mod discover;
mod error;
mod extract;
mod pipe;
pub mod value;

pub use callable::{Callable, Invocation, named, named_by};
pub use config::{DEFAULT_MAX_POSITION, MapperConfig};
pub use discover::{
    PlaceholderDescriptor, PlaceholderKind, discover, discover_with, is_default_placeholder,
};
pub use error::{ShapeError, ShapeResult};
pub use extract::{Extractor, extract};
pub use pipe::{Pipe, pipe};
pub use value::{PathSegment, SharedArray, SharedObject, Value, ValueKind, display_path};
