//! Test helpers shared across crates in the shapecast workspace.
//!
//! [`text`] normalises values captured from behavioural step text, and
//! [`json`] turns those captures into JSON trees with readable failures.

pub mod json;
pub mod text;
