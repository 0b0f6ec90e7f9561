//! # Struct Merge
//!
//! Structural merge and path flattening for dynamically-shaped values.
//!
//! This library merges two JSON/YAML-like trees (scalars, lists and maps,
//! arbitrarily nested) into a new tree, and flattens nested maps into a
//! single level keyed by joined paths. Both operations are pure: inputs are
//! borrowed and never modified.
//!
//! ## Modules
//!
//! - [`value`] - In-memory representation of YAML/JSON values
//! - [`merge`] - Structural merge of two values
//! - [`flatten`] - Flattening of nested maps into key paths

pub mod flatten;
pub mod merge;
pub mod value;

pub use flatten::{flatten, DEFAULT_SEPARATOR};
pub use merge::{merge, UnsupportedMergeError};
pub use value::{Map, Shape, Value};
