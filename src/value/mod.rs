//! Value module - In-memory representation of YAML/JSON values.
//!
//! This module provides the value tree both merge and flatten operate on,
//! along with JSON and YAML codecs.

mod value;

pub use value::*;
