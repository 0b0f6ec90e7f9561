//! Merge module - Structural merge of dynamically-shaped values.
//!
//! This module combines two value trees into a new one without touching
//! either input.

mod error;
mod merger;


pub use error::*;
pub use merger::*;
