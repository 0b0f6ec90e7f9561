//! Flatten module - Collapses nested maps into dotted key paths.

mod flattener;

pub use flattener::*;
