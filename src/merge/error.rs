//! Error types for merge operations.

use crate::value::Shape;
use thiserror::Error;

/// UnsupportedMergeError is returned when two values have shapes with no
/// merge rule, such as a map against a scalar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: don't know how to merge {first} with {second}")]
pub struct UnsupportedMergeError {
    /// Dotted key path to the failing node, `.` for the root.
    pub path: String,
    /// Shape of the value from the first operand.
    pub first: Shape,
    /// Shape of the value from the second operand.
    pub second: Shape,
}

impl UnsupportedMergeError {
    pub fn new(path: impl Into<String>, first: Shape, second: Shape) -> Self {
        UnsupportedMergeError {
            path: path.into(),
            first,
            second,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = UnsupportedMergeError::new(".spec.replicas", Shape::Map, Shape::Int);
        assert_eq!(
            err.to_string(),
            ".spec.replicas: don't know how to merge map with int"
        );
    }
}
