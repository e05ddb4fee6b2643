//! Scalar extraction

use crate::error::{LinalgError, LinalgResult};
use crate::value::Value;

/// Convert a numeric host value to `f64`.
///
/// Integers are cast, floats pass through unchanged. A vector in scalar
/// position is a [`LinalgError::TypeMismatch`].
pub fn extract(value: &Value) -> LinalgResult<f64> {
    match value {
        Value::Integer(i) => Ok(*i as f64),
        Value::Float(x) => Ok(*x),
        Value::Vector(_) => Err(LinalgError::TypeMismatch {
            expected: "number",
            found: value.type_name(),
        }),
    }
}
