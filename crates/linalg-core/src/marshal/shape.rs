//! Shape inspection
//!
//! Shapes are inferred from the value itself. [`shape`] only inspects row 0;
//! [`validated_shape`] additionally walks every row and is what the engine
//! uses before building buffers.

use std::fmt;

use crate::error::{LinalgError, LinalgResult};
use crate::value::Value;

/// Inferred (rows, cols) of a vector value. `cols == 0` means one-dimensional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Shape { rows, cols }
    }

    /// True when element 0 was a vector
    pub fn is_matrix(&self) -> bool {
        self.cols > 0
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn as_pair(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Outer elements of `value`, or a type mismatch for a bare number.
pub(crate) fn elements(value: &Value) -> LinalgResult<&[Value]> {
    value.as_vector().ok_or(LinalgError::TypeMismatch {
        expected: "vector",
        found: value.type_name(),
    })
}

/// Infer the shape from the outer length and the type of element 0.
pub fn shape(value: &Value) -> LinalgResult<Shape> {
    let rows = elements(value)?;
    let cols = match rows.first() {
        Some(Value::Vector(first)) => first.len(),
        _ => 0,
    };
    Ok(Shape::new(rows.len(), cols))
}

/// Infer the shape and verify every row agrees with it.
pub fn validated_shape(value: &Value) -> LinalgResult<Shape> {
    let shape = shape(value)?;
    let rows = elements(value)?;

    if shape.is_matrix() || rows.first().is_some_and(Value::is_vector) {
        for (i, row) in rows.iter().enumerate() {
            match row {
                Value::Vector(cells) if cells.len() == shape.cols => {}
                Value::Vector(cells) => {
                    return Err(LinalgError::shape(format!(
                        "row {} has {} elements, expected {}",
                        i,
                        cells.len(),
                        shape.cols
                    )));
                }
                other => {
                    return Err(LinalgError::shape(format!(
                        "row {} is a {}, expected a vector of {} elements",
                        i,
                        other.type_name(),
                        shape.cols
                    )));
                }
            }
        }
    } else if let Some(i) = rows.iter().position(Value::is_vector) {
        return Err(LinalgError::shape(format!(
            "element {} is a nested vector in a one-dimensional vector",
            i
        )));
    }

    Ok(shape)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(json: &str) -> Value {
        serde_json::from_str(json).expect("test value")
    }

    #[test]
    fn one_by_one_matrix() {
        assert_eq!(shape(&v("[[3]]")).unwrap(), Shape::new(1, 1));
    }

    #[test]
    fn flat_vector_has_zero_cols() {
        assert_eq!(shape(&v("[1, 2, 3, 4]")).unwrap(), Shape::new(4, 0));
        assert_eq!(shape(&v("[]")).unwrap(), Shape::new(0, 0));
    }

    #[test]
    fn inference_only_looks_at_first_row() {
        // inference trusts row 0; validation catches the short row
        let ragged = v("[[1, 2, 3], [4, 5]]");
        assert_eq!(shape(&ragged).unwrap(), Shape::new(2, 3));
        let err = validated_shape(&ragged).unwrap_err();
        assert_eq!(
            err,
            LinalgError::ShapeMismatch("row 1 has 2 elements, expected 3".into())
        );
    }

    #[test]
    fn scalar_row_in_matrix_rejected() {
        assert!(matches!(
            validated_shape(&v("[[1, 2], 3]")),
            Err(LinalgError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn nested_element_in_flat_vector_rejected() {
        assert!(matches!(
            validated_shape(&v("[1, [2], 3]")),
            Err(LinalgError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn empty_first_row_is_validated_too() {
        assert!(matches!(
            validated_shape(&v("[[], [1]]")),
            Err(LinalgError::ShapeMismatch(_))
        ));
        assert_eq!(validated_shape(&v("[[], []]")).unwrap(), Shape::new(2, 0));
    }

    #[test]
    fn number_is_not_a_shape() {
        assert!(matches!(
            shape(&Value::Integer(1)),
            Err(LinalgError::TypeMismatch { .. })
        ));
    }
}
