//! Result encoding back into host values

use super::buffer::DenseBuffer;
use crate::value::Value;

/// Dimensionality of the host value produced for a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One flat vector of `rows * cols` floats
    Vector,
    /// `rows` vectors of `cols` floats each
    Matrix,
}

/// Build a host value from `buf`. Every element is encoded as a float.
pub fn encode(buf: &DenseBuffer, layout: Layout) -> Value {
    match layout {
        Layout::Vector => Value::Vector(buf.as_slice().iter().copied().map(Value::Float).collect()),
        Layout::Matrix => {
            let mut outer = Vec::with_capacity(buf.rows());
            for i in 0..buf.rows() {
                let row: Vec<Value> = (0..buf.cols()).map(|j| Value::Float(buf.get(i, j))).collect();
                outer.push(Value::Vector(row));
            }
            Value::Vector(outer)
        }
    }
}
