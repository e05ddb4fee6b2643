//! Host Value Representation
//!
//! Values exchanged with the host: numbers and (possibly nested) vectors.
//! The host owns these; marshaling only reads them, and the encoder builds
//! fresh ones for results.

use serde::{Deserialize, Serialize};

/// Host value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Integer-tagged number
    Integer(i64),

    /// Float-tagged number (IEEE 754)
    Float(f64),

    /// Fixed-length sequence of numbers or of further vectors
    Vector(Vec<Value>),
}

impl Value {
    /// Host type tag, as the host would report it
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Vector(_) => "vector",
        }
    }

    /// Borrow the elements of a vector value
    pub fn as_vector(&self) -> Option<&[Value]> {
        match self {
            Value::Vector(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, Value::Vector(_))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Vector(items.into_iter().map(Into::into).collect())
    }
}
