//! Marshaling between host values and dense buffers
//!
//! Decode: [`extract`] per element, [`validated_shape`] per input, then
//! [`matrix_to_buffer`] / [`vector_to_buffer`]. Encode: [`encode`].

pub mod buffer;
pub mod encode;
pub mod scalar;
pub mod shape;

pub use buffer::{matrix_to_buffer, vector_to_buffer, DenseBuffer};
pub use encode::{encode, Layout};
pub use scalar::extract;
pub use shape::{shape, validated_shape, Shape};
