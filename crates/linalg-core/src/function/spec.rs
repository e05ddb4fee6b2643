//! Callable entry descriptors
//!
//! A name, a docstring, an arity window and a plain function pointer.
//! No dispatch logic here.

use std::fmt;

use crate::engine::Engine;
use crate::error::LinalgResult;
use crate::value::Value;

/// Handler signature for a bound function. Receives the engine and the
/// already-arity-checked argument slice.
pub type Handler = fn(&Engine, &[Value]) -> LinalgResult<Value>;

/// Descriptor of a function exposed to the host
#[derive(Clone, Copy)]
pub struct FunctionSpec {
    pub name: &'static str,
    pub doc: &'static str,
    pub min_args: usize,
    pub max_args: usize,
    pub handler: Handler,
}

impl FunctionSpec {
    pub fn accepts(&self, argc: usize) -> bool {
        (self.min_args..=self.max_args).contains(&argc)
    }
}

impl fmt::Debug for FunctionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionSpec")
            .field("name", &self.name)
            .field("min_args", &self.min_args)
            .field("max_args", &self.max_args)
            .finish_non_exhaustive()
    }
}
