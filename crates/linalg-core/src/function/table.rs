//! Function Table
//!
//! Explicit name -> entry table. Lookups of unbound names and calls with
//! the wrong argument count fail before any handler runs.

use std::collections::BTreeMap;

use tracing::debug;

use super::spec::FunctionSpec;
use crate::engine::Engine;
use crate::error::{LinalgError, LinalgResult};
use crate::value::Value;

#[derive(Debug, Default)]
pub struct FunctionTable {
    entries: BTreeMap<&'static str, FunctionSpec>,
}

impl FunctionTable {
    /// Empty table
    pub fn new() -> Self {
        FunctionTable {
            entries: BTreeMap::new(),
        }
    }

    /// Bind `spec` under its name, replacing any previous binding.
    pub fn register(&mut self, spec: FunctionSpec) -> Option<FunctionSpec> {
        debug!(name = spec.name, min = spec.min_args, max = spec.max_args, "bind function");
        self.entries.insert(spec.name, spec)
    }

    pub fn get(&self, name: &str) -> Option<&FunctionSpec> {
        self.entries.get(name)
    }

    /// Bound names in sorted order
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.keys().copied().collect()
    }

    /// Look up `name`, check arity, run the handler.
    pub fn call(&self, engine: &Engine, name: &str, args: &[Value]) -> LinalgResult<Value> {
        let spec = self
            .get(name)
            .ok_or_else(|| LinalgError::UnknownFunction(name.to_string()))?;

        if !spec.accepts(args.len()) {
            return Err(LinalgError::ArityMismatch {
                name: name.to_string(),
                min: spec.min_args,
                max: spec.max_args,
                got: args.len(),
            });
        }

        (spec.handler)(engine, args)
    }
}
