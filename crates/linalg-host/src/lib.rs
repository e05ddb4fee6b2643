//! Host crate: binding the linear-algebra entry points into a host
//!
//! The host itself is an external collaborator; [`Host`] is the narrow
//! surface this module needs from it (bind a function, provide a feature).
//! [`module_init`] is the module's init entry point. [`Runtime`] is an
//! in-process host used by the CLI and tests; it contains no policy and
//! only performs the mechanical name -> handler dispatch.

use std::collections::BTreeSet;

use tracing::{debug, info};

pub use linalg_core::{Engine, LinalgConfig, LinalgError, LinalgResult, Value};
pub use linalg_core::function::{FunctionSpec, FunctionTable, BUILTINS, FEATURE};

/// What a host must offer for the module to install itself.
pub trait Host {
    /// Set the function cell of `spec.name`
    fn bind_function(&mut self, spec: FunctionSpec);

    /// Announce `feature` as loaded
    fn provide(&mut self, feature: &str);
}

/// Bind every built-in, then provide the feature.
pub fn module_init<H: Host + ?Sized>(host: &mut H) -> LinalgResult<()> {
    for spec in BUILTINS {
        host.bind_function(spec);
    }
    host.provide(FEATURE);
    info!(feature = FEATURE, functions = BUILTINS.len(), "module initialised");
    Ok(())
}

/// In-process host owning the engine and the bound function table
#[derive(Debug)]
pub struct Runtime {
    engine: Engine,
    functions: FunctionTable,
    features: BTreeSet<String>,
}

impl Runtime {
    /// Empty runtime: nothing bound, nothing provided
    pub fn new(config: LinalgConfig) -> Self {
        Runtime {
            engine: Engine::new(config),
            functions: FunctionTable::new(),
            features: BTreeSet::new(),
        }
    }

    /// Runtime with the module already initialised
    pub fn with_module(config: LinalgConfig) -> LinalgResult<Self> {
        let mut runtime = Runtime::new(config);
        module_init(&mut runtime)?;
        Ok(runtime)
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    pub fn is_provided(&self, feature: &str) -> bool {
        self.features.contains(feature)
    }

    /// Docstring and arity of a bound function
    pub fn describe(&self, name: &str) -> Option<&FunctionSpec> {
        self.functions.get(name)
    }

    /// Call a bound function by name
    pub fn funcall(&self, name: &str, args: &[Value]) -> LinalgResult<Value> {
        debug!(name, argc = args.len(), "funcall");
        self.functions.call(&self.engine, name, args)
    }
}

impl Host for Runtime {
    fn bind_function(&mut self, spec: FunctionSpec) {
        self.functions.register(spec);
    }

    fn provide(&mut self, feature: &str) {
        self.features.insert(feature.to_string());
    }
}
